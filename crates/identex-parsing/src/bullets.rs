use identex_core::collapse_whitespace;

use crate::clean::BULLET;

/// Split a cleaned subsection body into bullet items.
///
/// A line starting with `•` opens a new item; a lone `•` opens an empty item
/// whose text follows on the next lines. Every other line continues the open
/// item, so text before the first bullet becomes the first item. Items come
/// back whitespace-collapsed, non-empty, in document order.
pub fn segment(block: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(BULLET) {
            flush(&mut items, &mut current);
            let text = rest.trim_start_matches(BULLET).trim();
            if !text.is_empty() {
                current.push(text);
            }
            continue;
        }
        current.push(line);
    }
    flush(&mut items, &mut current);

    items
        .iter()
        .map(|item| collapse_whitespace(item))
        .filter(|item| !item.is_empty())
        .collect()
}

fn flush(items: &mut Vec<String>, current: &mut Vec<&str>) {
    if !current.is_empty() {
        items.push(current.join(" "));
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_bullets_with_continuation() {
        assert_eq!(
            segment("• Alpha\n• Beta\ncontinued"),
            vec!["Alpha".to_string(), "Beta continued".to_string()]
        );
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
        assert!(segment("\n \n\t\n").is_empty());
        assert!(segment("•\n•\n").is_empty());
    }

    #[test]
    fn test_segment_lone_bullet_text_on_next_line() {
        let block = "•\nNeed to be needed\n•\nFeel responsible for\nothers' moods\n";
        assert_eq!(
            segment(block),
            vec![
                "Need to be needed".to_string(),
                "Feel responsible for others' moods".to_string()
            ]
        );
    }

    #[test]
    fn test_segment_text_before_first_bullet() {
        assert_eq!(
            segment("I am loved\nexactly as I am\n• Second"),
            vec!["I am loved exactly as I am".to_string(), "Second".to_string()]
        );
    }

    #[test]
    fn test_segment_collapses_internal_whitespace() {
        let items = segment("•   Too   many\t spaces  \n   here   ");
        assert_eq!(items, vec!["Too many spaces here".to_string()]);
        for item in &items {
            assert!(!item.contains("  "));
        }
    }

    #[test]
    fn test_segment_skips_blank_lines_inside_item() {
        assert_eq!(
            segment("• First part\n\nsecond part\n\n• Next"),
            vec!["First part second part".to_string(), "Next".to_string()]
        );
    }

    #[test]
    fn test_segment_idempotent_on_clean_items() {
        let items = segment("• One\n• Two");
        let again: Vec<String> = items.iter().flat_map(|i| segment(i)).collect();
        assert_eq!(items, again);
    }
}
