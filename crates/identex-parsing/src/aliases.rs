use once_cell::sync::Lazy;
use regex::Regex;

/// Derives an entry's alternate names from its cleaned, non-empty lines.
pub trait AliasRule {
    fn aliases(&self, lines: &[&str]) -> Vec<String>;
}

/// The line right after the title reads `(a.k.a. Name, Other Name)`.
///
/// Any second line starting with `(a.k.a.` is taken at face value, so a title
/// followed by unrelated parenthesized text of that shape is misread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondLineAka;

impl AliasRule for SecondLineAka {
    fn aliases(&self, lines: &[&str]) -> Vec<String> {
        static AKA_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^a\.k\.a\.").unwrap());
        static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r",|/|;|\s+and\s+").unwrap());

        let Some(line) = lines.get(1).map(|l| l.trim()) else {
            return Vec::new();
        };
        if !line.to_lowercase().starts_with("(a.k.a.") {
            return Vec::new();
        }

        let inner = line.trim_matches(|c: char| c == '(' || c == ')').trim();
        let inner = AKA_TOKEN.replace(inner, "");
        SEPARATOR
            .split(&inner)
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// For documents that carry no alias line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAliases;

impl AliasRule for NoAliases {
    fn aliases(&self, _lines: &[&str]) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aka(lines: &[&str]) -> Vec<String> {
        SecondLineAka.aliases(lines)
    }

    #[test]
    fn test_aka_comma_list() {
        assert_eq!(aka(&["Title", "(a.k.a. X, Y)"]), vec!["X", "Y"]);
    }

    #[test]
    fn test_aka_mixed_separators() {
        assert_eq!(
            aka(&["The Pleaser", "(A.K.A. The Helper / Nice Girl; The Giver and Martyr)"]),
            vec!["The Helper", "Nice Girl", "The Giver", "Martyr"]
        );
    }

    #[test]
    fn test_aka_any_case_token() {
        assert_eq!(aka(&["Title", "(A.k.A. Solo)"]), vec!["Solo"]);
    }

    #[test]
    fn test_aka_word_inside_name_is_not_split() {
        assert_eq!(aka(&["Title", "(a.k.a. Sandman, Commander)"]), vec!["Sandman", "Commander"]);
    }

    #[test]
    fn test_no_aka_line() {
        assert!(aka(&["Title"]).is_empty());
        assert!(aka(&[]).is_empty());
        assert!(aka(&["Title", "You may:"]).is_empty());
        assert!(aka(&["Title", "(how it shows up in your life)"]).is_empty());
    }

    #[test]
    fn test_no_aliases_rule() {
        assert!(NoAliases.aliases(&["Title", "(a.k.a. X)"]).is_empty());
    }
}
