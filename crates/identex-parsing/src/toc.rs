use once_cell::sync::Lazy;
use regex::Regex;

use identex_core::{PageRange, TocEntry};

/// Decides which lines of a table-of-contents page name real entries.
///
/// Closures `Fn(&str) -> bool` implement this directly.
pub trait EntryLineMatcher {
    fn is_entry_line(&self, line: &str) -> bool;
}

impl<F> EntryLineMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn is_entry_line(&self, line: &str) -> bool {
        self(line)
    }
}

/// Entries are numbered with Roman numerals, so every entry line starts with `I`
/// (`I.`, `II.`, `IV.`, `IX.` …). Lines for `V`, `X` and beyond are not recognized.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomanNumeralPrefix;

impl EntryLineMatcher for RomanNumeralPrefix {
    fn is_entry_line(&self, line: &str) -> bool {
        line.starts_with('I')
    }
}

/// Parse a table-of-contents page into `(title, start page)` pairs, in line order.
///
/// Lines are trimmed and filtered through `matcher`; kept lines must look like
/// `title <leaders> page` where leaders are dots, ellipses or spaces. Anything
/// else is skipped.
pub fn resolve_toc(toc_text: &str, matcher: &dyn EntryLineMatcher) -> Vec<TocEntry> {
    static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<title>.+?)\s+(?:[.…\s]+)\s*(?P<page>\d+)$").unwrap()
    });

    let mut entries = Vec::new();
    for line in toc_text.lines().map(str::trim) {
        if !matcher.is_entry_line(line) {
            continue;
        }
        let Some(caps) = ENTRY_LINE.captures(line) else {
            tracing::debug!(line, "skipping TOC line without title/page shape");
            continue;
        };
        let Ok(start_page) = caps["page"].parse::<usize>() else {
            tracing::debug!(line, "skipping TOC line with unparseable page number");
            continue;
        };
        entries.push(TocEntry {
            title: caps["title"].trim().to_string(),
            start_page,
        });
    }
    entries
}

/// Derive each entry's inclusive page range.
///
/// An entry ends the page before the next one starts; the last entry runs to
/// `total_pages`. Ranges are not re-sorted, so an out-of-order TOC yields
/// inverted ranges (see [`PageRange::is_well_formed`]).
pub fn page_ranges(entries: &[TocEntry], total_pages: usize) -> Vec<PageRange> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let end_page = entries
                .get(i + 1)
                .map_or(total_pages, |next| next.start_page.saturating_sub(1));
            PageRange::new(entry.start_page, end_page)
        })
        .collect()
}
