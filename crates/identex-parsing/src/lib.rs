use thiserror::Error;

pub mod aliases;
pub mod bullets;
pub mod clean;
pub mod config;
pub mod extractor;
pub mod headings;
pub mod toc;

pub use aliases::{AliasRule, NoAliases, SecondLineAka};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::EntryExtractor;
pub use headings::{HeadingSpec, LocatedSections, RepeatedHeadingPolicy, default_heading_specs};
pub use toc::{EntryLineMatcher, RomanNumeralPrefix};
// Re-export domain types from core (canonical definitions live there)
pub use identex_core::{
    BackendError, Dataset, Entry, ExtractionResult, ExtractionStats, PageRange, PageTextProvider,
    SectionKey, TocEntry,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("table of contents page {page} is outside the document ({total} pages)")]
    MissingTocPage { page: usize, total: usize },
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Extract every catalogue entry from a document using default settings.
///
/// Pipeline:
/// 1. Read the table-of-contents page and resolve entry titles and start pages
/// 2. Derive each entry's page range from the next entry's start page
/// 3. Concatenate and clean the entry's page text
/// 4. Read aliases from the line after the title
/// 5. Split the text at the known subsection headings
/// 6. Segment each subsection into bullet items and assemble the record
pub fn extract_dataset(provider: &dyn PageTextProvider) -> Result<ExtractionResult, ParsingError> {
    EntryExtractor::new().extract(provider)
}
