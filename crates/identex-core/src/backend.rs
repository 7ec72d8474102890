use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("page {page} is outside the document ({total} pages)")]
    PageOutOfRange { page: usize, total: usize },
}

/// Source of per-page plain text for an already opened document.
///
/// Implementors own the document for as long as they live; the extraction
/// pipeline in `identex_parsing::EntryExtractor` only asks for page counts
/// and page text. Page numbers are 1-based, matching the printed TOC.
pub trait PageTextProvider {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Plain text of a single page.
    fn page_text(&self, page: usize) -> Result<String, BackendError>;
}

/// In-memory provider over already extracted page text.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: Vec<String>,
}

impl StaticPages {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PageTextProvider for StaticPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Result<String, BackendError> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .cloned()
            .ok_or(BackendError::PageOutOfRange {
                page,
                total: self.pages.len(),
            })
    }
}
