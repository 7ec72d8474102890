use std::path::Path;

use mupdf::{Document, TextPageFlags};

use identex_core::{BackendError, PageTextProvider};

/// MuPDF-based implementation of [`PageTextProvider`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// the parsing pipeline can be built and tested without it.
///
/// The document stays open for the lifetime of the backend and is closed
/// when it is dropped.
pub struct MupdfBackend {
    document: Document,
    page_count: usize,
}

impl MupdfBackend {
    /// Open the PDF at `path` and count its pages.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        let page_count = usize::try_from(page_count).unwrap_or(0);

        tracing::debug!(path = %path.display(), page_count, "opened document");
        Ok(Self {
            document,
            page_count,
        })
    }
}

impl PageTextProvider for MupdfBackend {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page: usize) -> Result<String, BackendError> {
        if page == 0 || page > self.page_count {
            return Err(BackendError::PageOutOfRange {
                page,
                total: self.page_count,
            });
        }
        let index = i32::try_from(page - 1).map_err(|_| BackendError::PageOutOfRange {
            page,
            total: self.page_count,
        })?;

        let page = self
            .document
            .load_page(index)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // Block/line iteration keeps one output line per layout line
        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }
        Ok(page_text)
    }
}
