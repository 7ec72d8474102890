use identex_core::{
    BackendError, Dataset, Entry, ExtractionResult, ExtractionStats, PageRange,
    PageTextProvider, SectionKey, Sections, TocEntry, collapse_whitespace,
};

use crate::aliases::{AliasRule, SecondLineAka};
use crate::config::ParsingConfig;
use crate::headings::{LocatedSections, locate_with_policy};
use crate::toc::{EntryLineMatcher, RomanNumeralPrefix};
use crate::{ParsingError, bullets, clean, toc};

/// A configurable catalogue extraction pipeline.
///
/// Holds a [`ParsingConfig`] plus the two document-layout heuristics (which
/// TOC lines are entries, how aliases are written) and exposes each pipeline
/// step as a method. The default constructor uses built-in defaults.
pub struct EntryExtractor {
    config: ParsingConfig,
    entry_lines: Box<dyn EntryLineMatcher>,
    alias_rule: Box<dyn AliasRule>,
}

impl Default for EntryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self {
            config,
            entry_lines: Box::new(RomanNumeralPrefix),
            alias_rule: Box::new(SecondLineAka),
        }
    }

    /// Replace the recognizer for TOC entry lines.
    pub fn with_entry_line_matcher(mut self, matcher: impl EntryLineMatcher + 'static) -> Self {
        self.entry_lines = Box::new(matcher);
        self
    }

    /// Replace the alias heuristic.
    pub fn with_alias_rule(mut self, rule: impl AliasRule + 'static) -> Self {
        self.alias_rule = Box::new(rule);
        self
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Parse the table-of-contents page into entries (step 1).
    pub fn resolve_toc(&self, toc_text: &str) -> Vec<TocEntry> {
        toc::resolve_toc(toc_text, self.entry_lines.as_ref())
    }

    /// Concatenate the raw text of every page in `range` (step 2).
    ///
    /// The range is clamped to the document; pages outside it are skipped
    /// with a single warning.
    pub fn raw_text(
        &self,
        range: PageRange,
        provider: &dyn PageTextProvider,
    ) -> Result<String, BackendError> {
        let total = provider.page_count();
        if range.is_well_formed() && (range.start_page == 0 || range.end_page > total) {
            tracing::warn!(
                start = range.start_page,
                end = range.end_page,
                total,
                "entry range extends outside document, truncating"
            );
        }

        let mut pages = Vec::new();
        for page in range.pages_within(total) {
            pages.push(provider.page_text(page)?);
        }
        Ok(pages.join("\n\n"))
    }

    /// Strip boilerplate from raw entry text (step 3).
    pub fn clean(&self, raw: &str) -> String {
        clean::clean_with_config(raw, &self.config)
    }

    /// Alternate names from the cleaned entry text (step 4).
    pub fn aliases(&self, cleaned: &str) -> Vec<String> {
        let lines: Vec<&str> = cleaned
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        self.alias_rule.aliases(&lines)
    }

    /// Split cleaned entry text into subsections (step 5).
    pub fn locate(&self, cleaned: &str) -> LocatedSections {
        locate_with_policy(
            cleaned,
            &self.config.heading_specs,
            self.config.repeated_heading_policy,
        )
    }

    /// Split a subsection body into bullet items (step 6).
    pub fn segment(&self, block: &str) -> Vec<String> {
        bullets::segment(block)
    }

    /// Build a single entry from its raw, uncleaned text.
    pub fn entry_from_text(&self, title: &str, range: PageRange, raw: &str) -> Entry {
        self.assemble(title, range, raw).0
    }

    fn assemble(&self, title: &str, range: PageRange, raw: &str) -> (Entry, LocatedSections) {
        let cleaned = self.clean(raw);
        let aka = self.aliases(&cleaned);
        let located = self.locate(&cleaned);

        let true_identity = located
            .get(SectionKey::TrueIdentity)
            .map(collapse_whitespace)
            .unwrap_or_default();

        let mut sections = Sections::default();
        for key in SectionKey::ALL.into_iter().filter(SectionKey::is_bulleted) {
            if let Some(body) = located.get(key) {
                sections.set(key, self.segment(body));
            }
        }

        let entry = Entry {
            id: String::new(),
            title: title.to_string(),
            aka,
            true_identity,
            sections,
            tags: Vec::new(),
            related_ids: Vec::new(),
            sources: range.into(),
            authoring: self.config.authoring.clone(),
        };
        (entry, located)
    }

    /// Build one entry per TOC entry, in TOC order.
    pub fn build(
        &self,
        toc_entries: &[TocEntry],
        provider: &dyn PageTextProvider,
    ) -> Result<Vec<Entry>, ParsingError> {
        Ok(self
            .build_with_stats(toc_entries, provider)?
            .dataset
            .false_identities)
    }

    /// [`build`](Self::build), also reporting quality counters for the run.
    pub fn build_with_stats(
        &self,
        toc_entries: &[TocEntry],
        provider: &dyn PageTextProvider,
    ) -> Result<ExtractionResult, ParsingError> {
        let total_pages = provider.page_count();
        let ranges = toc::page_ranges(toc_entries, total_pages);

        let mut stats = ExtractionStats {
            total_pages,
            toc_entries: toc_entries.len(),
            ..Default::default()
        };
        let mut dataset = Dataset::default();

        for (toc_entry, range) in toc_entries.iter().zip(ranges) {
            if !range.is_well_formed() {
                tracing::warn!(
                    title = %toc_entry.title,
                    start = range.start_page,
                    end = range.end_page,
                    "inverted page range, TOC out of order?"
                );
                stats.inverted_ranges += 1;
            }

            let raw = self.raw_text(range, provider)?;
            let (entry, located) = self.assemble(&toc_entry.title, range, &raw);

            if located.is_empty() {
                tracing::debug!(title = %toc_entry.title, "no known headings in entry");
                stats.entries_without_headings += 1;
            }
            stats.repeated_headings += located.repeated().len();

            dataset.false_identities.push(entry);
        }

        Ok(ExtractionResult { dataset, stats })
    }

    /// Run the full pipeline: read the TOC page, resolve entries, build them.
    pub fn extract(&self, provider: &dyn PageTextProvider) -> Result<ExtractionResult, ParsingError> {
        let total = provider.page_count();
        let toc_page = self.config.toc_page;
        if toc_page == 0 || toc_page > total {
            return Err(ParsingError::MissingTocPage {
                page: toc_page,
                total,
            });
        }

        let toc_text = provider.page_text(toc_page)?;
        let toc_entries = self.resolve_toc(&toc_text);
        tracing::info!(
            entries = toc_entries.len(),
            pages = total,
            "resolved table of contents"
        );

        self.build_with_stats(&toc_entries, provider)
    }
}
