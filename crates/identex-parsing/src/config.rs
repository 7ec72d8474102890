use regex::Regex;

use identex_core::{Authoring, SectionKey};

use crate::headings::{HeadingSpec, RepeatedHeadingPolicy, default_heading_specs};

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the entry extraction pipeline.
///
/// The heading table lives here rather than in a global so that a caller can
/// run the same pipeline over a document with differently worded headings.
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── toc.rs ──
    /// 1-based page holding the table of contents.
    pub(crate) toc_page: usize,

    // ── headings.rs ──
    pub(crate) heading_specs: Vec<HeadingSpec>,
    pub(crate) repeated_heading_policy: RepeatedHeadingPolicy,

    // ── clean.rs ──
    /// Boilerplate removed from every entry before heading detection.
    pub(crate) boilerplate_patterns: ListOverride<Regex>,
    /// Glyphs normalized to the canonical bullet `•`.
    pub(crate) bullet_glyphs: ListOverride<char>,

    // ── extractor.rs ──
    pub(crate) authoring: Authoring,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            toc_page: 2,
            heading_specs: default_heading_specs(),
            repeated_heading_policy: RepeatedHeadingPolicy::default(),
            boilerplate_patterns: ListOverride::Default,
            bullet_glyphs: ListOverride::Default,
            authoring: Authoring::default(),
        }
    }
}

impl ParsingConfig {
    pub fn toc_page(&self) -> usize {
        self.toc_page
    }

    pub fn heading_specs(&self) -> &[HeadingSpec] {
        &self.heading_specs
    }

    pub fn repeated_heading_policy(&self) -> RepeatedHeadingPolicy {
        self.repeated_heading_policy
    }

    pub fn authoring(&self) -> &Authoring {
        &self.authoring
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    toc_page: Option<usize>,
    heading_overrides: Vec<(SectionKey, String)>,
    repeated_heading_policy: Option<RepeatedHeadingPolicy>,
    boilerplate_patterns: ListOverrideBuilder,
    bullet_glyphs: ListOverride<char>,
    authoring: Option<Authoring>,
}

/// Helper for building `ListOverride<Regex>` from string patterns.
#[derive(Debug, Clone, Default)]
enum ListOverrideBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toc_page(mut self, page: usize) -> Self {
        self.toc_page = Some(page);
        self
    }

    // ── Headings ──

    /// Replace the heading pattern for one subsection. Matched case-insensitively.
    pub fn heading_regex(mut self, key: SectionKey, pattern: &str) -> Self {
        self.heading_overrides.retain(|(k, _)| *k != key);
        self.heading_overrides.push((key, pattern.to_string()));
        self
    }

    pub fn repeated_heading_policy(mut self, policy: RepeatedHeadingPolicy) -> Self {
        self.repeated_heading_policy = Some(policy);
        self
    }

    // ── Boilerplate ──

    pub fn set_boilerplate_patterns(mut self, patterns: Vec<String>) -> Self {
        self.boilerplate_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_boilerplate_pattern(mut self, pattern: String) -> Self {
        match &mut self.boilerplate_patterns {
            ListOverrideBuilder::Extend(v) => v.push(pattern),
            _ => self.boilerplate_patterns = ListOverrideBuilder::Extend(vec![pattern]),
        }
        self
    }

    // ── Bullet glyphs ──

    pub fn set_bullet_glyphs(mut self, glyphs: Vec<char>) -> Self {
        self.bullet_glyphs = ListOverride::Replace(glyphs);
        self
    }

    pub fn add_bullet_glyph(mut self, glyph: char) -> Self {
        match &mut self.bullet_glyphs {
            ListOverride::Extend(v) => v.push(glyph),
            _ => self.bullet_glyphs = ListOverride::Extend(vec![glyph]),
        }
        self
    }

    // ── Output metadata ──

    pub fn authoring(mut self, authoring: Authoring) -> Self {
        self.authoring = Some(authoring);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let mut heading_specs = default_heading_specs();
        for (key, pattern) in &self.heading_overrides {
            let spec = HeadingSpec::new(*key, pattern)?;
            // The default table covers every key
            if let Some(slot) = heading_specs.iter_mut().find(|s| s.key == *key) {
                *slot = spec;
            }
        }

        let compile_list = |patterns: &[String]| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };
        let boilerplate_patterns = match &self.boilerplate_patterns {
            ListOverrideBuilder::Default => ListOverride::Default,
            ListOverrideBuilder::Replace(p) => ListOverride::Replace(compile_list(p)?),
            ListOverrideBuilder::Extend(p) => ListOverride::Extend(compile_list(p)?),
        };

        Ok(ParsingConfig {
            toc_page: self.toc_page.unwrap_or(2),
            heading_specs,
            repeated_heading_policy: self.repeated_heading_policy.unwrap_or_default(),
            boilerplate_patterns,
            bullet_glyphs: self.bullet_glyphs,
            authoring: self.authoring.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use identex_core::LicenseStatus;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.toc_page(), 2);
        assert_eq!(config.heading_specs().len(), 9);
        assert_eq!(
            config.repeated_heading_policy(),
            RepeatedHeadingPolicy::LastWins
        );
        assert_eq!(config.authoring().license_status, LicenseStatus::Licensed);
    }

    #[test]
    fn test_builder_basic() {
        let config = ParsingConfigBuilder::new()
            .toc_page(3)
            .repeated_heading_policy(RepeatedHeadingPolicy::FirstWins)
            .authoring(Authoring {
                license_status: LicenseStatus::Paraphrased,
                last_updated: "2026-03-01".to_string(),
            })
            .build()
            .unwrap();
        assert_eq!(config.toc_page(), 3);
        assert_eq!(
            config.repeated_heading_policy(),
            RepeatedHeadingPolicy::FirstWins
        );
        assert_eq!(config.authoring().last_updated, "2026-03-01");
    }

    #[test]
    fn test_builder_heading_override_keeps_position() {
        let config = ParsingConfigBuilder::new()
            .heading_regex(SectionKey::Gifts, r"Strengths:")
            .build()
            .unwrap();
        assert_eq!(config.heading_specs().len(), 9);
        let gifts = config
            .heading_specs()
            .iter()
            .find(|s| s.key == SectionKey::Gifts)
            .unwrap();
        assert!(gifts.pattern.is_match("STRENGTHS:"));
        assert!(!gifts.pattern.is_match("Gifts:"));
        assert_eq!(config.heading_specs()[6].key, SectionKey::Gifts);
    }

    #[test]
    fn test_builder_repeated_heading_override_replaces_in_place() {
        let config = ParsingConfigBuilder::new()
            .heading_regex(SectionKey::Gifts, r"Strengths:")
            .heading_regex(SectionKey::Gifts, r"Talents:")
            .build()
            .unwrap();
        assert_eq!(config.heading_specs().len(), 9);
        let gifts = &config.heading_specs()[6];
        assert_eq!(gifts.key, SectionKey::Gifts);
        assert!(gifts.pattern.is_match("talents:"));
        assert!(!gifts.pattern.is_match("Strengths:"));
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new()
            .add_boilerplate_pattern(r"[invalid".to_string())
            .build();
        assert!(result.is_err());

        let result = ParsingConfigBuilder::new()
            .heading_regex(SectionKey::Gifts, r"(unclosed")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!['a', 'b'];

        let d: ListOverride<char> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<char> = ListOverride::Replace(vec!['x']);
        assert_eq!(r.resolve(&defaults), vec!['x']);

        let e: ListOverride<char> = ListOverride::Extend(vec!['c']);
        assert_eq!(e.resolve(&defaults), vec!['a', 'b', 'c']);
    }
}
