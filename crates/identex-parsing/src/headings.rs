use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use identex_core::SectionKey;

/// A subsection key paired with the heading that introduces it in the text.
#[derive(Debug, Clone)]
pub struct HeadingSpec {
    pub key: SectionKey,
    pub pattern: Regex,
}

impl HeadingSpec {
    /// Compile `pattern` case-insensitively for `key`.
    pub fn new(key: SectionKey, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { key, pattern })
    }
}

static DEFAULT_HEADINGS: Lazy<Vec<HeadingSpec>> = Lazy::new(|| {
    [
        (
            SectionKey::HowItShowsUp,
            r"You may:\s*\(how it shows up in your life\)",
        ),
        (SectionKey::EffectOnOthers, r"Others often:\s*\(effect on others\)"),
        (SectionKey::BeliefsAboutOthers, r"Beliefs about others:"),
        (SectionKey::BeliefsAboutLife, r"Belief about life:"),
        (
            SectionKey::SelfReinforcingBehaviors,
            r"You may:\s*\(ways of being that generate evidence that validate identity\)",
        ),
        (
            SectionKey::SkillsToCultivate,
            r"Skills(?:\s+and\s+capacities)?\s+to\s+cultivate.*?:",
        ),
        (SectionKey::Gifts, r"Gifts:"),
        (SectionKey::DeeperTruthStatements, r"Deeper Truth Statements:"),
        (SectionKey::TrueIdentity, r"True Identity:"),
    ]
    .into_iter()
    .map(|(key, pattern)| HeadingSpec::new(key, pattern).unwrap())
    .collect()
});

/// The built-in heading table, one spec per [`SectionKey`] in declaration order.
pub fn default_heading_specs() -> Vec<HeadingSpec> {
    DEFAULT_HEADINGS.clone()
}

/// What to keep when the same heading occurs more than once in an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatedHeadingPolicy {
    /// The span after the last occurrence replaces earlier ones.
    #[default]
    LastWins,
    /// The span after the first occurrence is kept; later ones are dropped.
    FirstWins,
    /// All spans are kept, joined by a newline in document order.
    Join,
}

/// Subsection bodies found in one entry's text, keyed by heading.
#[derive(Debug, Clone, Default)]
pub struct LocatedSections {
    spans: HashMap<SectionKey, String>,
    repeated: Vec<SectionKey>,
}

impl LocatedSections {
    /// Body of `key`, or `None` when its heading never appeared.
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.spans.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.spans.contains_key(&key)
    }

    /// Number of distinct headings found.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// One element per extra occurrence of an already seen heading.
    pub fn repeated(&self) -> &[SectionKey] {
        &self.repeated
    }
}

/// Partition `text` into subsections using [`RepeatedHeadingPolicy::LastWins`].
pub fn locate(text: &str, specs: &[HeadingSpec]) -> LocatedSections {
    locate_with_policy(text, specs, RepeatedHeadingPolicy::default())
}

/// Partition `text` into subsections bounded by consecutive heading matches.
///
/// Every occurrence of every heading is collected and ordered by position in
/// the text, independent of the order of `specs`. Each heading owns the text
/// between its end and the start of the next heading (or the end of the text).
pub fn locate_with_policy(
    text: &str,
    specs: &[HeadingSpec],
    policy: RepeatedHeadingPolicy,
) -> LocatedSections {
    let mut hits: Vec<(usize, usize, SectionKey)> = specs
        .iter()
        .flat_map(|spec| {
            spec.pattern
                .find_iter(text)
                .map(move |m| (m.start(), m.end(), spec.key))
        })
        .collect();
    // Stable: headings matching at the same offset keep declaration order
    hits.sort_by_key(|&(start, _, _)| start);

    let mut located = LocatedSections::default();
    for (i, &(_, end, key)) in hits.iter().enumerate() {
        let next = hits.get(i + 1).map_or(text.len(), |&(start, _, _)| start);
        // Overlapping headings own nothing
        let body = if next > end { text[end..next].trim() } else { "" };

        match located.spans.entry(key) {
            MapEntry::Vacant(slot) => {
                slot.insert(body.to_string());
            }
            MapEntry::Occupied(mut slot) => {
                tracing::debug!(heading = %key, ?policy, "repeated heading");
                located.repeated.push(key);
                match policy {
                    RepeatedHeadingPolicy::LastWins => *slot.get_mut() = body.to_string(),
                    RepeatedHeadingPolicy::FirstWins => {}
                    RepeatedHeadingPolicy::Join => {
                        let existing = slot.get_mut();
                        if existing.is_empty() {
                            *existing = body.to_string();
                        } else if !body.is_empty() {
                            existing.push('\n');
                            existing.push_str(body);
                        }
                    }
                }
            }
        }
    }
    located
}
