use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;
pub mod text_utils;

pub use backend::{BackendError, PageTextProvider, StaticPages};
pub use text_utils::collapse_whitespace;

/// Schema version written at the top of every dataset.
pub const DATASET_VERSION: &str = "0.1.0";

/// One line of the table of contents: an entry title and the 1-based page it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub start_page: usize,
}

/// Inclusive, 1-based page span of a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start_page: usize,
    pub end_page: usize,
}

impl PageRange {
    pub fn new(start_page: usize, end_page: usize) -> Self {
        Self {
            start_page,
            end_page,
        }
    }

    /// `false` when the TOC was out of order and the range is inverted.
    pub fn is_well_formed(&self) -> bool {
        self.start_page <= self.end_page
    }

    /// Pages of the range that exist in a document of `total` pages, in order.
    /// Empty for an inverted range.
    pub fn pages_within(&self, total: usize) -> std::ops::RangeInclusive<usize> {
        self.start_page.max(1)..=self.end_page.min(total)
    }
}

/// Canonical key of one of the nine labeled subsections of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    HowItShowsUp,
    EffectOnOthers,
    BeliefsAboutOthers,
    BeliefsAboutLife,
    SelfReinforcingBehaviors,
    SkillsToCultivate,
    Gifts,
    DeeperTruthStatements,
    TrueIdentity,
}

impl SectionKey {
    /// All keys, in the order the headings are declared.
    pub const ALL: [SectionKey; 9] = [
        SectionKey::HowItShowsUp,
        SectionKey::EffectOnOthers,
        SectionKey::BeliefsAboutOthers,
        SectionKey::BeliefsAboutLife,
        SectionKey::SelfReinforcingBehaviors,
        SectionKey::SkillsToCultivate,
        SectionKey::Gifts,
        SectionKey::DeeperTruthStatements,
        SectionKey::TrueIdentity,
    ];

    /// Field name used in the serialized dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HowItShowsUp => "howItShowsUp",
            Self::EffectOnOthers => "effectOnOthers",
            Self::BeliefsAboutOthers => "beliefsAboutOthers",
            Self::BeliefsAboutLife => "beliefsAboutLife",
            Self::SelfReinforcingBehaviors => "selfReinforcingBehaviors",
            Self::SkillsToCultivate => "skillsToCultivate",
            Self::Gifts => "gifts",
            Self::DeeperTruthStatements => "deeperTruthStatements",
            Self::TrueIdentity => "trueIdentity",
        }
    }

    /// `true` for every key whose body is a bullet list (all but `trueIdentity`).
    pub fn is_bulleted(&self) -> bool {
        !matches!(self, Self::TrueIdentity)
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bullet items of the eight list-valued subsections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sections {
    pub how_it_shows_up: Vec<String>,
    pub effect_on_others: Vec<String>,
    pub beliefs_about_others: Vec<String>,
    pub beliefs_about_life: Vec<String>,
    pub self_reinforcing_behaviors: Vec<String>,
    pub skills_to_cultivate: Vec<String>,
    pub gifts: Vec<String>,
    pub deeper_truth_statements: Vec<String>,
}

impl Sections {
    /// Items for `key`, or `None` for `trueIdentity` which is not a list.
    pub fn get(&self, key: SectionKey) -> Option<&[String]> {
        let items = match key {
            SectionKey::HowItShowsUp => &self.how_it_shows_up,
            SectionKey::EffectOnOthers => &self.effect_on_others,
            SectionKey::BeliefsAboutOthers => &self.beliefs_about_others,
            SectionKey::BeliefsAboutLife => &self.beliefs_about_life,
            SectionKey::SelfReinforcingBehaviors => &self.self_reinforcing_behaviors,
            SectionKey::SkillsToCultivate => &self.skills_to_cultivate,
            SectionKey::Gifts => &self.gifts,
            SectionKey::DeeperTruthStatements => &self.deeper_truth_statements,
            SectionKey::TrueIdentity => return None,
        };
        Some(items)
    }

    fn get_mut(&mut self, key: SectionKey) -> Option<&mut Vec<String>> {
        let items = match key {
            SectionKey::HowItShowsUp => &mut self.how_it_shows_up,
            SectionKey::EffectOnOthers => &mut self.effect_on_others,
            SectionKey::BeliefsAboutOthers => &mut self.beliefs_about_others,
            SectionKey::BeliefsAboutLife => &mut self.beliefs_about_life,
            SectionKey::SelfReinforcingBehaviors => &mut self.self_reinforcing_behaviors,
            SectionKey::SkillsToCultivate => &mut self.skills_to_cultivate,
            SectionKey::Gifts => &mut self.gifts,
            SectionKey::DeeperTruthStatements => &mut self.deeper_truth_statements,
            SectionKey::TrueIdentity => return None,
        };
        Some(items)
    }

    /// Store the items for a list-valued key. Ignored for `trueIdentity`.
    pub fn set(&mut self, key: SectionKey, items: Vec<String>) {
        if let Some(slot) = self.get_mut(key) {
            *slot = items;
        }
    }

    /// `true` when every subsection is empty.
    pub fn is_empty(&self) -> bool {
        SectionKey::ALL
            .iter()
            .filter_map(|k| self.get(*k))
            .all(|items| items.is_empty())
    }
}

/// Page provenance of an entry in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    pub pdf_page_start: usize,
    pub pdf_page_end: usize,
}

impl From<PageRange> for Sources {
    fn from(range: PageRange) -> Self {
        Self {
            pdf_page_start: range.start_page,
            pdf_page_end: range.end_page,
        }
    }
}

/// Licensing state of the text carried by an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LicenseStatus {
    #[default]
    Licensed,
    Paraphrased,
    UserNotesOnly,
}

/// Authoring metadata stamped on every entry of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authoring {
    pub license_status: LicenseStatus,
    pub last_updated: String,
}

impl Default for Authoring {
    fn default() -> Self {
        Self {
            license_status: LicenseStatus::Licensed,
            last_updated: "2026-01-14".to_string(),
        }
    }
}

/// One extracted catalogue entry. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Left empty here; assigned by whatever consumes the dataset.
    pub id: String,
    pub title: String,
    pub aka: Vec<String>,
    pub true_identity: String,
    pub sections: Sections,
    pub tags: Vec<String>,
    pub related_ids: Vec<String>,
    pub sources: Sources,
    pub authoring: Authoring,
}

/// Top-level output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub version: String,
    pub false_identities: Vec<Entry>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            version: DATASET_VERSION.to_string(),
            false_identities: Vec::new(),
        }
    }
}

impl Dataset {
    /// Pretty-printed JSON (two-space indent, non-ASCII kept literal).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Quality counters for a run; anomalies never abort extraction, they only show up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub total_pages: usize,
    pub toc_entries: usize,
    /// Entries in which none of the known headings were found.
    pub entries_without_headings: usize,
    pub repeated_headings: usize,
    pub inverted_ranges: usize,
}

/// Result of running the extraction pipeline over a document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub dataset: Dataset,
    pub stats: ExtractionStats,
}
