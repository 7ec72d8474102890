use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Canonical bullet every list marker is normalized to.
pub const BULLET: char = '•';

/// Private-use glyphs the source fonts emit for list bullets.
pub(crate) const DEFAULT_BULLET_GLYPHS: [char; 2] = ['\u{F0B7}', '\u{F09F}'];

/// Footer and front-matter noise repeated on every page of the catalogue.
static DEFAULT_BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Copyright footer, followed by the page number on the same line
        Regex::new(r"Copyright Feminine Power 2006\s+\d+\s*").unwrap(),
        // Reproduction disclaimer, up to its closing phrase
        Regex::new(r"(?i)This document may not be reproduced.*?authors\.\s*").unwrap(),
        // Contact line; the misspelt domain is what the document prints
        Regex::new(r"(?i)Info@Femi[mn]inePower\.com\s*").unwrap(),
    ]
});

/// Strip boilerplate and normalize bullets and blank lines in a block of page text.
///
/// - Private-use bullet glyphs become `•`
/// - Copyright footers, the reproduction disclaimer and the contact line are removed
/// - Lines holding nothing but a page number are removed
/// - Runs of three or more newlines collapse to a single blank line
///
/// Never fails; text with nothing to strip comes back trimmed and otherwise unchanged.
pub fn clean(raw: &str) -> String {
    clean_with_config(raw, &ParsingConfig::default())
}

/// Config-aware version of [`clean`].
pub(crate) fn clean_with_config(raw: &str, config: &ParsingConfig) -> String {
    static PAGE_NUMBER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\s*$").unwrap());
    static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

    let glyphs = config.bullet_glyphs.resolve(&DEFAULT_BULLET_GLYPHS);
    let mut text = if glyphs.is_empty() {
        raw.to_string()
    } else {
        raw.replace(glyphs.as_slice(), "•")
    };

    // Repeat until stable: removing one pattern can complete another
    let boilerplate = config.boilerplate_patterns.resolve(&DEFAULT_BOILERPLATE);
    loop {
        let before = text.len();
        for re in &boilerplate {
            text = re.replace_all(&text, "").into_owned();
        }
        if text.len() == before {
            break;
        }
    }

    let text = PAGE_NUMBER_LINE.replace_all(&text, "");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsingConfigBuilder;

    const PAGE: &str = "The Caretaker\n\
        (a.k.a. The Helper)\n\
        You may:\n\
        \u{F0B7} Put others first\n\
        \u{F09F} Say yes too often\n\
        \n\
        \n\
        \n\
        12\n\
        Copyright Feminine Power 2006 12\n\
        This document may not be reproduced without the written permission of the authors.\n\
        Info@FemiminePower.com\n\
        Gifts:\n\
        • Warmth";

    #[test]
    fn test_clean_strips_boilerplate() {
        let cleaned = clean(PAGE);
        assert!(!cleaned.contains("Copyright"));
        assert!(!cleaned.contains("may not be reproduced"));
        assert!(!cleaned.to_lowercase().contains("info@"));
        assert!(!cleaned.lines().any(|l| l.trim() == "12"));
        assert!(!cleaned.contains("\n\n\n"));
        assert!(cleaned.starts_with("The Caretaker"));
        assert!(cleaned.ends_with("• Warmth"));
    }

    #[test]
    fn test_clean_normalizes_bullets() {
        let cleaned = clean(PAGE);
        assert!(cleaned.contains("• Put others first"));
        assert!(cleaned.contains("• Say yes too often"));
        assert!(!cleaned.contains('\u{F0B7}'));
        assert!(!cleaned.contains('\u{F09F}'));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean(PAGE);
        assert_eq!(clean(&once), once);

        let plain = "  Gifts:\n• Warmth\n\n• Humor  ";
        assert_eq!(clean(&clean(plain)), clean(plain));
    }

    #[test]
    fn test_clean_removes_boilerplate_exposed_by_earlier_removal() {
        let nested = "Intro\nThis document may not be Info@FemininePower.com reproduced by the authors.\nBody";
        let once = clean(nested);
        assert_eq!(once, "Intro\nBody");
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_clean_terminates_on_empty_matching_pattern() {
        let config = ParsingConfigBuilder::new()
            .add_boilerplate_pattern(r"x*".to_string())
            .build()
            .unwrap();
        assert_eq!(clean_with_config("axxb", &config), "ab");
    }

    #[test]
    fn test_clean_case_insensitive_disclaimer_and_email() {
        let text = "Intro\nTHIS DOCUMENT MAY NOT BE REPRODUCED in any form by anyone but the AUTHORS.\nINFO@FEMININEPOWER.COM\nBody";
        assert_eq!(clean(text), "Intro\nBody");
    }

    #[test]
    fn test_clean_padded_page_number() {
        assert_eq!(clean("Line one\n   7   \nLine two"), "Line one\n\nLine two");
        // Digits inside a line are content
        assert_eq!(clean("Born in 1970\nDone"), "Born in 1970\nDone");
    }

    #[test]
    fn test_clean_passthrough() {
        assert_eq!(clean("  nothing to strip here \n"), "nothing to strip here");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_clean_custom_boilerplate() {
        let config = ParsingConfigBuilder::new()
            .add_boilerplate_pattern(r"(?m)^DRAFT\s*$".to_string())
            .build()
            .unwrap();
        let cleaned = clean_with_config("DRAFT\nGifts:\nCopyright Feminine Power 2006 3\n", &config);
        assert_eq!(cleaned, "Gifts:");
    }

    #[test]
    fn test_clean_custom_bullet_glyph() {
        let config = ParsingConfigBuilder::new()
            .add_bullet_glyph('\u{25AA}')
            .build()
            .unwrap();
        assert_eq!(
            clean_with_config("\u{25AA} one\n\u{F0B7} two", &config),
            "• one\n• two"
        );
    }
}
