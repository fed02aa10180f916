//! # Pattern Tables
//!
//! Every field a strategy extracts is described by an ordered list of
//! `FieldRule`s. The rules are compiled once at startup into an immutable
//! `Patterns` value and tried in order until one yields non-empty text.
//!
//! JSON string captures use `(?:[^"\\]|\\.)*` so they run up to the first
//! unescaped closing quote and tolerate `\"` inside the value.

use crate::normalize::normalize;
use regex::Regex;

const YOUTUBE_TITLE_SUFFIX: &str = " - YouTube";

const VIDEO_DETAILS_TITLE: &str = r#"(?s)"videoDetails":\s*\{[^}]*?"title":"((?:[^"\\]|\\.)*)""#;
const TITLE_TAG_WITH_SUFFIX: &str = r"(?s)<title[^>]*>([^<]+?)\s*-\s*YouTube</title>";
const TITLE_TAG: &str = r"<title[^>]*>([^<]+)</title>";
const OG_TITLE: &str = r#"<meta property="og:title" content="([^"]*)""#;
const TITLE_NEAR_LENGTH: &str = r#"(?s)"title":"((?:[^"\\]|\\.)*?)"[^}]*?"lengthSeconds""#;
const BARE_TITLE: &str = r#""title":"((?:[^"\\]|\\.)*)""#;

const VIDEO_DETAILS_DESCRIPTION: &str =
    r#"(?s)"videoDetails":\s*\{[^}]*?"shortDescription":"((?:[^"\\]|\\.)*)""#;
const SHORT_DESCRIPTION: &str = r#""shortDescription":"((?:[^"\\]|\\.)*)""#;
const OG_DESCRIPTION: &str = r#"<meta property="og:description" content="([^"]*)""#;
const SIMPLE_TEXT_DESCRIPTION: &str = r#""description":\s*\{"simpleText":"((?:[^"\\]|\\.)*)"\}"#;
const BARE_DESCRIPTION: &str = r#""description":"((?:[^"\\]|\\.)*)""#;
const META_DESCRIPTION: &str = r#"<meta name="description" content="([^"]*)""#;

const TAG_ARRAYS: &[(&str, &str)] = &[
    ("keywords", r#""keywords":\s*\[(.*?)\]"#),
    ("tags", r#""tags":\s*\[(.*?)\]"#),
    ("hashtags", r#""hashtags":\s*\[(.*?)\]"#),
];
const QUOTED_LITERAL: &str = r#""([^"]*)""#;

const SHORT_DESCRIPTION_PREVIEW: &str = r#""shortDescription":"([^"]{0,200})"#;

/// Where a capture comes from, which decides how it is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A string literal inside embedded JSON. Escapes are handled by `normalize`.
    Json,
    /// Element text or an attribute value. HTML entities are decoded first.
    Html,
}

/// One compiled extraction rule for a single field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    regex: Regex,
    source: Source,
    strip: Option<&'static str>,
}

impl FieldRule {
    pub fn json(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            source: Source::Json,
            strip: None,
        })
    }

    pub fn html(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            source: Source::Html,
            strip: None,
        })
    }

    /// Removes every occurrence of `literal` from the capture before decoding.
    pub fn strip(mut self, literal: &'static str) -> Self {
        self.strip = Some(literal);
        self
    }

    /// Applies the rule, returning the normalized capture if the pattern matched.
    pub fn apply(&self, content: &str) -> Option<String> {
        let raw = self.regex.captures(content)?.get(1)?.as_str();
        let raw = match self.strip {
            Some(literal) => raw.replace(literal, ""),
            None => raw.to_string(),
        };
        let text = match self.source {
            Source::Json => normalize(&raw),
            Source::Html => normalize(&html_escape::decode_html_entities(&raw)),
        };
        Some(text)
    }
}

/// Tries `rules` in order and returns the first non-empty normalized capture.
pub fn first_match(rules: &[FieldRule], content: &str) -> Option<String> {
    rules
        .iter()
        .filter_map(|rule| rule.apply(content))
        .find(|text| !text.trim().is_empty())
}

/// Title and description rules for one page shape.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub title: Vec<FieldRule>,
    pub description: Vec<FieldRule>,
}

/// Regexes for the keyword/tag arrays.
#[derive(Debug, Clone)]
pub struct TagPatterns {
    pub arrays: Vec<(&'static str, Regex)>,
    pub literal: Regex,
}

/// Loose probes used by the diagnostics report.
#[derive(Debug, Clone)]
pub struct ProbePatterns {
    pub title: Vec<Regex>,
    pub description: Vec<Regex>,
}

/// All compiled pattern tables.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub desktop: FieldRules,
    pub mobile: FieldRules,
    /// Description rule for the page fetched after a successful oEmbed call.
    pub embed_description: Vec<FieldRule>,
    /// Rules for the minimal-user-agent fallback page.
    pub minimal: FieldRules,
    pub tags: TagPatterns,
    pub probes: ProbePatterns,
}

impl Patterns {
    pub fn compile() -> Result<Self, regex::Error> {
        let desktop = FieldRules {
            title: vec![
                FieldRule::json(VIDEO_DETAILS_TITLE)?,
                FieldRule::html(TITLE_TAG_WITH_SUFFIX)?,
                FieldRule::html(OG_TITLE)?,
                FieldRule::json(TITLE_NEAR_LENGTH)?,
            ],
            description: vec![
                FieldRule::json(VIDEO_DETAILS_DESCRIPTION)?,
                FieldRule::json(SHORT_DESCRIPTION)?,
                FieldRule::html(OG_DESCRIPTION)?,
                FieldRule::json(SIMPLE_TEXT_DESCRIPTION)?,
            ],
        };

        let mobile = FieldRules {
            title: vec![
                FieldRule::html(TITLE_TAG)?.strip(YOUTUBE_TITLE_SUFFIX),
                FieldRule::json(BARE_TITLE)?,
                FieldRule::html(OG_TITLE)?,
            ],
            description: vec![
                FieldRule::html(OG_DESCRIPTION)?,
                FieldRule::json(BARE_DESCRIPTION)?,
                FieldRule::html(META_DESCRIPTION)?,
            ],
        };

        let minimal = FieldRules {
            title: vec![FieldRule::html(TITLE_TAG)?.strip(YOUTUBE_TITLE_SUFFIX)],
            description: vec![FieldRule::html(OG_DESCRIPTION)?],
        };

        let tags = TagPatterns {
            arrays: TAG_ARRAYS
                .iter()
                .map(|(key, pattern)| Regex::new(pattern).map(|regex| (*key, regex)))
                .collect::<Result<_, regex::Error>>()?,
            literal: Regex::new(QUOTED_LITERAL)?,
        };

        let probes = ProbePatterns {
            title: vec![
                Regex::new(TITLE_TAG)?,
                Regex::new(BARE_TITLE)?,
                Regex::new(OG_TITLE)?,
            ],
            description: vec![
                Regex::new(SHORT_DESCRIPTION_PREVIEW)?,
                Regex::new(OG_DESCRIPTION)?,
            ],
        };

        Ok(Self {
            desktop,
            mobile,
            embed_description: vec![FieldRule::json(SHORT_DESCRIPTION)?],
            minimal,
            tags,
            probes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Patterns {
        Patterns::compile().expect("patterns compile")
    }

    #[test]
    fn test_video_details_title_tolerates_escaped_quotes() {
        let page = r#"{"videoDetails":{"videoId":"abc","title":"The \"Best\" Video","lengthSeconds":"42"}}"#;
        assert_eq!(
            first_match(&patterns().desktop.title, page),
            Some("The \"Best\" Video".to_string())
        );
    }

    #[test]
    fn test_desktop_title_falls_back_to_title_tag() {
        let page = "<html><head><title>Rust &amp; You - YouTube</title></head></html>";
        assert_eq!(
            first_match(&patterns().desktop.title, page),
            Some("Rust & You".to_string())
        );
    }

    #[test]
    fn test_empty_capture_falls_through_to_next_rule() {
        let page = r#"<meta property="og:title" content="   "><script>{"title":"From JSON","x":1,"lengthSeconds":"9"}</script>"#;
        assert_eq!(
            first_match(&patterns().desktop.title, page),
            Some("From JSON".to_string())
        );
    }

    #[test]
    fn test_short_description_unescapes() {
        let page = r#""shortDescription":"Line one\nLine two é""#;
        assert_eq!(
            first_match(&patterns().desktop.description, page),
            Some("Line one\nLine two é".to_string())
        );
    }

    #[test]
    fn test_simple_text_description() {
        let page = r#""description": {"simpleText":"Plain words"}"#;
        assert_eq!(
            first_match(&patterns().desktop.description, page),
            Some("Plain words".to_string())
        );
    }

    #[test]
    fn test_mobile_title_strips_suffix() {
        let page = "<title>Mobile Title - YouTube</title>";
        assert_eq!(
            first_match(&patterns().mobile.title, page),
            Some("Mobile Title".to_string())
        );
    }

    #[test]
    fn test_mobile_json_fields_tolerate_escaped_quotes() {
        let p = patterns();
        let page = r#"{"title":"The \"Best\" Video","description":"Say \"hi\" now"}"#;
        assert_eq!(
            first_match(&p.mobile.title, page),
            Some("The \"Best\" Video".to_string())
        );
        assert_eq!(
            first_match(&p.mobile.description, page),
            Some("Say \"hi\" now".to_string())
        );
    }

    #[test]
    fn test_no_match_is_none() {
        let p = patterns();
        assert_eq!(first_match(&p.desktop.title, "<html></html>"), None);
        assert_eq!(first_match(&p.mobile.description, ""), None);
    }
}
