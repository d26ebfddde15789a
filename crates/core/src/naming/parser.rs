//! Best-effort extraction of season/episode/quality tokens from filenames.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Tokens recognized in a raw filename. Every field is optional; parsing
/// never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    /// Season number, zero-padded to two digits.
    pub season: Option<String>,
    /// Episode number, zero-padded to two digits.
    pub episode: Option<String>,
    /// Resolution label from the fixed vocabulary, e.g. "1080p".
    pub quality: Option<String>,
}

// Season/episode patterns, tried in priority order.
static SEASON_EPISODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bs(\d{1,2})[ ._-]?e(\d{1,3})").expect("valid regex")
});
static CROSS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})x(\d{1,3})\b").expect("valid regex"));
static BARE_EPISODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bep?(\d{1,3})\b").expect("valid regex"));

static QUALITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(360p|480p|720p|1080p|1440p|2160p|2k|4k)\b").expect("valid regex")
});

static FORBIDDEN_WS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t]+").expect("valid regex"));
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Zero-pads a purely numeric capture to two digits.
fn pad(number: &str) -> String {
    format!("{:0>2}", number)
}

/// Extracts season/episode/quality tokens from a raw filename.
///
/// Season/episode patterns are tried in a fixed priority order
/// (`S02E07`, `2x07`, bare `E07`), stopping at the first match. Quality
/// is searched independently. `360p` is never reported; it is normalized
/// to `480p`.
pub fn parse_filename(name: &str) -> ParsedName {
    let mut parsed = ParsedName::default();

    if let Some(caps) = SEASON_EPISODE_RE.captures(name) {
        parsed.season = caps.get(1).map(|m| pad(m.as_str()));
        parsed.episode = caps.get(2).map(|m| pad(m.as_str()));
    } else if let Some(caps) = CROSS_RE.captures(name) {
        parsed.season = caps.get(1).map(|m| pad(m.as_str()));
        parsed.episode = caps.get(2).map(|m| pad(m.as_str()));
    } else if let Some(caps) = BARE_EPISODE_RE.captures(name) {
        parsed.episode = caps.get(1).map(|m| pad(m.as_str()));
    }

    if let Some(m) = QUALITY_RE.find(name) {
        let token = m.as_str().to_lowercase();
        parsed.quality = Some(match token.as_str() {
            "360p" => "480p".to_string(),
            "2k" => "2K".to_string(),
            "4k" => "4K".to_string(),
            other => other.to_string(),
        });
    }

    parsed
}

/// Strips characters that are unsafe in filenames and collapses whitespace.
pub fn safe_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "-");
    let name = FORBIDDEN_WS_RE.replace_all(&name, " ");
    MULTI_SPACE_RE.replace_all(name.trim(), " ").into_owned()
}

/// Appends the original file's extension to `new_base` unless it already
/// ends with it (case-insensitive).
pub fn ensure_extension(new_base: &str, original_name: &str) -> String {
    let ext = match original_name.rfind('.') {
        // A leading dot is a hidden file, not an extension.
        Some(idx) if idx > 0 => &original_name[idx..],
        _ => return new_base.to_string(),
    };
    if new_base.to_lowercase().ends_with(&ext.to_lowercase()) {
        new_base.to_string()
    } else {
        format!("{}{}", new_base, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_season_episode_style() {
        let parsed = parse_filename("Show.S02E07.1080p.mkv");
        assert_eq!(parsed.season.as_deref(), Some("02"));
        assert_eq!(parsed.episode.as_deref(), Some("07"));
        assert_eq!(parsed.quality.as_deref(), Some("1080p"));
    }

    #[test]
    fn test_parse_lowercase_and_padding() {
        let parsed = parse_filename("show s2e7 720p.mp4");
        assert_eq!(parsed.season.as_deref(), Some("02"));
        assert_eq!(parsed.episode.as_deref(), Some("07"));
        assert_eq!(parsed.quality.as_deref(), Some("720p"));
    }

    #[test]
    fn test_parse_cross_style() {
        let parsed = parse_filename("Show.2x07.HDTV.mkv");
        assert_eq!(parsed.season.as_deref(), Some("02"));
        assert_eq!(parsed.episode.as_deref(), Some("07"));
        assert_eq!(parsed.quality, None);
    }

    #[test]
    fn test_parse_bare_episode_style() {
        let parsed = parse_filename("[Group] Naruto - EP12 [480p].mkv");
        assert_eq!(parsed.season, None);
        assert_eq!(parsed.episode.as_deref(), Some("12"));
        assert_eq!(parsed.quality.as_deref(), Some("480p"));
    }

    #[test]
    fn test_season_episode_takes_priority_over_bare() {
        // "S01E05" also contains a bare-E match; the full pattern wins.
        let parsed = parse_filename("Show S01E05 E99.mkv");
        assert_eq!(parsed.season.as_deref(), Some("01"));
        assert_eq!(parsed.episode.as_deref(), Some("05"));
    }

    #[test]
    fn test_360p_normalized_to_480p() {
        let parsed = parse_filename("Show.E03.360p.mkv");
        assert_eq!(parsed.quality.as_deref(), Some("480p"));
    }

    #[test]
    fn test_4k_uppercased() {
        let parsed = parse_filename("Movie.2021.4k.mkv");
        assert_eq!(parsed.quality.as_deref(), Some("4K"));
    }

    #[test]
    fn test_parse_is_total_on_garbage() {
        assert_eq!(parse_filename(""), ParsedName::default());
        assert_eq!(parse_filename("no tokens here"), ParsedName::default());
    }

    #[test]
    fn test_safe_filename_strips_separators() {
        assert_eq!(safe_filename("a/b\\c"), "a-b-c");
        assert_eq!(safe_filename("  a\tb\r\nc  "), "a b c");
        assert_eq!(safe_filename("a    b"), "a b");
    }

    #[test]
    fn test_ensure_extension_appends() {
        assert_eq!(ensure_extension("New Name", "old.mkv"), "New Name.mkv");
    }

    #[test]
    fn test_ensure_extension_case_insensitive_match() {
        assert_eq!(ensure_extension("New Name.MKV", "old.mkv"), "New Name.MKV");
    }

    #[test]
    fn test_ensure_extension_no_original_extension() {
        assert_eq!(ensure_extension("New Name", "noext"), "New Name");
        assert_eq!(ensure_extension("New Name", ".hidden"), "New Name");
    }
}
