//! Substitution of recognized placeholders into user-supplied formats.

use super::parser::ParsedName;

/// Placeholder replaced with the episode number.
pub const EPISODE_TOKEN: &str = "{ep}";
/// Placeholder replaced with the season number.
pub const SEASON_TOKEN: &str = "{Sn}";
/// Placeholder replaced with the quality label.
pub const QUALITY_TOKEN: &str = "{quality}";

// Fallbacks when the source filename carried no token. Episode and season
// fall back to a fixed numeral, quality to the lowest supported label.
const FALLBACK_NUMBER: &str = "01";
const FALLBACK_QUALITY: &str = "480p";

/// Zero-pads purely numeric values to two digits; leaves the rest alone.
fn pad_numeric(value: &str) -> String {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("{:0>2}", value)
    } else {
        value.to_string()
    }
}

/// Renders a format template with the parsed filename fields.
///
/// Replaces every occurrence of [`SEASON_TOKEN`], [`EPISODE_TOKEN`] and
/// [`QUALITY_TOKEN`], then collapses whitespace runs and trims. Pure and
/// total: unknown text passes through untouched, so rendering a template
/// without placeholders is the identity (modulo whitespace).
pub fn render(template: &str, parsed: &ParsedName) -> String {
    let episode = parsed.episode.as_deref().unwrap_or(FALLBACK_NUMBER);
    let season = parsed.season.as_deref().unwrap_or(FALLBACK_NUMBER);
    let quality = parsed.quality.as_deref().unwrap_or(FALLBACK_QUALITY);

    let rendered = template
        .replace(SEASON_TOKEN, &pad_numeric(season))
        .replace(EPISODE_TOKEN, &pad_numeric(episode))
        .replace(QUALITY_TOKEN, quality);

    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(episode: &str, season: &str, quality: &str) -> ParsedName {
        ParsedName {
            season: Some(season.to_string()),
            episode: Some(episode.to_string()),
            quality: Some(quality.to_string()),
        }
    }

    #[test]
    fn test_render_all_tokens() {
        let out = render("S{Sn}E{ep} {quality}", &fields("07", "02", "720p"));
        assert_eq!(out, "S02E07 720p");
    }

    #[test]
    fn test_render_pads_unpadded_fields() {
        let out = render("S{Sn}E{ep}", &fields("7", "2", "720p"));
        assert_eq!(out, "S02E07");
    }

    #[test]
    fn test_render_collapses_whitespace() {
        let out = render("  Naruto   S{Sn}  -  E{ep}   {quality}  ", &fields("07", "02", "1080p"));
        assert_eq!(out, "Naruto S02 - E07 1080p");
    }

    #[test]
    fn test_render_missing_fields_use_fallbacks() {
        let out = render("E{ep} {quality} S{Sn}", &ParsedName::default());
        assert_eq!(out, "E01 480p S01");
    }

    #[test]
    fn test_render_idempotent_without_tokens() {
        let once = render("Plain Name [Dual Audio]", &ParsedName::default());
        let twice = render(&once, &ParsedName::default());
        assert_eq!(once, twice);
        assert_eq!(once, "Plain Name [Dual Audio]");
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render("{ep}-{ep}", &fields("03", "01", "720p"));
        assert_eq!(out, "03-03");
    }
}
