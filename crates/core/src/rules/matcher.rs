//! First-match rule selection for incoming uploads.

use crate::media::ChannelId;
use crate::rules::Rule;

/// Selects the first rule (insertion order) that matches the filename and
/// the upload's origin.
///
/// A channel-scoped rule is skipped unless the upload was forwarded from
/// one of its channels; the trigger keyword then has to appear as a
/// case-insensitive substring of the filename. No match is not an error —
/// the caller falls back to the manual rename path.
pub fn find_match<'a>(
    rules: &'a [Rule],
    filename: &str,
    origin: Option<ChannelId>,
) -> Option<&'a Rule> {
    let lowered = filename.to_lowercase();
    rules.iter().find(|rule| {
        if rule.is_channel_scoped() {
            match origin {
                Some(channel) if rule.channels.contains(&channel) => {}
                _ => return false,
            }
        }
        let trigger = rule.trigger.to_lowercase();
        !trigger.is_empty() && lowered.contains(&trigger)
    })
}
