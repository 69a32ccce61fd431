//! Webhook notification fan-out.

mod webhook;

use chrono::FixedOffset;

pub use webhook::WebhookNotifier;

/// Layout used for timestamps in notification text and result lines.
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Fixed display timezone for notification text (UTC+9).
pub fn display_zone() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}
