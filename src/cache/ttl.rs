//! TTL parsing and display.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Default cache lifetime: 15 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Longest lifetime configuration accepts: 10 years.
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 86_400);

/// Parse a TTL string like "7d", "24h", "15m", "900s" or "900".
pub fn parse_ttl(ttl: &str) -> Result<Duration> {
    let ttl = ttl.trim().to_lowercase();

    let (digits, unit) = if let Some(days) = ttl.strip_suffix('d') {
        (days, 86_400)
    } else if let Some(hours) = ttl.strip_suffix('h') {
        (hours, 3_600)
    } else if let Some(mins) = ttl.strip_suffix('m') {
        (mins, 60)
    } else if let Some(secs) = ttl.strip_suffix('s') {
        (secs, 1)
    } else {
        // Assume seconds if no suffix
        (ttl.as_str(), 1)
    };

    if digits.is_empty() {
        bail!("TTL '{}' has no number", ttl);
    }

    let n: u64 = digits
        .trim()
        .parse()
        .with_context(|| format!("Invalid TTL '{}'", ttl))?;

    match n.checked_mul(unit) {
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => bail!("TTL '{}' is too large", ttl),
    }
}

/// Format a duration for display, in its largest whole unit.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs >= 86_400 && secs % 86_400 == 0 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 && secs % 3_600 == 0 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// The instant `ttl` after `now`, or an error if it is not representable.
pub(crate) fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    let delta = chrono::Duration::from_std(ttl)
        .with_context(|| format!("TTL {} is out of range", format_duration(ttl)))?;
    now.checked_add_signed(delta)
        .with_context(|| format!("TTL {} overflows the expiry timestamp", format_duration(ttl)))
}
