use chrono::{Local, TimeZone, Utc};

use crate::{
    management::DEFAULT_EXPIRES_IN_SECS,
    types::{Credential, Track, TrackTableRow},
};

/// Anything below this is taken to be epoch seconds rather than milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn expiry_from_now(now_ms: i64, expires_in_secs: u64) -> i64 {
    now_ms.saturating_add((expires_in_secs as i64).saturating_mul(1000))
}

/// Parses an `expiry_time` value from the login redirect into epoch ms.
///
/// The backend reports the expiry in epoch seconds while the store keeps
/// milliseconds, so small values are scaled up. Missing or unparsable values
/// fall back to one hour from `now_ms`.
pub fn parse_expiry_param(value: Option<&str>, now_ms: i64) -> i64 {
    match value.and_then(|v| v.trim().parse::<f64>().ok()) {
        Some(v) if v.is_finite() && v > 0.0 => {
            let v = v as i64;
            if v < EPOCH_MILLIS_THRESHOLD {
                v.saturating_mul(1000)
            } else {
                v
            }
        }
        _ => expiry_from_now(now_ms, DEFAULT_EXPIRES_IN_SECS),
    }
}

/// Builds a credential from the login redirect's query values.
///
/// Both tokens have to be present, otherwise nothing is stored.
pub fn credential_from_redirect(
    access_token: Option<&str>,
    refresh_token: Option<&str>,
    expiry_time: Option<&str>,
    now_ms: i64,
) -> Option<Credential> {
    let access_token = access_token.map(str::trim).filter(|t| !t.is_empty())?;
    let refresh_token = refresh_token.map(str::trim).filter(|t| !t.is_empty())?;

    Some(Credential {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        expiry: parse_expiry_param(expiry_time, now_ms),
    })
}

pub fn join_artist_names(track: &Track) -> String {
    track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: join_artist_names(t),
            link: t.external_urls.spotify.clone(),
        })
        .collect()
}

/// Formats an epoch-ms timestamp in local time, e.g. `2024-10-07 14:03:12`.
pub fn format_expiry(expiry_ms: i64) -> String {
    match Local.timestamp_millis_opt(expiry_ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => expiry_ms.to_string(),
    }
}

/// Human readable distance between `now_ms` and `expiry_ms`.
pub fn describe_remaining(expiry_ms: i64, now_ms: i64) -> String {
    let diff = expiry_ms - now_ms;
    let secs = diff.abs() / 1000;
    let text = if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    };

    if diff >= 0 {
        format!("in {}", text)
    } else {
        format!("{} ago", text)
    }
}
