use trackrec::types::{ExternalUrls, Track, TrackArtist};
use trackrec::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                name: a.to_string(),
            })
            .collect(),
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/track/{}", id),
        },
    }
}

const NOW: i64 = 1_728_300_000_000;

#[test]
fn test_expiry_from_now() {
    assert_eq!(expiry_from_now(NOW, 3600), NOW + 3_600_000);
    assert_eq!(expiry_from_now(NOW, 0), NOW);
}

#[test]
fn test_parse_expiry_param_millis() {
    let ms = "1728303600000";
    assert_eq!(parse_expiry_param(Some(ms), NOW), 1_728_303_600_000);
}

#[test]
fn test_parse_expiry_param_seconds() {
    // backend sends epoch seconds
    assert_eq!(
        parse_expiry_param(Some("1728303600"), NOW),
        1_728_303_600_000
    );
}

#[test]
fn test_parse_expiry_param_fallback() {
    // Missing or garbage values default to one hour from now
    assert_eq!(parse_expiry_param(None, NOW), NOW + 3_600_000);
    assert_eq!(parse_expiry_param(Some("soon"), NOW), NOW + 3_600_000);
    assert_eq!(parse_expiry_param(Some("-5"), NOW), NOW + 3_600_000);
    assert_eq!(parse_expiry_param(Some(""), NOW), NOW + 3_600_000);
}

#[test]
fn test_credential_from_redirect() {
    let credential =
        credential_from_redirect(Some("acc"), Some("ref"), Some("1728303600"), NOW).unwrap();
    assert_eq!(credential.access_token, "acc");
    assert_eq!(credential.refresh_token, "ref");
    assert_eq!(credential.expiry, 1_728_303_600_000);
}

#[test]
fn test_credential_from_redirect_requires_both_tokens() {
    assert!(credential_from_redirect(Some("acc"), None, None, NOW).is_none());
    assert!(credential_from_redirect(None, Some("ref"), None, NOW).is_none());
    assert!(credential_from_redirect(Some("  "), Some("ref"), None, NOW).is_none());
}

#[test]
fn test_join_artist_names() {
    let track = create_test_track("t1", "Song", &["Artist A", "Artist B", "Artist C"]);
    assert_eq!(join_artist_names(&track), "Artist A, Artist B, Artist C");

    let solo = create_test_track("t2", "Solo", &["Only One"]);
    assert_eq!(join_artist_names(&solo), "Only One");
}

#[test]
fn test_build_track_rows() {
    let tracks = vec![
        create_test_track("t1", "First", &["A", "B"]),
        create_test_track("t2", "Second", &["C"]),
    ];

    let rows = build_track_rows(&tracks);

    // Order is kept as given
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "First");
    assert_eq!(rows[0].artists, "A, B");
    assert_eq!(rows[0].link, "https://open.spotify.com/track/t1");
    assert_eq!(rows[1].name, "Second");
}

#[test]
fn test_describe_remaining() {
    assert_eq!(describe_remaining(NOW + 30_000, NOW), "in 30s");
    assert_eq!(describe_remaining(NOW + 90_000, NOW), "in 1m 30s");
    assert_eq!(describe_remaining(NOW + 3_660_000, NOW), "in 1h 1m");
    assert_eq!(describe_remaining(NOW - 120_000, NOW), "2m 0s ago");
}

#[test]
fn test_format_expiry() {
    let formatted = format_expiry(NOW);
    // YYYY-MM-DD HH:MM:SS
    assert_eq!(formatted.len(), 19);
    assert!(formatted.starts_with("2024-10-0"));
}
