//! Tests for the client fingerprint and its serialized profile form.

use candela::{js_string_hash, ClientProfile};

fn linux_profile() -> ClientProfile {
    ClientProfile {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36".to_string(),
        language: "en-US".to_string(),
        screen_width: 1920,
        screen_height: 1080,
        timezone_offset_min: -60,
    }
}

#[test]
fn test_profile_serializes_with_camel_case_keys() {
    let json = serde_json::to_value(linux_profile()).expect("profile serializes");
    let obj = json.as_object().expect("profile is an object");

    assert!(obj.contains_key("userAgent"));
    assert!(obj.contains_key("language"));
    assert!(obj.contains_key("screenWidth"));
    assert!(obj.contains_key("screenHeight"));
    assert!(obj.contains_key("timezoneOffsetMin"));
}

#[test]
fn test_profile_deserializes_from_camel_case() {
    let profile: ClientProfile = serde_json::from_str(
        r#"{
            "userAgent": "TestBrowser/1.0",
            "language": "de-DE",
            "screenWidth": 800,
            "screenHeight": 600,
            "timezoneOffsetMin": 120
        }"#,
    )
    .expect("camelCase profile deserializes");

    assert_eq!(profile.user_agent, "TestBrowser/1.0");
    assert_eq!(profile.screen_width, 800);
    assert_eq!(profile.timezone_offset_min, 120);
}

#[test]
fn test_serde_round_trip_preserves_the_fingerprint() {
    let profile = linux_profile();
    let json = serde_json::to_string(&profile).expect("serializes");
    let back: ClientProfile = serde_json::from_str(&json).expect("deserializes");

    assert_eq!(back, profile);
    assert_eq!(back.fingerprint(), profile.fingerprint());
}

#[test]
fn test_distinct_profiles_usually_hash_apart() {
    // Not a collision-resistance claim, just a sanity check that each
    // attribute actually feeds the hash.
    let base = linux_profile();

    let mut other_language = base.clone();
    other_language.language = "fr-FR".to_string();

    let mut other_screen = base.clone();
    other_screen.screen_width = 2560;

    let mut other_zone = base.clone();
    other_zone.timezone_offset_min = 0;

    assert_ne!(base.fingerprint(), other_language.fingerprint());
    assert_ne!(base.fingerprint(), other_screen.fingerprint());
    assert_ne!(base.fingerprint(), other_zone.fingerprint());
}

#[test]
fn test_empty_profile_still_produces_digits() {
    let profile = ClientProfile {
        user_agent: String::new(),
        language: String::new(),
        screen_width: 0,
        screen_height: 0,
        timezone_offset_min: 0,
    };
    let token = profile.fingerprint();

    assert!(!token.is_empty());
    assert!(token.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_hash_is_order_sensitive() {
    assert_ne!(js_string_hash("ab"), js_string_hash("ba"));
    assert_ne!(js_string_hash("1920x1080"), js_string_hash("1080x1920"));
}
