use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse("#ff0000").unwrap(), Rgba8::new(255, 0, 0, 255));
    assert_eq!(Rgba8::parse("#0f0").unwrap(), Rgba8::new(0, 255, 0, 255));
    assert_eq!(Rgba8::parse("#0000ff80").unwrap(), Rgba8::new(0, 0, 255, 128));
    assert!(Rgba8::parse("#12345").is_err());
}

#[test]
fn parses_rgb_functions() {
    assert_eq!(
        Rgba8::parse("rgba(253, 98, 104, 0.8)").unwrap(),
        Rgba8::new(253, 98, 104, 204)
    );
    assert_eq!(
        Rgba8::parse("rgb(17, 102, 252)").unwrap(),
        Rgba8::new(17, 102, 252, 255)
    );
    assert!(Rgba8::parse("rgba(1, 2)").is_err());
    assert!(Rgba8::parse("rgba(1, 2, 3").is_err());
}

#[test]
fn parses_named_colors() {
    assert_eq!(Rgba8::parse("Red").unwrap(), Rgba8::new(255, 0, 0, 255));
    assert!(Rgba8::parse("chartreuse-ish").is_err());
}

#[test]
fn display_uses_css_rgba() {
    assert_eq!(Rgba8::new(255, 0, 0, 255).to_string(), "rgba(255, 0, 0, 1)");
    assert_eq!(Rgba8::new(1, 2, 3, 204).to_string(), "rgba(1, 2, 3, 0.8)");
    assert_eq!(Rgba8::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
}

#[test]
fn lerp_is_channel_wise() {
    let a = Rgba8::new(0, 0, 255, 255);
    let b = Rgba8::new(0, 255, 0, 255);
    assert_eq!(Rgba8::lerp(a, b, 0.5), Rgba8::new(0, 128, 128, 255));
    assert_eq!(Rgba8::lerp(a, b, 2.0), b);
}

#[test]
fn serde_uses_strings() {
    let c: Rgba8 = serde_json::from_value(json!("rgba(0, 0, 255, 1)")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 255));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("rgba(0, 0, 255, 1)"));
}
