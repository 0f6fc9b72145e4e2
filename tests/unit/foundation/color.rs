use super::*;

#[test]
fn parses_named_colors_case_insensitively() {
    let white = BackgroundColor::parse("white").unwrap();
    assert_eq!(
        white.to_rgba8_premul(),
        Rgba8Premul {
            r: 255,
            g: 255,
            b: 255,
            a: 255
        }
    );

    let red = BackgroundColor::parse("  RED ").unwrap();
    assert_eq!(red.to_rgba8_premul().r, 255);
    assert_eq!(red.to_rgba8_premul().g, 0);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c = BackgroundColor::parse("#ff0000").unwrap();
    assert_eq!(
        c.to_rgba8_premul(),
        Rgba8Premul {
            r: 255,
            g: 0,
            b: 0,
            a: 255
        }
    );

    // Premultiplied by the hex alpha.
    let c = BackgroundColor::parse("#0000ff80").unwrap();
    let px = c.to_rgba8_premul();
    assert_eq!(px.a, 128);
    assert_eq!(px.b, 128);
    assert_eq!(px.r, 0);
}

#[test]
fn transparent_premultiplies_to_zero() {
    let c = BackgroundColor::parse("transparent").unwrap();
    assert_eq!(c.to_rgba8_premul(), Rgba8Premul::default());
}

#[test]
fn rejects_unknown_descriptors() {
    assert!(BackgroundColor::parse("mauve-ish").is_err());
    assert!(BackgroundColor::parse("#12345").is_err());
    assert!(BackgroundColor::parse("#gg0000").is_err());
}

#[test]
fn default_is_white_and_round_trips_descriptor() {
    let bg = BackgroundColor::default();
    assert_eq!(bg.descriptor(), DEFAULT_BACKGROUND);
    assert_eq!(
        BackgroundColor::parse(bg.descriptor()).unwrap().descriptor(),
        "white"
    );
}
