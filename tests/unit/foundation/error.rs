use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SquarizeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SquarizeError::decode("x").to_string().contains("decode error:"));
    assert!(
        SquarizeError::context("x")
            .to_string()
            .contains("context error:")
    );
    assert!(
        SquarizeError::packaging("x")
            .to_string()
            .contains("packaging error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SquarizeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
