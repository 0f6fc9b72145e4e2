use std::sync::Arc;

use super::*;

fn file(media_type: &str, name: &str) -> RawFile {
    RawFile {
        bytes: Arc::from(&b"bytes"[..]),
        media_type: media_type.to_owned(),
        name: name.to_owned(),
    }
}

#[test]
fn exact_media_type_matches() {
    let accept = AcceptList::new(["image/png"]);
    assert!(accept.accepts("image/png", "whatever.bin"));
    assert!(!accept.accepts("image/jpeg", "whatever.bin"));
}

#[test]
fn category_wildcard_matches_any_subtype() {
    let accept = AcceptList::new(["image/*"]);
    assert!(accept.accepts("image/png", "a.png"));
    assert!(accept.accepts("image/webp", "a.webp"));
    assert!(!accept.accepts("text/plain", "a.txt"));
    // A bare `*` entry is a suffix match of the empty string, not a
    // category wildcard; it accepts every name.
    assert!(AcceptList::new(["*"]).accepts("anything/else", "x"));
}

#[test]
fn extension_suffix_matches_case_insensitively() {
    let accept = AcceptList::new([".jpg", ".svg"]);
    assert!(accept.accepts("application/octet-stream", "PHOTO.JPG"));
    assert!(accept.accepts("", "drawing.svg"));
    assert!(!accept.accepts("application/octet-stream", "notes.txt"));
}

#[test]
fn batch_rejection_lists_every_offender() {
    let accept = AcceptList::images();
    let batch = [
        file("image/png", "a.png"),
        file("text/plain", "b.txt"),
        file("application/pdf", "c.pdf"),
    ];
    let err = accept.validate_batch(&batch).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("b.txt"));
    assert!(msg.contains("c.pdf"));
    assert!(!msg.contains("a.png"));
    assert!(matches!(err, crate::SquarizeError::Validation(_)));
}

#[test]
fn all_valid_batch_passes() {
    let accept = AcceptList::images();
    let batch = [
        file("image/png", "a.png"),
        file("image/svg+xml", "b.svg"),
        file("", "c.webp"),
    ];
    accept.validate_batch(&batch).unwrap();
    accept.validate_batch(&[]).unwrap();
}

#[test]
fn default_list_covers_the_documented_categories() {
    assert_eq!(
        AcceptList::default().entries(),
        &["image/*", ".jpg", ".jpeg", ".png", ".webp", ".svg"]
    );
}
