use std::io::{Cursor, Read as _};

use super::*;

#[test]
fn packages_entries_under_their_names() {
    let entries = vec![
        ArchiveEntry {
            name: "a-squared.png".to_owned(),
            bytes: vec![1, 2, 3],
        },
        ArchiveEntry {
            name: "b-squared.png".to_owned(),
            bytes: vec![4, 5],
        },
    ];
    let blob = ZipPackager::new().package(&entries).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(blob)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut content = Vec::new();
    archive
        .by_name("a-squared.png")
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    assert_eq!(content, [1, 2, 3]);

    content.clear();
    archive
        .by_name("b-squared.png")
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    assert_eq!(content, [4, 5]);
}

#[test]
fn empty_entry_set_packages_to_an_empty_archive() {
    let blob = ZipPackager::new().package(&[]).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(blob)).unwrap();
    assert_eq!(archive.len(), 0);
}

#[test]
fn archive_name_is_stable() {
    assert_eq!(ARCHIVE_FILE_NAME, "squared-images.zip");
}
