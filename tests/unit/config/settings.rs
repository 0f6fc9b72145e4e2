use super::*;

fn temp_settings_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "squarize_{name}_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn memory_store_round_trips() {
    let store = MemorySettings::new();
    assert_eq!(store.load(BACKGROUND_COLOR_KEY).unwrap(), None);

    store.save(BACKGROUND_COLOR_KEY, "black").unwrap();
    assert_eq!(
        store.load(BACKGROUND_COLOR_KEY).unwrap().as_deref(),
        Some("black")
    );

    store.save(BACKGROUND_COLOR_KEY, "white").unwrap();
    assert_eq!(
        store.load(BACKGROUND_COLOR_KEY).unwrap().as_deref(),
        Some("white")
    );
}

#[test]
fn file_store_missing_file_reads_as_unset() {
    let store = JsonFileSettings::new(temp_settings_path("missing"));
    assert_eq!(store.load(BACKGROUND_COLOR_KEY).unwrap(), None);
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_settings_path("persist");
    let store = JsonFileSettings::new(&path);
    store.save(BACKGROUND_COLOR_KEY, "#336699").unwrap();
    store.save("unrelated", "kept").unwrap();

    let reopened = JsonFileSettings::new(&path);
    assert_eq!(
        reopened.load(BACKGROUND_COLOR_KEY).unwrap().as_deref(),
        Some("#336699")
    );
    assert_eq!(reopened.load("unrelated").unwrap().as_deref(), Some("kept"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn file_store_rejects_corrupt_files() {
    let path = temp_settings_path("corrupt");
    std::fs::write(&path, b"not json").unwrap();
    let store = JsonFileSettings::new(&path);
    assert!(store.load(BACKGROUND_COLOR_KEY).is_err());
    std::fs::remove_file(&path).ok();
}
