use super::*;

#[test]
fn test_defaults_cover_every_section() {
    let settings: Settings = Settings::builder()
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.storage.storage_type, "local");
    assert_eq!(settings.storage.media_url, "/media/");
    assert_eq!(settings.extraction.queue, "commandhub:extract");
    assert_eq!(settings.extraction.reconcile_interval_secs, 30);
    assert_eq!(settings.platform.version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_overrides_replace_defaults() {
    let settings: Settings = Settings::builder()
        .unwrap()
        .set_override("extraction.queue", "jobs")
        .unwrap()
        .set_override("storage.storage_type", "memory")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.extraction.queue, "jobs");
    assert_eq!(settings.storage.storage_type, "memory");
}
