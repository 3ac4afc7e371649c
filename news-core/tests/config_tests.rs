use std::time::Duration;

use news_core::config::DEFAULT_BASE_URL;
use news_core::{AppConfig, ConfigError};

fn temp_dir(prefix: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "{prefix}_{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

#[test]
fn defaults_point_at_seed_source() {
    let config = AppConfig::default();
    assert_eq!(config.source.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.source.seed_filter, "ocean");
    assert_eq!(config.base_url().unwrap().as_str(), DEFAULT_BASE_URL);

    let fetch = config.fetch_config();
    assert_eq!(fetch.request_timeout, Duration::from_secs(10));
    assert_eq!(fetch.max_retries, 1);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = temp_dir("newsdesk_config");
    let path = dir.join("config.json");

    let mut config = AppConfig::default();
    config.source.seed_filter = "space".into();
    config.network.retry_attempts = 4;
    config.save_to(&path).unwrap();

    let loaded = AppConfig::from_file(&path).unwrap();
    assert_eq!(loaded.source.seed_filter, "space");
    assert_eq!(loaded.fetch_config().max_retries, 4);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = temp_dir("newsdesk_partial");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{ "source": { "seed_filter": "tides" } }"#).unwrap();

    let loaded = AppConfig::from_file(&path).unwrap();
    assert_eq!(loaded.source.seed_filter, "tides");
    assert_eq!(loaded.source.base_url, DEFAULT_BASE_URL);
    assert_eq!(loaded.network.request_timeout_seconds, 10);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupted_file_and_bad_url_are_errors() {
    let dir = temp_dir("newsdesk_corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, b"{ this is not json ").unwrap();

    assert!(matches!(
        AppConfig::from_file(&path),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        AppConfig::from_file(dir.join("missing.json")),
        Err(ConfigError::Io(_))
    ));

    let mut config = AppConfig::default();
    config.source.base_url = "not a url".into();
    assert!(matches!(config.base_url(), Err(ConfigError::Url(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn backoff_grows_linearly_and_saturates() {
    let mut fetch = AppConfig::default().fetch_config();
    assert_eq!(fetch.backoff(1), Duration::from_millis(250));
    assert_eq!(fetch.backoff(3), Duration::from_millis(750));

    fetch.retry_backoff_ms = u64::MAX;
    assert_eq!(fetch.backoff(2), Duration::from_millis(u64::MAX));
}

#[test]
fn theme_derives_widget_colours_from_configured_palette() {
    use news_core::config::{shade, ThemeConfig};

    let mut theme = ThemeConfig::default();
    theme.panel_color = [100, 100, 100];
    theme.background_color = [2, 40, 250];
    theme.accent_color = [10, 20, 30];

    assert_eq!(theme.widget_color32(), egui::Color32::from_rgb(113, 113, 113));
    assert_eq!(theme.hover_color32(), egui::Color32::from_rgb(109, 109, 109));
    assert_eq!(theme.input_color32(), egui::Color32::from_rgb(0, 35, 245));
    assert_eq!(
        theme.selection_color32(),
        egui::Color32::from_rgba_unmultiplied(10, 20, 30, 60)
    );
    assert_eq!(shade([250, 0, 128], 10), egui::Color32::from_rgb(255, 10, 138));
}
