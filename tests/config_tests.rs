//! Site configuration and menu payload tests

use std::fs;
use tempfile::TempDir;
use termfolio::session::MemorySessionStore;
use termfolio::ui::menu::parse_payload;
use termfolio::ui::{Config, ConfigError, MenuItem, Orchestrator, SelectableMenu, Theme};

#[test]
fn test_config_file_drives_orchestrator() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "page": "/notes",
            "targets": [{"label": "Notes", "path": "/notes"}],
            "shortcuts": {"N": "/notes"},
            "prompt": {"glyph": ">"},
            "console": {"height": 8, "min_height": 4}
        }"#,
    )
    .expect("write");

    let config = Config::load_from(&path).expect("load_from");
    let orchestrator = Orchestrator::new(
        config.page.clone(),
        &config,
        Box::new(MemorySessionStore::new()),
    )
    .expect("valid config");

    assert_eq!(orchestrator.page_label(), "Notes");
    assert_eq!(orchestrator.prompt().glyph(), ">");
    assert_eq!(orchestrator.tray().height(), 8);
    assert_eq!(orchestrator.tray().min_height(), 4);
    assert_eq!(orchestrator.shortcuts().lookup('n'), Some("/notes"));
    assert_eq!(orchestrator.shortcuts().len(), 1);
}

#[test]
fn test_config_rejects_unknown_nested_field() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"console": {"height": 8, "width": 3}}"#).expect("write");

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_invalid_shortcut_key_rejected_at_construction() {
    let mut config = Config::default();
    config.shortcuts.insert("1".to_string(), "/one".to_string());
    let result = Orchestrator::new("/", &config, Box::new(MemorySessionStore::new()));
    assert!(matches!(result, Err(ConfigError::InvalidShortcut(key)) if key == "1"));
}

#[test]
fn test_save_and_reload_preserves_targets() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("nested").join("config.json");
    let config = Config {
        targets: vec![MenuItem::new("Talks", "/talks")],
        ..Config::default()
    };
    config.save_to(&path).expect("save_to");

    let saved = fs::read_to_string(&path).expect("read");
    assert!(saved.contains("\"target\": \"/talks\""));
    let loaded = Config::load_from(&path).expect("load_from");
    assert_eq!(loaded.targets, config.targets);
}

#[test]
fn test_payload_parses_label_and_path() {
    let items = parse_payload(r#"[{"label": "Home", "path": "/"}, {"label": "Blog", "path": "/blog"}]"#)
        .expect("valid payload");
    assert_eq!(
        items,
        vec![MenuItem::new("Home", "/"), MenuItem::new("Blog", "/blog")]
    );
}

#[test]
fn test_malformed_payload_falls_back_to_empty_menu() {
    for payload in ["", "null", "{\"label\": \"Home\"}", "[{\"label\": 1}]"] {
        assert!(
            matches!(parse_payload(payload), Err(ConfigError::MenuPayload(_))),
            "payload {payload:?}"
        );
        assert!(SelectableMenu::from_payload(payload, None).is_empty());
    }
}

#[test]
fn test_configured_theme_name_resolves() {
    for theme in Theme::all() {
        let config = Config {
            theme: theme.name.to_string(),
            ..Config::default()
        };
        assert!(Theme::by_name(&config.theme).is_some());
    }
}
