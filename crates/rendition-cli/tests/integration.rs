//! Integration tests for the rendition CLI commands

use std::fs;

use rendition_cli::{events_command, reference_command, render_events};
use tempfile::TempDir;

const TREE: &str = r#"{
    "type": "document",
    "children": [
        {"type": "paragraph", "children": [
            {"type": "word", "text": "Done"},
            {"type": "space"},
            {"type": "special_symbol", "symbol": "("},
            {"type": "word", "text": "y"},
            {"type": "special_symbol", "symbol": ")"}
        ]}
    ]
}"#;

fn write_tree(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tree.json");
    fs::write(&path, TREE).unwrap();
    path
}

#[test]
fn test_events_without_transform() {
    let dir = TempDir::new().unwrap();
    let input = write_tree(&dir);

    let events = render_events(&input, false, None).unwrap();
    assert_eq!(
        events,
        "beginDocument [[syntax]=[json/1.0]]\n\
         beginParagraph\n\
         onWord [Done]\n\
         onSpace\n\
         onSpecialSymbol [(]\n\
         onWord [y]\n\
         onSpecialSymbol [)]\n\
         endParagraph\n\
         endDocument [[syntax]=[json/1.0]]"
    );
}

#[test]
fn test_events_with_transform() {
    let dir = TempDir::new().unwrap();
    let input = write_tree(&dir);

    let events = render_events(&input, true, None).unwrap();
    assert!(events.contains("onImage [Typed = [true] Type = [icon] Reference = [thumb_up]] [true]"));
    assert!(!events.contains("onSpecialSymbol"));
}

#[test]
fn test_config_next_to_input_is_used() {
    let dir = TempDir::new().unwrap();
    let input = write_tree(&dir);
    fs::write(
        dir.path().join("rendition.toml"),
        "[transformations.icon.mappings]\n\"(y)\" = \"yes\"\n",
    )
    .unwrap();

    let events = render_events(&input, true, None).unwrap();
    assert!(events.contains("Reference = [yes]"));
}

#[test]
fn test_explicit_config() {
    let dir = TempDir::new().unwrap();
    let input = write_tree(&dir);
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[transformations]\nenabled = []\n").unwrap();

    let events = render_events(&input, true, Some(config.as_path())).unwrap();
    assert!(!events.contains("onImage"));
}

#[test]
fn test_unknown_transformation_in_config() {
    let dir = TempDir::new().unwrap();
    let input = write_tree(&dir);
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[transformations]\nenabled = [\"toc\"]\n").unwrap();

    let err = render_events(&input, true, Some(config.as_path())).unwrap_err();
    assert_eq!(err.to_string(), "Invalid transformation settings");
    assert_eq!(err.root_cause().to_string(), "Unknown transformation: toc");
}

#[test]
fn test_missing_files() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let err = render_events(&missing, false, None).unwrap_err();
    assert!(err.to_string().starts_with("Input file not found"));

    let input = write_tree(&dir);
    let err = render_events(&input, true, Some(dir.path().join("none.toml").as_path())).unwrap_err();
    assert!(err.to_string().starts_with("Config file not found"));
}

#[test]
fn test_invalid_tree() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{\"type\": \"nonsense\"}").unwrap();

    let err = render_events(&input, false, None).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse tree"));
}

#[test]
fn test_events_command_writes_output() {
    let dir = TempDir::new().unwrap();
    let input = write_tree(&dir);
    let output = dir.path().join("tree.events");

    events_command(&input, false, None, Some(output.as_path())).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("beginDocument"));
    assert!(written.ends_with("endDocument [[syntax]=[json/1.0]]"));
}

#[test]
fn test_reference_command_with_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rendition.toml");
    fs::write(&config, "[references]\nwiki_mode = false\n").unwrap();

    reference_command("Main.Page", false, false, Some(config.as_path())).unwrap();
    reference_command("image.png", true, true, Some(config.as_path())).unwrap();
}
