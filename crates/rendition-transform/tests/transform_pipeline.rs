//! Parse, transform and render a tree end to end

use rendition_ast::{Block, Parameters};
use rendition_core::config::Settings;
use rendition_core::renderer::{BlockRenderer, EventsBlockRenderer};
use rendition_core::{JsonTreeParser, Parser};
use rendition_transform::{
    Macro, MacroContext, MacroError, MacroRegistry, TransformationContext, TransformationManager,
    TransformationRegistry,
};

/// `greet` produces "Hello <content> :)"
struct Greet;

impl Macro for Greet {
    fn is_restricted_safe(&self) -> bool {
        true
    }

    fn execute(
        &self,
        parameters: &Parameters,
        content: Option<&str>,
        _inline: bool,
        _context: &MacroContext<'_>,
    ) -> Result<Vec<Block>, MacroError> {
        let name = content.ok_or(MacroError::MissingContent)?;
        let mut blocks = vec![Block::word("Hello"), Block::space(), Block::word(name)];
        if parameters.get("smile").map(String::as_str) == Some("true") {
            blocks.push(Block::space());
            blocks.push(Block::special_symbol(':'));
            blocks.push(Block::special_symbol(')'));
        }
        Ok(blocks)
    }
}

const SOURCE: &str = r#"{
    "type": "document",
    "children": [
        {
            "type": "paragraph",
            "children": [
                {"type": "macro", "id": "greet", "content": "world", "inline": true,
                 "parameters": {"smile": "true"}}
            ]
        }
    ]
}"#;

fn registry() -> TransformationRegistry {
    TransformationRegistry::with_defaults(MacroRegistry::new().with_macro("greet", Greet))
}

fn transform(source: &str, settings: &Settings) -> rendition_transform::Result<Block> {
    let mut tree = JsonTreeParser::new().parse(source).unwrap();
    let manager = registry()
        .build_manager(&settings.transformations)
        .unwrap();
    let context = TransformationContext::for_syntax(JsonTreeParser::new().syntax())
        .with_snapshot(&tree)
        .with_restricted(settings.transformations.restricted);
    manager.perform_transformations(&mut tree, &context)?;
    Ok(tree)
}

#[test]
fn test_macro_then_icon() {
    let tree = transform(SOURCE, &Settings::default()).unwrap();
    let events = EventsBlockRenderer.render_to_string(&tree).unwrap();

    let expected = "\
beginDocument [[syntax]=[json/1.0]]
beginParagraph
beginMacroMarkerInline [greet] [smile=true] [world]
onWord [Hello]
onSpace
onWord [world]
onSpace
onImage [Typed = [true] Type = [icon] Reference = [emoticon_smile]] [true]
endMacroMarkerInline [greet] [smile=true] [world]
endParagraph
endDocument [[syntax]=[json/1.0]]";
    assert_eq!(events, expected);
}

#[test]
fn test_icon_disabled_by_settings() {
    let settings = Settings::from_toml_str(
        r#"
        [transformations]
        enabled = ["macro"]
        "#,
    )
    .unwrap();
    let tree = transform(SOURCE, &settings).unwrap();
    let events = EventsBlockRenderer.render_to_string(&tree).unwrap();

    assert!(events.contains("onSpecialSymbol [:]\nonSpecialSymbol [)]\n"));
    assert!(!events.contains("onImage"));
}

#[test]
fn test_macro_failure_stops_pipeline() {
    let source = r#"{
        "type": "paragraph",
        "children": [
            {"type": "word", "text": "Bye"},
            {"type": "space"},
            {"type": "special_symbol", "symbol": ":"},
            {"type": "special_symbol", "symbol": "("},
            {"type": "macro", "id": "greet"}
        ]
    }"#;

    let err = transform(source, &Settings::default()).unwrap_err();
    assert_eq!(err.pass_name(), Some("macro"));
    assert_eq!(
        err.to_string(),
        "Transformation [macro] failed: Failed to execute macro [greet]: Missing macro content"
    );
}

#[test]
fn test_custom_icon_mapping_from_config() {
    let settings = Settings::from_toml_str(
        r#"
        [transformations.icon.mappings]
        "(heart)" = "heart"
        "#,
    )
    .unwrap();
    let source = r#"{"type": "paragraph", "children": [
        {"type": "special_symbol", "symbol": "("},
        {"type": "word", "text": "heart"},
        {"type": "special_symbol", "symbol": ")"}
    ]}"#;

    let tree = transform(source, &settings).unwrap();
    let events = EventsBlockRenderer.render_to_string(&tree).unwrap();
    assert!(events.contains("onImage [Typed = [true] Type = [icon] Reference = [heart]] [true]"));
}
