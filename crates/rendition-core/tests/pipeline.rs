//! End-to-end listener pipelines: trees traversed through fan-outs and
//! chains into the `event/1.0` renderer

use std::any::Any;
use std::cell::RefCell;

use rendition_ast::{Block, Event, EventResult, ListType, MetaData};
use rendition_core::chain::{
    BlockStateStage, ConsecutiveNewLineStage, EmptyBlockStage, ListenerStage, MetaDataStage,
};
use rendition_core::renderer::{BlockRenderer, EventsBlockRenderer, EventsRenderer};
use rendition_core::{
    ChainingListener, CompositeListener, JsonTreeParser, ListenerChain, ParseError, Parser,
    StageKind, StringPrinter,
};

const RECORDER: StageKind = StageKind::Custom("recorder");

/// Records, for every word, what the upstream stages report at that point
#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<String>>,
}

impl ChainingListener for Recorder {
    fn kind(&self) -> StageKind {
        RECORDER
    }

    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        if let Event::Word(word) = event {
            let list = chain
                .inspect(StageKind::BlockState, |s: &BlockStateStage| {
                    (s.list_depth(), s.list_item_index())
                })
                .unwrap_or_default();
            let newlines = chain
                .inspect(StageKind::NewLineState, |s: &ConsecutiveNewLineStage| {
                    s.count()
                })
                .unwrap_or_default();
            let source = chain
                .inspect(StageKind::MetaDataState, |s: &MetaDataStage| {
                    s.meta_data("source")
                })
                .flatten();
            self.seen.borrow_mut().push(format!(
                "{} depth={} item={:?} newlines={} source={:?}",
                word, list.0, list.1, newlines, source
            ));
        }
        chain.forward(self.kind(), event)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn sample_document() -> Block {
    Block::document(
        MetaData::new().with("source", "sample.json"),
        vec![
            Block::paragraph(vec![
                Block::word("intro"),
                Block::new_line(),
                Block::new_line(),
                Block::word("after"),
            ]),
            Block::list(
                ListType::Bulleted,
                vec![
                    Block::list_item(vec![Block::word("one")]),
                    Block::list_item(vec![
                        Block::word("two"),
                        Block::list(
                            ListType::Numbered,
                            vec![Block::list_item(vec![Block::word("nested")])],
                        ),
                    ]),
                ],
            ),
        ],
    )
}

fn build_chain() -> (ListenerChain, std::rc::Rc<RefCell<EventsRenderer<StringPrinter>>>) {
    let printer = ListenerStage::new(StageKind::Printer, EventsRenderer::new(StringPrinter::new()));
    let output = printer.handle();

    let chain = ListenerChain::new()
        .with_stage(ConsecutiveNewLineStage::new())
        .and_then(|c| c.with_stage(BlockStateStage::new()))
        .and_then(|c| c.with_stage(EmptyBlockStage::new()))
        .and_then(|c| c.with_stage(MetaDataStage::new()))
        .and_then(|c| c.with_stage(Recorder::default()))
        .and_then(|c| c.with_stage(printer))
        .unwrap();
    (chain, output)
}

#[test]
fn test_chain_output_matches_direct_rendering() {
    let doc = sample_document();
    let (mut chain, output) = build_chain();

    doc.traverse(&mut chain).unwrap();

    let direct = EventsBlockRenderer.render_to_string(&doc).unwrap();
    assert_eq!(output.borrow().printer().as_str(), direct);
}

#[test]
fn test_stage_state_is_visible_downstream() {
    let doc = sample_document();
    let (mut chain, _output) = build_chain();

    doc.traverse(&mut chain).unwrap();

    let seen = chain
        .inspect(RECORDER, |r: &Recorder| r.seen.borrow().clone())
        .unwrap();
    assert_eq!(
        seen,
        vec![
            "intro depth=0 item=None newlines=0 source=Some(\"sample.json\")",
            "after depth=0 item=None newlines=0 source=Some(\"sample.json\")",
            "one depth=1 item=Some(0) newlines=0 source=Some(\"sample.json\")",
            "two depth=1 item=Some(1) newlines=0 source=Some(\"sample.json\")",
            "nested depth=2 item=Some(0) newlines=0 source=Some(\"sample.json\")",
        ]
    );
}

#[test]
fn test_push_all_stackable_isolates_state() {
    let (mut chain, output) = build_chain();
    let paragraph = Block::paragraph(vec![]);

    // Enter a paragraph, then render a nested document with fresh state
    chain.send(&Event::BeginParagraph(paragraph.parameters())).unwrap();
    assert_eq!(
        chain.inspect(StageKind::BlockState, |s: &BlockStateStage| s.is_in_paragraph()),
        Some(true)
    );

    chain.push_all_stackable();
    assert_eq!(chain.depth(StageKind::BlockState), 2);
    assert_eq!(chain.depth(StageKind::NewLineState), 1);
    assert_eq!(
        chain.inspect(StageKind::BlockState, |s: &BlockStateStage| s.is_in_paragraph()),
        Some(false)
    );
    Block::word("inner").traverse(&mut chain).unwrap();
    chain.pop_all_stackable();

    assert_eq!(chain.depth(StageKind::BlockState), 1);
    assert_eq!(
        chain.inspect(StageKind::BlockState, |s: &BlockStateStage| s.is_in_paragraph()),
        Some(true)
    );
    assert_eq!(
        output.borrow().printer().as_str(),
        "beginParagraph\nonWord [inner]\n"
    );
}

#[test]
fn test_fan_out_into_renderer_and_chain() {
    let doc = sample_document();
    let (mut chain, chained) = build_chain();
    let mut direct = EventsRenderer::new(StringPrinter::new());

    {
        let mut fan_out = CompositeListener::new();
        fan_out.add_listener(&mut direct);
        fan_out.add_listener(&mut chain);
        doc.traverse(&mut fan_out).unwrap();
    }

    assert_eq!(direct.printer().as_str(), chained.borrow().printer().as_str());
    assert!(direct.printer().as_str().ends_with("endDocument [[source]=[sample.json]]"));
}

#[test]
fn test_parsed_tree_keeps_every_word() {
    let source = r#"{"type": "paragraph", "children": [
        {"type": "word", "text": "a", "children": [{"type": "word", "text": "HIDDEN"}]}
    ]}"#;
    let err = JsonTreeParser::new().parse(source).unwrap_err();
    assert!(matches!(err, ParseError::Structure(_)));
    assert_eq!(
        err.to_string(),
        "Invalid tree structure: Word block at /0 cannot have children"
    );

    let source = r#"{"type": "document", "parameters": {"class": "x"}}"#;
    assert!(matches!(
        JsonTreeParser::new().parse(source),
        Err(ParseError::Structure(_))
    ));

    let source = r#"{"type": "paragraph", "children": [
        {"type": "word", "text": "a"},
        {"type": "format", "format": "bold", "children": [{"type": "word", "text": "b"}]}
    ]}"#;
    let tree = JsonTreeParser::new().parse(source).unwrap();
    let events = EventsBlockRenderer.render_to_string(&tree).unwrap();
    assert!(events.contains("onWord [a]\nbeginFormat [BOLD]\nonWord [b]\nendFormat [BOLD]"));
}
