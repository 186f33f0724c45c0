use gridnote_core::{
    detect_frontmatter, parse_document, parse_text, Document, HeadingLevel, LineRange,
};

const CORPUS: &[&str] = &[
    "",
    "\n",
    "plain text without headings",
    "## Only heading",
    "## A\nfoo\n\n## B\nbar",
    "## A\nfoo\n\n## B\nbar\n",
    "intro line\n\n## A\nbody\n",
    "---\ntitle: x\n---\n## A\n- [ ] item\n## B\n",
    "---\nunclosed: true\n## A\nbody",
    "---\n---\n\n\n## A\n### nested\ntext\n## A\ndup",
    "## A\r\nwindows\r\n## B\r\n",
    "   ## indented is not a heading\n## Real\n",
    "## A\n## B\n## C",
];

fn level(value: u8) -> HeadingLevel {
    HeadingLevel::new(value).expect("valid heading level")
}

#[test]
fn level_one_sections_split_as_expected() {
    let parsed = parse_text("# A\nfoo\n\n# B\nbar", level(1));

    assert_eq!(parsed.sections.len(), 2);
    assert_eq!(parsed.sections[0].name, "A");
    assert_eq!(parsed.sections[0].lines, vec!["foo", ""]);
    assert_eq!(parsed.sections[1].name, "B");
    assert_eq!(parsed.sections[1].lines, vec!["bar"]);
}

#[test]
fn frontmatter_range_and_single_section() {
    let document = Document::from_text("---\nx: 1\n---\n\n## S\nbody");
    assert_eq!(detect_frontmatter(document.lines()), LineRange::new(0, 3));

    let parsed = parse_document(&document, level(2));
    assert_eq!(parsed.frontmatter, LineRange::new(0, 3));
    assert_eq!(parsed.sections.len(), 1);
    assert_eq!(parsed.sections[0].name, "S");
    assert_eq!(parsed.sections[0].lines, vec!["body"]);
}

#[test]
fn round_trip_reconstructs_every_corpus_document() {
    for text in CORPUS {
        for value in 1..=3 {
            let document = Document::from_text(text);
            let parsed = parse_document(&document, level(value));
            let rebuilt = Document::from_lines(parsed.reconstruct_lines(document.lines()));
            assert_eq!(rebuilt.to_text(), *text, "level {value} round trip of {text:?}");
        }
    }
}

#[test]
fn opaque_ranges_and_sections_tile_the_document() {
    for text in CORPUS {
        let document = Document::from_text(text);
        let parsed = parse_document(&document, level(2));

        assert_eq!(parsed.frontmatter.start, 0);
        assert_eq!(parsed.preamble.start, parsed.frontmatter.end);
        let mut cursor = parsed.preamble.end;
        for section in &parsed.sections {
            assert_eq!(section.start_line, cursor, "gap before section in {text:?}");
            assert_eq!(section.lines.len(), section.end_line - section.start_line - 1);
            cursor = section.end_line;
        }
        assert_eq!(cursor, document.len(), "sections must end at document end");
    }
}

#[test]
fn preamble_is_preserved_but_not_a_section() {
    let document = Document::from_text("---\na: b\n---\nloose note\n\n## Todo\nx");
    let parsed = parse_document(&document, level(2));

    assert_eq!(parsed.preamble, LineRange::new(3, 5));
    assert_eq!(parsed.section_names(), vec!["Todo"]);
    assert_eq!(
        &document.lines()[parsed.preamble.start..parsed.preamble.end],
        &["loose note".to_string(), String::new()]
    );
}

#[test]
fn unclosed_frontmatter_is_parsed_as_body_text() {
    let parsed = parse_text("---\nunclosed: true\n## A\nbody", level(2));
    assert!(parsed.frontmatter.is_empty());
    assert_eq!(parsed.preamble, LineRange::new(0, 2));
    assert_eq!(parsed.section_names(), vec!["A"]);
}

#[test]
fn parse_result_serializes_with_line_coordinates() {
    let parsed = parse_text("## A\nx", level(2));
    let json = serde_json::to_value(&parsed).expect("serialize parse");
    assert_eq!(json["sections"][0]["name"], "A");
    assert_eq!(json["sections"][0]["start_line"], 0);
    assert_eq!(json["sections"][0]["end_line"], 2);
    assert_eq!(json["frontmatter"]["end"], 0);
}
