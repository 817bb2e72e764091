//! Markdown rendering for answer text.
//!
//! The pulldown-cmark event stream is folded into a flat block model
//! first and only then mapped to views. Parsing stays free of browser
//! types, so the interesting part is testable natively.

use leptos::prelude::*;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Inline style flags accumulated from nested tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub link: Option<String>,
}

/// A run of text with one resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// One renderable block. List items are flattened with their depth so
/// nested lists survive without a recursive model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdBlock {
    Heading { level: u8, spans: Vec<MdSpan> },
    Paragraph { spans: Vec<MdSpan> },
    ListItem { depth: u8, marker: Option<u64>, spans: Vec<MdSpan> },
    CodeBlock { language: Option<String>, code: String },
    Quote { spans: Vec<MdSpan> },
    Table { head: Vec<String>, rows: Vec<Vec<String>> },
    Rule,
}

/// Parse markdown text into the block model.
pub fn parse_markdown(text: &str) -> Vec<MdBlock> {
    let mut builder = MdBuilder::new();
    let opts = Options::ENABLE_TABLES;
    let parser = Parser::new_ext(text, opts);
    for event in parser {
        builder.process(event);
    }
    builder.finish()
}

struct MdBuilder {
    blocks: Vec<MdBlock>,
    spans: Vec<MdSpan>,
    style_stack: Vec<SpanStyle>,
    in_code_block: bool,
    code_language: Option<String>,
    code_buf: String,
    in_quote: bool,
    item_open: bool,
    // Next marker per open list level; None for bullet lists
    list_stack: Vec<Option<u64>>,
    // Table buffering: collect all rows, then emit one block
    in_table: bool,
    in_table_head: bool,
    table_head: Vec<String>,
    table_rows: Vec<Vec<String>>,
    current_cell: String,
}

impl MdBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            spans: Vec::new(),
            style_stack: vec![SpanStyle::default()],
            in_code_block: false,
            code_language: None,
            code_buf: String::new(),
            in_quote: false,
            item_open: false,
            list_stack: Vec::new(),
            in_table: false,
            in_table_head: false,
            table_head: Vec::new(),
            table_rows: Vec::new(),
            current_cell: String::new(),
        }
    }

    fn finish(mut self) -> Vec<MdBlock> {
        // A trailing paragraph without a close event should still render
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.blocks.push(MdBlock::Paragraph { spans });
        }
        self.blocks
    }

    fn current_style(&self) -> SpanStyle {
        self.style_stack.last().cloned().unwrap_or_default()
    }

    fn push_style(&mut self, style: SpanStyle) {
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn push_span(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        // Merge adjacent runs with the same style so split text events
        // come out as one span
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(MdSpan {
            text: text.to_string(),
            style,
        });
    }

    fn take_spans(&mut self) -> Vec<MdSpan> {
        std::mem::take(&mut self.spans)
    }

    /// Emit the accumulated spans as a list item at the current depth.
    fn emit_list_item(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let depth = self.list_stack.len().saturating_sub(1) as u8;
        let marker = match self.list_stack.last_mut() {
            Some(Some(next)) => {
                let n = *next;
                *next = n + 1;
                Some(n)
            }
            _ => None,
        };
        let spans = self.take_spans();
        self.blocks.push(MdBlock::ListItem {
            depth,
            marker,
            spans,
        });
    }

    fn process(&mut self, event: Event<'_>) {
        match event {
            // ── Table events ──
            Event::Start(Tag::Table(_)) => {
                self.in_table = true;
                self.table_head.clear();
                self.table_rows.clear();
            }
            Event::End(TagEnd::Table) => {
                self.in_table = false;
                let head = std::mem::take(&mut self.table_head);
                let rows = std::mem::take(&mut self.table_rows);
                if !head.is_empty() || !rows.is_empty() {
                    self.blocks.push(MdBlock::Table { head, rows });
                }
            }
            Event::Start(Tag::TableHead) => {
                self.in_table_head = true;
            }
            Event::End(TagEnd::TableHead) => {
                self.in_table_head = false;
            }
            Event::Start(Tag::TableRow) => {
                if !self.in_table_head {
                    self.table_rows.push(Vec::new());
                }
            }
            Event::End(TagEnd::TableRow) => {}
            Event::Start(Tag::TableCell) => {
                self.current_cell.clear();
            }
            Event::End(TagEnd::TableCell) => {
                let cell = std::mem::take(&mut self.current_cell);
                if self.in_table_head {
                    self.table_head.push(cell);
                } else if let Some(row) = self.table_rows.last_mut() {
                    row.push(cell);
                }
            }

            // ── Heading ──
            Event::Start(Tag::Heading { .. }) => {}
            Event::End(TagEnd::Heading(level)) => {
                let spans = self.take_spans();
                self.blocks.push(MdBlock::Heading {
                    level: heading_depth(level),
                    spans,
                });
            }

            // ── Paragraph ──
            Event::Start(Tag::Paragraph) => {
                // Loose list items wrap their text in paragraphs;
                // separate them inside the item instead of emitting
                if self.item_open && !self.spans.is_empty() {
                    let style = self.current_style();
                    self.push_span(" ", style);
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if self.in_table || self.item_open {
                    return;
                }
                let spans = self.take_spans();
                if spans.is_empty() {
                    return;
                }
                if self.in_quote {
                    self.blocks.push(MdBlock::Quote { spans });
                } else {
                    self.blocks.push(MdBlock::Paragraph { spans });
                }
            }

            // ── Block quote ──
            Event::Start(Tag::BlockQuote(..)) => {
                self.in_quote = true;
            }
            Event::End(TagEnd::BlockQuote(..)) => {
                self.in_quote = false;
            }

            // ── Inline formatting ──
            Event::Start(Tag::Strong) => {
                let mut style = self.current_style();
                style.bold = true;
                self.push_style(style);
            }
            Event::End(TagEnd::Strong) => {
                self.pop_style();
            }
            Event::Start(Tag::Emphasis) => {
                let mut style = self.current_style();
                style.italic = true;
                self.push_style(style);
            }
            Event::End(TagEnd::Emphasis) => {
                self.pop_style();
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                let mut style = self.current_style();
                style.link = Some(dest_url.to_string());
                self.push_style(style);
            }
            Event::End(TagEnd::Link) => {
                self.pop_style();
            }
            Event::Code(code) => {
                if self.in_table {
                    self.current_cell.push_str(&code);
                } else {
                    let mut style = self.current_style();
                    style.code = true;
                    // Force a separate span even next to same-styled text
                    self.spans.push(MdSpan {
                        text: code.to_string(),
                        style,
                    });
                }
            }

            // ── Code blocks ──
            Event::Start(Tag::CodeBlock(kind)) => {
                self.in_code_block = true;
                self.code_buf.clear();
                self.code_language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                let code = std::mem::take(&mut self.code_buf);
                self.blocks.push(MdBlock::CodeBlock {
                    language: self.code_language.take(),
                    code: code.trim_end_matches('\n').to_string(),
                });
            }

            // ── Lists ──
            Event::Start(Tag::List(start)) => {
                // A nested list begins while the parent item text is
                // still pending; emit that text at the parent depth
                if self.item_open {
                    self.emit_list_item();
                }
                self.list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                self.item_open = true;
            }
            Event::End(TagEnd::Item) => {
                self.emit_list_item();
                self.item_open = self.list_stack.len() > 1;
            }

            // ── Text ──
            Event::Text(text) => {
                if self.in_table {
                    self.current_cell.push_str(&text);
                } else if self.in_code_block {
                    self.code_buf.push_str(&text);
                } else {
                    let style = self.current_style();
                    self.push_span(&text, style);
                }
            }
            Event::SoftBreak => {
                if !self.in_table && !self.in_code_block {
                    let style = self.current_style();
                    self.push_span(" ", style);
                }
            }
            Event::HardBreak => {
                if !self.in_table && !self.in_code_block {
                    let style = self.current_style();
                    self.push_span("\n", style);
                }
            }

            // ── Horizontal rule (---) ──
            Event::Rule => {
                self.blocks.push(MdBlock::Rule);
            }

            _ => {}
        }
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Rendered markdown answer.
#[component]
pub fn MarkdownView(text: String) -> impl IntoView {
    let blocks = parse_markdown(&text);
    view! {
        <div class="markdown-body">
            {blocks.into_iter().map(render_block).collect_view()}
        </div>
    }
}

fn render_block(block: MdBlock) -> AnyView {
    match block {
        MdBlock::Heading { level, spans } => {
            let inner = render_spans(spans);
            match level {
                1 => view! { <h1>{inner}</h1> }.into_any(),
                2 => view! { <h2>{inner}</h2> }.into_any(),
                3 => view! { <h3>{inner}</h3> }.into_any(),
                4 => view! { <h4>{inner}</h4> }.into_any(),
                5 => view! { <h5>{inner}</h5> }.into_any(),
                _ => view! { <h6>{inner}</h6> }.into_any(),
            }
        }
        MdBlock::Paragraph { spans } => view! {
            <p class="md-p">{render_spans(spans)}</p>
        }
        .into_any(),
        MdBlock::ListItem {
            depth,
            marker,
            spans,
        } => {
            let indent = format!("margin-left: {}em;", 1.25 * (depth as f64 + 1.0));
            let marker_text = match marker {
                Some(n) => format!("{}. ", n),
                None => "\u{2022} ".to_string(),
            };
            view! {
                <div class="md-list-item" style=indent>
                    <span class="md-list-marker">{marker_text}</span>
                    {render_spans(spans)}
                </div>
            }
            .into_any()
        }
        MdBlock::CodeBlock { language, code } => view! {
            <pre class="md-code">
                {language.map(|lang| view! { <span class="md-code__lang">{lang}</span> })}
                <code>{code}</code>
            </pre>
        }
        .into_any(),
        MdBlock::Quote { spans } => view! {
            <blockquote class="md-quote">{render_spans(spans)}</blockquote>
        }
        .into_any(),
        MdBlock::Table { head, rows } => view! {
            <table class="md-table">
                {(!head.is_empty())
                    .then(|| {
                        view! {
                            <thead>
                                <tr>
                                    {head
                                        .into_iter()
                                        .map(|h| view! { <th>{h}</th> })
                                        .collect_view()}
                                </tr>
                            </thead>
                        }
                    })}
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    {row
                                        .into_iter()
                                        .map(|cell| view! { <td>{cell}</td> })
                                        .collect_view()}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        MdBlock::Rule => view! { <hr class="md-rule" /> }.into_any(),
    }
}

fn render_spans(spans: Vec<MdSpan>) -> Vec<AnyView> {
    spans.into_iter().map(render_span).collect()
}

fn render_span(span: MdSpan) -> AnyView {
    let MdSpan { text, style } = span;
    let mut node = text.into_any();
    if style.code {
        node = view! { <code class="md-inline-code">{node}</code> }.into_any();
    }
    if style.italic {
        node = view! { <em>{node}</em> }.into_any();
    }
    if style.bold {
        node = view! { <strong>{node}</strong> }.into_any();
    }
    if let Some(href) = style.link {
        node = view! {
            <a href=href target="_blank" rel="noopener noreferrer">
                {node}
            </a>
        }
        .into_any();
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> MdSpan {
        MdSpan {
            text: text.to_string(),
            style: SpanStyle::default(),
        }
    }

    #[test]
    fn test_plain_paragraph() {
        let blocks = parse_markdown("hello world");
        assert_eq!(
            blocks,
            vec![MdBlock::Paragraph {
                spans: vec![plain("hello world")],
            }]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse_markdown("# Title\n\n### Sub");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], MdBlock::Heading { level: 1, .. }));
        assert!(matches!(&blocks[1], MdBlock::Heading { level: 3, .. }));
    }

    #[test]
    fn test_bold_and_italic_spans() {
        let blocks = parse_markdown("**bold** and *italic*");
        let MdBlock::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph, got {:?}", blocks);
        };
        assert_eq!(spans.len(), 3);
        assert!(spans[0].style.bold);
        assert_eq!(spans[0].text, "bold");
        assert_eq!(spans[1].text, " and ");
        assert!(spans[2].style.italic);
        assert_eq!(spans[2].text, "italic");
    }

    #[test]
    fn test_inline_code_span() {
        let blocks = parse_markdown("run `cargo test` now");
        let MdBlock::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 3);
        assert!(spans[1].style.code);
        assert_eq!(spans[1].text, "cargo test");
    }

    #[test]
    fn test_link_span() {
        let blocks = parse_markdown("see [the docs](https://example.com/docs)");
        let MdBlock::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            spans[1].style.link.as_deref(),
            Some("https://example.com/docs")
        );
        assert_eq!(spans[1].text, "the docs");
    }

    #[test]
    fn test_bullet_list() {
        let blocks = parse_markdown("- one\n- two");
        assert_eq!(blocks.len(), 2);
        for (block, expected) in blocks.iter().zip(["one", "two"]) {
            let MdBlock::ListItem {
                depth,
                marker,
                spans,
            } = block
            else {
                panic!("expected list item, got {:?}", block);
            };
            assert_eq!(*depth, 0);
            assert_eq!(*marker, None);
            assert_eq!(spans, &vec![plain(expected)]);
        }
    }

    #[test]
    fn test_ordered_list_markers() {
        let blocks = parse_markdown("3. third\n4. fourth");
        let markers: Vec<_> = blocks
            .iter()
            .map(|b| match b {
                MdBlock::ListItem { marker, .. } => *marker,
                other => panic!("expected list item, got {:?}", other),
            })
            .collect();
        assert_eq!(markers, vec![Some(3), Some(4)]);
    }

    #[test]
    fn test_nested_list_depth() {
        let blocks = parse_markdown("- parent\n  - child");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], MdBlock::ListItem { depth: 0, .. }));
        assert!(matches!(&blocks[1], MdBlock::ListItem { depth: 1, .. }));
    }

    #[test]
    fn test_fenced_code_block_with_language() {
        let blocks = parse_markdown("```rust\nfn main() {}\n```");
        assert_eq!(
            blocks,
            vec![MdBlock::CodeBlock {
                language: Some("rust".to_string()),
                code: "fn main() {}".to_string(),
            }]
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let blocks = parse_markdown("```\nplain\n```");
        assert_eq!(
            blocks,
            vec![MdBlock::CodeBlock {
                language: None,
                code: "plain".to_string(),
            }]
        );
    }

    #[test]
    fn test_block_quote() {
        let blocks = parse_markdown("> quoted text");
        assert_eq!(
            blocks,
            vec![MdBlock::Quote {
                spans: vec![plain("quoted text")],
            }]
        );
    }

    #[test]
    fn test_table_head_and_rows() {
        let blocks = parse_markdown("| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |");
        assert_eq!(
            blocks,
            vec![MdBlock::Table {
                head: vec!["A".to_string(), "B".to_string()],
                rows: vec![
                    vec!["1".to_string(), "2".to_string()],
                    vec!["3".to_string(), "4".to_string()],
                ],
            }]
        );
    }

    #[test]
    fn test_rule() {
        let blocks = parse_markdown("above\n\n---\n\nbelow");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], MdBlock::Rule));
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let blocks = parse_markdown("line one\nline two");
        assert_eq!(
            blocks,
            vec![MdBlock::Paragraph {
                spans: vec![plain("line one line two")],
            }]
        );
    }

    #[test]
    fn test_split_text_events_merge_into_one_span() {
        // The parser splits around the entity; styles are equal so the
        // runs merge back together
        let blocks = parse_markdown("fish &amp; chips");
        let MdBlock::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "fish & chips");
    }

    #[test]
    fn test_bold_inside_list_item() {
        let blocks = parse_markdown("- **key**: value");
        let MdBlock::ListItem { spans, .. } = &blocks[0] else {
            panic!("expected list item");
        };
        assert!(spans[0].style.bold);
        assert_eq!(spans[0].text, "key");
        assert_eq!(spans[1].text, ": value");
    }
}
