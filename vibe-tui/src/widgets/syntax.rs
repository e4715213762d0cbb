//! Regex colorizer for generated TSX/TypeScript sources.
//!
//! Rules run in a fixed order, each over the output of the one before. A
//! match is wrapped in private-use marker characters instead of markup, so a
//! later rule can mark text inside an earlier mark but never matches a mark
//! itself. The marked line is then split into segments, innermost mark
//! winning. Overlapping marks (a `//` inside a string) come out imperfectly
//! nested; the text is still preserved exactly.

use once_cell::sync::Lazy;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    Str,
    Comment,
    TypeName,
    Bracket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: TokenKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// 1-based.
    pub number: usize,
    pub segments: Vec<Segment>,
}

const MARK_CLOSE: char = '\u{E00F}';
const MARK_RANGE: std::ops::RangeInclusive<char> = '\u{E001}'..='\u{E00F}';

struct Rule {
    kind: TokenKind,
    open: char,
    pattern: Regex,
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    [
        (
            TokenKind::Keyword,
            '\u{E001}',
            r"(const|let|var|import|from|export|default|function|return|interface|type)",
        ),
        (TokenKind::Str, '\u{E002}', r#"('.*?'|".*?")"#),
        (TokenKind::Comment, '\u{E003}', r"(//.*)"),
        (TokenKind::TypeName, '\u{E004}', r"([A-Z][a-zA-Z0-9]*)"),
        (TokenKind::Bracket, '\u{E005}', r"(\{|\}|\[|\]|\(|\))"),
    ]
    .into_iter()
    .filter_map(|(kind, open, pattern)| {
        Regex::new(pattern)
            .ok()
            .map(|pattern| Rule { kind, open, pattern })
    })
    .collect()
});

fn opened_kind(ch: char) -> Option<TokenKind> {
    RULES.iter().find(|rule| rule.open == ch).map(|rule| rule.kind)
}

fn mark(line: &str) -> String {
    RULES.iter().fold(line.to_string(), |marked, rule| {
        let replacement = format!("{}${{1}}{}", rule.open, MARK_CLOSE);
        rule.pattern
            .replace_all(&marked, replacement.as_str())
            .into_owned()
    })
}

fn split_marked(marked: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut stack: Vec<TokenKind> = Vec::new();
    let mut text = String::new();

    let mut flush = |text: &mut String, kind: TokenKind| {
        if !text.is_empty() {
            segments.push(Segment {
                kind,
                text: std::mem::take(text),
            });
        }
    };

    for ch in marked.chars() {
        let current = stack.last().copied().unwrap_or(TokenKind::Plain);
        if let Some(kind) = opened_kind(ch) {
            flush(&mut text, current);
            stack.push(kind);
        } else if ch == MARK_CLOSE {
            flush(&mut text, current);
            stack.pop();
        } else {
            text.push(ch);
        }
    }
    let current = stack.last().copied().unwrap_or(TokenKind::Plain);
    flush(&mut text, current);
    segments
}

/// Colorize a single line. Concatenating the segment texts gives `line`
/// back. Lines that already contain marker characters are left plain.
pub fn colorize_line(line: &str) -> Vec<Segment> {
    if line.is_empty() {
        return Vec::new();
    }
    if line.chars().any(|c| MARK_RANGE.contains(&c)) {
        return vec![Segment {
            kind: TokenKind::Plain,
            text: line.to_string(),
        }];
    }
    split_marked(&mark(line))
}

/// Split `content` on newlines and colorize each numbered line.
pub fn colorize(content: &str) -> Vec<CodeLine> {
    content
        .split('\n')
        .enumerate()
        .map(|(index, line)| CodeLine {
            number: index + 1,
            segments: colorize_line(line),
        })
        .collect()
}

pub struct SyntaxHighlighter {
    pub plain_color: Color,
    pub keyword_color: Color,
    pub string_color: Color,
    pub comment_color: Color,
    pub type_color: Color,
    pub bracket_color: Color,
    pub line_number_color: Color,
    pub border_style: Style,
}

impl SyntaxHighlighter {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect, title: &str, content: &str) {
        let paragraph = Paragraph::new(self.highlight(content)).block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }

    pub fn highlight(&self, content: &str) -> Text<'static> {
        let lines = colorize(content);
        let width = lines.len().to_string().len();
        let number_style = Style::default().fg(self.line_number_color);

        lines
            .into_iter()
            .map(|line| {
                let mut spans = vec![Span::styled(
                    format!("{:>width$}  ", line.number, width = width),
                    number_style,
                )];
                spans.extend(
                    line.segments
                        .into_iter()
                        .map(|segment| Span::styled(segment.text, self.style_for(segment.kind))),
                );
                Line::from(spans)
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn style_for(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::Plain => Style::default().fg(self.plain_color),
            TokenKind::Keyword => Style::default()
                .fg(self.keyword_color)
                .add_modifier(Modifier::BOLD),
            TokenKind::Str => Style::default().fg(self.string_color),
            TokenKind::Comment => Style::default()
                .fg(self.comment_color)
                .add_modifier(Modifier::ITALIC),
            TokenKind::TypeName => Style::default().fg(self.type_color),
            TokenKind::Bracket => Style::default().fg(self.bracket_color),
        }
    }
}
