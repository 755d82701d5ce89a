use ratatui::{
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::BorderType,
};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::theme::UIStyle;

#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderTypeDef {
    Plain,
    Rounded,
    Double,
    Thick,
}

impl From<BorderTypeDef> for BorderType {
    fn from(value: BorderTypeDef) -> Self {
        match value {
            BorderTypeDef::Plain => BorderType::Plain,
            BorderTypeDef::Rounded => BorderType::Rounded,
            BorderTypeDef::Double => BorderType::Double,
            BorderTypeDef::Thick => BorderType::Thick,
        }
    }
}

/// Space around a block, in cells.
#[derive(Debug, Default, Copy, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Spacing {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Spacing {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// A block style: text colors, padding, an optional border and margin.
///
/// Rendering builds the block from the inside out:
///
/// ```text
///  margin (unstyled)
///  ┌──────────────┐  border
///  │   padding    │
///  │  content...  │  lines wrapped and padded to `width - padding`
///  │   padding    │
///  └──────────────┘
/// ```
///
/// `width` covers content and padding. Border and margin are added outside of it.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoxStyle {
    #[serde(flatten)]
    pub style: UIStyle,
    pub padding: Spacing,
    pub margin: Spacing,
    pub border: Option<BorderTypeDef>,
    pub border_style: UIStyle,
    #[serde(skip)]
    width: Option<u16>,
}

/// builder
impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.style = self.style.fg(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.style = self.style.bg(color);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.style = self.style.modifier(modifier);
        self
    }

    pub fn padding(mut self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        self.padding = Spacing::new(top, right, bottom, left);
        self
    }

    pub fn margin(mut self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        self.margin = Spacing::new(top, right, bottom, left);
        self
    }

    pub fn border(mut self, border: BorderTypeDef) -> Self {
        self.border = Some(border);
        self
    }

    pub fn border_style(mut self, style: UIStyle) -> Self {
        self.border_style = style;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

impl BoxStyle {
    pub fn set_width(&mut self, width: u16) {
        self.width = Some(width);
    }

    pub fn get_width(&self) -> Option<u16> {
        self.width
    }

    fn border_width(&self) -> u16 {
        if self.border.is_some() {
            2
        } else {
            0
        }
    }

    /// Columns taken by margin, border and padding together.
    pub fn horizontal_frame_size(&self) -> u16 {
        self.margin
            .horizontal()
            .saturating_add(self.border_width())
            .saturating_add(self.padding.horizontal())
    }

    /// Rows taken by margin, border and padding together.
    pub fn vertical_frame_size(&self) -> u16 {
        self.margin
            .vertical()
            .saturating_add(self.border_width())
            .saturating_add(self.padding.vertical())
    }

    pub fn render<'a>(&self, content: impl Into<Text<'a>>) -> Text<'static> {
        let content: Text<'a> = content.into();
        let base = self.style.to_style();

        let mut lines: Vec<Vec<Span<'static>>> = content
            .lines
            .into_iter()
            .map(|line| {
                let line_style = content.style.patch(line.style);
                line.spans
                    .into_iter()
                    .map(|span| {
                        Span::styled(
                            span.content.into_owned(),
                            base.patch(line_style).patch(span.style),
                        )
                    })
                    .collect()
            })
            .collect();

        if lines.is_empty() {
            lines.push(Vec::new());
        }

        let inner_width = self
            .width
            .map(|w| usize::from(w.saturating_sub(self.padding.horizontal())))
            .filter(|w| 0 < *w);

        if let Some(max_width) = inner_width {
            lines = lines
                .into_iter()
                .flat_map(|spans| wrap_spans(spans, max_width))
                .collect();
        }

        let content_width = inner_width.unwrap_or_else(|| {
            lines
                .iter()
                .map(|spans| spans_width(spans))
                .max()
                .unwrap_or_default()
        });

        let block_width = content_width + usize::from(self.padding.horizontal());

        let blank = || vec![Span::styled(" ".repeat(block_width), base)];

        let mut block: Vec<Vec<Span<'static>>> = Vec::with_capacity(
            lines.len() + usize::from(self.padding.top) + usize::from(self.padding.bottom),
        );

        block.extend((0..self.padding.top).map(|_| blank()));

        for mut spans in lines {
            let fill = content_width.saturating_sub(spans_width(&spans));

            let mut row = Vec::with_capacity(spans.len() + 3);
            if 0 < self.padding.left {
                row.push(Span::styled(" ".repeat(usize::from(self.padding.left)), base));
            }
            row.append(&mut spans);
            if 0 < fill + usize::from(self.padding.right) {
                row.push(Span::styled(
                    " ".repeat(fill + usize::from(self.padding.right)),
                    base,
                ));
            }

            block.push(row);
        }

        block.extend((0..self.padding.bottom).map(|_| blank()));

        if let Some(border_type) = self.border {
            block = self.wrap_border(block, block_width, border_type);
        }

        let lines = self.wrap_margin(block);

        Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>())
    }

    fn wrap_border(
        &self,
        block: Vec<Vec<Span<'static>>>,
        width: usize,
        border_type: BorderTypeDef,
    ) -> Vec<Vec<Span<'static>>> {
        let set: border::Set = BorderType::border_symbols(border_type.into());
        let style = self.border_style.to_style();

        let edge = |left: &str, fill: &str, right: &str| {
            vec![Span::styled(
                format!("{}{}{}", left, fill.repeat(width), right),
                style,
            )]
        };

        let mut bordered = Vec::with_capacity(block.len() + 2);

        bordered.push(edge(set.top_left, set.horizontal_top, set.top_right));

        for mut row in block {
            let mut spans = Vec::with_capacity(row.len() + 2);
            spans.push(Span::styled(set.vertical_left, style));
            spans.append(&mut row);
            spans.push(Span::styled(set.vertical_right, style));
            bordered.push(spans);
        }

        bordered.push(edge(
            set.bottom_left,
            set.horizontal_bottom,
            set.bottom_right,
        ));

        bordered
    }

    fn wrap_margin(&self, block: Vec<Vec<Span<'static>>>) -> Vec<Vec<Span<'static>>> {
        let Spacing {
            top,
            right,
            bottom,
            left,
        } = self.margin;

        if top == 0 && right == 0 && bottom == 0 && left == 0 {
            return block;
        }

        let width = block.iter().map(|row| spans_width(row)).max().unwrap_or_default()
            + usize::from(left)
            + usize::from(right);

        let blank = || vec![Span::raw(" ".repeat(width))];

        let mut lines = Vec::with_capacity(block.len() + usize::from(top) + usize::from(bottom));

        lines.extend((0..top).map(|_| blank()));

        for mut row in block {
            let mut spans = Vec::with_capacity(row.len() + 2);
            if 0 < left {
                spans.push(Span::raw(" ".repeat(usize::from(left))));
            }
            spans.append(&mut row);
            if 0 < right {
                spans.push(Span::raw(" ".repeat(usize::from(right))));
            }
            lines.push(spans);
        }

        lines.extend((0..bottom).map(|_| blank()));

        lines
    }
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|span| span.content.width()).sum()
}

struct Cell {
    grapheme: String,
    style: Style,
    width: usize,
}

impl Cell {
    fn is_space(&self) -> bool {
        self.grapheme == " "
    }
}

/// Wraps a line so no row exceeds `max_width` columns. Breaks at spaces where
/// possible; a word wider than a row is split at grapheme boundaries. The
/// space a row is broken at is dropped and trailing spaces are trimmed.
fn wrap_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row: Vec<Cell> = Vec::new();
    let mut row_width = 0;
    let mut last_space: Option<usize> = None;

    let cells = spans.into_iter().flat_map(|span| {
        let style = span.style;
        span.content
            .graphemes(true)
            .map(|g| Cell {
                grapheme: g.to_string(),
                style,
                width: g.width(),
            })
            .collect::<Vec<_>>()
    });

    for cell in cells {
        let mut dropped = false;

        while max_width < row_width + cell.width && 0 < row_width {
            if cell.is_space() {
                rows.push(trim_end(std::mem::take(&mut row)));
                row_width = 0;
                dropped = true;
                break;
            }

            match last_space.take() {
                Some(index) => {
                    let tail = row.split_off(index + 1);
                    rows.push(trim_end(std::mem::replace(&mut row, tail)));
                    row_width = row.iter().map(|c| c.width).sum();
                }
                None => {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
            }
        }

        if dropped {
            last_space = None;
            continue;
        }

        if cell.is_space() {
            last_space = Some(row.len());
        }

        row_width += cell.width;
        row.push(cell);
    }

    rows.push(row);

    rows.into_iter().map(into_spans).collect()
}

fn trim_end(mut row: Vec<Cell>) -> Vec<Cell> {
    while row.last().is_some_and(Cell::is_space) {
        row.pop();
    }
    row
}

/// Merges runs of equally styled cells back into spans.
fn into_spans(row: Vec<Cell>) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut content = String::new();
    let mut style: Option<Style> = None;

    for cell in row {
        if let Some(s) = style.filter(|s| *s != cell.style) {
            spans.push(Span::styled(std::mem::take(&mut content), s));
        }
        style = Some(cell.style);
        content.push_str(&cell.grapheme);
    }

    if let Some(s) = style {
        spans.push(Span::styled(content, s));
    }

    spans
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    pub(crate) fn contents(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn render_plain() {
        let actual = BoxStyle::new().render("hello");

        assert_eq!(contents(&actual), vec!["hello"]);
    }

    #[test]
    fn render_empty_is_one_line() {
        let actual = BoxStyle::new().padding(0, 1, 0, 1).render("");

        assert_eq!(contents(&actual), vec!["  "]);
    }

    #[test]
    fn render_pads_lines_to_widest() {
        let actual = BoxStyle::new().padding(1, 2, 0, 1).render("ab\nabcd");

        assert_eq!(
            contents(&actual),
            vec!["       ", " ab    ", " abcd  "]
        );
    }

    #[test]
    fn render_applies_base_style_under_span_style() {
        let text = Text::from(Line::from(vec![
            Span::raw("a"),
            Span::styled("b", Style::default().fg(Color::Red)),
        ]));

        let actual = BoxStyle::new().bg(Color::Blue).padding(0, 1, 0, 0).render(text);

        let spans = &actual.lines[0].spans;

        assert_eq!(spans[0].style, Style::default().bg(Color::Blue));
        assert_eq!(spans[1].style, Style::default().fg(Color::Red).bg(Color::Blue));
        assert_eq!(spans[2], Span::styled(" ", Style::default().bg(Color::Blue)));
    }

    #[test]
    fn render_with_width_wraps_and_fills() {
        let actual = BoxStyle::new().padding(0, 1, 0, 1).width(6).render("abcdefg");

        assert_eq!(contents(&actual), vec![" abcd ", " efg  "]);
    }

    #[rstest]
    #[case("hello brave world", 11, vec!["hello brave", "world      "])]
    #[case("ab cd", 3, vec!["ab ", "cd "])]
    #[case("a abcdefgh", 4, vec!["a   ", "abcd", "efgh"])]
    #[case("one  two", 4, vec!["one ", "two "])]
    fn render_with_width_breaks_at_spaces(
        #[case] input: &str,
        #[case] width: u16,
        #[case] expected: Vec<&str>,
    ) {
        let actual = BoxStyle::new().width(width).render(input);

        assert_eq!(contents(&actual), expected);
    }

    #[test]
    fn wrapping_keeps_span_styles() {
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![Span::styled("ab ", red), Span::raw("cd")]);

        let actual = BoxStyle::new().width(3).render(line);

        assert_eq!(
            actual.lines,
            vec![
                Line::from(vec![Span::styled("ab", red), Span::raw(" ")]),
                Line::from(vec![Span::raw("cd"), Span::raw(" ")]),
            ]
        );
    }

    #[test]
    fn render_wide_graphemes_do_not_split() {
        let actual = BoxStyle::new().width(3).render("日本語");

        assert_eq!(contents(&actual), vec!["日 ", "本 ", "語 "]);
    }

    #[test]
    fn render_border_and_margin() {
        let actual = BoxStyle::new()
            .border(BorderTypeDef::Plain)
            .margin(1, 0, 0, 2)
            .render("ab");

        assert_eq!(
            contents(&actual),
            vec!["      ", "  ┌──┐", "  │ab│", "  └──┘"]
        );
    }

    #[test]
    fn render_margin_is_unstyled() {
        let actual = BoxStyle::new()
            .bg(Color::Red)
            .margin(0, 0, 0, 1)
            .render("x");

        assert_eq!(actual.lines[0].spans[0], Span::raw(" "));
    }

    #[rstest]
    #[case(BoxStyle::new(), 0)]
    #[case(BoxStyle::new().padding(0, 2, 0, 2), 4)]
    #[case(BoxStyle::new().margin(2, 0, 0, 0), 0)]
    #[case(BoxStyle::new().margin(0, 1, 0, 1).border(BorderTypeDef::Rounded), 4)]
    #[case(BoxStyle::new().margin(0, 1, 0, 0).border(BorderTypeDef::Thick).padding(0, 1, 0, 1), 5)]
    fn horizontal_frame_size(#[case] style: BoxStyle, #[case] expected: u16) {
        assert_eq!(style.horizontal_frame_size(), expected);
    }

    #[rstest]
    #[case(BoxStyle::new(), 0)]
    #[case(BoxStyle::new().margin(2, 0, 0, 0), 2)]
    #[case(BoxStyle::new().padding(0, 1, 0, 1), 0)]
    #[case(BoxStyle::new().margin(1, 0, 1, 0).border(BorderTypeDef::Plain).padding(1, 0, 0, 0), 5)]
    fn vertical_frame_size(#[case] style: BoxStyle, #[case] expected: u16) {
        assert_eq!(style.vertical_frame_size(), expected);
    }

    #[test]
    fn set_width_replaces_previous() {
        let mut style = BoxStyle::new().width(10);

        style.set_width(4);

        assert_eq!(style.get_width(), Some(4));
    }

    #[test]
    fn deserialize_box_style() {
        let yaml = indoc::indoc! {r#"
            fg: white
            bg: 5
            padding:
              left: 2
              right: 2
            border: rounded
        "#};

        let actual: BoxStyle = serde_yaml::from_str(yaml).unwrap();

        let expected = BoxStyle::new()
            .fg(Color::White)
            .bg(Color::Indexed(5))
            .padding(0, 2, 0, 2)
            .border(BorderTypeDef::Rounded);

        assert_eq!(actual, expected);
    }
}
