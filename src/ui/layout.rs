use ratatui::text::{Line, Span, Text};

/// Stacks blocks top to bottom. Lines are left aligned and padded with spaces
/// to the widest line so the result is a rectangle.
pub fn join_vertical<I>(blocks: I) -> Text<'static>
where
    I: IntoIterator<Item = Text<'static>>,
{
    let lines: Vec<Line<'static>> = blocks
        .into_iter()
        .flat_map(|block| block.lines)
        .collect();

    let width = lines.iter().map(Line::width).max().unwrap_or_default();

    lines
        .into_iter()
        .map(|line| pad_right(line, width))
        .collect::<Vec<_>>()
        .into()
}

/// Places blocks side by side, aligned to the top. Each block keeps its own
/// width; shorter blocks are extended with blank lines.
pub fn join_horizontal<I>(blocks: I) -> Text<'static>
where
    I: IntoIterator<Item = Text<'static>>,
{
    let blocks: Vec<Text<'static>> = blocks.into_iter().collect();

    let height = blocks.iter().map(|b| b.lines.len()).max().unwrap_or_default();

    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new(); height];

    for block in blocks {
        let width = block.width();
        let mut lines = block.lines.into_iter();

        for row in rows.iter_mut() {
            let line = lines.next().unwrap_or_default();
            row.extend(pad_right(line, width).spans);
        }
    }

    rows.into_iter().map(Line::from).collect::<Vec<_>>().into()
}

fn pad_right(mut line: Line<'static>, width: usize) -> Line<'static> {
    let fill = width.saturating_sub(line.width());

    if 0 < fill {
        line.spans.push(Span::raw(" ".repeat(fill)));
    }

    line
}
