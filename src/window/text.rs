use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::text::{Line, Text};

use crate::{
    event::{Effect, Event},
    ui::{KeyBinding, KeyChord, Panel},
};

/// Static lines with vertical scrolling.
pub struct TextPanel {
    lines: Vec<Line<'static>>,
    offset: usize,
    height: u16,
    reserved_rows: u16,
    scroll_up: KeyBinding,
    scroll_down: KeyBinding,
}

impl TextPanel {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line<'static>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            offset: 0,
            height: 0,
            reserved_rows: 0,
            scroll_up: KeyBinding::new(
                [
                    KeyChord::new(KeyCode::Up, KeyModifiers::NONE),
                    KeyChord::new(KeyCode::Char('k'), KeyModifiers::NONE),
                ],
                "Scroll up",
            ),
            scroll_down: KeyBinding::new(
                [
                    KeyChord::new(KeyCode::Down, KeyModifiers::NONE),
                    KeyChord::new(KeyCode::Char('j'), KeyModifiers::NONE),
                ],
                "Scroll down",
            ),
        }
    }

    /// Rows of the assigned height drawn by the container around this panel.
    pub fn reserve_rows(mut self, rows: u16) -> Self {
        self.reserved_rows = rows;
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `None` until a size is assigned.
    fn visible_rows(&self) -> Option<usize> {
        (0 < self.height)
            .then(|| usize::from(self.height.saturating_sub(self.reserved_rows).max(1)))
    }

    fn max_offset(&self) -> usize {
        self.lines
            .len()
            .saturating_sub(self.visible_rows().unwrap_or(1))
    }
}

impl Panel for TextPanel {
    fn update(&mut self, ev: &Event) -> Option<Effect> {
        let key = ev.key()?;

        if self.scroll_down.matches(key) {
            self.offset = (self.offset + 1).min(self.max_offset());
        } else if self.scroll_up.matches(key) {
            self.offset = self.offset.saturating_sub(1);
        }

        None
    }

    fn set_size(&mut self, _: u16, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    fn view(&self) -> Text<'static> {
        let height = self.visible_rows().unwrap_or(self.lines.len());

        self.lines
            .iter()
            .skip(self.offset)
            .take(height)
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;

    fn down() -> Event {
        KeyEvent::new(KeyCode::Down, KeyModifiers::NONE).into()
    }

    #[test]
    fn scrolls_within_bounds() {
        let mut panel = TextPanel::new(["a", "b", "c", "d"]);
        panel.set_size(10, 2);

        for _ in 0..5 {
            assert!(panel.update(&down()).is_none());
        }

        assert_eq!(panel.offset(), 2);

        let view = panel.view();
        assert_eq!(view.lines, vec![Line::from("c"), Line::from("d")]);

        panel.update(&KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE).into());
        assert_eq!(panel.offset(), 1);
    }

    #[test]
    fn reserved_rows_keep_last_line_reachable() {
        let mut panel = TextPanel::new((1..=10).map(|n| n.to_string())).reserve_rows(3);
        panel.set_size(30, 7);

        for _ in 0..20 {
            panel.update(&down());
        }

        assert_eq!(panel.offset(), 6);
        assert_eq!(
            panel.view().lines,
            ["7", "8", "9", "10"].map(Line::from).to_vec()
        );
    }

    #[test]
    fn reserved_rows_larger_than_height_show_one_line() {
        let mut panel = TextPanel::new(["a", "b", "c"]).reserve_rows(5);
        panel.set_size(10, 2);

        assert_eq!(panel.view().lines, vec![Line::from("a")]);
    }

    #[test]
    fn unsized_panel_shows_everything() {
        let panel = TextPanel::new(["a", "b"]);

        assert_eq!(panel.view().lines.len(), 2);
    }
}
