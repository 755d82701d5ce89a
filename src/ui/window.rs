use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde::{Deserialize, Serialize};

use crate::{
    event::{Effect, Event, UserEvent},
    logger,
};

use super::{
    key::{KeyBinding, KeyChord},
    tab_group::{TabGroupTheme, NAVBAR_DIVIDER},
    theme::UIStyle,
    TabGroup,
};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowTheme {
    pub tab_group: TabGroupTheme,
    pub help: UIStyle,
}

impl Default for WindowTheme {
    fn default() -> Self {
        Self {
            tab_group: TabGroupTheme::default(),
            help: UIStyle::default().fg(Color::DarkGray),
        }
    }
}

fn default_quit() -> KeyBinding {
    KeyBinding::new(
        [
            KeyChord::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyChord::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyChord::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ],
        "Quit",
    )
}

pub struct WindowBuilder {
    tab_group: TabGroup,
    quit: KeyBinding,
    help: UIStyle,
}

impl Default for WindowBuilder {
    fn default() -> Self {
        Self {
            tab_group: TabGroup::default(),
            quit: default_quit(),
            help: WindowTheme::default().help,
        }
    }
}

impl WindowBuilder {
    pub fn tab_group(mut self, tab_group: TabGroup) -> Self {
        self.tab_group = tab_group;
        self
    }

    pub fn quit(mut self, quit: KeyBinding) -> Self {
        self.quit = quit;
        self
    }

    pub fn help_style(mut self, style: UIStyle) -> Self {
        self.help = style;
        self
    }

    pub fn build(self) -> Window {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)]);

        Window {
            tab_group: self.tab_group,
            quit: self.quit,
            help: self.help,
            layout,
            last_known_size: Rect::default(),
        }
    }
}

/// The screen: one tab group above a help line.
pub struct Window {
    tab_group: TabGroup,
    quit: KeyBinding,
    help: UIStyle,
    layout: Layout,
    last_known_size: Rect,
}

impl Window {
    pub fn builder() -> WindowBuilder {
        WindowBuilder::default()
    }

    pub fn tab_group(&self) -> &TabGroup {
        &self.tab_group
    }

    pub fn tab_group_mut(&mut self) -> &mut TabGroup {
        &mut self.tab_group
    }

    /// The tab group starts focused; the terminal reports focus changes later.
    pub fn init(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.tab_group.focus().into_iter().collect();

        effects.extend(self.tab_group.init());

        logger!(debug, "window init: {} effect(s)", effects.len());

        effects
    }

    pub fn on_event(&mut self, ev: &Event) -> Vec<Effect> {
        let mut effects = Vec::new();

        match ev {
            Event::User(UserEvent::Key(key)) if self.quit.matches(key) => {
                return vec![Effect::Quit];
            }
            Event::User(UserEvent::FocusGained) => {
                effects.extend(self.tab_group.focus());
            }
            Event::User(UserEvent::FocusLost) => {
                self.tab_group.blur();
            }
            _ => {}
        }

        effects.extend(self.tab_group.update(ev));

        effects
    }

    fn help_line(&self) -> Line<'static> {
        let mut spans = Vec::new();

        let bindings = self
            .tab_group
            .key_map
            .short_help()
            .into_iter()
            .chain([&self.quit]);

        for (i, binding) in bindings.enumerate() {
            if 0 < i {
                spans.push(Span::raw(NAVBAR_DIVIDER));
            }
            spans.push(Span::raw(format!("{} {}", binding.help_key(), binding.help)));
        }

        spans.insert(0, Span::raw(" "));

        Line::from(spans)
    }
}

// Render
impl Window {
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = self.layout.split(size);

        if self.last_known_size != size {
            self.tab_group.set_size(chunks[0].width, chunks[0].height);

            self.last_known_size = size;
        }

        f.render_widget(Paragraph::new(self.tab_group.view()), chunks[0]);

        f.render_widget(
            Paragraph::new(self.help_line()).style(self.help.to_style()),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::ui::Panel;

    struct Static(&'static str);

    impl Panel for Static {
        fn update(&mut self, _: &Event) -> Option<Effect> {
            None
        }

        fn set_size(&mut self, _: u16, _: u16) {}

        fn view(&self) -> ratatui::text::Text<'static> {
            self.0.into()
        }
    }

    fn window() -> Window {
        let tab_group = TabGroup::builder()
            .item("One", Static("first"))
            .item("Two", Static("second"))
            .build();

        Window::builder().tab_group(tab_group).build()
    }

    #[test]
    fn quit_key_emits_quit() {
        let mut w = window();

        let effects = w.on_event(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE).into());

        assert!(matches!(effects.as_slice(), [Effect::Quit]));
    }

    #[test]
    fn focus_events_toggle_tab_group_focus() {
        let mut w = window();

        assert!(w.init().is_empty());
        assert!(w.tab_group().is_focused());

        w.on_event(&UserEvent::FocusLost.into());
        assert!(!w.tab_group().is_focused());

        w.on_event(&UserEvent::FocusGained.into());
        assert!(w.tab_group().is_focused());
    }

    #[test]
    fn render_sizes_tab_group_to_frame() {
        let mut w = window();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();

        terminal.draw(|f| w.render(f)).unwrap();

        assert_eq!((w.tab_group().width(), w.tab_group().height()), (30, 7));

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..30).map(|x| buffer.get(x, y).symbol()).collect() };

        // Two rows of top margin, then the navbar and the active panel.
        assert!(row(2).contains("One"));
        assert!(row(3).starts_with("first"));
        assert!(row(7).contains("alt+right Next tab"));
    }

    #[test]
    fn help_line_lists_bindings() {
        let w = window();

        let line = w.help_line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(
            text,
            " alt+right Next tab • alt+left Prev tab • q/esc/ctrl+c Quit"
        );
    }
}
