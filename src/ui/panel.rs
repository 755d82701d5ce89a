use ratatui::text::Text;

use crate::event::{Effect, Event};

/// The surface a child panel exposes to its container.
///
/// Panels never perform work themselves during `update`; anything slow is
/// returned as an [`Effect`] for the host to run.
pub trait Panel {
    /// Effects to run before the first render.
    fn init(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    fn update(&mut self, ev: &Event) -> Option<Effect>;

    fn set_size(&mut self, width: u16, height: u16);

    fn view(&self) -> Text<'static>;
}
