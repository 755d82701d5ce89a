pub mod key;
pub mod layout;
pub mod panel;
pub mod style;
pub mod tab_group;
pub mod theme;
pub mod window;

pub use key::{KeyBinding, KeyChord, KeyMap};
pub use panel::Panel;
pub use style::BoxStyle;
pub use tab_group::{TabGroup, TabGroupBuilder, TabGroupTheme, TabItem, UpdatePolicy};
pub use window::Window;

pub use crossterm;
pub use ratatui;
