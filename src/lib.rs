//! A tabbed container widget for ratatui applications.
//!
//! [`ui::TabGroup`] owns an ordered list of [`ui::TabItem`]s, renders a navbar
//! of their titles above the active item, and switches tabs on the `tab_next`
//! and `tab_prev` key bindings. Child panels implement [`ui::Panel`] and hand
//! deferred work back as [`event::Effect`]s.
//!
//! The binary wraps a demo screen around the widget.

pub mod app;
pub mod command;
pub mod config;
pub mod event;
pub mod logging;
pub mod signal;
pub mod ui;
pub mod window;
