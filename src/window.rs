mod stopwatch;
mod text;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::{
    config::Config,
    ui::{TabGroup, UpdatePolicy, Window},
};

pub use self::{stopwatch::StopwatchPanel, text::TextPanel};

/// Builds the demo screen from the loaded configuration.
pub struct WindowInit {
    config: Config,
    update_policy: Option<UpdatePolicy>,
}

impl WindowInit {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            update_policy: None,
        }
    }

    /// Overrides the policy from the config file.
    pub fn update_policy(mut self, policy: Option<UpdatePolicy>) -> Self {
        self.update_policy = policy;
        self
    }

    pub fn build(self) -> Window {
        let Config {
            theme,
            key_bindings,
            update_policy,
        } = self.config;

        let reserved_rows = theme.window.tab_group.reserved_rows();

        let tab_group = TabGroup::builder()
            .key_map(key_bindings)
            .theme(theme.window.tab_group)
            .update_policy(self.update_policy.unwrap_or(update_policy))
            .item("About", about().reserve_rows(reserved_rows))
            .item("Stopwatch", StopwatchPanel::new(0))
            .item("Lap", StopwatchPanel::new(1))
            .item("Log", log_panel().reserve_rows(reserved_rows))
            .build();

        Window::builder()
            .tab_group(tab_group)
            .help_style(theme.window.help)
            .build()
    }
}

fn about() -> TextPanel {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    TextPanel::new(vec![
        Line::default(),
        Line::from(vec![Span::raw(" "), Span::styled("tabgroup", bold)]),
        Line::default(),
        Line::from(" A navbar of titles above one visible panel."),
        Line::from(" Switch tabs with the keys listed below."),
        Line::from(" Both stopwatches keep counting while hidden"),
        Line::from(" unless started with --update-policy active-only."),
    ])
}

fn log_panel() -> TextPanel {
    TextPanel::new(
        (1..=100)
            .map(|n| Line::from(format!(" line {:>3}: scroll with up/down or j/k", n)))
            .collect::<Vec<_>>(),
    )
}
