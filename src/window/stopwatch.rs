use std::{thread, time::Duration};

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use crate::{
    event::{Effect, Event},
    ui::{KeyBinding, KeyChord, Panel},
};

const INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StopwatchTick {
    id: usize,
    generation: u64,
}

/// Counts elapsed time through a self-rescheduling effect. Under the
/// broadcast policy it keeps running while its tab is hidden.
pub struct StopwatchPanel {
    id: usize,
    elapsed: Duration,
    running: bool,
    generation: u64,
    toggle: KeyBinding,
}

impl StopwatchPanel {
    /// `id` tells stopwatches apart when several live in one group.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            elapsed: Duration::ZERO,
            running: true,
            generation: 0,
            toggle: KeyBinding::new(
                [KeyChord::new(KeyCode::Char(' '), KeyModifiers::NONE)],
                "Start/Stop",
            ),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn schedule(&self) -> Effect {
        let tick = StopwatchTick {
            id: self.id,
            generation: self.generation,
        };

        Effect::task(move || {
            thread::sleep(INTERVAL);
            Some(Event::message(tick))
        })
    }
}

impl Panel for StopwatchPanel {
    fn init(&mut self) -> Vec<Effect> {
        vec![self.schedule()]
    }

    fn update(&mut self, ev: &Event) -> Option<Effect> {
        if let Some(tick) = ev.downcast_ref::<StopwatchTick>() {
            // Ticks from before the last start/stop are stale.
            if tick.id != self.id || tick.generation != self.generation || !self.running {
                return None;
            }

            self.elapsed += INTERVAL;
            return Some(self.schedule());
        }

        let key = ev.key()?;

        if !self.toggle.matches(key) {
            return None;
        }

        self.running = !self.running;
        self.generation += 1;

        self.running.then(|| self.schedule())
    }

    fn set_size(&mut self, _: u16, _: u16) {}

    fn view(&self) -> Text<'static> {
        let secs = self.elapsed.as_secs();
        let tenths = self.elapsed.subsec_millis() / 100;

        let state = if self.running { "running" } else { "stopped" };

        Text::from(vec![
            Line::default(),
            Line::from(vec![
                Span::raw(" elapsed: "),
                Span::styled(
                    format!("{:02}:{:02}.{}", secs / 60, secs % 60, tenths),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" ({})", state)),
            ]),
            Line::from(format!(" {} {}", self.toggle.help_key(), self.toggle.help)),
        ])
    }
}
