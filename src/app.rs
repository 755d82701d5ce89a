use crate::{
    command::Command,
    config::Config,
    event::{effect::dispatch, input::read_key, tick::tick, Event},
    logger,
    logging::Logger,
    ui::Window,
    window::WindowInit,
};
use anyhow::{anyhow, Result};
use clap::Parser;
use crossbeam::channel::{bounded, Receiver, Sender};
use ratatui::{prelude::CrosstermBackend, Terminal, TerminalOptions, Viewport};
use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time,
};

#[macro_export]
macro_rules! enable_raw_mode {
    () => {
        crossterm::terminal::enable_raw_mode().expect("failed to enable raw mode");
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            crossterm::event::EnableFocusChange
        )
        .expect("failed to enable raw mode");
    };
}

#[macro_export]
macro_rules! disable_raw_mode {
    () => {
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture,
            crossterm::event::DisableFocusChange,
            crossterm::cursor::Show
        )
        .expect("failed to restore terminal");
        crossterm::terminal::disable_raw_mode().expect("failed to disable raw mode");
    };
}

const TICK_RATE: time::Duration = time::Duration::from_millis(200);

pub struct App {
    command: Command,
}

impl App {
    pub fn init() -> Result<Self> {
        let command = Command::parse();

        if command.logging {
            Logger::init()?;
        }

        Ok(App { command })
    }

    pub fn run(self) -> Result<()> {
        let config = Config::load(self.command.config.clone())?;

        let mut window = WindowInit::new(config)
            .update_policy(self.command.update_policy)
            .build();

        let (tx, rx): (Sender<Event>, Receiver<Event>) = bounded(256);

        let is_terminated = Arc::new(AtomicBool::new(false));

        let tx_input = tx.clone();
        let is_terminated_clone = is_terminated.clone();
        let read_key_handler = thread::spawn(move || read_key(tx_input, is_terminated_clone));

        let tx_tick = tx.clone();
        let is_terminated_clone = is_terminated.clone();
        let tick_handler =
            thread::spawn(move || tick(tx_tick, TICK_RATE, is_terminated_clone));

        crate::enable_raw_mode!();

        let result = Self::event_loop(&mut window, &tx, &rx, &is_terminated);

        // Stop the input and tick threads even when the loop failed.
        is_terminated.store(true, Ordering::Relaxed);

        crate::disable_raw_mode!();

        join("read_key", read_key_handler)?;
        join("tick", tick_handler)?;

        result
    }

    fn event_loop(
        window: &mut Window,
        tx: &Sender<Event>,
        rx: &Receiver<Event>,
        is_terminated: &Arc<AtomicBool>,
    ) -> Result<()> {
        let backend = CrosstermBackend::new(io::stdout());

        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Fullscreen,
            },
        )?;

        terminal.clear()?;

        dispatch(window.init(), tx, is_terminated);

        while !is_terminated.load(Ordering::Relaxed) {
            terminal.draw(|f| {
                window.render(f);
            })?;

            let ev = rx.recv()?;

            logger!(trace, "event: {:?}", ev);

            let effects = window.on_event(&ev);

            if !effects.is_empty() {
                logger!(debug, "dispatch {} effect(s)", effects.len());
            }

            dispatch(effects, tx, is_terminated);
        }

        Ok(())
    }
}

fn join(name: &str, handler: JoinHandle<Result<()>>) -> Result<()> {
    match handler.join() {
        Ok(ret) => ret,
        Err(e) => {
            if let Some(e) = e.downcast_ref::<&str>() {
                return Err(anyhow!("{} thread panicked: {:?}", name, e));
            }
            Err(anyhow!("{} thread panicked", name))
        }
    }
}
