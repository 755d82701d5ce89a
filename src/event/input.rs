use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::Result;
use crossbeam::channel::Sender;
use crossterm::event::{self, Event as CEvent};

use crate::logger;

use super::{Event, UserEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn read_key(tx: Sender<Event>, is_terminated: Arc<AtomicBool>) -> Result<()> {
    while !is_terminated.load(Ordering::Relaxed) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let ev = match event::read()? {
            CEvent::Key(ev) => UserEvent::Key(ev).into(),
            CEvent::Mouse(ev) => UserEvent::Mouse(ev).into(),
            CEvent::FocusGained => UserEvent::FocusGained.into(),
            CEvent::FocusLost => UserEvent::FocusLost.into(),
            // The window re-reads the frame size on every draw; a tick forces one.
            CEvent::Resize(..) => Event::Tick,
            CEvent::Paste(_) => continue,
        };

        if tx.send(ev).is_err() {
            logger!(debug, "read_key: receiver closed");
            break;
        }
    }

    Ok(())
}
