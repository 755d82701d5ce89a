use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::Result;
use crossbeam::channel::Sender;

use super::Event;

pub fn tick(tx: Sender<Event>, rate: Duration, is_terminated: Arc<AtomicBool>) -> Result<()> {
    while !is_terminated.load(Ordering::Relaxed) {
        thread::sleep(rate);

        if tx.send(Event::Tick).is_err() {
            break;
        }
    }

    Ok(())
}
