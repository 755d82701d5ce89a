use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

use crossbeam::channel::Sender;

use crate::logger;

use super::Event;

type Task = Box<dyn FnOnce() -> Option<Event> + Send + 'static>;

/// Deferred work emitted by panels. The widget only collects effects; the host
/// executes them and feeds resulting events back into its loop.
pub enum Effect {
    Task(Task),
    Batch(Vec<Effect>),
    Quit,
}

impl Effect {
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Event> + Send + 'static,
    {
        Effect::Task(Box::new(f))
    }

    /// Collapses a list of effects. Empty lists produce no effect at all.
    pub fn batch(mut effects: Vec<Effect>) -> Option<Effect> {
        match effects.len() {
            0 => None,
            1 => effects.pop(),
            _ => Some(Effect::Batch(effects)),
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Task(_) => write!(f, "Task(..)"),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
            Effect::Quit => write!(f, "Quit"),
        }
    }
}

/// Runs every task on its own worker thread. Events produced by tasks are
/// sent to `tx`; `Quit` raises the termination flag.
pub fn dispatch(effects: Vec<Effect>, tx: &Sender<Event>, is_terminated: &Arc<AtomicBool>) {
    for effect in effects {
        match effect {
            Effect::Task(task) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    if let Some(ev) = task() {
                        if tx.send(ev).is_err() {
                            logger!(debug, "effect result dropped: event loop closed");
                        }
                    }
                });
            }
            Effect::Batch(effects) => dispatch(effects, tx, is_terminated),
            Effect::Quit => {
                logger!(info, "quit requested");
                is_terminated.store(true, Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam::channel::bounded;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn batch_of_nothing_is_none() {
        assert!(Effect::batch(Vec::new()).is_none());
    }

    #[test]
    fn batch_of_one_is_unwrapped() {
        assert!(matches!(Effect::batch(vec![Effect::Quit]), Some(Effect::Quit)));
    }

    #[test]
    fn batch_of_many_keeps_order() {
        let effect = Effect::batch(vec![Effect::Quit, Effect::task(|| None)]);

        match effect {
            Some(Effect::Batch(effects)) => {
                assert_eq!(effects.len(), 2);
                assert!(matches!(effects[0], Effect::Quit));
                assert!(matches!(effects[1], Effect::Task(_)));
            }
            other => panic!("unexpected effect: {:?}", other),
        }
    }

    #[test]
    fn dispatch_sends_task_results_and_quits() {
        let (tx, rx) = bounded(4);
        let is_terminated = Arc::new(AtomicBool::new(false));

        dispatch(
            vec![
                Effect::Batch(vec![Effect::task(|| Some(Event::Tick))]),
                Effect::Quit,
            ],
            &tx,
            &is_terminated,
        );

        let ev = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(matches!(ev, Event::Tick));
        assert!(is_terminated.load(Ordering::Relaxed));
    }
}
