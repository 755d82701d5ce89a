pub mod effect;
pub mod input;
pub mod tick;

use std::{any::Any, fmt};

use crossterm::event::{KeyEvent, MouseEvent};

pub use self::effect::Effect;

/// Terminal input delivered by the key reader thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    FocusGained,
    FocusLost,
}

impl From<KeyEvent> for UserEvent {
    fn from(ev: KeyEvent) -> Self {
        UserEvent::Key(ev)
    }
}

impl From<MouseEvent> for UserEvent {
    fn from(ev: MouseEvent) -> Self {
        UserEvent::Mouse(ev)
    }
}

/// Everything the host loop hands to the widget tree.
///
/// `Message` carries panel-defined payloads produced by effects. Panels
/// recognize their own payloads with [`Event::downcast_ref`].
pub enum Event {
    User(UserEvent),
    Tick,
    Message(Box<dyn Any + Send>),
}

impl Event {
    pub fn message<T: Any + Send>(payload: T) -> Self {
        Event::Message(Box::new(payload))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Event::Message(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Event::User(UserEvent::Key(ev)) => Some(ev),
            _ => None,
        }
    }
}

impl From<UserEvent> for Event {
    fn from(ev: UserEvent) -> Self {
        Event::User(ev)
    }
}

impl From<KeyEvent> for Event {
    fn from(ev: KeyEvent) -> Self {
        Event::User(UserEvent::Key(ev))
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::User(ev) => f.debug_tuple("User").field(ev).finish(),
            Event::Tick => write!(f, "Tick"),
            Event::Message(_) => write!(f, "Message(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Ping(u8);

    #[test]
    fn downcast_message_payload() {
        let ev = Event::message(Ping(3));

        assert_eq!(ev.downcast_ref::<Ping>(), Some(&Ping(3)));
        assert_eq!(ev.downcast_ref::<String>(), None);
        assert!(ev.key().is_none());
    }

    #[test]
    fn key_accessor() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let ev = Event::from(key);

        assert_eq!(ev.key(), Some(&key));
        assert_eq!(Event::Tick.downcast_ref::<Ping>(), None);
    }
}
