use std::{fmt, str::FromStr};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key")]
    Empty,

    #[error("unknown modifier '{0}' (expected ctrl, alt or shift)")]
    UnknownModifier(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// A key code plus modifiers, written as `alt+right`, `ctrl+n`, `shift+tab`, `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, ev: &KeyEvent) -> bool {
        if !matches!(ev.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return false;
        }

        let (code, modifiers) = normalize(ev.code, ev.modifiers);

        self.code == code && self.modifiers == modifiers
    }
}

/// Terminals report shifted characters and BackTab with or without SHIFT.
/// The shift is already part of the code, so it is dropped before comparing.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(_) | KeyCode::BackTab => (code, modifiers - KeyModifiers::SHIFT),
        _ => (code, modifiers),
    }
}

const NAMED_KEYS: [(&str, KeyCode); 15] = [
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("insert", KeyCode::Insert),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pgup", KeyCode::PageUp),
    ("pgdown", KeyCode::PageDown),
];

impl FromStr for KeyChord {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        // "+" alone, or a trailing "+" as in "ctrl++", names the plus key itself.
        let (prefix, key) = match s.strip_suffix('+') {
            Some(rest) if rest.is_empty() || rest.ends_with('+') => {
                (rest.strip_suffix('+').unwrap_or(rest), "+")
            }
            _ => match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            },
        };

        let mut modifiers = KeyModifiers::NONE;

        for m in prefix.split('+').filter(|m| !m.is_empty()) {
            modifiers |= match m.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::UnknownModifier(m.to_string())),
            };
        }

        let code = parse_code(key)?;

        let (code, modifiers) = match code {
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
                (KeyCode::BackTab, modifiers - KeyModifiers::SHIFT)
            }
            _ => normalize(code, modifiers),
        };

        Ok(Self { code, modifiers })
    }
}

fn parse_code(key: &str) -> Result<KeyCode, KeyParseError> {
    if key.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = key.to_lowercase();

    if lower == "space" {
        return Ok(KeyCode::Char(' '));
    }

    if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == lower) {
        return Ok(*code);
    }

    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    Err(KeyParseError::UnknownKey(key.to_string()))
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }

        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::BackTab => write!(f, "shift+tab"),
            KeyCode::F(n) => write!(f, "f{}", n),
            code => match NAMED_KEYS.iter().find(|(_, c)| *c == code) {
                Some((name, _)) => write!(f, "{}", name),
                None => write!(f, "{:?}", code),
            },
        }
    }
}

impl TryFrom<String> for KeyChord {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyChord> for String {
    fn from(value: KeyChord) -> Self {
        value.to_string()
    }
}

/// One action bound to one or more keys. `help` is descriptive only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyBinding {
    pub keys: Vec<KeyChord>,
    #[serde(default)]
    pub help: String,
}

impl KeyBinding {
    pub fn new(keys: impl IntoIterator<Item = KeyChord>, help: impl Into<String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            help: help.into(),
        }
    }

    pub fn matches(&self, ev: &KeyEvent) -> bool {
        self.keys.iter().any(|key| key.matches(ev))
    }

    /// Keys as shown in a help line, e.g. `alt+right/ctrl+n`.
    pub fn help_key(&self) -> String {
        self.keys
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Tab navigation bindings.
///
/// ```yaml
/// key_bindings:
///   tab_next:
///     keys: [alt+right]
///     help: Next tab
///   tab_prev:
///     keys: [alt+left]
///     help: Prev tab
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyMap {
    pub tab_next: KeyBinding,
    pub tab_prev: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            tab_next: KeyBinding::new(
                [KeyChord::new(KeyCode::Right, KeyModifiers::ALT)],
                "Next tab",
            ),
            tab_prev: KeyBinding::new(
                [KeyChord::new(KeyCode::Left, KeyModifiers::ALT)],
                "Prev tab",
            ),
        }
    }
}

impl KeyMap {
    pub fn short_help(&self) -> Vec<&KeyBinding> {
        vec![&self.tab_next, &self.tab_prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[rstest]
    #[case("alt+right", KeyChord::new(KeyCode::Right, KeyModifiers::ALT))]
    #[case("Ctrl+N", KeyChord::new(KeyCode::Char('N'), KeyModifiers::CONTROL))]
    #[case("ctrl+alt+x", KeyChord::new(KeyCode::Char('x'), KeyModifiers::CONTROL | KeyModifiers::ALT))]
    #[case("shift+tab", KeyChord::new(KeyCode::BackTab, KeyModifiers::NONE))]
    #[case("backtab", KeyChord::new(KeyCode::BackTab, KeyModifiers::NONE))]
    #[case("q", KeyChord::new(KeyCode::Char('q'), KeyModifiers::NONE))]
    #[case("+", KeyChord::new(KeyCode::Char('+'), KeyModifiers::NONE))]
    #[case("ctrl++", KeyChord::new(KeyCode::Char('+'), KeyModifiers::CONTROL))]
    #[case("space", KeyChord::new(KeyCode::Char(' '), KeyModifiers::NONE))]
    #[case("f5", KeyChord::new(KeyCode::F(5), KeyModifiers::NONE))]
    #[case("esc", KeyChord::new(KeyCode::Esc, KeyModifiers::NONE))]
    fn parse_key_chord(#[case] input: &str, #[case] expected: KeyChord) {
        assert_eq!(input.parse::<KeyChord>(), Ok(expected));
    }

    #[rstest]
    #[case("", KeyParseError::Empty)]
    #[case("ctrl+", KeyParseError::Empty)]
    #[case("hyper+a", KeyParseError::UnknownModifier("hyper".into()))]
    #[case("alt+rigth", KeyParseError::UnknownKey("rigth".into()))]
    #[case("f13", KeyParseError::UnknownKey("f13".into()))]
    fn parse_key_chord_error(#[case] input: &str, #[case] expected: KeyParseError) {
        assert_eq!(input.parse::<KeyChord>(), Err(expected));
    }

    #[rstest]
    #[case("alt+right")]
    #[case("ctrl+alt+x")]
    #[case("shift+tab")]
    #[case("space")]
    #[case("pgdown")]
    fn display_parses_back(#[case] input: &str) {
        let chord: KeyChord = input.parse().unwrap();

        assert_eq!(chord.to_string(), input);
    }

    #[test]
    fn matches_ignores_shift_on_characters() {
        let chord: KeyChord = "N".parse().unwrap();

        assert!(chord.matches(&key(KeyCode::Char('N'), KeyModifiers::SHIFT)));
        assert!(chord.matches(&key(KeyCode::Char('N'), KeyModifiers::NONE)));
        assert!(!chord.matches(&key(KeyCode::Char('n'), KeyModifiers::NONE)));
    }

    #[test]
    fn matches_backtab_with_shift() {
        let chord: KeyChord = "shift+tab".parse().unwrap();

        assert!(chord.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn matches_requires_exact_modifiers() {
        let chord: KeyChord = "alt+right".parse().unwrap();

        assert!(chord.matches(&key(KeyCode::Right, KeyModifiers::ALT)));
        assert!(!chord.matches(&key(KeyCode::Right, KeyModifiers::NONE)));
        assert!(!chord.matches(&key(KeyCode::Right, KeyModifiers::ALT | KeyModifiers::CONTROL)));
    }

    #[test]
    fn release_does_not_match() {
        let chord: KeyChord = "q".parse().unwrap();

        let ev = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );

        assert!(!chord.matches(&ev));
    }

    #[test]
    fn binding_matches_any_key() {
        let binding = KeyBinding::new(
            ["alt+right".parse().unwrap(), "ctrl+n".parse().unwrap()],
            "Next tab",
        );

        assert!(binding.matches(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)));
        assert!(binding.matches(&key(KeyCode::Right, KeyModifiers::ALT)));
        assert_eq!(binding.help_key(), "alt+right/ctrl+n");
    }

    #[test]
    fn deserialize_key_map_partial() {
        let yaml = indoc! {r#"
            tab_next:
              keys: [tab]
              help: Next
        "#};

        let actual: KeyMap = serde_yaml::from_str(yaml).unwrap();

        let expected = KeyMap {
            tab_next: KeyBinding::new([KeyChord::new(KeyCode::Tab, KeyModifiers::NONE)], "Next"),
            ..Default::default()
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn deserialize_key_map_invalid_key() {
        let yaml = indoc! {r#"
            tab_next:
              keys: [alt+nope]
        "#};

        let err = serde_yaml::from_str::<KeyMap>(yaml).unwrap_err();

        assert!(err.to_string().contains("unknown key 'nope'"));
    }
}
