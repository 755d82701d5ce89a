use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Foreground, background and modifier of a piece of text.
///
/// ```yaml
/// fg: name | hex | integer
/// bg: name | hex | integer
/// modifier: bold | italic
/// ```
#[derive(Default, Clone, Copy, Deserialize, Serialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct UIStyle {
    #[serde(
        deserialize_with = "deserialize_color",
        serialize_with = "serialize_color"
    )]
    pub fg: Option<Color>,

    #[serde(
        deserialize_with = "deserialize_color",
        serialize_with = "serialize_color"
    )]
    pub bg: Option<Color>,

    #[serde(
        deserialize_with = "deserialize_modifier",
        serialize_with = "serialize_modifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub modifier: Option<Modifier>,
}

impl UIStyle {
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn to_style(&self) -> Style {
        let mut style = Style::default();

        if let Some(fg) = self.fg {
            style = style.fg(fg)
        }

        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }

        if let Some(modifier) = self.modifier {
            style = style.remove_modifier(Modifier::all()).add_modifier(modifier);
        }

        style
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Index(u8),
    Name(String),
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ColorRepr>::deserialize(deserializer)? {
        Some(ColorRepr::Index(n)) => Ok(Some(Color::Indexed(n))),
        Some(ColorRepr::Name(s)) if s.is_empty() || s == "none" => Ok(None),
        Some(ColorRepr::Name(s)) => Color::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Written with `Display` so the value parses back through `deserialize_color`.
fn serialize_color<S>(value: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(color) => serializer.serialize_str(&color.to_string()),
        None => serializer.serialize_none(),
    }
}

const MODIFIER_BOLD: &str = "bold";
const MODIFIER_DIM: &str = "dim";
const MODIFIER_ITALIC: &str = "italic";
const MODIFIER_UNDERLINED: &str = "underlined";
const MODIFIER_SLOW_BLINK: &str = "slow blink";
const MODIFIER_RAPID_BLINK: &str = "rapid blink";
const MODIFIER_REVERSED: &str = "reversed";
const MODIFIER_HIDDEN: &str = "hidden";
const MODIFIER_CROSSED_OUT: &str = "crossed out";
const MODIFIER_NONE: &str = "none";

const MODIFIERS: [(&str, Modifier); 9] = [
    (MODIFIER_BOLD, Modifier::BOLD),
    (MODIFIER_DIM, Modifier::DIM),
    (MODIFIER_ITALIC, Modifier::ITALIC),
    (MODIFIER_UNDERLINED, Modifier::UNDERLINED),
    (MODIFIER_SLOW_BLINK, Modifier::SLOW_BLINK),
    (MODIFIER_RAPID_BLINK, Modifier::RAPID_BLINK),
    (MODIFIER_REVERSED, Modifier::REVERSED),
    (MODIFIER_HIDDEN, Modifier::HIDDEN),
    (MODIFIER_CROSSED_OUT, Modifier::CROSSED_OUT),
];

fn serialize_modifier<S>(value: &Option<Modifier>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let Some(value) = value else {
        return serializer.serialize_none();
    };

    if value.is_empty() {
        return serializer.serialize_str(MODIFIER_NONE);
    }

    let modifiers = MODIFIERS
        .iter()
        .filter(|(_, m)| value.contains(*m))
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" | ");

    serializer.serialize_str(&modifiers)
}

fn deserialize_modifier<'de, D>(deserializer: D) -> Result<Option<Modifier>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;

    if s.is_empty() || s.eq_ignore_ascii_case(MODIFIER_NONE) {
        return Ok(Some(Modifier::empty()));
    }

    let mut result = Modifier::empty();

    for m in s.split('|') {
        let name = m.trim().to_lowercase();

        // "underline" is accepted as a shorthand.
        let name = if name == "underline" {
            MODIFIER_UNDERLINED.to_string()
        } else {
            name
        };

        let Some((_, modifier)) = MODIFIERS.iter().find(|(n, _)| *n == name) else {
            return Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(m),
                &"bold | dim | italic | underlined | slow blink | rapid blink | reversed | hidden | crossed out",
            ));
        };

        result |= *modifier;
    }

    Ok(Some(result))
}
