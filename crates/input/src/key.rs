use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A key the editor binds to something.
///
/// Names follow the DOM `KeyboardEvent.key` values (`"w"`, `" "`, `"ArrowUp"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unbound key {0:?}")]
pub struct KeyParseError(pub String);

impl Key {
    pub fn name(self) -> &'static str {
        match self {
            Self::W => "w",
            Self::A => "a",
            Self::S => "s",
            Self::D => "d",
            Self::Q => "q",
            Self::E => "e",
            Self::Space => " ",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Enter => "Enter",
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            " " | "Space" => Self::Space,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            letter if letter.len() == 1 => match letter.to_ascii_lowercase().as_str() {
                "w" => Self::W,
                "a" => Self::A,
                "s" => Self::S,
                "d" => Self::D,
                "q" => Self::Q,
                "e" => Self::E,
                _ => return Err(KeyParseError(s.to_string())),
            },
            _ => return Err(KeyParseError(s.to_string())),
        };
        Ok(key)
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name().to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str("Space"),
            other => f.write_str(other.name()),
        }
    }
}

/// The set of keys currently held down, shared by every per-frame consumer.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            tracing::trace!(%key, "key down");
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key) {
            tracing::trace!(%key, "key up");
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}
