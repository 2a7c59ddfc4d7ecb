//! Keyboard input delivered by the host.

/// Keys the date picker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
    Backspace,
    /// Any key the picker ignores.
    Other,
}

/// A key press with the modifier state the picker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The pressed key.
    pub key: Key,
    /// Whether Shift was held.
    pub shift: bool,
}

impl KeyPress {
    /// A key press without modifiers.
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    /// A key press with Shift held.
    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}
