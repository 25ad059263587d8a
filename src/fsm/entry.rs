//! Keypad numeric entry shared by every number-collecting state.
//!
//! Keypad layout (4x4 membrane):
//!
//! ```text
//!   1 2 3 A      A = accept      B = backspace
//!   4 5 6 B      C = clear       D = back to main menu
//!   7 8 9 C      * = decimal point
//!   * 0 # D
//! ```

/// Longest entry that still fits on the 16-column display row.
pub const ENTRY_CAPACITY: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Accept,
    Backspace,
    Clear,
    Cancel,
}

impl Key {
    /// Map a raw keypad character.  `#` and unknown characters map to `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '*' => Some(Self::Point),
            'A' => Some(Self::Accept),
            'B' => Some(Self::Backspace),
            'C' => Some(Self::Clear),
            'D' => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// The digits typed so far.
#[derive(Debug, Default, Clone)]
pub struct NumberEntry {
    text: heapless::String<ENTRY_CAPACITY>,
}

impl NumberEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an editing key.  Accept and Cancel are handled by the caller.
    /// Returns `false` when the key was rejected (full, second point).
    pub fn edit(&mut self, key: Key) -> bool {
        match key {
            Key::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(c) => self.text.push(c).is_ok(),
                None => false,
            },
            Key::Point => !self.text.contains('.') && self.text.push('.').is_ok(),
            Key::Backspace => self.text.pop().is_some(),
            Key::Clear => {
                self.text.clear();
                true
            }
            Key::Accept | Key::Cancel => false,
        }
    }

    /// Parsed value, or `None` for an empty or incomplete entry.
    pub fn value(&self) -> Option<f64> {
        if self.text.is_empty() || self.text == "." {
            return None;
        }
        self.text.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
