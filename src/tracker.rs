use tracing::debug;

use crate::keyboard::KeyClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    BuildingWord,
}

/// Reconstructs the word currently being typed from classified key presses.
///
/// The buffer holds at most `capacity` lowercase letters. Letters arriving at
/// capacity are dropped rather than shifting or overwriting the buffer, and
/// the word is not handed out at the next boundary, so a word longer than the
/// capacity can never match the dictionary.
#[derive(Debug, Clone)]
pub struct WordTracker {
    buf: String,
    capacity: usize,
    min_word_length: usize,
    // Letters typed past capacity; the host has them, the buffer does not.
    dropped: usize,
}

impl WordTracker {
    pub fn new(capacity: usize, min_word_length: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
            min_word_length,
            dropped: 0,
        }
    }

    pub fn state(&self) -> TrackerState {
        if self.buf.is_empty() {
            TrackerState::Idle
        } else {
            TrackerState::BuildingWord
        }
    }

    pub fn word(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True while the word being typed is longer than the buffer.
    pub fn is_overflowed(&self) -> bool {
        self.dropped > 0
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.dropped = 0;
    }

    /// Advance the state machine by one classified key press.
    ///
    /// Returns the completed word when a boundary ends a word long enough to
    /// be looked up. The buffer is always empty after a boundary.
    pub fn feed(&mut self, class: KeyClass) -> Option<String> {
        match class {
            KeyClass::Letter(c) if c.is_ascii_alphabetic() => {
                if self.dropped == 0 && self.buf.len() < self.capacity {
                    self.buf.push(c.to_ascii_lowercase());
                    debug!(word = %self.buf, "building word");
                } else {
                    self.dropped += 1;
                    debug!(capacity = self.capacity, "word buffer full, dropping letter");
                }
                None
            }
            KeyClass::Boundary => {
                let overflowed = self.is_overflowed();
                let word = std::mem::take(&mut self.buf);
                self.dropped = 0;
                if word.is_empty() {
                    return None;
                }
                if overflowed {
                    debug!(prefix = %word, "word longer than buffer, skipping lookup");
                    return None;
                }
                if word.len() < self.min_word_length {
                    debug!(word = %word, "word too short for lookup");
                    return None;
                }
                debug!(word = %word, "word complete");
                Some(word)
            }
            KeyClass::Backspace => {
                if self.dropped > 0 {
                    self.dropped -= 1;
                } else {
                    self.buf.pop();
                }
                None
            }
            KeyClass::Letter(_) | KeyClass::Other => {
                self.clear();
                None
            }
        }
    }
}
