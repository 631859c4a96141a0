use anyhow::{anyhow, Result};

use crate::model::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub keycode: u32,
    pub shift: bool,
}

// Linux evdev keycodes (see linux/input-event-codes.h)
pub const KEY_1: u32 = 2;
pub const KEY_2: u32 = 3;
pub const KEY_3: u32 = 4;
pub const KEY_4: u32 = 5;
pub const KEY_5: u32 = 6;
pub const KEY_6: u32 = 7;
pub const KEY_7: u32 = 8;
pub const KEY_8: u32 = 9;
pub const KEY_9: u32 = 10;
pub const KEY_0: u32 = 11;

pub const KEY_MINUS: u32 = 12;
pub const KEY_EQUAL: u32 = 13;
pub const KEY_BACKSPACE: u32 = 14;
pub const KEY_TAB: u32 = 15;

pub const KEY_Q: u32 = 16;
pub const KEY_W: u32 = 17;
pub const KEY_E: u32 = 18;
pub const KEY_R: u32 = 19;
pub const KEY_T: u32 = 20;
pub const KEY_Y: u32 = 21;
pub const KEY_U: u32 = 22;
pub const KEY_I: u32 = 23;
pub const KEY_O: u32 = 24;
pub const KEY_P: u32 = 25;

pub const KEY_LEFTBRACE: u32 = 26;
pub const KEY_RIGHTBRACE: u32 = 27;
pub const KEY_ENTER: u32 = 28;

pub const KEY_LEFTCTRL: u32 = 29;

pub const KEY_A: u32 = 30;
pub const KEY_S: u32 = 31;
pub const KEY_D: u32 = 32;
pub const KEY_F: u32 = 33;
pub const KEY_G: u32 = 34;
pub const KEY_H: u32 = 35;
pub const KEY_J: u32 = 36;
pub const KEY_K: u32 = 37;
pub const KEY_L: u32 = 38;

pub const KEY_SEMICOLON: u32 = 39;
pub const KEY_APOSTROPHE: u32 = 40;
pub const KEY_GRAVE: u32 = 41;

pub const KEY_LEFTSHIFT: u32 = 42;

pub const KEY_BACKSLASH: u32 = 43;

pub const KEY_Z: u32 = 44;
pub const KEY_X: u32 = 45;
pub const KEY_C: u32 = 46;
pub const KEY_V: u32 = 47;
pub const KEY_B: u32 = 48;
pub const KEY_N: u32 = 49;
pub const KEY_M: u32 = 50;

pub const KEY_COMMA: u32 = 51;
pub const KEY_DOT: u32 = 52;
pub const KEY_SLASH: u32 = 53;

pub const KEY_RIGHTSHIFT: u32 = 54;

pub const KEY_LEFTALT: u32 = 56;
pub const KEY_SPACE: u32 = 57;

pub const KEY_LEFT: u32 = 105;

/// Letter keycodes in `a..=z` order.
const LETTER_KEYCODES: [u32; 26] = [
    KEY_A, KEY_B, KEY_C, KEY_D, KEY_E, KEY_F, KEY_G, KEY_H, KEY_I, KEY_J, KEY_K, KEY_L, KEY_M,
    KEY_N, KEY_O, KEY_P, KEY_Q, KEY_R, KEY_S, KEY_T, KEY_U, KEY_V, KEY_W, KEY_X, KEY_Y, KEY_Z,
];

// (unshifted, shifted, keycode) for the US-QWERTY symbol keys.
const SYMBOL_KEYS: [(char, char, u32); 21] = [
    ('1', '!', KEY_1),
    ('2', '@', KEY_2),
    ('3', '#', KEY_3),
    ('4', '$', KEY_4),
    ('5', '%', KEY_5),
    ('6', '^', KEY_6),
    ('7', '&', KEY_7),
    ('8', '*', KEY_8),
    ('9', '(', KEY_9),
    ('0', ')', KEY_0),
    ('-', '_', KEY_MINUS),
    ('=', '+', KEY_EQUAL),
    ('[', '{', KEY_LEFTBRACE),
    (']', '}', KEY_RIGHTBRACE),
    ('\\', '|', KEY_BACKSLASH),
    (';', ':', KEY_SEMICOLON),
    ('\'', '"', KEY_APOSTROPHE),
    ('`', '~', KEY_GRAVE),
    (',', '<', KEY_COMMA),
    ('.', '>', KEY_DOT),
    ('/', '?', KEY_SLASH),
];

/// Characters that end the word currently being typed.
pub const WORD_BOUNDARY_CHARS: [char; 9] = [' ', '.', ',', ';', ':', '?', '!', '\n', '\t'];

/// Classification of a key press as seen by the word tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// An alphabetic key, already folded to lowercase.
    Letter(char),
    Boundary,
    Backspace,
    Other,
}

pub fn char_to_keystroke(c: char) -> Option<KeyStroke> {
    let stroke = |keycode, shift| Some(KeyStroke { keycode, shift });

    match c {
        'a'..='z' => stroke(LETTER_KEYCODES[(c as u8 - b'a') as usize], false),
        'A'..='Z' => stroke(LETTER_KEYCODES[(c as u8 - b'A') as usize], true),
        ' ' => stroke(KEY_SPACE, false),
        '\n' => stroke(KEY_ENTER, false),
        '\t' => stroke(KEY_TAB, false),
        _ => SYMBOL_KEYS.iter().find_map(|&(plain, shifted, keycode)| {
            if c == plain {
                stroke(keycode, false)
            } else if c == shifted {
                stroke(keycode, true)
            } else {
                None
            }
        }),
    }
}

/// Decode the character a keystroke produces on a US-QWERTY layout.
pub fn keystroke_to_char(keycode: u32, shift: bool) -> Option<char> {
    if let Some(idx) = LETTER_KEYCODES.iter().position(|&k| k == keycode) {
        let c = (b'a' + idx as u8) as char;
        return Some(if shift { c.to_ascii_uppercase() } else { c });
    }

    match keycode {
        KEY_SPACE => return Some(' '),
        KEY_ENTER => return Some('\n'),
        KEY_TAB => return Some('\t'),
        _ => {}
    }

    SYMBOL_KEYS
        .iter()
        .find(|&&(_, _, k)| k == keycode)
        .map(|&(plain, shifted, _)| if shift { shifted } else { plain })
}

pub fn classify_key(keycode: u32, shift: bool) -> KeyClass {
    if keycode == KEY_BACKSPACE {
        return KeyClass::Backspace;
    }

    match keystroke_to_char(keycode, shift) {
        Some(c) if c.is_ascii_alphabetic() => KeyClass::Letter(c.to_ascii_lowercase()),
        Some(c) if WORD_BOUNDARY_CHARS.contains(&c) => KeyClass::Boundary,
        _ => KeyClass::Other,
    }
}

pub fn find_first_unsupported_char(text: &str) -> Option<(usize, char)> {
    text.char_indices()
        .find(|&(_idx, c)| char_to_keystroke(c).is_none())
}

/// Press/release event pairs that type `text` on a US-QWERTY keyboard.
pub fn key_events_for_text(text: &str) -> Result<Vec<KeyEvent>> {
    if let Some((idx, c)) = find_first_unsupported_char(text) {
        return Err(anyhow!(
            "character {c:?} at byte {idx} has no US-QWERTY keystroke"
        ));
    }

    let mut events = Vec::with_capacity(text.len() * 2);
    for stroke in text.chars().filter_map(char_to_keystroke) {
        events.push(KeyEvent {
            keycode: stroke.keycode,
            shift: stroke.shift,
            pressed: true,
        });
        events.push(KeyEvent {
            keycode: stroke.keycode,
            shift: stroke.shift,
            pressed: false,
        });
    }

    Ok(events)
}
