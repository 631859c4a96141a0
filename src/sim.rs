use anyhow::{anyhow, Result};

use crate::keyboard::{keystroke_to_char, KEY_BACKSPACE, KEY_LEFTSHIFT, KEY_RIGHTSHIFT};
use crate::model::{Action, KeyState};

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionStats {
    pub key_events: usize,
    pub presses: usize,
    pub backspaces: usize,
}

pub fn stats(actions: &[Action]) -> ActionStats {
    let mut out = ActionStats {
        key_events: actions.len(),
        ..Default::default()
    };

    for a in actions {
        if a.state != KeyState::Pressed {
            continue;
        }
        out.presses += 1;
        if a.keycode == KEY_BACKSPACE {
            out.backspaces += 1;
        }
    }

    out
}

#[derive(Debug, Default, Clone)]
struct HostText {
    buf: Vec<char>,
}

impl HostText {
    fn insert_char(&mut self, c: char) {
        self.buf.push(c);
    }

    fn backspace(&mut self) {
        self.buf.pop();
    }

    fn as_string(&self) -> String {
        self.buf.iter().collect()
    }
}

/// Simulate the text a host ends up with after receiving `actions`.
///
/// This is intended for tests/debugging. The cursor always sits at the end of
/// the text; only Shift is modelled, and any keycode without a US-QWERTY
/// character (other than Backspace) is an error.
pub fn simulate_host_text(actions: &[Action]) -> Result<String> {
    let mut host = HostText::default();
    let mut shift_down = false;

    for action in actions {
        match (action.keycode, action.state) {
            (KEY_LEFTSHIFT | KEY_RIGHTSHIFT, KeyState::Pressed) => {
                shift_down = true;
                continue;
            }
            (KEY_LEFTSHIFT | KEY_RIGHTSHIFT, KeyState::Released) => {
                shift_down = false;
                continue;
            }
            (_, KeyState::Released) => continue,
            _ => {}
        }

        if action.keycode == KEY_BACKSPACE {
            host.backspace();
            continue;
        }

        let c = keystroke_to_char(action.keycode, shift_down).ok_or_else(|| {
            anyhow!(
                "simulate_host_text does not support keycode {} (shift={shift_down})",
                action.keycode
            )
        })?;
        host.insert_char(c);
    }

    Ok(host.as_string())
}
