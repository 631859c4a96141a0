use serde::{Deserialize, Serialize};

/// A key notification from the firmware's event pipeline.
///
/// `shift` carries the implicit modifier state the pipeline already folded into
/// the event; modifier keys themselves are not tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub keycode: u32,
    #[serde(default)]
    pub shift: bool,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(keycode: u32) -> Self {
        Self {
            keycode,
            shift: false,
            pressed: true,
        }
    }

    pub fn release(keycode: u32) -> Self {
        Self {
            keycode,
            shift: false,
            pressed: false,
        }
    }
}

/// A synthetic keystroke handed to the injection collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub keycode: u32,
    pub state: KeyState,
}

impl Action {
    pub fn pressed(keycode: u32) -> Self {
        Self {
            keycode,
            state: KeyState::Pressed,
        }
    }

    pub fn released(keycode: u32) -> Self {
        Self {
            keycode,
            state: KeyState::Released,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyState {
    Pressed,
    Released,
}
