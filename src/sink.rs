use thiserror::Error;

use crate::model::Action;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("keystroke {keycode} rejected: {reason}")]
    Rejected { keycode: u32, reason: String },
    #[error("character {0:?} has no keystroke")]
    Untypable(char),
}

/// The collaborator that turns synthetic keystrokes into host input.
///
/// Implementations own the wire encoding (HID report, uinput, virtual
/// keyboard protocol). Delivery is synchronous and in order.
pub trait KeystrokeSink {
    fn send(&mut self, action: Action) -> Result<(), EmitError>;
}

impl KeystrokeSink for Vec<Action> {
    fn send(&mut self, action: Action) -> Result<(), EmitError> {
        self.push(action);
        Ok(())
    }
}
