use serde::{Deserialize, Serialize};

use crate::keyboard::{char_to_keystroke, KEY_BACKSPACE, KEY_LEFTSHIFT};
use crate::model::Action;
use crate::sink::{EmitError, KeystrokeSink};

/// Edit that turns a typed typo into its correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPlan {
    pub backspace_count: usize,
    pub replacement_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Backspace,
    TypeChar(char),
}

impl EditPlan {
    /// All backspaces first, then the replacement left to right.
    pub fn ops(&self) -> impl Iterator<Item = EditOp> + '_ {
        std::iter::repeat(EditOp::Backspace)
            .take(self.backspace_count)
            .chain(self.replacement_text.chars().map(EditOp::TypeChar))
    }

    pub fn to_actions(&self) -> Result<Vec<Action>, EmitError> {
        let mut out = Vec::with_capacity((self.backspace_count + self.replacement_text.len()) * 2);
        for op in self.ops() {
            push_op_actions(&mut out, op)?;
        }
        Ok(out)
    }
}

fn push_op_actions(out: &mut Vec<Action>, op: EditOp) -> Result<(), EmitError> {
    match op {
        EditOp::Backspace => {
            out.push(Action::pressed(KEY_BACKSPACE));
            out.push(Action::released(KEY_BACKSPACE));
        }
        EditOp::TypeChar(c) => {
            let stroke = char_to_keystroke(c).ok_or(EmitError::Untypable(c))?;
            if stroke.shift {
                out.push(Action::pressed(KEY_LEFTSHIFT));
            }
            out.push(Action::pressed(stroke.keycode));
            out.push(Action::released(stroke.keycode));
            if stroke.shift {
                out.push(Action::released(KEY_LEFTSHIFT));
            }
        }
    }
    Ok(())
}

pub fn plan_correction(typo: &str, correction: &str) -> EditPlan {
    EditPlan {
        backspace_count: typo.chars().count(),
        replacement_text: correction.to_string(),
    }
}

/// Proof that a correction is being delivered.
///
/// Only [`CorrectionPlanner::begin`] creates one and only
/// [`CorrectionPlanner::end`] consumes it. While it exists the planner reports
/// a correction in progress and the engine drops incoming key events.
#[derive(Debug)]
#[must_use = "a correction token must be returned with CorrectionPlanner::end"]
pub struct CorrectionToken {
    _private: (),
}

#[derive(Debug, Default)]
pub struct CorrectionPlanner {
    in_progress: bool,
}

impl CorrectionPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Mint the token for a new correction, or `None` while another token is
    /// still outstanding.
    pub fn begin(&mut self) -> Option<CorrectionToken> {
        if self.in_progress {
            return None;
        }
        self.in_progress = true;
        Some(CorrectionToken { _private: () })
    }

    pub fn end(&mut self, token: CorrectionToken) {
        let CorrectionToken { _private: () } = token;
        self.in_progress = false;
    }

    /// Send every keystroke of `plan` to `sink` in order, stopping at the
    /// first rejection. A plan with an untypable character sends nothing.
    pub fn deliver(
        &self,
        _token: &CorrectionToken,
        plan: &EditPlan,
        sink: &mut dyn KeystrokeSink,
    ) -> Result<(), EmitError> {
        for action in plan.to_actions()? {
            sink.send(action)?;
        }
        Ok(())
    }
}
