use serde::Serialize;

use crate::correction::EditPlan;
use crate::engine::{Autocorrect, EngineStats, Outcome};
use crate::keyboard::{KEY_LEFTSHIFT, KEY_RIGHTSHIFT};
use crate::model::{Action, KeyEvent};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// Everything the host receives: the user's own keys interleaved with the
    /// synthetic correction keystrokes.
    pub host_actions: Vec<Action>,
    pub plans: Vec<EditPlan>,
    pub failures: usize,
    pub stats: EngineStats,
}

/// Run `events` through `engine` the way a firmware event bus would.
///
/// The engine sees each event first; the event then continues to the host.
/// Corrections are therefore typed before the boundary key that triggered
/// them.
pub fn replay(engine: &mut Autocorrect, events: &[KeyEvent]) -> ReplayReport {
    let mut report = ReplayReport::default();

    for event in events {
        match engine.handle_event(*event, &mut report.host_actions) {
            Outcome::Corrected(plan) => report.plans.push(plan),
            Outcome::CorrectionFailed { plan, .. } => {
                report.plans.push(plan);
                report.failures += 1;
            }
            _ => {}
        }

        forward_to_host(&mut report.host_actions, event);
    }

    report.stats = engine.stats();
    report
}

// Events carry shift as implicit state; the host needs an explicit modifier
// around each shifted press so no modifier stays held across a correction.
fn forward_to_host(out: &mut Vec<Action>, event: &KeyEvent) {
    if matches!(event.keycode, KEY_LEFTSHIFT | KEY_RIGHTSHIFT) {
        return;
    }

    if !event.pressed {
        out.push(Action::released(event.keycode));
        return;
    }

    if event.shift {
        out.push(Action::pressed(KEY_LEFTSHIFT));
    }
    out.push(Action::pressed(event.keycode));
    if event.shift {
        out.push(Action::released(KEY_LEFTSHIFT));
    }
}
