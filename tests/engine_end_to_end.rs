use pretty_assertions::assert_eq;

use keyfix::config::AutocorrectConfig;
use keyfix::correction::EditPlan;
use keyfix::dictionary::{Dictionary, DictionaryEntry};
use keyfix::engine::{Autocorrect, Correction, Outcome};
use keyfix::keyboard::{
    key_events_for_text, KEY_1, KEY_BACKSPACE, KEY_E, KEY_H, KEY_LEFT, KEY_SPACE, KEY_T,
};
use keyfix::model::{Action, KeyEvent};
use keyfix::sim::simulate_host_text;
use keyfix::sink::{EmitError, KeystrokeSink};

/// Accepts a fixed number of keystrokes and rejects the rest.
struct FlakySink {
    accepted: Vec<Action>,
    remaining: usize,
}

impl FlakySink {
    fn failing_after(remaining: usize) -> Self {
        Self {
            accepted: Vec::new(),
            remaining,
        }
    }
}

impl KeystrokeSink for FlakySink {
    fn send(&mut self, action: Action) -> Result<(), EmitError> {
        if self.remaining == 0 {
            return Err(EmitError::Rejected {
                keycode: action.keycode,
                reason: "transport queue full".to_string(),
            });
        }
        self.remaining -= 1;
        self.accepted.push(action);
        Ok(())
    }
}

fn engine() -> Autocorrect {
    Autocorrect::new(AutocorrectConfig::default(), Dictionary::builtin())
        .expect("default engine should build")
}

fn presses(text: &str) -> Vec<KeyEvent> {
    key_events_for_text(text)
        .expect("test text must be typable")
        .into_iter()
        .filter(|e| e.pressed)
        .collect()
}

fn feed(engine: &mut Autocorrect, events: &[KeyEvent], sink: &mut Vec<Action>) -> Vec<Outcome> {
    events
        .iter()
        .map(|e| engine.handle_event(*e, sink))
        .collect()
}

fn plans(outcomes: &[Outcome]) -> Vec<EditPlan> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            Outcome::Corrected(plan) => Some(plan.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn teh_space_produces_one_plan_and_empties_the_buffer() {
    let mut engine = engine();
    let mut sink = Vec::new();
    let events = [
        KeyEvent::press(KEY_T),
        KeyEvent::press(KEY_E),
        KeyEvent::press(KEY_H),
        KeyEvent::press(KEY_SPACE),
    ];

    let outcomes = feed(&mut engine, &events, &mut sink);

    assert_eq!(
        plans(&outcomes),
        vec![EditPlan {
            backspace_count: 3,
            replacement_text: "the".to_string(),
        }]
    );
    assert_eq!(engine.current_word(), "");
    assert!(!engine.is_correcting());

    let typed = simulate_host_text(&sink).expect("correction keystrokes should simulate");
    assert_eq!(typed, "the");
    assert_eq!(
        engine.last_correction(),
        Some(&Correction {
            typo: "teh".to_string(),
            correction: "the".to_string(),
        })
    );
}

#[test]
fn words_without_an_entry_are_left_alone() {
    let mut engine = engine();
    let mut sink = Vec::new();

    let outcomes = feed(&mut engine, &presses("hello "), &mut sink);

    assert!(plans(&outcomes).is_empty());
    assert!(sink.is_empty());
    assert_eq!(engine.current_word(), "");
    assert_eq!(engine.stats().words_completed, 1);
}

#[test]
fn every_dictionary_typo_is_corrected_at_every_boundary() {
    let dict = Dictionary::builtin();

    for DictionaryEntry { typo, correction } in dict.entries() {
        for boundary in [" ", ".", ",", ";", ":", "?", "!", "\n", "\t"] {
            let mut engine = engine();
            let mut sink = Vec::new();
            let text = format!("{typo}{boundary}");

            let outcomes = feed(&mut engine, &presses(&text), &mut sink);

            assert_eq!(
                plans(&outcomes),
                vec![EditPlan {
                    backspace_count: typo.len(),
                    replacement_text: correction.clone(),
                }],
                "typing {text:?}"
            );
        }
    }
}

#[test]
fn short_entries_are_never_reached() {
    let dict = Dictionary::from_entries([DictionaryEntry {
        typo: "ot".to_string(),
        correction: "to".to_string(),
    }])
    .expect("valid entry");
    let mut engine = Autocorrect::new(AutocorrectConfig::default(), dict).expect("engine");
    let mut sink = Vec::new();

    let outcomes = feed(&mut engine, &presses("ot ot. "), &mut sink);

    assert!(plans(&outcomes).is_empty());
    assert!(sink.is_empty());
}

#[test]
fn events_are_dropped_while_a_correction_is_in_progress() {
    let mut engine = engine();
    let mut sink = Vec::new();
    feed(&mut engine, &presses("ad"), &mut sink);

    let token = engine
        .begin_correction()
        .expect("idle engine hands out a token");
    assert!(engine.is_correcting());

    let outcomes = feed(&mut engine, &presses("n teh "), &mut sink);
    assert!(outcomes.iter().all(|o| *o == Outcome::Suppressed));
    assert_eq!(engine.current_word(), "ad");
    assert!(sink.is_empty());

    engine.end_correction(token);

    let outcomes = feed(&mut engine, &presses("n "), &mut sink);
    assert_eq!(
        plans(&outcomes),
        vec![EditPlan {
            backspace_count: 3,
            replacement_text: "and".to_string(),
        }]
    );
    assert_eq!(engine.stats().suppressed, 6);
}

#[test]
fn second_begin_is_refused_while_a_token_is_held() {
    let mut engine = engine();
    let mut sink = Vec::new();

    let token = engine.begin_correction().expect("first token");
    assert!(engine.begin_correction().is_none());
    assert!(engine.is_correcting());
    assert_eq!(
        engine.handle_event(KeyEvent::press(KEY_T), &mut sink),
        Outcome::Suppressed
    );

    engine.end_correction(token);
    assert!(!engine.is_correcting());
    assert_eq!(
        engine.handle_event(KeyEvent::press(KEY_T), &mut sink),
        Outcome::Tracked
    );
}

#[test]
fn releases_are_ignored() {
    let mut engine = engine();
    let mut sink = Vec::new();

    assert_eq!(
        engine.handle_event(KeyEvent::release(KEY_T), &mut sink),
        Outcome::Released
    );
    assert_eq!(engine.current_word(), "");
}

#[test]
fn other_keys_reset_the_word() {
    let mut engine = engine();
    let mut sink = Vec::new();

    feed(&mut engine, &presses("te"), &mut sink);
    engine.handle_event(KeyEvent::press(KEY_LEFT), &mut sink);
    feed(&mut engine, &presses("h "), &mut sink);

    feed(&mut engine, &presses("te"), &mut sink);
    engine.handle_event(KeyEvent::press(KEY_1), &mut sink);
    feed(&mut engine, &presses("h "), &mut sink);

    assert!(sink.is_empty());
}

#[test]
fn backspace_fixes_a_word_before_it_completes() {
    let mut engine = engine();
    let mut sink = Vec::new();

    feed(&mut engine, &presses("tha"), &mut sink);
    engine.handle_event(KeyEvent::press(KEY_BACKSPACE), &mut sink);
    let outcomes = feed(&mut engine, &presses("e "), &mut sink);
    assert!(plans(&outcomes).is_empty());

    feed(&mut engine, &presses("ten"), &mut sink);
    engine.handle_event(KeyEvent::press(KEY_BACKSPACE), &mut sink);
    let outcomes = feed(&mut engine, &presses("h "), &mut sink);
    assert_eq!(plans(&outcomes).len(), 1);
}

#[test]
fn shifted_input_matches_and_correction_casing_wins() {
    let mut engine = engine();
    let mut sink = Vec::new();

    let outcomes = feed(&mut engine, &presses("TeH!"), &mut sink);

    assert_eq!(plans(&outcomes).len(), 1);
    assert_eq!(simulate_host_text(&sink).expect("simulate"), "the");
}

#[test]
fn emission_failure_releases_the_guard_and_keeps_accepting_input() {
    let mut engine = engine();
    let mut sink = FlakySink::failing_after(4);

    let mut outcome = Outcome::Tracked;
    for event in presses("teh ") {
        outcome = engine.handle_event(event, &mut sink);
    }

    match outcome {
        Outcome::CorrectionFailed { plan, error } => {
            assert_eq!(plan.backspace_count, 3);
            assert_eq!(
                error,
                EmitError::Rejected {
                    keycode: KEY_BACKSPACE,
                    reason: "transport queue full".to_string(),
                }
            );
        }
        other => panic!("expected a failed correction, got {other:?}"),
    }

    assert_eq!(sink.accepted.len(), 4);
    assert!(!engine.is_correcting());
    assert_eq!(engine.current_word(), "");
    assert_eq!(engine.stats().corrections_failed, 1);
    assert_eq!(engine.last_correction(), None);

    assert_eq!(
        engine.handle_event(KeyEvent::press(KEY_T), &mut sink),
        Outcome::Tracked
    );
    assert_eq!(engine.current_word(), "t");
}

#[test]
fn disabled_engine_ignores_input_and_toggle_clears_the_word() {
    let mut engine = engine();
    let mut sink = Vec::new();

    feed(&mut engine, &presses("te"), &mut sink);
    assert!(!engine.toggle());
    assert_eq!(engine.current_word(), "");

    let outcomes = feed(&mut engine, &presses("teh "), &mut sink);
    assert!(outcomes.iter().all(|o| *o == Outcome::Disabled));
    assert!(sink.is_empty());

    engine.set_enabled(true);
    let outcomes = feed(&mut engine, &presses("teh "), &mut sink);
    assert_eq!(plans(&outcomes).len(), 1);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = AutocorrectConfig {
        max_word_length: 1,
        ..Default::default()
    };
    assert!(Autocorrect::new(cfg, Dictionary::builtin()).is_err());
}
