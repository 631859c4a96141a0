use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{validate_config, AutocorrectConfig};
use crate::correction::{plan_correction, CorrectionPlanner, CorrectionToken, EditPlan};
use crate::dictionary::Dictionary;
use crate::keyboard::classify_key;
use crate::model::KeyEvent;
use crate::sink::{EmitError, KeystrokeSink};
use crate::tracker::WordTracker;

/// What the engine did with one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Key releases are acknowledged and otherwise ignored.
    Released,
    Disabled,
    /// Dropped because a correction is being delivered.
    Suppressed,
    Tracked,
    Corrected(EditPlan),
    CorrectionFailed { plan: EditPlan, error: EmitError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub typo: String,
    pub correction: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub presses: usize,
    pub words_completed: usize,
    pub corrections_applied: usize,
    pub corrections_failed: usize,
    pub suppressed: usize,
}

/// Autocorrect engine for one keyboard.
///
/// Owns the word tracker and the correction state; construct it once at
/// startup and hand every key event from the firmware's event pipeline to
/// [`Autocorrect::handle_event`].
#[derive(Debug)]
pub struct Autocorrect {
    config: AutocorrectConfig,
    dictionary: Dictionary,
    tracker: WordTracker,
    planner: CorrectionPlanner,
    enabled: bool,
    last_correction: Option<Correction>,
    stats: EngineStats,
}

impl Autocorrect {
    pub fn new(config: AutocorrectConfig, dictionary: Dictionary) -> Result<Self> {
        validate_config(&config)?;

        let unreachable = dictionary.unreachable_entries(config.min_word_length);
        if !unreachable.is_empty() {
            warn!(
                min_word_length = config.min_word_length,
                typos = ?unreachable,
                "dictionary entries shorter than the minimum word length are never corrected"
            );
        }

        info!(
            entries = dictionary.len(),
            max_word_length = config.max_word_length,
            min_word_length = config.min_word_length,
            "autocorrect initialized"
        );

        Ok(Self {
            tracker: WordTracker::new(config.buffer_capacity(), config.min_word_length),
            planner: CorrectionPlanner::new(),
            enabled: config.enabled,
            last_correction: None,
            stats: EngineStats::default(),
            config,
            dictionary,
        })
    }

    pub fn config(&self) -> &AutocorrectConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The word currently being typed.
    pub fn current_word(&self) -> &str {
        self.tracker.word()
    }

    pub fn tracker(&self) -> &WordTracker {
        &self.tracker
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_correcting(&self) -> bool {
        self.planner.in_progress()
    }

    pub fn last_correction(&self) -> Option<&Correction> {
        self.last_correction.as_ref()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.toggle();
        }
    }

    /// Flip the enabled flag. The word buffer is cleared either way.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.tracker.clear();
        info!(enabled = self.enabled, "autocorrect toggled");
        self.enabled
    }

    /// Mark a correction as in progress for integrations that deliver edit
    /// plans themselves. Key events are suppressed until the token is handed
    /// back to [`Autocorrect::end_correction`]. Returns `None` if a correction
    /// is already in progress.
    pub fn begin_correction(&mut self) -> Option<CorrectionToken> {
        self.planner.begin()
    }

    pub fn end_correction(&mut self, token: CorrectionToken) {
        self.planner.end(token);
    }

    pub fn handle_event(&mut self, event: KeyEvent, sink: &mut impl KeystrokeSink) -> Outcome {
        if !event.pressed {
            return Outcome::Released;
        }
        if self.planner.in_progress() {
            self.stats.suppressed += 1;
            return Outcome::Suppressed;
        }
        if !self.enabled {
            return Outcome::Disabled;
        }

        self.stats.presses += 1;

        let class = classify_key(event.keycode, event.shift);
        let Some(word) = self.tracker.feed(class) else {
            return Outcome::Tracked;
        };
        self.stats.words_completed += 1;

        let Some(correction) = self.dictionary.lookup(&word).map(str::to_string) else {
            debug!(word = %word, "no correction");
            return Outcome::Tracked;
        };

        self.apply_correction(word, correction, sink)
    }

    fn apply_correction(
        &mut self,
        typo: String,
        correction: String,
        sink: &mut impl KeystrokeSink,
    ) -> Outcome {
        let plan = plan_correction(&typo, &correction);
        let Some(token) = self.planner.begin() else {
            self.stats.suppressed += 1;
            return Outcome::Suppressed;
        };
        info!(typo = %typo, correction = %correction, "autocorrecting");

        let delivered = self.planner.deliver(&token, &plan, sink);
        self.planner.end(token);

        // The boundary already emptied the buffer; anything typed after the
        // correction starts a new word.
        self.tracker.clear();

        match delivered {
            Ok(()) => {
                self.stats.corrections_applied += 1;
                self.last_correction = Some(Correction { typo, correction });
                Outcome::Corrected(plan)
            }
            Err(error) => {
                self.stats.corrections_failed += 1;
                warn!(
                    typo = %typo,
                    correction = %correction,
                    error = %error,
                    "correction aborted; host text may be partially corrected"
                );
                Outcome::CorrectionFailed { plan, error }
            }
        }
    }
}
