use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Word buffer capacity, including the slot reserved for a terminator.
pub const MAX_WORD_LENGTH: usize = 32;

/// Shortest completed word that is looked up in the dictionary.
pub const MIN_WORD_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocorrectConfig {
    pub max_word_length: usize,
    pub min_word_length: usize,
    pub enabled: bool,
}

impl Default for AutocorrectConfig {
    fn default() -> Self {
        Self {
            max_word_length: MAX_WORD_LENGTH,
            min_word_length: MIN_WORD_LENGTH,
            enabled: true,
        }
    }
}

impl AutocorrectConfig {
    /// Number of letters the word buffer can hold.
    pub fn buffer_capacity(&self) -> usize {
        self.max_word_length.saturating_sub(1)
    }
}

pub fn validate_config(cfg: &AutocorrectConfig) -> Result<()> {
    ensure!(
        cfg.max_word_length >= 2,
        "max_word_length must be >= 2 (one slot is reserved)"
    );
    ensure!(cfg.min_word_length >= 1, "min_word_length must be >= 1");
    ensure!(
        cfg.min_word_length < cfg.max_word_length,
        "min_word_length must be < max_word_length"
    );

    Ok(())
}
