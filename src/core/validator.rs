use crate::utils::error::{HumanizeError, Result};

pub const MIN_WORDS: usize = 5;

/// 以空白切分並略過空字串
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn validate_input(text: &str) -> Result<()> {
    if text.trim().is_empty() || count_words(text) < MIN_WORDS {
        return Err(HumanizeError::validation());
    }
    Ok(())
}

pub fn is_valid_input(text: &str) -> bool {
    validate_input(text).is_ok()
}
