use crate::core::validator::count_words;
use crate::domain::model::HumanizeResult;
use rand::Rng;
use std::ops::RangeInclusive;

pub const WORDS_PER_MINUTE: usize = 200;

/// 假的分數範圍，不是真正的偵測結果
pub const HUMAN_SCORE_RANGE: RangeInclusive<u8> = 92..=98;

// 原始版本對閱讀時間用未過濾的切分結果，這裡統一用字數
pub fn reading_time(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

pub fn human_score() -> u8 {
    human_score_with(&mut rand::thread_rng())
}

pub fn human_score_with<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(HUMAN_SCORE_RANGE)
}

pub fn present(original_text: &str, humanized_text: String) -> HumanizeResult {
    let word_count = count_words(&humanized_text);
    HumanizeResult {
        original_text: original_text.to_string(),
        humanized_text,
        word_count,
        reading_time: reading_time(word_count),
        human_score: human_score(),
    }
}
