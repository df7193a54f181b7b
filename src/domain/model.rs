use crate::utils::error::{HumanizeError, Result};
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 100;
pub const DEFAULT_INTENSITY: u8 = 65;

/// 改寫語氣，固定集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(alias = "natural")]
    Natural,
    #[serde(alias = "casual")]
    Casual,
    #[serde(alias = "academic")]
    Academic,
    #[serde(alias = "professional")]
    Professional,
    #[serde(alias = "creative")]
    Creative,
    #[serde(alias = "conversational")]
    Conversational,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Natural,
        Tone::Casual,
        Tone::Academic,
        Tone::Professional,
        Tone::Creative,
        Tone::Conversational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Natural => "Natural",
            Tone::Casual => "Casual",
            Tone::Academic => "Academic",
            Tone::Professional => "Professional",
            Tone::Creative => "Creative",
            Tone::Conversational => "Conversational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = HumanizeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HumanizeError::InvalidConfigValueError {
                field: "tone".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown tone. Valid tones: {}",
                    Tone::ALL.map(|t| t.as_str()).join(", ")
                ),
            })
    }
}

/// 使用者設定，送出時複製一份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    tone: Tone,
    intensity: u8,
}

impl Settings {
    pub fn new(tone: Tone, intensity: u8) -> Result<Self> {
        validate_range("intensity", intensity, MIN_INTENSITY, MAX_INTENSITY)?;
        Ok(Self { tone, intensity })
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub fn set_intensity(&mut self, intensity: u8) -> Result<()> {
        validate_range("intensity", intensity, MIN_INTENSITY, MAX_INTENSITY)?;
        self.intensity = intensity;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tone: Tone::Natural,
            intensity: DEFAULT_INTENSITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResult {
    pub original_text: String,
    pub humanized_text: String,
    pub word_count: usize,
    /// 分鐘，無條件進位
    pub reading_time: usize,
    pub human_score: u8,
}

/// 交給外部服務的完整請求內容
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub system_instruction: String,
    pub text: String,
    pub temperature: f32,
    pub top_p: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parse_is_case_insensitive() {
        assert_eq!("academic".parse::<Tone>().unwrap(), Tone::Academic);
        assert_eq!(" Conversational ".parse::<Tone>().unwrap(), Tone::Conversational);
        assert!("sarcastic".parse::<Tone>().is_err());
    }

    #[test]
    fn test_tone_display_round_trip() {
        for tone in Tone::ALL {
            assert_eq!(tone.to_string().parse::<Tone>().unwrap(), tone);
        }
    }

    #[test]
    fn test_settings_intensity_bounds() {
        assert!(Settings::new(Tone::Casual, 1).is_ok());
        assert!(Settings::new(Tone::Casual, 100).is_ok());
        assert!(Settings::new(Tone::Casual, 0).is_err());
        assert!(Settings::new(Tone::Casual, 101).is_err());

        let mut settings = Settings::default();
        assert!(settings.set_intensity(150).is_err());
        assert_eq!(settings.intensity(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = HumanizeResult {
            original_text: "a".to_string(),
            humanized_text: "b".to_string(),
            word_count: 1,
            reading_time: 1,
            human_score: 95,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["humanizedText"], "b");
        assert_eq!(json["readingTime"], 1);
        assert_eq!(json["humanScore"], 95);
    }
}
