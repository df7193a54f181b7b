use crate::domain::model::{OracleRequest, Settings};

pub const BASE_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_TOP_P: f32 = 0.95;

const RULESET: &str = r#"You are an experienced editor who rewrites machine-generated text so it reads as if a person wrote it.

RULES:
1. Keep the core meaning and every fact unchanged.
2. Vary sentence length and structure; human writing is uneven and "bursty".
3. Prefer idiomatic expressions and natural transitions.
4. Strip typical AI markers: stock phrases such as "In conclusion," or "It is important to note", excessive hedging, and perfectly balanced lists."#;

/// 溫度隨強度線性上升
pub fn temperature_for(intensity: u8) -> f32 {
    BASE_TEMPERATURE + f32::from(intensity) / 500.0
}

pub fn build_system_instruction(settings: &Settings) -> String {
    format!(
        "{RULESET}\n\
         5. Keep the requested tone: {tone}.\n\
         6. Rewrite intensity on a 1-100 scale: {intensity}. Higher values call for bolder stylistic changes.\n\n\
         Return ONLY the rewritten text, with no headers, footers or commentary.",
        tone = settings.tone(),
        intensity = settings.intensity(),
    )
}

pub fn build_contents(text: &str) -> String {
    format!("Text to humanize: \n\n {}", text)
}

pub fn build_request(text: &str, settings: &Settings) -> OracleRequest {
    build_request_with_top_p(text, settings, DEFAULT_TOP_P)
}

pub fn build_request_with_top_p(text: &str, settings: &Settings, top_p: f32) -> OracleRequest {
    OracleRequest {
        system_instruction: build_system_instruction(settings),
        text: text.to_string(),
        temperature: temperature_for(settings.intensity()),
        top_p,
    }
}
