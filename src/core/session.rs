use crate::core::presenter::present;
use crate::core::prompt::{build_request_with_top_p, DEFAULT_TOP_P};
use crate::core::validator::{count_words, is_valid_input, validate_input};
use crate::domain::model::{HumanizeResult, Settings, Tone};
use crate::domain::ports::{Clipboard, Oracle};
use crate::utils::error::{HumanizeError, Result};
use std::time::{Duration, Instant};

/// 複製成功提示的持續時間
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// 單一互動工作階段的畫面狀態。
///
/// 狀態由欄位推導：有請求在途中為 `Loading`，否則有錯誤訊息為 `Error`，
/// 否則有結果為 `Success`，其餘為 `Idle`。
pub struct HumanizeSession<O: Oracle> {
    oracle: O,
    top_p: f32,
    input_text: String,
    settings: Settings,
    result: Option<HumanizeResult>,
    error: Option<String>,
    loading: bool,
    copied_at: Option<Instant>,
}

impl<O: Oracle> HumanizeSession<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_settings(oracle, Settings::default())
    }

    pub fn with_settings(oracle: O, settings: Settings) -> Self {
        Self {
            oracle,
            top_p: DEFAULT_TOP_P,
            input_text: String::new(),
            settings,
            result: None,
            error: None,
            loading: false,
            copied_at: None,
        }
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input_text
    }

    pub fn input_word_count(&self) -> usize {
        count_words(&self.input_text)
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.settings.set_tone(tone);
    }

    pub fn set_intensity(&mut self, intensity: u8) -> Result<()> {
        self.settings.set_intensity(intensity)
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && is_valid_input(&self.input_text)
    }

    pub fn result(&self) -> Option<&HumanizeResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.result.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// 驗證輸入、呼叫外部服務一次，成功時整個替換結果。
    ///
    /// 失敗時保留先前的結果，只設定錯誤訊息。
    pub async fn submit(&mut self) -> Result<&HumanizeResult> {
        if self.loading {
            tracing::warn!("Submission refused: a request is already in progress");
            return Err(HumanizeError::BusyError);
        }

        if let Err(e) = validate_input(&self.input_text) {
            tracing::debug!(
                "Input rejected before calling the oracle ({} words)",
                self.input_word_count()
            );
            self.error = Some(e.user_friendly_message());
            return Err(e);
        }

        let settings = self.settings;
        let request = build_request_with_top_p(&self.input_text, &settings, self.top_p);

        self.loading = true;
        self.error = None;
        tracing::debug!(
            "Submitting {} words (tone: {}, intensity: {}, temperature: {:.3})",
            self.input_word_count(),
            settings.tone(),
            settings.intensity(),
            request.temperature
        );

        let outcome = self.oracle.generate(&request).await;
        self.loading = false;

        match outcome {
            Ok(text) => {
                let result = present(&self.input_text, text);
                tracing::info!(
                    "✅ Humanized text ready: {} words, {} min read",
                    result.word_count,
                    result.reading_time
                );
                self.error = None;
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                tracing::error!("❌ Oracle call failed: {}", e);
                let err = HumanizeError::oracle();
                self.error = Some(err.user_friendly_message());
                Err(err)
            }
        }
    }

    /// 清空輸入、結果與錯誤，回到 Idle
    pub fn reset(&mut self) {
        self.input_text.clear();
        self.result = None;
        self.error = None;
        self.loading = false;
        self.copied_at = None;
    }

    /// 寫入剪貼簿；失敗時靜默忽略
    pub fn copy_result(&mut self, clipboard: &dyn Clipboard) -> bool {
        let Some(result) = self.result.as_ref() else {
            return false;
        };

        match clipboard.write_text(&result.humanized_text) {
            Ok(()) => {
                self.copied_at = Some(Instant::now());
                true
            }
            Err(e) => {
                tracing::debug!("Clipboard write failed: {}", e);
                false
            }
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied_at.is_some_and(|at| at.elapsed() < COPY_ACK_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clipboard::MemoryClipboard;
    use crate::core::presenter::HUMAN_SCORE_RANGE;
    use crate::domain::model::OracleRequest;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[derive(Clone)]
    struct MockOracle {
        calls: Arc<AtomicUsize>,
        last_request: Arc<Mutex<Option<OracleRequest>>>,
        reply: Arc<Mutex<Option<String>>>,
    }

    impl MockOracle {
        fn replying(text: &str) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(Mutex::new(None)),
                reply: Arc::new(Mutex::new(Some(text.to_string()))),
            }
        }

        fn failing() -> Self {
            let oracle = Self::replying("");
            oracle.start_failing();
            oracle
        }

        fn start_failing(&self) {
            *self.reply.lock().unwrap() = None;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Oracle for MockOracle {
        async fn generate(&self, request: &OracleRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            let reply = self.reply.lock().unwrap().clone();
            reply.ok_or_else(|| {
                HumanizeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "simulated network failure",
                ))
            })
        }
    }

    struct PendingOracle {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Oracle for PendingOracle {
        async fn generate(&self, _request: &OracleRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<Result<String>>().await
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> Result<()> {
            Err(HumanizeError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_oracle() {
        let oracle = MockOracle::replying("unused");
        let mut session = HumanizeSession::new(oracle.clone());

        let err = session.submit().await.unwrap_err();

        assert!(matches!(err, HumanizeError::ValidationError { .. }));
        assert_eq!(oracle.calls(), 0);
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(
            session.error(),
            Some(crate::utils::error::VALIDATION_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_two_words_rejected() {
        let oracle = MockOracle::replying("unused");
        let mut session = HumanizeSession::new(oracle.clone());
        session.set_input("Hi there");

        assert!(!session.can_submit());
        assert!(session.submit().await.is_err());
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_fox_scenario_succeeds() {
        let oracle = MockOracle::replying("A quick brown fox leaps over a lazy dog.");
        let mut session = HumanizeSession::new(oracle.clone());
        session.set_input(FOX);
        assert!(session.can_submit());

        let result = session.submit().await.unwrap().clone();

        assert_eq!(oracle.calls(), 1);
        assert_eq!(result.word_count, 9);
        assert_eq!(result.reading_time, 1);
        assert!(HUMAN_SCORE_RANGE.contains(&result.human_score));
        assert_eq!(result.original_text, FOX);
        assert!(session.error().is_none());
        assert_eq!(session.phase(), Phase::Success);
    }

    #[tokio::test]
    async fn test_request_reflects_settings_snapshot() {
        let oracle = MockOracle::replying("done and dusted, friend");
        let mut session =
            HumanizeSession::with_settings(oracle.clone(), Settings::new(Tone::Creative, 100).unwrap())
                .with_top_p(0.9);
        session.set_input(FOX);

        session.submit().await.unwrap();

        let request = oracle.last_request.lock().unwrap().clone().unwrap();
        assert!(request.system_instruction.contains("tone: Creative."));
        assert_eq!(request.text, FOX);
        assert!((request.temperature - 1.0).abs() < 1e-6);
        assert!((request.top_p - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_oracle_failure_keeps_previous_result() {
        let oracle = MockOracle::replying("A quick brown fox leaps over a lazy dog.");
        let mut session = HumanizeSession::new(oracle.clone());
        session.set_input(FOX);
        let first = session.submit().await.unwrap().clone();

        oracle.start_failing();
        let err = session.submit().await.unwrap_err();

        assert_eq!(oracle.calls(), 2);
        assert!(matches!(err, HumanizeError::OracleError { .. }));
        assert!(!session.is_loading());
        assert_eq!(session.result(), Some(&first));
        assert_eq!(
            session.error(),
            Some(crate::utils::error::ORACLE_FAILURE_MESSAGE)
        );
        assert_eq!(session.phase(), Phase::Error);
    }

    #[tokio::test]
    async fn test_oracle_failure_without_prior_result() {
        let oracle = MockOracle::failing();
        let mut session = HumanizeSession::new(oracle.clone());
        session.set_input(FOX);

        assert!(session.submit().await.is_err());
        assert!(session.result().is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let oracle = MockOracle::replying("Some freshly rewritten words here.");
        let mut session = HumanizeSession::new(oracle.clone());
        session.set_input("too short");
        assert!(session.submit().await.is_err());
        assert_eq!(session.phase(), Phase::Error);

        session.set_input(FOX);
        session.submit().await.unwrap();

        assert!(session.error().is_none());
        assert_eq!(session.phase(), Phase::Success);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_one_call_per_submission() {
        let oracle = MockOracle::replying("One two three four five six.");
        let mut session = HumanizeSession::new(oracle.clone());
        session.set_input(FOX);

        for expected in 1..=3 {
            session.submit().await.unwrap();
            assert_eq!(oracle.calls(), expected);
        }
    }

    #[tokio::test]
    async fn test_no_resubmission_while_loading() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut session = HumanizeSession::new(PendingOracle {
            calls: calls.clone(),
        });
        session.set_input(FOX);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), session.submit()).await;
        assert!(timed_out.is_err());
        assert!(session.is_loading());
        assert_eq!(session.phase(), Phase::Loading);
        assert!(!session.can_submit());

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, HumanizeError::BusyError));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let oracle = MockOracle::replying("A quick brown fox leaps over a lazy dog.");
        let mut session = HumanizeSession::new(oracle);
        session.set_input(FOX);
        session.submit().await.unwrap();

        session.reset();

        assert_eq!(session.input(), "");
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_copy_result_acknowledges() {
        let oracle = MockOracle::replying("A quick brown fox leaps over a lazy dog.");
        let mut session = HumanizeSession::new(oracle);
        let clipboard = MemoryClipboard::new();

        assert!(!session.copy_result(&clipboard));
        assert!(!session.is_copied());

        session.set_input(FOX);
        session.submit().await.unwrap();

        assert!(session.copy_result(&clipboard));
        assert!(session.is_copied());
        assert_eq!(
            clipboard.contents().as_deref(),
            Some("A quick brown fox leaps over a lazy dog.")
        );

        session.copied_at = Some(Instant::now() - COPY_ACK_DURATION - Duration::from_millis(1));
        assert!(!session.is_copied());
    }

    #[tokio::test]
    async fn test_copy_failure_is_silent() {
        let oracle = MockOracle::replying("A quick brown fox leaps over a lazy dog.");
        let mut session = HumanizeSession::new(oracle);
        session.set_input(FOX);
        session.submit().await.unwrap();

        assert!(!session.copy_result(&BrokenClipboard));
        assert!(!session.is_copied());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_settings_changes_before_submit() {
        let mut session = HumanizeSession::new(MockOracle::replying("x"));
        session.set_tone(Tone::Professional);
        assert!(session.set_intensity(10).is_ok());
        assert!(session.set_intensity(0).is_err());

        let settings = session.settings();
        assert_eq!(settings.tone(), Tone::Professional);
        assert_eq!(settings.intensity(), 10);
        assert_eq!(session.phase(), Phase::Idle);
    }
}
