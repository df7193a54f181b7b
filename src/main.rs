use chrono::{DateTime, Utc};
use clap::Parser;
use humanize_it::utils::{logger, validation::Validate};
use humanize_it::{
    AppConfig, CliConfig, FileClipboard, HumanizeError, HumanizeResult, HumanizeSession, Settings,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    model: &'a str,
    settings: Settings,
    #[serde(flatten)]
    result: &'a HumanizeResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 先讀設定檔，日誌格式可能由設定檔決定
    let file_config = args.load_file_config();
    let (verbose, json_logs) = match &file_config {
        Ok(file) => (
            args.verbose || file.verbose_logging(),
            args.log_json || file.json_logging(),
        ),
        Err(_) => (args.verbose, args.log_json),
    };
    if json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting humanize-it");

    let file_config = file_config.unwrap_or_else(|e| fail(&e));
    let config = AppConfig::resolve(&file_config, &args.overrides()).unwrap_or_else(|e| fail(&e));
    if let Err(e) = config.validate() {
        fail(&e);
    }
    tracing::debug!("Resolved config: {:?}", config);

    if !config.has_api_key() {
        tracing::warn!("⚠️ No API key configured; the request will fail");
    }

    let input = args.read_input().await.unwrap_or_else(|e| fail(&e));

    let mut session = HumanizeSession::with_settings(config.build_client(), config.settings)
        .with_top_p(config.top_p);
    session.set_input(input);
    tracing::info!(
        "📝 {} words in, tone {}, intensity {}",
        session.input_word_count(),
        config.settings.tone(),
        config.settings.intensity()
    );

    let result = match session.submit().await {
        Ok(result) => result.clone(),
        Err(e) => fail(&e),
    };

    if args.json {
        let report = Report {
            generated_at: Utc::now(),
            model: &config.model,
            settings: session.settings(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", result.humanized_text);
        println!();
        println!(
            "Human score: {}% | Words: {} | Read time: {}m",
            result.human_score, result.word_count, result.reading_time
        );
    }

    if let Some(path) = &args.copy_to {
        let clipboard = FileClipboard::new(path);
        if session.copy_result(&clipboard) && session.is_copied() {
            eprintln!("📋 Copied to {}", path.display());
        }
    }

    Ok(())
}

fn fail(e: &HumanizeError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
