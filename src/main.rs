use clap::Parser;
use dakdash::app::render::{render_carriers, render_report};
use dakdash::utils::error::ErrorSeverity;
use dakdash::utils::{logger, validation::Validate};
use dakdash::{
    Cli, Command, EnvConfig, ServiceSettings, SystemClock, TomlConfig, TrackingError,
    TrackingMoreClient, TrackingService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 設定檔要先讀，日誌等級可能寫在裡面
    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let level = file_config.as_ref().and_then(|config| config.log_level());
    if cli.log_json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("🚀 Starting dakdash");

    let mut settings = match &file_config {
        Some(config) => ServiceSettings::from_provider(config),
        None => ServiceSettings::from_provider(&EnvConfig::from_env()?),
    };
    cli.apply_overrides(&mut settings);
    tracing::debug!("Service settings: {:?}", settings);

    let provider = TrackingMoreClient::new(
        &settings.api_base_url,
        &settings.api_key,
        settings.request_timeout,
    )?;
    let service = TrackingService::new(provider, SystemClock, settings);

    let outcome = match &cli.command {
        Command::Track {
            tracking_number,
            carrier,
            format,
        } => {
            if let Err(e) = service.settings().validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                exit_with(e);
            }
            service
                .resolve_and_track(tracking_number, carrier)
                .await
                .and_then(|report| render_report(&report, *format))
        }
        Command::Carriers { format } => render_carriers(service.list_carriers(), *format),
        Command::Demo { format } => service
            .demo_report()
            .and_then(|report| render_report(&report, *format)),
    };

    match outcome {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: TrackingError) -> ! {
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,      // 資料尚未就緒，不算失敗
        ErrorSeverity::Medium => 2,   // 可重試
        ErrorSeverity::High => 1,     // 輸入或資料錯誤
        ErrorSeverity::Critical => 3, // 配置或系統錯誤
    };
    std::process::exit(exit_code);
}
