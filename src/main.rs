use clap::Parser;
use edt_ics::utils::error::{EdtError, ErrorSeverity};
use edt_ics::utils::{logger, validation::Validate};
use edt_ics::{CliConfig, ExportEngine, IcsWriter, LocalStorage, TimetablePipeline};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting edt-ics");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let dry_run = config.dry_run;
    let writer = IcsWriter::new(config.calendar_name.clone());
    let pipeline = TimetablePipeline::new(LocalStorage::default(), config, writer);
    let engine = ExportEngine::new(pipeline);

    let outcome = if dry_run {
        engine.preview().and_then(|events| {
            println!("{}", serde_json::to_string_pretty(&events)?);
            Ok(())
        })
    } else {
        engine.run().map(|summary| {
            println!(
                "Extracted {} events and saved to '{}'",
                summary.events.len(),
                summary.output_path
            );
        })
    };

    if let Err(e) = outcome {
        exit_with(e);
    }
}

fn exit_with(e: EdtError) -> ! {
    tracing::error!(
        "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
