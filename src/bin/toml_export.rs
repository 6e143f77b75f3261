use clap::Parser;
use edt_ics::domain::ports::ConfigProvider;
use edt_ics::utils::error::ErrorSeverity;
use edt_ics::utils::{logger, validation::Validate};
use edt_ics::{ExportEngine, IcsWriter, LocalStorage, TimetablePipeline, TomlConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-export")]
#[command(about = "Export an EdT timetable using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "edt-config.toml")]
    config: String,

    /// Override the row group from the config
    #[arg(short, long)]
    group: Option<u32>,

    /// Show the configuration and extracted events without writing the calendar
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(group) = args.group {
        config.source.group = group;
        tracing::info!("🔧 Group overridden to: {}", group);
    }

    // 相對路徑以設定檔所在目錄為準
    let base_dir = Path::new(&args.config)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let writer = IcsWriter::new(config.calendar_name().map(str::to_string));
    let pipeline = TimetablePipeline::new(LocalStorage::new(base_dir), config, writer);
    let engine = ExportEngine::new(pipeline);

    let result = if args.dry_run {
        engine.preview().map(|events| {
            println!("🔍 Dry run: {} events would be written", events.len());
            for event in &events {
                println!("  {}", event);
            }
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

    if let Err(e) = result {
        tracing::error!(
            "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input_path());
    println!("  Group: {}", config.group());
    println!("  Timezone: {}", config.timezone());
    println!("  Output: {}", config.output_path());
    if let Some(name) = config.calendar_name() {
        println!("  Calendar: {}", name);
    }
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}
