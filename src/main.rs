use berry_extract::utils::report::ConsoleReporter;
use berry_extract::utils::{logger, validation::Validate};
use berry_extract::{BerryPipeline, CliArgs, EtlEngine, ExtractorConfig, FileConfig, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    std::process::exit(run(args).await);
}

async fn run(args: CliArgs) -> i32 {
    let reporter = ConsoleReporter::new();
    reporter.started();

    // 載入設定檔；不存在時使用預設值
    let (file_config, config_found) = match FileConfig::from_file(&args.config) {
        Ok(Some(config)) => (config, true),
        Ok(None) => (FileConfig::default(), false),
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            return e.severity().exit_code();
        }
    };

    if let Err(e) = logger::init_logger(&file_config.log_settings(), args.verbose) {
        eprintln!(
            "❌ Failed to open log file '{}': {}",
            file_config.log_filename, e
        );
        return 1;
    }

    if !config_found {
        tracing::warn!("Config file not found: {}. Using defaults.", args.config);
        eprintln!("⚠️ Config file '{}' not found! Using defaults.", args.config);
    }

    if let Err(e) = file_config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        return e.severity().exit_code();
    }

    let mut config = ExtractorConfig::from_file_config(&file_config);
    args.apply(&mut config);
    tracing::debug!("Resolved config: {:?}", config);
    reporter.using_archive(&config.jar_filename);

    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = BerryPipeline::new(storage.clone(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            let output_paths: Vec<String> = report
                .outputs
                .iter()
                .map(|path| storage.full_path(path))
                .collect();
            reporter.finished(&report, &output_paths);
            report.exit_code()
        }
        Err(e) => {
            // 失敗前已收集的診斷仍要輸出
            reporter.diagnostics(e.diagnostics());
            tracing::error!(
                "Extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            e.severity().exit_code()
        }
    }
}
