use clap::Parser;
use curve_etl::core::ConfigProvider;
use curve_etl::utils::error::ErrorSeverity;
use curve_etl::utils::{logger, validation::Validate};
use curve_etl::{
    CliConfig, CurvePipeline, DirectoryInventory, EtlEngine, HttpCurveSource, LocalStorage,
    RunSummary,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting curve-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(&config.workdir);
    let inventory = DirectoryInventory::new(
        storage.resolve(config.inventory_dir()),
        config.inventory_extension(),
    );
    let source = match HttpCurveSource::new(
        config.api_endpoint(),
        config.design_query_param(),
        config.request_timeout(),
    ) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let pipeline = CurvePipeline::new(storage, source, inventory, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ ETL process completed successfully!");
            print_summary(&summary);
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 依嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("✅ ETL process completed successfully!");
    println!(
        "📋 Designs: {} read, {} reported",
        summary.designs_read, summary.designs_reported
    );
    println!(
        "🎨 Curves: {} distinct, {} found, {} missing",
        summary.distinct_curves, summary.curves_found, summary.curves_missing
    );
    for failure in &summary.failures {
        println!(
            "⚠️  Skipped design {} ({}): {}",
            failure.design.design_number, failure.design.design_name, failure.reason
        );
    }
    println!("📁 Design info: {}", summary.design_info_path);
    println!("📁 Curve names: {}", summary.curve_names_path);
}
