use anyhow::Context;
use clap::Parser;
use curve_etl::core::ingest::parse_manifest;
use curve_etl::core::{ConfigProvider, Storage};
use curve_etl::utils::{logger, validation::Validate};
use curve_etl::{
    CurvePipeline, DirectoryInventory, EtlEngine, HttpCurveSource, LocalStorage, TomlConfig,
};

#[derive(Parser)]
#[command(name = "curve-etl-toml")]
#[command(about = "Curve ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "curve-etl.toml")]
    config: String,

    /// Base directory for relative paths in the configuration
    #[arg(long, default_value = ".")]
    workdir: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Parse the manifest and show the plan without calling the curve service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_logger(args.verbose, false);

    tracing::info!("🚀 Starting TOML-based curve ETL");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let storage = LocalStorage::new(&args.workdir);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        if let Err(e) = perform_dry_run(&config, &storage).await {
            eprintln!("❌ Dry run failed: {:#}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    let inventory = DirectoryInventory::new(
        storage.resolve(config.inventory_dir()),
        config.inventory_extension(),
    );
    let source = HttpCurveSource::new(
        config.api_endpoint(),
        config.design_query_param(),
        config.request_timeout(),
    )?;

    let pipeline = CurvePipeline::new(storage, source, inventory, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            println!("✅ ETL process completed successfully!");
            println!(
                "📋 {} of {} designs reported, {} distinct curves ({} missing)",
                summary.designs_reported,
                summary.designs_read,
                summary.distinct_curves,
                summary.curves_missing
            );
            println!("📁 {}", summary.design_info_path);
            println!("📁 {}", summary.curve_names_path);
        }
        Err(e) => {
            tracing::error!("❌ ETL process failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!(
        "🌐 Source: {}?{}=<design>",
        config.api_endpoint(),
        config.design_query_param()
    );
    tracing::info!(
        "⚙️  {} concurrent requests, {:?} timeout, on failure: {}",
        config.concurrent_requests(),
        config.request_timeout(),
        config.fetch_failure_policy()
    );
    tracing::info!(
        "📂 Inventory: {} (*.{})",
        config.inventory_dir(),
        config.inventory_extension()
    );
}

async fn perform_dry_run(config: &TomlConfig, storage: &LocalStorage) -> anyhow::Result<()> {
    let manifest = storage
        .read_file(config.manifest_path())
        .await
        .with_context(|| format!("reading manifest {}", config.manifest_path()))?;
    let designs = parse_manifest(&manifest).context("parsing manifest")?;

    println!("🔍 Dry run: {} designs would be enriched", designs.len());
    for design in &designs {
        println!(
            "   {} {} ({})",
            design.order, design.design_number, design.design_name
        );
    }
    println!(
        "📁 Would write {} and {}",
        config.design_info_output(),
        config.curve_names_output()
    );

    Ok(())
}
