use actix_web::web;
use clap::Parser;
use prodsim_api::{AppState, HandlerConfig, RestApi, RestConfig};
use prodsim_storage::{AssetLoader, AssetPaths};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Product recommendations from a precomputed similarity matrix
#[derive(Parser, Debug)]
#[command(name = "prodsim")]
#[command(about = "Serve top-N similar products over HTTP", long_about = None)]
struct Args {
    /// Directory holding the model assets
    #[arg(short, long, default_value = prodsim_storage::DEFAULT_ASSETS_DIR)]
    assets_dir: PathBuf,

    /// Similarity matrix (.npy), relative to the assets directory
    #[arg(long, default_value = prodsim_storage::DEFAULT_MATRIX_FILE)]
    matrix_file: String,

    /// Product table (.csv), relative to the assets directory
    #[arg(long, default_value = prodsim_storage::DEFAULT_CATALOG_FILE)]
    catalog_file: String,

    /// CSV column holding the product name
    #[arg(long, default_value = prodsim_storage::DEFAULT_NAME_COLUMN)]
    name_column: String,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Recommendations per request when none is asked for
    #[arg(long, default_value_t = prodsim_api::DEFAULT_REQUEST_COUNT)]
    default_count: usize,

    /// Largest count a request may ask for
    #[arg(long, default_value_t = prodsim_api::DEFAULT_MAX_COUNT)]
    max_count: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    info!("Starting prodsim v{}", env!("CARGO_PKG_VERSION"));
    info!("Assets directory: {:?}", args.assets_dir);

    if args.max_count == 0 {
        anyhow::bail!("--max-count must be at least 1");
    }
    if args.default_count == 0 || args.default_count > args.max_count {
        warn!(
            default_count = args.default_count,
            max_count = args.max_count,
            "default count outside 1..=max-count; requests without a count are clamped"
        );
    }

    let paths = AssetPaths::in_dir(&args.assets_dir, &args.matrix_file, &args.catalog_file);
    let service = AssetLoader::new(paths)
        .with_name_column(args.name_column.clone())
        .load_state();
    if !service.is_ready() {
        warn!("Serving in degraded mode: every recommendation request will report unavailable");
    }

    let handler = HandlerConfig {
        default_count: args.default_count.clamp(1, args.max_count),
        max_count: args.max_count,
    };
    let state = web::Data::new(AppState::new(service, handler));

    let config = RestConfig {
        host: args.host.clone(),
        port: args.http_port,
    };
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", config.host, config.port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, config).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
