use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use duhigure::config::AppConfig;
use duhigure::error::AppError;
use duhigure::startup;

#[derive(Parser, Debug)]
#[command(name = "duhigure")]
#[command(about = "DUHIGURE family registration site server")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Deployment environment, e.g. development or production (overrides config file)
    #[arg(short, long)]
    environment: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut app_config = if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists() {
        println!("⚠️  No config.yaml found, using default configuration:");
        println!("   - Listening on 127.0.0.1:3000");
        println!("   - Serving pages from ./public");
        println!("   - 100 API requests per client every 15 minutes\n");
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config).map_err(AppError::Configuration)?
    };

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }
    if let Some(environment) = args.environment {
        app_config.server.environment = environment;
    }

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        eprintln!("Invalid host address: {}, using 127.0.0.1", app_config.server.host);
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    let app_config = Arc::new(app_config);
    let app = startup::build_router(app_config.clone());

    let listener = TcpListener::bind(&addr).await.map_err(AppError::from)?;
    startup::print_banner(&app_config);
    tracing::info!(%addr, environment = %app_config.server.environment, "server started");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(startup::shutdown_signal())
    .await
    .map_err(AppError::from)?;

    tracing::info!("Process terminated");
    Ok(())
}
