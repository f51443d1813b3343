//! Trail - interruption tracking HTTP API

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trail::config::Args;
use trail::db::MongoStore;
use trail::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("trail={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("==================================");
    info!("  Trail - interruption API");
    info!("==================================");
    info!("Listen: localhost:{}", args.port);
    info!("MongoDB: {} (database '{}')", args.host, args.db);

    if args.self_test {
        info!("Test passed");
        return Ok(());
    }

    // Startup failures are fatal: no retry, no degraded mode
    let store = match MongoStore::connect(&args.mongo_uri(), &args.db).await {
        Ok(store) => {
            info!("MongoDB connected, unique index on 'id' ensured");
            store
        }
        Err(e) => {
            error!("MongoDB initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(args, Arc::new(store)));

    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
