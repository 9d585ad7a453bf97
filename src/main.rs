// Initialize configuration
// Set up logging
// Open the settings database
// Build the RPC client, wallet and dashboard
// Start the session watcher
// Start HTTP server

use wallet_dashboard::{
    api, blockchain::{Explorer, SolanaClient}, config::Config, dashboard::Dashboard, db,
    service::WalletActions, session::SessionWatcher, state::AppState,
    wallet::{ActionOptions, KeypairWallet, WalletSdk},
};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting wallet-dashboard");

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    // Setup database connection
    let db_pool = db::establish_connection(&config.database_url).await?;
    tracing::info!("Database connection established");

    let explorer = Explorer::from_config(&config);
    let client = Arc::new(SolanaClient::new(&config));
    let dashboard = Arc::new(Dashboard::new(client, explorer.clone(), config.history_page_size));

    let wallet: Arc<dyn WalletSdk> = Arc::new(KeypairWallet::from_config(&config)?);
    let actions = Arc::new(WalletActions::new(
        wallet.clone(),
        dashboard.clone(),
        explorer,
        ActionOptions::new(config.redirect_url.clone()),
    ));

    // Keep the dashboard in step with the wallet connection
    let shutdown = CancellationToken::new();
    let watcher = SessionWatcher::new(dashboard.clone(), wallet.connection()).spawn(shutdown.clone());
    tracing::info!("Session watcher started");

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db_pool,
        dashboard,
        actions,
    });

    // Start HTTP server
    let app = api::create_router(app_state);
    let addr = config.server_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => {
                    // serve until the process is killed
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
            }
            server_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    if let Err(e) = watcher.await {
        tracing::error!("Session watcher task failed: {}", e);
    }

    Ok(())
}
