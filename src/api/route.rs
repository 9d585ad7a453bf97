use crate::{
    api::{error::ApiError, response::ApiResponse},
    dashboard::RefreshOutcome,
    db::settings,
    models::DashboardSnapshot,
    service::{ReceiveInfo, SendReceipt},
    session::ConnectionState,
    state::AppState,
    wallet::SignedMessage,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

// POST /wallet/send body; amount is the raw text the user typed
#[derive(Deserialize)]
pub struct SendRequest {
    pub recipient: String,
    pub amount: String,
}

// POST /wallet/sign-message body
#[derive(Deserialize)]
pub struct SignMessageRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct WalletView {
    pub cluster: String,
    pub connection: ConnectionState,
    pub is_loading: bool,
    pub balance_display: String,
    pub dashboard: DashboardSnapshot,
}

#[derive(Serialize)]
pub struct RefreshView {
    pub outcome: RefreshOutcome,
    pub dashboard: DashboardSnapshot,
}

#[derive(Serialize)]
pub struct ConnectView {
    pub address: String,
}

#[derive(Serialize)]
pub struct OnboardingView {
    pub has_completed_onboarding: bool,
}

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/wallet", get(get_wallet))
        .route("/wallet/refresh", post(refresh_wallet))
        .route("/wallet/connect", post(connect_wallet))
        .route("/wallet/disconnect", post(disconnect_wallet))
        .route("/wallet/sign-message", post(sign_message))
        .route("/wallet/send", post(send_sol))
        .route("/wallet/receive", get(receive))
        .route("/onboarding", get(get_onboarding))
        .route("/onboarding/complete", post(complete_onboarding))
        .route("/onboarding/reset", post(reset_onboarding))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

fn wallet_view(state: &AppState) -> WalletView {
    let wallet = state.actions.wallet();
    let connection = wallet.connection().borrow().clone();
    let dashboard = state.dashboard.snapshot();

    WalletView {
        cluster: state.config.solana_cluster.clone(),
        connection,
        is_loading: wallet.is_loading(),
        balance_display: dashboard.formatted_balance(),
        dashboard,
    }
}

// GET /wallet handler
async fn get_wallet(State(state): State<Arc<AppState>>) -> ApiResponse<WalletView> {
    ApiResponse::new(wallet_view(&state))
}

// POST /wallet/refresh handler
async fn refresh_wallet(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<RefreshView>, ApiError> {
    let outcome = state.dashboard.refresh().await;
    if outcome == RefreshOutcome::AlreadyRunning {
        return Err(ApiError::RefreshInProgress);
    }

    Ok(ApiResponse::new(RefreshView {
        outcome,
        dashboard: state.dashboard.snapshot(),
    }))
}

// POST /wallet/connect handler
async fn connect_wallet(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<ConnectView>, ApiError> {
    let address = state.actions.connect().await?;
    Ok(ApiResponse::new(ConnectView { address }))
}

// POST /wallet/disconnect handler
async fn disconnect_wallet(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<WalletView>, ApiError> {
    state.actions.disconnect().await?;
    Ok(ApiResponse::new(wallet_view(&state)))
}

// POST /wallet/sign-message handler
async fn sign_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignMessageRequest>,
) -> Result<ApiResponse<SignedMessage>, ApiError> {
    let signed = state.actions.sign_message(&body.message).await?;
    Ok(ApiResponse::new(signed))
}

// POST /wallet/send handler
async fn send_sol(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendRequest>,
) -> Result<ApiResponse<SendReceipt>, ApiError> {
    info!("Processing send request to {} for {} SOL", body.recipient, body.amount);
    let receipt = state.actions.send(&body.recipient, &body.amount).await?;
    Ok(ApiResponse::new(receipt))
}

// GET /wallet/receive handler
async fn receive(State(state): State<Arc<AppState>>) -> Result<ApiResponse<ReceiveInfo>, ApiError> {
    Ok(ApiResponse::new(state.actions.receive()?))
}

// GET /onboarding handler
async fn get_onboarding(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<OnboardingView>, ApiError> {
    let has_completed_onboarding = settings::has_completed_onboarding(&state.db_pool).await?;
    Ok(ApiResponse::new(OnboardingView { has_completed_onboarding }))
}

// POST /onboarding/complete handler
async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<OnboardingView>, ApiError> {
    settings::set_onboarding_completed(&state.db_pool, true).await?;
    info!("Onboarding completed");
    Ok(ApiResponse::new(OnboardingView { has_completed_onboarding: true }))
}

// POST /onboarding/reset handler
async fn reset_onboarding(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<OnboardingView>, ApiError> {
    settings::set_onboarding_completed(&state.db_pool, false).await?;
    info!("Onboarding reset");
    Ok(ApiResponse::new(OnboardingView { has_completed_onboarding: false }))
}
