use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::constants::server::HISTORY_ERROR_MESSAGE;
use crate::error::AppError;
use crate::market::MarketDataClient;
use crate::services::history::fetch_history;
use crate::services::stocks::{build_board, SortOrder};
use crate::watchlist::WatchlistEntry;

const STOCK_DETAIL_TEMPLATE: &str = include_str!("../templates/stock_detail.html");

/// Process-wide state shared by every handler. Nothing in here changes after
/// startup.
pub struct AppState {
    pub config: AppConfig,
    pub watchlist: Vec<WatchlistEntry>,
    pub market: Arc<dyn MarketDataClient>,
}

pub fn app_router(state: Arc<AppState>) -> Result<Router, AppError> {
    let cors = cors_layer(&state.config)?;

    let app = Router::new()
        .route("/api/stocks", get(get_stocks))
        .route("/api/stocks/{symbol}/history", get(get_stock_history))
        .route("/stocks/{symbol}", get(stock_detail))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

pub async fn run_server(state: Arc<AppState>) -> Result<(), AppError> {
    let bind_addr = state.config.bind_addr.clone();
    let app = app_router(state)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API Server listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if config.cors_allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|_| AppError::Config(format!("invalid CORS origin: {}", o)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(origins))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StocksParams {
    sort_column: Option<String>,
    sort_order: Option<String>,
}

async fn get_stocks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StocksParams>,
) -> impl IntoResponse {
    let sort_column = params.sort_column.unwrap_or_default();
    let sort_order = SortOrder::parse(params.sort_order.as_deref());

    let board = build_board(
        state.market.as_ref(),
        &state.watchlist,
        state.config.fetch_concurrency,
        &sort_column,
        sort_order,
    )
    .await;

    Json(board)
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    period: Option<String>,
}

async fn get_stock_history(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    let period = params
        .period
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| state.config.default_history_period.clone());

    match fetch_history(state.market.as_ref(), &symbol, &period).await {
        Ok(points) => Json(points).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": HISTORY_ERROR_MESSAGE })),
        )
            .into_response(),
    }
}

async fn stock_detail(Path(symbol): Path<String>) -> Html<String> {
    Html(render_detail_page(&symbol))
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "watchlist_size": state.watchlist.len(),
    }))
}

pub fn render_detail_page(symbol: &str) -> String {
    STOCK_DETAIL_TEMPLATE.replace("{{ symbol }}", &escape_html(symbol))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
