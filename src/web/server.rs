use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info};

use crate::catalog::store::TickerCatalog;
use crate::cli::ServeArgs;
use crate::core::types::Resolution;
use crate::matching::engine::{Resolver, ResolverConfig};
use crate::matching::scoring::MatchScore;
use crate::utils::validation::{normalize_ticker, validate_query, QueryError};

/// Largest number of candidates a single request may ask for
pub const MAX_RESULT_LIMIT: usize = 50;

/// Requests carry no body; anything larger than this is rejected
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Shared application state
pub struct AppState {
    pub catalog: TickerCatalog,
    pub config: ResolverConfig,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Query parameters for `/api/resolve`
#[derive(Deserialize)]
struct ResolveParams {
    /// Free-text query
    q: Option<String>,
    /// Number of ranked candidates to include (default: none)
    limit: Option<usize>,
}

#[derive(Serialize)]
struct Candidate {
    ticker: String,
    name: String,
    score: MatchScore,
}

#[derive(Serialize)]
struct ResolveResponse {
    query: String,
    ticker: Option<String>,
    confidence: f64,
    level: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    candidates: Vec<Candidate>,
}

impl ResolveResponse {
    fn new(query: String, best: &Resolution, candidates: Vec<Candidate>) -> Self {
        Self {
            query,
            ticker: best.is_match().then(|| best.ticker.clone()),
            confidence: best.confidence,
            level: best.level().to_string(),
            candidates,
        }
    }
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_reply(status: StatusCode, response: ErrorResponse) -> Response {
    (status, Json(response)).into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes, security headers and resource limits, without rate limiting.
///
/// Rate limiting keys on the peer address, which only exists when the router is
/// served over a real socket; [`create_router`] adds it on top.
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/resolve", get(resolve_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/catalog/{ticker}", get(catalog_entry_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("cache-control"),
                    HeaderValue::from_static("no-store"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    Ok(api_routes(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.tuning.config()?;
    let catalog = args.tuning.load_catalog(false)?;
    info!(entries = catalog.len(), "Catalog ready");

    let app = create_router(Arc::new(AppState { catalog, config }))?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting ticker-resolver web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/catalog"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Service summary
async fn index_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "entries": state.catalog.len(),
        "min_confidence": state.config.thresholds.min_confidence,
        "endpoints": [
            "GET /api/resolve?q=<query>&limit=<n>",
            "GET /api/catalog",
            "GET /api/catalog/{ticker}",
        ],
    }))
}

/// Resolve a query to its best ticker, optionally with ranked candidates
async fn resolve_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Response {
    let Some(query) = params.q else {
        return error_reply(
            StatusCode::BAD_REQUEST,
            create_safe_error_response("missing_query", "Missing required parameter 'q'", None),
        );
    };

    if let Err(e) = validate_query(&query) {
        let error_type = match e {
            QueryError::Empty => "empty_query",
            QueryError::TooLong => "query_too_long",
            QueryError::ControlCharacters => "invalid_query",
        };
        return error_reply(
            StatusCode::BAD_REQUEST,
            create_safe_error_response(error_type, &e.to_string(), None),
        );
    }

    let limit = params.limit.unwrap_or(0).min(MAX_RESULT_LIMIT);

    // Scoring walks the whole catalog; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || {
        let resolver = Resolver::with_config(&state.catalog, state.config.clone())?;
        let best = resolver.find_best_match(&query);
        let candidates = resolver
            .find_matches(&query, limit)
            .into_iter()
            .map(|m| Candidate {
                ticker: m.entry.ticker().to_string(),
                name: m.entry.name().to_string(),
                score: m.score,
            })
            .collect();
        debug!(query = %query, ticker = %best.ticker, "Resolved");
        Ok::<_, anyhow::Error>(ResolveResponse::new(query, &best, candidates))
    })
    .await;

    match result {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(e)) => error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            create_safe_error_response(
                "configuration_error",
                "Resolver is misconfigured",
                Some(&e.to_string()),
            ),
        ),
        Err(e) => error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            create_safe_error_response(
                "internal_error",
                "Failed to resolve query",
                Some(&e.to_string()),
            ),
        ),
    }
}

/// Return list of entries in catalog
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let entries: Vec<serde_json::Value> = state
        .catalog
        .entries()
        .iter()
        .map(|e| {
            serde_json::json!({
                "ticker": e.ticker(),
                "name": e.name(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": entries.len(),
        "ngram_size": state.catalog.ngram_size(),
        "entries": entries,
    }))
}

/// Return a single catalog entry
async fn catalog_entry_handler(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Response {
    match state.catalog.get(&normalize_ticker(&ticker)) {
        Some(entry) => Json(serde_json::json!({
            "ticker": entry.ticker(),
            "name": entry.name(),
            "characters": entry.mask().to_string(),
        }))
        .into_response(),
        None => error_reply(
            StatusCode::NOT_FOUND,
            create_safe_error_response("not_found", "Ticker not found in catalog", None),
        ),
    }
}
