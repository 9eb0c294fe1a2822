// Agency Console - Web Server
// REST API over the aggregation engine with Axum

use agency_console::{
    default_range, filter_ledger, ledger_totals, load_or_demo, AggregationEngine, AnalyticsCache,
    AnalyticsReport, DateRange, HealthReport, LedgerFilter, LedgerTotals, Settings, StoreError,
    Transaction, Workspace,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

/// Mutable part of the server: the books and the memoized report
struct Books {
    workspace: Workspace,
    cache: AnalyticsCache,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    books: Arc<Mutex<Books>>,
    engine: Arc<AggregationEngine>,
}

impl AppState {
    fn lock(&self) -> Result<MutexGuard<'_, Books>, ApiError> {
        self.books
            .lock()
            .map_err(|_| ApiError::internal("state lock poisoned"))
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Handler failure rendered as `{ success: false, error }`
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.message, "request failed");
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`, both optional
#[derive(Debug, Deserialize)]
struct RangeQuery {
    start: Option<String>,
    end: Option<String>,
}

impl RangeQuery {
    fn resolve(&self, transactions: &[Transaction]) -> Result<DateRange, ApiError> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                DateRange::parse(start, end).map_err(|e| ApiError::bad_request(format!("{:#}", e)))
            }
            (None, None) => Ok(default_range(transactions, Local::now().date_naive())),
            _ => Err(ApiError::bad_request("start and end must be given together")),
        }
    }
}

#[derive(Serialize)]
struct LedgerResponse {
    transactions: Vec<Transaction>,
    totals: LedgerTotals,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

fn cached_report(state: &AppState, query: &RangeQuery) -> Result<AnalyticsReport, ApiError> {
    let mut guard = state.lock()?;
    let books = &mut *guard;
    let finance = &books.workspace.finance;
    let range = query.resolve(finance.transactions())?;

    Ok(books
        .cache
        .get_or_compute(
            &state.engine,
            finance.transactions(),
            finance.categories(),
            finance.accounts(),
            range,
        )
        .clone())
}

/// GET /api/report - Every derived view for a range
async fn get_report(State(state): State<AppState>, Query(query): Query<RangeQuery>) -> ApiResult<AnalyticsReport> {
    Ok(Json(ApiResponse::ok(cached_report(&state, &query)?)))
}

/// GET /api/summary
async fn get_summary(State(state): State<AppState>, Query(query): Query<RangeQuery>) -> impl IntoResponse {
    cached_report(&state, &query).map(|r| Json(ApiResponse::ok(r.summary)))
}

/// GET /api/trend
async fn get_trend(State(state): State<AppState>, Query(query): Query<RangeQuery>) -> impl IntoResponse {
    cached_report(&state, &query).map(|r| Json(ApiResponse::ok(r.trend)))
}

/// GET /api/categories - Expense breakdown
async fn get_categories(State(state): State<AppState>, Query(query): Query<RangeQuery>) -> impl IntoResponse {
    cached_report(&state, &query).map(|r| Json(ApiResponse::ok(r.categories)))
}

/// GET /api/metrics
async fn get_metrics(State(state): State<AppState>, Query(query): Query<RangeQuery>) -> impl IntoResponse {
    cached_report(&state, &query).map(|r| Json(ApiResponse::ok(r.metrics)))
}

/// GET /api/transactions - Ledger listing, `?search&kind&start&end`
async fn get_transactions(
    State(state): State<AppState>,
    Query(filter): Query<LedgerFilter>,
) -> ApiResult<LedgerResponse> {
    let books = state.lock()?;
    let rows = filter_ledger(books.workspace.finance.transactions(), &filter);
    let totals = ledger_totals(rows.iter().copied());

    Ok(Json(ApiResponse::ok(LedgerResponse {
        transactions: rows.into_iter().cloned().collect(),
        totals,
    })))
}

/// POST /api/transactions - Record a transaction
async fn create_transaction(
    State(state): State<AppState>,
    Json(tx): Json<Transaction>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), ApiError> {
    let mut books = state.lock()?;
    let id = books.workspace.finance.add_transaction(tx)?;
    tracing::info!(id = %id, "transaction recorded");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(id))))
}

/// GET /api/clients - Portfolio health, weakest first
async fn get_clients(State(state): State<AppState>) -> ApiResult<Vec<HealthReport>> {
    let books = state.lock()?;
    let reports = state.engine.portfolio_health(
        books.workspace.clients.clients(),
        books.workspace.tasks.tasks(),
        Local::now().naive_local(),
    );
    Ok(Json(ApiResponse::ok(reports)))
}

#[derive(Serialize)]
struct ClientHealthResponse {
    #[serde(flatten)]
    report: HealthReport,
    summary: &'static str,
    action: &'static str,
}

/// GET /api/clients/:id/health
async fn get_client_health(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<ClientHealthResponse> {
    // Decode URL-encoded id
    let decoded_id = urlencoding::decode(&client_id)
        .unwrap_or_else(|_| client_id.clone().into())
        .into_owned();

    let books = state.lock()?;
    let client = books.workspace.clients.get(&decoded_id)?;
    let report = state
        .engine
        .client_health(client, books.workspace.tasks.tasks(), Local::now().naive_local());
    let diagnosis = report.diagnosis();

    Ok(Json(ApiResponse::ok(ClientHealthResponse {
        report,
        summary: diagnosis.summary,
        action: diagnosis.action,
    })))
}

// ============================================================================
// Main Server
// ============================================================================

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/report", get(get_report))
        .route("/summary", get(get_summary))
        .route("/trend", get(get_trend))
        .route("/categories", get(get_categories))
        .route("/metrics", get(get_metrics))
        .route("/transactions", get(get_transactions).post(create_transaction))
        .route("/clients", get(get_clients))
        .route("/clients/:id/health", get(get_client_health))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🌐 Agency Console - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let settings = Settings::from_env()?;
    let workspace = load_or_demo(settings.data.snapshot_path.as_deref())?;
    println!(
        "✓ Books loaded: {} transactions, {} clients",
        workspace.finance.transactions().len(),
        workspace.clients.clients().len()
    );

    let addr = settings.server.bind_addr.clone();
    let state = AppState {
        books: Arc::new(Mutex::new(Books { workspace, cache: AnalyticsCache::new() })),
        engine: Arc::new(AggregationEngine::new(settings)),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/report", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
