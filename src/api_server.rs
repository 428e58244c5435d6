// Axum API Server Module
//
// Purpose: JSON API over the plant matcher, catalog, care guides, growth plans
// and the persisted plant selection. Matching is always local; the remote
// recommendation service is only consulted by POST /api/recommend.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::care::{care_recommendations, plant_details};

#[cfg(feature = "api")]
use crate::catalog::Catalog;

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::diagnostics::{diagnose, CaptureState, Diagnosis};

#[cfg(feature = "api")]
use crate::error::PlantPalError;

#[cfg(feature = "api")]
use crate::growth_plan::{ai_plan, find_plan, growth_phases, plan_progress, standard_plans};

#[cfg(feature = "api")]
use crate::location::{manual_location, remember_manual_location, tunis, Location};

#[cfg(feature = "api")]
use crate::matcher::{
    apply_filters, remove_filter, reset_filters, resolve_level, PreferenceCriteria, RandomJitter,
};

#[cfg(feature = "api")]
use crate::recommend::{recommend_with_fallback, RecommendationClient};

#[cfg(feature = "api")]
use crate::selection_store::{confirm_selection, selected_plant, FileStore, SelectionStore};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn SelectionStore>,
    /// None when the remote recommendation call is disabled
    pub recommender: Option<Arc<RecommendationClient>>,
    pub location: Arc<Location>,
    pub cache: Cache<String, serde_json::Value>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Production state: JSON file store under `data_dir`
    pub fn new(config: &ServerConfig) -> Self {
        tracing::info!("Using selection store at {}", config.store_path().display());
        let store: Arc<dyn SelectionStore> = Arc::new(FileStore::new(config.store_path()));

        let recommender = config.recommendation_url.as_deref().map(RecommendationClient::new);
        match &recommender {
            Some(client) => tracing::info!("Recommendation service: {}", client.endpoint()),
            None => tracing::info!("Recommendation service disabled"),
        }

        Self::with_store(store, recommender, Duration::from_secs(config.cache_ttl_secs))
    }

    pub fn with_store(
        store: Arc<dyn SelectionStore>,
        recommender: Option<RecommendationClient>,
        cache_ttl: Duration,
    ) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(cache_ttl)
            .build();

        Self {
            catalog: Arc::new(Catalog::default()),
            store,
            recommender: recommender.map(Arc::new),
            location: Arc::new(tunis()),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Catalog
        .route("/api/plants", get(list_plants))
        .route("/api/plants/featured", get(featured_plants))
        .route("/api/plants/:name", get(get_plant))
        .route("/api/plants/:name/care", get(get_care))

        // Matching
        .route("/api/match", post(match_plants))
        .route("/api/recommend", post(recommend))
        .route("/api/levels/:value", get(get_level))
        .route("/api/filters/remove", post(remove_filter_handler))
        .route("/api/filters/reset", get(reset_filters_handler))

        // Persisted selection and onboarding location
        .route("/api/selection", get(get_selection).put(put_selection))
        .route("/api/location", get(get_location).put(put_location))

        // Growth plans
        .route("/api/growth-plans", get(list_growth_plans))
        .route("/api/growth-plans/progress/:week", get(get_plan_progress))
        .route("/api/growth-plans/:id", get(get_growth_plan))

        // Diagnostics
        .route("/api/diagnostics/capture", post(capture))
        .route("/api/diagnostics/:plant", get(get_diagnosis))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn list_plants(State(state): State<AppState>) -> Json<serde_json::Value> {
    let plants = state.catalog.plants();
    Json(serde_json::json!({
        "rows": plants.len(),
        "data": plants,
    }))
}

#[cfg(feature = "api")]
async fn featured_plants(State(state): State<AppState>) -> Json<serde_json::Value> {
    let featured: Vec<_> = state.catalog.featured().collect();
    Json(serde_json::json!({
        "rows": featured.len(),
        "data": featured,
    }))
}

#[cfg(feature = "api")]
async fn get_plant(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state
        .catalog
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", name)))?;

    Ok(Json(serde_json::json!({
        "plant": record,
        "details": plant_details(&state.catalog, &name),
    })))
}

#[cfg(feature = "api")]
async fn get_care(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if state.catalog.get(&name).is_none() {
        return Err(AppError::NotFound(format!("Plant {} not found", name)));
    }

    let cache_key = format!("care:{}", name);

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for care guide {}", name);
        return Ok(Json(cached));
    }

    let details = plant_details(&state.catalog, &name);
    let result = serde_json::json!({
        "recommendations": care_recommendations(&details),
        "details": details,
    });

    // Cache result
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn match_plants(
    State(state): State<AppState>,
    Json(criteria): Json<PreferenceCriteria>,
) -> Json<crate::matcher::MatchResult> {
    let result = apply_filters(state.catalog.plants(), &criteria, &mut RandomJitter::from_entropy());
    tracing::debug!(
        "Matched {} plants (filters: {:?})",
        result.plants.len(),
        result.active_filters
    );
    Json(result)
}

#[cfg(feature = "api")]
async fn recommend(
    State(state): State<AppState>,
    Json(criteria): Json<PreferenceCriteria>,
) -> Json<crate::recommend::Recommendation> {
    let mut jitter = RandomJitter::from_entropy();
    let recommendation = recommend_with_fallback(
        state.recommender.as_deref(),
        state.catalog.plants(),
        &criteria,
        &state.location,
        &mut jitter,
    )
    .await;
    Json(recommendation)
}

#[cfg(feature = "api")]
async fn get_level(Path(value): Path<f64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "value": value,
        "level": resolve_level(value),
    }))
}

#[cfg(feature = "api")]
async fn remove_filter_handler(
    State(state): State<AppState>,
    Json(payload): Json<RemoveFilterRequest>,
) -> Json<serde_json::Value> {
    let criteria = remove_filter(&payload.criteria, &payload.label);
    let result = apply_filters(state.catalog.plants(), &criteria, &mut RandomJitter::from_entropy());

    Json(serde_json::json!({
        "criteria": criteria,
        "result": result,
    }))
}

#[cfg(feature = "api")]
async fn reset_filters_handler() -> Json<PreferenceCriteria> {
    Json(reset_filters())
}

/// Run a store operation on the blocking pool (FileStore does sync file I/O)
#[cfg(feature = "api")]
async fn store_task<T, F>(store: Arc<dyn SelectionStore>, op: F) -> Result<T, AppError>
where
    F: FnOnce(&dyn SelectionStore) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| AppError::Internal(format!("Store task failed: {}", e)))?
        .map_err(AppError::from)
}

#[cfg(feature = "api")]
async fn get_selection(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let plant = store_task(state.store.clone(), |store| selected_plant(store)).await?;
    Ok(Json(serde_json::json!({
        "details": plant_details(&state.catalog, &plant),
        "plant": plant,
    })))
}

#[cfg(feature = "api")]
async fn put_selection(
    State(state): State<AppState>,
    Json(payload): Json<SelectionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let catalog = state.catalog.clone();
    let plant = payload.plant.clone();
    store_task(state.store.clone(), move |store| confirm_selection(store, &catalog, &plant)).await?;
    Ok(Json(serde_json::json!({ "plant": payload.plant })))
}

#[cfg(feature = "api")]
async fn get_location(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let manual = store_task(state.store.clone(), |store| manual_location(store)).await?;
    Ok(Json(serde_json::json!({
        "location": state.location.as_ref(),
        "manual": manual,
    })))
}

#[cfg(feature = "api")]
async fn put_location(
    State(state): State<AppState>,
    Json(payload): Json<LocationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let input = payload.location;
    let (stored, manual) = store_task(state.store.clone(), move |store| {
        let stored = remember_manual_location(store, &input)?;
        Ok((stored, manual_location(store)?))
    })
    .await?;

    Ok(Json(serde_json::json!({
        "stored": stored,
        "manual": manual,
    })))
}

#[cfg(feature = "api")]
async fn list_growth_plans(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut plans = standard_plans();
    plans.push(ai_plan(&state.location));

    Json(serde_json::json!({
        "plans": plans,
        "phases": growth_phases(),
    }))
}

#[cfg(feature = "api")]
async fn get_growth_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<crate::growth_plan::GrowthPlan>, AppError> {
    find_plan(&id, &state.location)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Growth plan {} not found", id)))
}

#[cfg(feature = "api")]
async fn get_plan_progress(Path(week): Path<u32>) -> Json<crate::growth_plan::PlanProgress> {
    Json(plan_progress(week))
}

#[cfg(feature = "api")]
async fn capture(Json(payload): Json<CaptureRequest>) -> Json<CaptureResponse> {
    let state = if payload.reset {
        payload.state.reset()
    } else {
        payload.state.advance()
    };
    let diagnosis = (state == CaptureState::Diagnosed).then(|| diagnose(&payload.plant));

    Json(CaptureResponse {
        state,
        caption: state.caption(),
        diagnosis,
    })
}

#[cfg(feature = "api")]
async fn get_diagnosis(Path(plant): Path<String>) -> Json<crate::diagnostics::Diagnosis> {
    Json(diagnose(&plant))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct RemoveFilterRequest {
    #[serde(default)]
    criteria: PreferenceCriteria,
    label: String,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct SelectionRequest {
    plant: String,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct LocationRequest {
    location: String,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct CaptureRequest {
    #[serde(default)]
    state: CaptureState,
    #[serde(default)]
    plant: String,
    #[serde(default)]
    reset: bool,
}

#[cfg(feature = "api")]
#[derive(serde::Serialize, Debug)]
struct CaptureResponse {
    state: CaptureState,
    caption: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnosis: Option<Diagnosis>,
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    NotFound(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<PlantPalError> for AppError {
    fn from(err: PlantPalError) -> Self {
        match err {
            PlantPalError::UnknownPlant(name) => AppError::NotFound(format!("Plant {} not found", name)),
            other => {
                tracing::error!("Request failed: {}", other);
                AppError::Internal(other.to_string())
            }
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
