//! Tonelift API Gateway
//!
//! Storefront-facing REST surface over the pricing resolver:
//! - catalog listing, priced for the caller's subscription tier
//! - tier and duration discount tables for display
//! - subscription and campaign quote endpoints
//!
//! Every `/api/v1` response uses the `{success, data, error}` envelope. The
//! caller's tier arrives in the `x-subscription-tier` header and is carried
//! into handlers as an explicit per-request [`Session`].

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Request, State},
    http::{header, request::Parts, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tonelift_common::{
    PriceQuote, PricingError, PricingUnit, ServiceCategory, ServiceKind, SubscriptionTier,
    MAX_CAMPAIGN_DAYS,
};
use tonelift_pricing::{DurationDiscountSchedule, PricingConfig, PricingResolver, TierTable};

/// Header carrying the caller's subscription tier
const TIER_HEADER: &str = "x-subscription-tier";

// ============ CONFIG ============

/// Gateway configuration
#[derive(Debug, Clone)]
struct GatewayConfig {
    /// Listen host
    host: String,
    /// Listen port
    port: u16,
    /// Static bearer token; `None` leaves the API open
    api_token: Option<String>,
    /// Pricing tables and currency
    pricing: PricingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_token: None,
            pricing: PricingConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment and files
    fn load() -> anyhow::Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        // Platform-injected PORT takes priority
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        if let Ok(host) = std::env::var("TONELIFT_GATEWAY_HOST") {
            cfg.host = host;
        }
        if let Ok(port) = std::env::var("TONELIFT_GATEWAY_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }
        if let Ok(token) = std::env::var("TONELIFT_API_TOKEN") {
            if !token.is_empty() {
                cfg.api_token = Some(token);
            }
        }

        cfg.pricing = PricingConfig::load()?;

        Ok(cfg)
    }
}

// ============ STATE ============

#[derive(Clone)]
struct AppState {
    resolver: Arc<PricingResolver>,
    api_token: Option<String>,
}

// ============ ENVELOPE ============

/// Response envelope for every `/api/v1` route
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

/// Error half of the envelope, with its HTTP status
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "missing or invalid bearer token".to_string(),
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        let status = match err {
            PricingError::UnknownService { .. } | PricingError::ServiceNotPriced { .. } => {
                StatusCode::NOT_FOUND
            }
            PricingError::InvalidBasePrice { .. }
            | PricingError::InvalidDiscountFraction { .. }
            | PricingError::NotDurationPriced { .. } => StatusCode::BAD_REQUEST,
            PricingError::InvalidSchedule(_) | PricingError::InvalidTierTable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        });
        (self.status, body).into_response()
    }
}

/// Request-body extractor whose rejection stays inside the envelope
///
/// Axum's stock `Json` rejection answers with a plain-text body; every
/// `/api/v1` response carries the envelope, parse failures included.
struct ApiJson<T>(T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

// ============ SESSION ============

/// Per-request session context
///
/// The storefront sets `x-subscription-tier` after login; parsing is lenient
/// and absent or unrecognized values quote as the free tier.
#[derive(Debug, Clone, Copy)]
struct Session {
    tier: SubscriptionTier,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tier = parts
            .headers
            .get(TIER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(SubscriptionTier::from_key)
            .unwrap_or_default();
        Ok(Session { tier })
    }
}

// ============ REQUEST TYPES ============

#[derive(Debug, Deserialize)]
struct SubscriptionQuoteRequest {
    service: String,
    /// Overrides the session tier when present
    tier: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CampaignQuoteRequest {
    service: String,
    days: u32,
}

// ============ RESPONSE TYPES ============

#[derive(Debug, Serialize)]
struct CatalogItem {
    service: ServiceKind,
    category: ServiceCategory,
    unit: PricingUnit,
    base_price: u64,
    quote: PriceQuote,
}

#[derive(Debug, Serialize)]
struct CatalogListing {
    tier: SubscriptionTier,
    currency: String,
    services: Vec<CatalogItem>,
}

// ============ HANDLERS ============

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": tonelift_common::VERSION,
    }))
}

async fn get_version() -> Json<ApiResponse<serde_json::Value>> {
    ApiResponse::ok(serde_json::json!({
        "service": "tonelift-api-gateway",
        "version": tonelift_common::VERSION,
        "description": "Quote and discount API for the Tonelift promotion storefront",
    }))
}

/// Catalog listing, each service quoted at the session tier
async fn get_catalog(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<CatalogListing>>, ApiError> {
    let resolver = &state.resolver;
    let mut services = Vec::with_capacity(resolver.catalog().len());
    for (service, entry) in resolver.catalog().iter() {
        let quote = resolver.subscription_quote(*service, session.tier)?;
        services.push(CatalogItem {
            service: *service,
            category: service.category(),
            unit: entry.unit,
            base_price: entry.base_price,
            quote,
        });
    }
    Ok(ApiResponse::ok(CatalogListing {
        tier: session.tier,
        currency: resolver.currency().to_string(),
        services,
    }))
}

async fn get_tiers(State(state): State<AppState>) -> Json<ApiResponse<TierTable>> {
    ApiResponse::ok(state.resolver.tiers().clone())
}

async fn get_duration_discounts(
    State(state): State<AppState>,
) -> Json<ApiResponse<DurationDiscountSchedule>> {
    ApiResponse::ok(state.resolver.schedule().clone())
}

async fn quote_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiJson(req): ApiJson<SubscriptionQuoteRequest>,
) -> Result<Json<ApiResponse<PriceQuote>>, ApiError> {
    let service = ServiceKind::from_key(&req.service)?;
    let tier = req
        .tier
        .as_deref()
        .map(SubscriptionTier::from_key)
        .unwrap_or(session.tier);
    let quote = state.resolver.subscription_quote(service, tier)?;
    Ok(ApiResponse::ok(quote))
}

async fn quote_campaign(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CampaignQuoteRequest>,
) -> Result<Json<ApiResponse<PriceQuote>>, ApiError> {
    if req.days > MAX_CAMPAIGN_DAYS {
        return Err(ApiError::bad_request(format!(
            "campaign length {} exceeds the {} day maximum",
            req.days, MAX_CAMPAIGN_DAYS
        )));
    }
    let service = ServiceKind::from_key(&req.service)?;
    let quote = state.resolver.campaign_quote(service, req.days)?;
    Ok(ApiResponse::ok(quote))
}

/// Enveloped 404 for unmatched `/api/v1` paths
async fn api_fallback() -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        message: "unknown API route".to_string(),
    }
}

// ============ AUTH ============

/// Static bearer check for `/api/v1`; a missing token config leaves it open
async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.api_token.as_deref() else {
        return next.run(request).await;
    };
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token == expected)
        .unwrap_or(false);
    if authorized {
        next.run(request).await
    } else {
        ApiError::unauthorized().into_response()
    }
}

// ============ ROUTER ============

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let api = Router::new()
        .route("/version", get(get_version))
        .route("/catalog", get(get_catalog))
        .route("/tiers", get(get_tiers))
        .route("/discounts/duration", get(get_duration_discounts))
        .route("/quotes/subscription", post(quote_subscription))
        .route("/quotes/campaign", post(quote_campaign))
        .fallback(api_fallback)
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ MAIN ============

fn init_tracing() -> anyhow::Result<()> {
    let json_logs = std::env::var("TONELIFT_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive("api_gateway=info".parse()?);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing()?;

    info!("Starting Tonelift API Gateway v{}", tonelift_common::VERSION);

    let config = GatewayConfig::load()?;
    let resolver = PricingResolver::from_config(config.pricing.clone())?;
    info!(
        services = resolver.catalog().len(),
        currency = %resolver.currency(),
        auth = config.api_token.is_some(),
        "pricing resolver ready"
    );

    let state = AppState {
        resolver: Arc::new(resolver),
        api_token: config.api_token.clone(),
    };
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Tonelift API Gateway listening on {}", addr);
    info!("Endpoints: /health, /api/v1/version, /api/v1/catalog, /api/v1/tiers, /api/v1/discounts/duration, /api/v1/quotes/subscription, /api/v1/quotes/campaign");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down Tonelift API Gateway");
    Ok(())
}

// ============ TESTS ============
