//! REST API Server Module
//!
//! Thin transport layer over the verification core: extracts the address from
//! the request query (falling back to the configured default address),
//! dispatches into the aggregator, and serializes the result. Successful
//! checks reply `{"data": {"result": <bool>, ...}}`; any error the core
//! propagates becomes a 500-class `{"error", "details"}` response. A
//! half-complete result is never serialized.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use warp::{http::StatusCode, Filter, Rejection, Reply};

use crate::config::Config;
use crate::error::VerifierError;
use crate::verifier::{ActivityResult, ActivityVerifier};

// ============================================================================
// REQUEST/RESPONSE STRUCTURES
// ============================================================================

/// Query parameters accepted by the check endpoints.
#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    /// Address to verify; the configured default address is used when omitted
    pub address: Option<String>,
}

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Payload for the per-check endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub result: bool,
}

/// Payload for the aggregate endpoint: overall eligibility plus the
/// per-signal breakdown it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub result: bool,
    pub activities: ActivityResult,
}

/// Error envelope: `{"error": <kind>, "details": <message>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// Which of the verification entry points a route dispatches to.
#[derive(Debug, Clone, Copy)]
enum CheckKind {
    All,
    Bridging,
    Staking,
    Wrapping,
}

/// Shared handler body for all check endpoints.
///
/// Resolves the address (query parameter or configured default), runs the
/// requested check, and shapes the response. Core errors become 500-class
/// replies; per-check infrastructure failures never surface here, they have
/// already degraded to `false` inside the core.
async fn check_handler(
    kind: CheckKind,
    query: AddressQuery,
    verifier: Arc<ActivityVerifier>,
    config: Arc<Config>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let address = query
        .address
        .unwrap_or_else(|| config.default_address.clone());
    info!("Check {:?} requested for {}", kind, address);

    let reply = match kind {
        CheckKind::All => verifier
            .check_activities(&address)
            .await
            .map(|activities| {
                warp::reply::json(&DataResponse {
                    data: EligibilityResult {
                        result: activities.is_eligible(),
                        activities,
                    },
                })
            }),
        CheckKind::Bridging => verifier
            .verify_bridging(&address)
            .await
            .map(|result| warp::reply::json(&DataResponse { data: CheckResult { result } })),
        CheckKind::Staking => verifier
            .verify_staking(&address)
            .await
            .map(|result| warp::reply::json(&DataResponse { data: CheckResult { result } })),
        CheckKind::Wrapping => verifier
            .verify_wrapping(&address)
            .await
            .map(|result| warp::reply::json(&DataResponse { data: CheckResult { result } })),
    };

    match reply {
        Ok(json) => Ok(warp::reply::with_status(json, StatusCode::OK)),
        Err(e) => Ok(error_reply(&e)),
    }
}

fn error_reply(e: &VerifierError) -> warp::reply::WithStatus<warp::reply::Json> {
    error!("Check failed: {}", e);
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: e.kind().to_string(),
            details: e.to_string(),
        }),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

// ============================================================================
// WARP FILTER HELPERS
// ============================================================================

/// Injects the shared verifier into request handlers.
fn with_verifier(
    verifier: Arc<ActivityVerifier>,
) -> impl Filter<Extract = (Arc<ActivityVerifier>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || verifier.clone())
}

/// Injects the shared configuration into request handlers.
fn with_config(
    config: Arc<Config>,
) -> impl Filter<Extract = (Arc<Config>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || config.clone())
}

// ============================================================================
// REJECTION HANDLER
// ============================================================================

/// Converts warp rejections into the `{"error", "details"}` envelope.
async fn handle_rejection(rej: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (status, details) = if rej.is_not_found() {
        (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
    } else if rej.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else if let Some(err) = rej.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, format!("Invalid query: {}", err))
    } else {
        error!("Unhandled rejection: {:?}", rej);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            details,
        }),
        status,
    ))
}

// ============================================================================
// API SERVER IMPLEMENTATION
// ============================================================================

/// REST API server exposing the activity checks.
pub struct ApiServer {
    config: Arc<Config>,
    verifier: Arc<ActivityVerifier>,
}

impl ApiServer {
    /// Creates a new API server around the shared verification service.
    pub fn new(config: Config, verifier: ActivityVerifier) -> Self {
        Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
        }
    }

    /// Starts the API server and blocks handling HTTP requests.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            "Starting API server on {}:{}",
            self.config.api.host, self.config.api.port
        );

        let routes = self.create_routes();
        let addr: std::net::SocketAddr =
            format!("{}:{}", self.config.api.host, self.config.api.port).parse()?;

        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Defines all HTTP endpoints and their handlers.
    pub(crate) fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let verifier = self.verifier.clone();
        let config = self.config.clone();

        // Health check endpoint - returns service status
        let health = warp::path("health").and(warp::get()).map(|| {
            warp::reply::json(&DataResponse {
                data: "Activity verifier service is running".to_string(),
            })
        });

        let check_route = |kind: CheckKind| {
            let verifier = verifier.clone();
            let config = config.clone();
            warp::get()
                .and(warp::query::<AddressQuery>())
                .and(with_verifier(verifier))
                .and(with_config(config))
                .and_then(move |query, verifier, config| check_handler(kind, query, verifier, config))
        };

        // Aggregate eligibility - all three checks plus the derived decision
        let verify_all = warp::path("verify")
            .and(warp::path::end())
            .and(check_route(CheckKind::All));

        // Per-signal endpoints
        let verify_bridging = warp::path!("verify" / "bridging").and(check_route(CheckKind::Bridging));
        let verify_staking = warp::path!("verify" / "staking").and(check_route(CheckKind::Staking));
        let verify_wrapping = warp::path!("verify" / "wrapping").and(check_route(CheckKind::Wrapping));

        health
            .or(verify_all)
            .or(verify_bridging)
            .or(verify_staking)
            .or(verify_wrapping)
            .recover(handle_rejection)
    }

    /// Public method for testing - exposes routes for integration tests
    #[allow(dead_code)] // Used by tests
    pub fn test_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        self.create_routes()
    }
}
