use crate::handler::{handle, HandlerConfig, Outcome, RecommendForm, MISSING_INPUT_MESSAGE, NOT_FOUND_MESSAGE};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Result as ActixResult};
use chrono::{DateTime, Utc};
use prodsim_core::ServiceState;
use serde::Serialize;
use tracing::debug;

/// Everything a request handler reads. Built once, never mutated.
pub struct AppState {
    pub service: ServiceState,
    pub handler: HandlerConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: ServiceState, handler: HandlerConfig) -> Self {
        Self {
            service,
            handler,
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    ready: bool,
    products: usize,
    started_at: String,
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    detail: &'a str,
    checked_at: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: web::Data<AppState>, config: RestConfig) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(state.clone())
                .configure(RestApi::configure)
        })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
    }

    /// Route table, shared by the server and tests.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(service_info))
            .route("/health", web::get().to(health))
            .route("/recommend", web::post().to(recommend_form))
            .route("/recommend", web::get().to(recommend_query));
    }
}

async fn service_info(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let info = ServiceInfo {
        service: "prodsim",
        version: env!("CARGO_PKG_VERSION"),
        ready: state.service.is_ready(),
        products: state.service.recommender().map(|r| r.catalog().len()).unwrap_or(0),
        started_at: state.started_at.to_rfc3339(),
    };
    Ok(HttpResponse::Ok().json(info))
}

async fn health(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let checked_at = Utc::now().to_rfc3339();
    let response = match &state.service {
        ServiceState::Ready(_) => HttpResponse::Ok().json(HealthResponse {
            status: "ready",
            detail: "model assets loaded",
            checked_at,
        }),
        ServiceState::NotReady { reason } => HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "degraded",
            detail: reason,
            checked_at,
        }),
    };
    Ok(response)
}

/// A body that is not urlencoded (empty, multipart, JSON) carries no
/// readable product name and is answered as missing input.
async fn recommend_form(
    state: web::Data<AppState>,
    form: Option<web::Form<RecommendForm>>,
) -> ActixResult<HttpResponse> {
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    Ok(respond(&state, &form))
}

async fn recommend_query(
    state: web::Data<AppState>,
    query: web::Query<RecommendForm>,
) -> ActixResult<HttpResponse> {
    Ok(respond(&state, &query))
}

fn respond(state: &AppState, form: &RecommendForm) -> HttpResponse {
    let outcome = handle(&state.service, form, &state.handler);

    match outcome {
        Outcome::MissingInput => HttpResponse::BadRequest().json(serde_json::json!({
            "error": MISSING_INPUT_MESSAGE
        })),
        Outcome::Unavailable { reason } => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": format!("Recommendations are unavailable: {}", reason)
        })),
        Outcome::InvalidCount { query, count } => HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid count '{}': expected a positive integer.", count),
            "input_product": query
        })),
        Outcome::NotFound { query } => {
            debug!(query = %query, "no recommendations");
            HttpResponse::NotFound().json(serde_json::json!({
                "error": NOT_FOUND_MESSAGE,
                "input_product": query
            }))
        }
        Outcome::Found { query, recommendations } => {
            debug!(query = %query, hits = recommendations.len(), "recommendations served");
            HttpResponse::Ok().json(serde_json::json!({
                "input_product": query,
                "recommendations": recommendations
            }))
        }
    }
}
