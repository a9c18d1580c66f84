use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse, Result};
use tracing::{info, warn};

use super::router;
use crate::error::CalcError;
use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn hello() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Hello from The Calculator!\n")
}

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// `GET /calc/{operation}[/{operands...}]`
pub async fn calculate(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, CalcError> {
    let operation = req.match_info().get("operation").unwrap_or_default();
    let segments = router::split_segments(req.match_info().get("operands"));

    match router::dispatch(&state.calculator, operation, &segments).await {
        Ok(result) => {
            info!("{} {:?} = {}", operation, segments, result);
            Ok(HttpResponse::Ok()
                .content_type(ContentType::plaintext())
                .body(result.to_string()))
        }
        Err(e) => {
            warn!("Rejected {} {:?}: {}", operation, segments, e);
            Err(e)
        }
    }
}
