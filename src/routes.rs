use actix_web::{
    HttpResponse, get,
    http::{StatusCode, header},
    post, web,
};
use serde_json::{Value, json};

use crate::{GatewayState, error::AppError};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(register_account);
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "filedock-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Relay a registration payload to the backend. The body must be valid JSON
/// (the extractor rejects anything else before an upstream call is made); the
/// backend's status, content type, cookies and body come back unchanged.
#[post("/auth/register")]
async fn register_account(
    state: web::Data<GatewayState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let relayed = state.backend.register(&payload.into_inner()).await?;

    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = &relayed.content_type {
        builder.insert_header((header::CONTENT_TYPE, content_type.as_str()));
    }
    for cookie in &relayed.set_cookies {
        builder.append_header((header::SET_COOKIE, cookie.as_str()));
    }
    Ok(builder.body(relayed.body))
}
