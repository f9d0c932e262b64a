//! 模板列表与健康检查

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::styles::Template;
use crate::web::types::{AppState, HealthResponse, TemplatesResponse};

/// 可用模板列表
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: Template::ALL.iter().map(|t| t.name().to_string()).collect(),
        default: state.default_template.name().to_string(),
    })
}

/// 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
