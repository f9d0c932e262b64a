//! 转换API

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use serde_json::json;
use tokio::task;

use crate::batch::{convert_batch_parallel, convert_isolated, ConversionResult};
use crate::core::{ConvertError, ConvertOptions};
use crate::styles::Template;
use crate::web::types::{AppState, BatchRequest, SingleRequest, SingleResponse};

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(error: &ConvertError) -> ApiError {
    let status = if error.is_request_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": error.to_string() })))
}

fn invalid_request(message: impl Into<String>) -> ApiError {
    error_response(&ConvertError::InvalidRequest(message.into()))
}

/// 校验批量请求中的 URL 列表
fn validate_urls(
    urls: Option<serde_json::Value>,
    max_batch_size: usize,
) -> Result<Vec<String>, ConvertError> {
    let items = match urls {
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => {
            return Err(ConvertError::InvalidRequest(
                "urls must be an array".to_string(),
            ))
        }
        None => return Err(ConvertError::InvalidRequest("urls is required".to_string())),
    };

    if items.is_empty() {
        return Err(ConvertError::InvalidRequest(
            "urls must not be empty".to_string(),
        ));
    }

    if items.len() > max_batch_size {
        return Err(ConvertError::InvalidRequest(format!(
            "too many urls: {} (max {})",
            items.len(),
            max_batch_size
        )));
    }

    items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::String(url) => Ok(url),
            other => Err(ConvertError::InvalidRequest(format!(
                "urls must contain strings, got {other}"
            ))),
        })
        .collect()
}

/// 批量转换
///
/// 请求体在处理器内解析，格式错误统一返回 400 `{ "error": .. }`。
pub async fn convert_urls(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<ConversionResult>>, ApiError> {
    let request: BatchRequest = serde_json::from_slice(&body)
        .map_err(|e| invalid_request(format!("malformed request body: {e}")))?;

    let urls =
        validate_urls(request.urls, state.max_batch_size).map_err(|e| error_response(&e))?;

    let template = request
        .template
        .as_deref()
        .map(|name| Template::from_name_or(name, state.default_template))
        .unwrap_or(state.default_template);
    let options = ConvertOptions::new(template, state.sanitize_profile);

    tracing::info!("批量转换请求: {} 个URL (模板: {})", urls.len(), template);

    let results = convert_batch_parallel(state.fetcher.clone(), urls, options).await;

    let failed = results.iter().filter(|r| !r.is_success()).count();
    tracing::info!("批量转换完成: {} 成功, {} 失败", results.len() - failed, failed);

    Ok(Json(results))
}

/// 单页转换：默认模板，代码块编号从 0 开始
pub async fn convert_single(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SingleResponse>, ApiError> {
    let request: SingleRequest = serde_json::from_slice(&body)
        .map_err(|e| invalid_request(format!("malformed request body: {e}")))?;

    let options = ConvertOptions::new(state.default_template, state.sanitize_profile);
    let fetcher = state.fetcher.clone();
    let url = request.url;

    tracing::info!("单页转换请求: {}", url);

    let result = task::spawn_blocking(move || convert_isolated(fetcher.as_ref(), &url, options, 0))
        .await
        .map_err(|e| error_response(&ConvertError::Internal(format!("conversion task failed: {e}"))))?;

    match result {
        ConversionResult::Success { html, .. } => Ok(Json(SingleResponse { html })),
        ConversionResult::Failure { error, .. } => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error })),
        )),
    }
}
