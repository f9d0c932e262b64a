//! Web 服务器模块
//!
//! 通过 HTTP 提供批量与单页转换接口

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::core::ConvertError;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> Result<(), ConvertError> {
        let app_state = Arc::new(AppState::from_config(&self.config)?);
        let app = create_router(app_state, &self.config);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| ConvertError::Internal(format!("Failed to bind server: {}", e)))?;

        tracing::info!(
            "Web server starting at http://{} (模板: {}, 白名单: {})",
            self.config.listen_address(),
            self.config.default_template,
            self.config.sanitize_profile
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| ConvertError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// 根据配置构建 CORS 层
fn cors_layer(config: &WebConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("忽略无效的 CORS 源: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(cors_layer(config))
}
