//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::ConvertResult;
use crate::network::{HttpFetcher, PageFetcher};
use crate::parsers::sanitizer::SanitizeProfile;
use crate::styles::Template;
use crate::web::config::WebConfig;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub default_template: Template,
    pub sanitize_profile: SanitizeProfile,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &WebConfig) -> Self {
        Self {
            fetcher,
            default_template: config.default_template,
            sanitize_profile: config.sanitize_profile,
            max_batch_size: config.max_batch_size,
        }
    }

    /// 使用 HTTP 抓取实现创建状态
    pub fn from_config(config: &WebConfig) -> ConvertResult<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout, config.user_agent.clone())?;
        Ok(Self::new(Arc::new(fetcher), config))
    }
}

/// 批量转换请求
///
/// `urls` 的类型在处理器中检查，以便返回统一的 400 错误。
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub urls: Option<serde_json::Value>,
    #[serde(default)]
    pub template: Option<String>,
}

/// 单页转换请求
#[derive(Debug, Deserialize)]
pub struct SingleRequest {
    pub url: String,
}

/// 单页转换响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SingleResponse {
    pub html: String,
}

/// 模板列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct TemplatesResponse {
    pub templates: Vec<String>,
    pub default: String,
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
