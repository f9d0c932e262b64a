//! 批量转换
//!
//! 每个 URL 独立执行完整流程，单个 URL 的失败只记录在它自己的结果里，
//! 不影响同一批次中的其他 URL。结果顺序始终与输入顺序一致。

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::core::{convert_url, ConvertError, ConvertOptions, ConvertResult};
use crate::network::PageFetcher;

/// 单个 URL 的转换结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConversionResult {
    Success { url: String, html: String },
    Failure { url: String, error: String },
}

impl ConversionResult {
    pub fn from_result(url: &str, result: ConvertResult<String>) -> Self {
        match result {
            Ok(html) => ConversionResult::Success {
                url: url.to_string(),
                html,
            },
            Err(e) => {
                tracing::warn!("转换失败 {}: {}", url, e);
                ConversionResult::Failure {
                    url: url.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ConversionResult::Success { url, .. } | ConversionResult::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success { .. })
    }

    pub fn html(&self) -> Option<&str> {
        match self {
            ConversionResult::Success { html, .. } => Some(html),
            ConversionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConversionResult::Success { .. } => None,
            ConversionResult::Failure { error, .. } => Some(error),
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "conversion panicked".to_string())
}

/// 转换单个 URL，任何 panic 都转换为该 URL 的错误
pub fn convert_isolated(
    fetcher: &dyn PageFetcher,
    url: &str,
    options: ConvertOptions,
    url_index: usize,
) -> ConversionResult {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        convert_url(fetcher, url, options, url_index)
    }))
    .unwrap_or_else(|payload| Err(ConvertError::Internal(panic_message(payload))));

    ConversionResult::from_result(url, result)
}

/// 顺序转换一批 URL
pub fn convert_batch(
    fetcher: &dyn PageFetcher,
    urls: &[String],
    options: ConvertOptions,
) -> Vec<ConversionResult> {
    urls.iter()
        .enumerate()
        .map(|(url_index, url)| convert_isolated(fetcher, url, options, url_index))
        .collect()
}

/// 并行转换一批 URL
///
/// 每个 URL 在阻塞线程池中执行，按输入顺序汇总结果。
#[cfg(feature = "web")]
pub async fn convert_batch_parallel(
    fetcher: std::sync::Arc<dyn PageFetcher>,
    urls: Vec<String>,
    options: ConvertOptions,
) -> Vec<ConversionResult> {
    let tasks = urls.into_iter().enumerate().map(|(url_index, url)| {
        let fetcher = fetcher.clone();
        async move {
            let task_url = url.clone();
            match tokio::task::spawn_blocking(move || {
                convert_isolated(fetcher.as_ref(), &task_url, options, url_index)
            })
            .await
            {
                Ok(result) => result,
                Err(e) => ConversionResult::from_result(
                    &url,
                    Err(ConvertError::Internal(format!("conversion task failed: {e}"))),
                ),
            }
        }
    });

    futures::future::join_all(tasks).await
}
