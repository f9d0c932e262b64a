use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::core::{ConvertError, ConvertResult};
use crate::utils::url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 抓取到的源页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// 跟随重定向后的最终地址，用作图片地址的解析基础
    pub final_url: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedPage {
    pub fn from_html(url: &str, html: &str) -> Self {
        FetchedPage {
            final_url: url.to_string(),
            body: html.as_bytes().to_vec(),
            content_type: Some("text/html; charset=utf-8".to_string()),
        }
    }
}

/// 页面抓取接口
///
/// 同一个实现会被多个转换任务同时使用，因此要求 `Send + Sync`。
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> ConvertResult<FetchedPage>;
}

/// 基于 reqwest 阻塞客户端的抓取实现
///
/// 客户端在创建时构建一次，同一抓取器的所有请求共用其连接池。
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> ConvertResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.into())
            .build()
            .map_err(|e| ConvertError::Internal(format!("unable to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// 默认超时与 User-Agent
    pub fn with_defaults() -> ConvertResult<Self> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }
}

/// 校验目标地址：必须能解析且为 http/https
pub fn parse_target_url(url: &str) -> ConvertResult<Url> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| ConvertError::Fetch(format!("invalid URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ConvertError::Fetch(format!(
            "unsupported URL scheme '{scheme}' in '{url}'"
        ))),
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ConvertResult<FetchedPage> {
        let target = parse_target_url(url)?;

        let response = self.client.get(target).send().map_err(|e| {
            if e.is_timeout() {
                ConvertError::Fetch(format!(
                    "request to {url} timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                ConvertError::Fetch(format!("request to {url} failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Fetch(format!("{url} responded with {status}")));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(|e| ConvertError::Fetch(format!("failed to read body of {url}: {e}")))?
            .to_vec();

        tracing::debug!("抓取完成: {} ({} 字节)", final_url, body.len());

        Ok(FetchedPage {
            final_url,
            body,
            content_type,
        })
    }
}
