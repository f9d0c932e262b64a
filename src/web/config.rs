//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use std::time::Duration;

use crate::env::{EnvConfig, EnvError, EnvResult};
use crate::parsers::sanitizer::SanitizeProfile;
use crate::styles::Template;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// CORS 允许的源，包含 `*` 时不做限制
    pub cors_origins: Vec<String>,
    /// 单次批量请求允许的最多 URL 数
    pub max_batch_size: usize,
    /// 请求未指定模板时使用的模板
    pub default_template: Template,
    pub sanitize_profile: SanitizeProfile,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self::from(EnvConfig::from_env()?))
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "RICHPASTE_WEB_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: "RICHPASTE_WEB_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.max_batch_size == 0 {
            return Err(EnvError {
                variable: "RICHPASTE_MAX_BATCH_SIZE".to_string(),
                message: "Batch size must be greater than 0".to_string(),
            });
        }

        if self.cors_origins.is_empty() {
            tracing::warn!("未配置 CORS 源，跨域请求将被拒绝");
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// 是否允许任意源
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

impl From<EnvConfig> for WebConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            bind_addr: env.web_bind_address,
            port: env.web_port,
            cors_origins: env.cors_origins,
            max_batch_size: env.max_batch_size,
            default_template: env.default_template,
            sanitize_profile: env.sanitize_profile,
            fetch_timeout: env.fetch_timeout,
            user_agent: env.user_agent,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load web config from environment: {}. Using defaults.", e);
            Self::from(EnvConfig::default())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_env_config() {
        let config = WebConfig::from(EnvConfig::default());
        assert_eq!(config.listen_address(), "127.0.0.1:7080");
        assert_eq!(config.max_batch_size, 20);
        assert_eq!(config.default_template, Template::Simple);
        assert!(config.allows_any_origin());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = WebConfig::from(EnvConfig::default());
        config.port = 0;
        assert_eq!(config.validate().unwrap_err().variable, "RICHPASTE_WEB_PORT");

        let mut config = WebConfig::from(EnvConfig::default());
        config.bind_addr.clear();
        assert!(config.validate().is_err());

        let mut config = WebConfig::from(EnvConfig::default());
        config.max_batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_origins() {
        let mut config = WebConfig::from(EnvConfig::default());
        config.cors_origins = vec!["https://editor.example.com".to_string()];
        assert!(!config.allows_any_origin());
    }
}
