//! 统一的环境变量管理系统
//!
//! 类型安全、可验证的环境变量读取，所有变量都带默认值与说明

use std::env;
use std::fmt;
use std::time::Duration;

use crate::parsers::sanitizer::SanitizeProfile;
use crate::styles::Template;

/// 环境变量解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 应用运行模式
    pub struct Mode;
    impl EnvVar<String> for Mode {
        const NAME: &'static str = "RICHPASTE_MODE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Application mode: development, staging, production";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("production".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "development" | "dev" => Ok("development".to_string()),
                "staging" | "stage" => Ok("staging".to_string()),
                "production" | "prod" => Ok("production".to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid mode '{}'. Use: development, staging, production",
                        value
                    ),
                }),
            }
        }
    }

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "RICHPASTE_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "Log level: trace, debug, info, warn, error (defaults to debug in development mode)";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 转换相关环境变量
pub mod convert {
    use super::*;

    /// 默认模板
    pub struct DefaultTemplate;
    impl EnvVar<Template> for DefaultTemplate {
        const NAME: &'static str = "RICHPASTE_DEFAULT_TEMPLATE";
        const DEFAULT: Option<Template> = Some(Template::Simple);
        const DESCRIPTION: &'static str = "Template used when a request names none: simple, clean, code";

        fn parse(value: &str) -> EnvResult<Template> {
            value.parse().map_err(|e| EnvError {
                variable: Self::NAME.to_string(),
                message: format!("{}. Use: simple, clean, code", e),
            })
        }
    }

    /// 白名单配置
    pub struct SanitizeProfileVar;
    impl EnvVar<SanitizeProfile> for SanitizeProfileVar {
        const NAME: &'static str = "RICHPASTE_SANITIZE_PROFILE";
        const DEFAULT: Option<SanitizeProfile> = Some(SanitizeProfile::Standard);
        const DESCRIPTION: &'static str = "Allow-list profile: standard, strict";

        fn parse(value: &str) -> EnvResult<SanitizeProfile> {
            value.parse().map_err(|message| EnvError {
                variable: Self::NAME.to_string(),
                message,
            })
        }
    }

    /// 单批次最多 URL 数
    pub struct MaxBatchSize;
    impl EnvVar<usize> for MaxBatchSize {
        const NAME: &'static str = "RICHPASTE_MAX_BATCH_SIZE";
        const DEFAULT: Option<usize> = Some(20);
        const DESCRIPTION: &'static str = "Maximum number of URLs accepted in one batch request";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 100)
        }
    }
}

/// 抓取相关环境变量
pub mod fetch {
    use super::*;

    /// 抓取超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "RICHPASTE_FETCH_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Source page fetch timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            if seconds > 300 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout too long (max 300 seconds)".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }

    /// User-Agent
    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "RICHPASTE_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent header sent when fetching source pages";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::network::fetch::DEFAULT_USER_AGENT.to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let agent = value.trim();
            if agent.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "User agent cannot be empty".to_string(),
                });
            }
            Ok(agent.to_string())
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "RICHPASTE_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "RICHPASTE_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }

    /// CORS允许的源
    pub struct CorsOrigins;
    impl EnvVar<Vec<String>> for CorsOrigins {
        const NAME: &'static str = "RICHPASTE_CORS_ORIGINS";
        const DEFAULT: Option<Vec<String>> = None;
        const DESCRIPTION: &'static str = "CORS allowed origins (comma-separated, '*' for any)";

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(vec!["*".to_string()]),
            }
        }

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub mode: String,
    pub log_level: String,

    pub default_template: Template,
    pub sanitize_profile: SanitizeProfile,
    pub max_batch_size: usize,

    pub fetch_timeout: Duration,
    pub user_agent: String,

    pub web_bind_address: String,
    pub web_port: u16,
    pub cors_origins: Vec<String>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        let mode = core::Mode::get()?;
        let explicit_log_level = env::var(core::LogLevel::NAME).ok();

        Self {
            mode: String::new(),
            log_level: String::new(),

            default_template: convert::DefaultTemplate::get()?,
            sanitize_profile: convert::SanitizeProfileVar::get()?,
            max_batch_size: convert::MaxBatchSize::get()?,

            fetch_timeout: fetch::Timeout::get()?,
            user_agent: fetch::UserAgent::get()?,

            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,
            cors_origins: web::CorsOrigins::get()?,
        }
        .with_mode(&mode, explicit_log_level.as_deref())
    }

    pub fn is_development(&self) -> bool {
        self.mode == "development"
    }

    /// 设置运行模式并确定日志级别
    ///
    /// 未显式指定日志级别时，开发模式默认 debug，其余模式默认 info。
    pub fn with_mode(mut self, mode: &str, explicit_log_level: Option<&str>) -> EnvResult<Self> {
        self.mode = core::Mode::parse(mode)?;
        self.log_level = match explicit_log_level {
            Some(level) => core::LogLevel::parse(level)?,
            None if self.is_development() => "debug".to_string(),
            None => "info".to_string(),
        };
        Ok(self)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            mode: "production".to_string(),
            log_level: "info".to_string(),
            default_template: Template::default(),
            sanitize_profile: SanitizeProfile::default(),
            max_batch_size: 20,
            fetch_timeout: crate::network::fetch::DEFAULT_TIMEOUT,
            user_agent: crate::network::fetch::DEFAULT_USER_AGENT.to_string(),
            web_bind_address: "127.0.0.1".to_string(),
            web_port: 7080,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    fn line(name: &str, description: &str, default: &str) -> String {
        format!("- `{}`: {} (default: {})\n", name, description, default)
    }

    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Core\n\n");
    docs.push_str(&line(core::Mode::NAME, core::Mode::DESCRIPTION, "production"));
    docs.push_str(&line(
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION,
        "info, debug in development",
    ));

    docs.push_str("\n## Conversion\n\n");
    docs.push_str(&line(
        convert::DefaultTemplate::NAME,
        convert::DefaultTemplate::DESCRIPTION,
        Template::default().name(),
    ));
    docs.push_str(&line(
        convert::SanitizeProfileVar::NAME,
        convert::SanitizeProfileVar::DESCRIPTION,
        SanitizeProfile::default().name(),
    ));
    docs.push_str(&line(
        convert::MaxBatchSize::NAME,
        convert::MaxBatchSize::DESCRIPTION,
        "20",
    ));

    docs.push_str("\n## Fetch\n\n");
    docs.push_str(&line(fetch::Timeout::NAME, fetch::Timeout::DESCRIPTION, "30"));
    docs.push_str(&line(
        fetch::UserAgent::NAME,
        fetch::UserAgent::DESCRIPTION,
        "desktop browser UA",
    ));

    docs.push_str("\n## Web Server\n\n");
    docs.push_str(&line(web::BindAddress::NAME, web::BindAddress::DESCRIPTION, "127.0.0.1"));
    docs.push_str(&line(web::Port::NAME, web::Port::DESCRIPTION, "7080"));
    docs.push_str(&line(web::CorsOrigins::NAME, web::CorsOrigins::DESCRIPTION, "*"));

    docs
}
