//! # 工具模块
//!
//! - `url` - 绝对地址判断与相对地址解析
//! - `logging` - tracing 日志初始化

pub mod logging;
pub mod url;

pub use logging::init_tracing;
pub use self::url::{is_absolute_http_url, resolve_url, Url};
