//! # RichPaste
//!
//! 抓取网页文章，将正文改写为全部使用内联样式的 HTML 片段，
//! 可以直接粘贴到只接受有限标签与属性的富文本编辑器中。
//!
//! ## 模块组织
//!
//! - `core` - 错误类型与单个页面的转换流程
//! - `batch` - 多 URL 的批量转换，失败互不影响
//! - `styles` - 模板与固定样式
//! - `parsers` - HTML 解析、正文提取、DOM 改写与白名单过滤
//! - `network` - 源页面抓取
//! - `env` - 环境变量配置
//! - `utils` - 工具函数
//! - `web` - HTTP API（可选）

pub mod batch;
pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod styles;
pub mod utils;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use batch::{convert_batch, convert_isolated, ConversionResult};
pub use self::core::*;
pub use network::*;
pub use parsers::sanitizer::{sanitize_html, SanitizeProfile};
pub use styles::{StructuralTag, Template, TemplateStyles};
