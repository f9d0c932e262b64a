//! # 解析器模块
//!
//! - `html` - HTML文档解析、正文提取与各阶段的DOM改写
//! - `sanitizer` - 基于白名单的最终过滤

pub mod html;
pub mod sanitizer;

pub use html::{decode_document, extract_content, html_to_dom, parse_html, ContentTree};
pub use sanitizer::{sanitize_html, AllowList, SanitizeProfile};
