//! HTML解析和处理模块
//!
//! - `dom`: 解析与基础DOM操作
//! - `metadata`: 字符集等文档元数据
//! - `serializer`: 序列化
//! - `extractor`: 正文区域提取
//! - `inliner`: 结构标签内联样式
//! - `images`: 图片地址与样式
//! - `structure`: 代码块与表格改写

pub mod dom;
pub mod extractor;
pub mod images;
pub mod inliner;
pub mod metadata;
pub mod serializer;
pub mod structure;

pub use dom::{
    append_node_style, find_elements, find_first_element, get_node_attr, get_node_name,
    html_to_dom, parse_html, set_node_attr,
};
pub use extractor::{decode_document, extract_content, ContentTree};
pub use images::normalize_images;
pub use inliner::inline_structural_styles;
pub use metadata::{get_charset, parse_content_type};
pub use serializer::serialize_children;
pub use structure::{code_block_id, rewrite_code_blocks, rewrite_tables};
