//! 正文提取
//!
//! 先从整篇文档中删除不安全或非正文元素，再按 `article` -> `main` -> `body`
//! 的顺序选取正文区域，取其内部标记（不含外层元素）重新解析为独立的 `ContentTree`。

use encoding_rs::Encoding;
use markup5ever_rcdom::{Handle, RcDom};

use crate::core::{ConvertError, ConvertResult};
use crate::parsers::sanitizer::SanitizeProfile;

use super::dom::{
    find_elements, find_first_element, get_child_node_by_name, html_to_dom, parse_html,
    remove_elements,
};
use super::metadata::{get_charset, parse_content_type};
use super::serializer::serialize_children;

/// 任何配置下都会删除的元素
pub const REMOVED_ELEMENTS: &[&str] = &["script", "iframe", "noscript"];

/// 严格模式下删除的元素
pub const STRICT_REMOVED_ELEMENTS: &[&str] = &["script", "iframe", "noscript", "style", "link"];

/// 正文区域的候选选择器，按优先级排列
pub const CONTENT_SELECTORS: &[&str] = &["article", "main", "body"];

/// 一个 URL 的正文子树
///
/// 每个转换任务独占一棵树，各阶段通过 `&mut ContentTree` 依次修改，不跨任务共享。
pub struct ContentTree {
    // 文档释放时会清空所有后代的子节点，需与根节点同生命周期
    _dom: RcDom,
    root: Handle,
}

impl ContentTree {
    /// 将正文标记解析为独立的树，根节点为重新解析后的 `body`
    pub fn from_markup(markup: &str) -> ConvertResult<ContentTree> {
        // 显式的 <body> 让开头的 style/link 等元素留在正文中，而不是被移到 <head>
        let dom = parse_html(&format!("<body>{}", markup))?;
        let root = get_child_node_by_name(&dom.document, "html")
            .and_then(|html| get_child_node_by_name(&html, "body"))
            .ok_or_else(|| ConvertError::Parse("content has no body element".to_string()))?;

        Ok(ContentTree { _dom: dom, root })
    }

    /// 空正文
    pub fn empty() -> ConvertResult<ContentTree> {
        Self::from_markup("")
    }

    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// 按文档顺序返回指定名称的所有元素
    pub fn elements(&self, element_name: &str) -> Vec<Handle> {
        find_elements(&self.root, element_name)
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.borrow().is_empty()
    }

    /// 当前正文的 HTML 标记
    pub fn inner_html(&self) -> ConvertResult<String> {
        serialize_children(&self.root)
    }
}

/// 将原始字节解码为 DOM
///
/// 字符集优先级：响应头 Content-Type -> 文档 `<meta>` -> UTF-8。
pub fn decode_document(data: &[u8], content_type: Option<&str>) -> ConvertResult<RcDom> {
    if let Some(content_type) = content_type {
        let (_media_type, charset) = parse_content_type(content_type);
        if let Some(encoding) = Encoding::for_label_no_replacement(charset.as_bytes()) {
            return html_to_dom(data, encoding.name());
        }
    }

    let dom = html_to_dom(data, "utf-8")?;

    match get_charset(&dom.document)
        .and_then(|charset| Encoding::for_label_no_replacement(charset.trim().as_bytes()))
    {
        Some(encoding) if encoding != encoding_rs::UTF_8 => {
            tracing::debug!("按文档声明的字符集 {} 重新解析", encoding.name());
            html_to_dom(data, encoding.name())
        }
        _ => Ok(dom),
    }
}

/// 从文档中提取正文
///
/// 正文为空时返回空树而不是错误。
pub fn extract_content(dom: &RcDom, profile: SanitizeProfile) -> ConvertResult<ContentTree> {
    let removed = match profile {
        SanitizeProfile::Standard => remove_elements(&dom.document, REMOVED_ELEMENTS),
        SanitizeProfile::Strict => remove_elements(&dom.document, STRICT_REMOVED_ELEMENTS),
    };
    tracing::debug!("删除了 {} 个非正文元素", removed);

    for selector in CONTENT_SELECTORS {
        if let Some(region) = find_first_element(&dom.document, selector) {
            let markup = serialize_children(&region)?;
            if !markup.is_empty() {
                tracing::debug!("正文区域: <{}>", selector);
                return ContentTree::from_markup(&markup);
            }
        }
    }

    tracing::debug!("未找到正文区域，使用空内容");
    ContentTree::empty()
}
