use markup5ever_rcdom::Handle;

use super::dom::{find_elements, get_node_attr};

/// 解析 Content-Type 值，返回（媒体类型，字符集）
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut parts = content_type.split(';');
    let media_type = parts.next().unwrap_or_default().trim().to_lowercase();
    let mut charset = String::new();

    for part in parts {
        let part = part.trim();
        if part.get(..8).is_some_and(|key| key.eq_ignore_ascii_case("charset=")) {
            charset = part[8..].trim().trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}

/// 从文档的 `<meta>` 标签中读取字符集
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_elements(node, "meta").iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            // <meta charset="..." />
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                // <meta http-equiv="content-type" content="text/html; charset=..." />
                let (_media_type, charset) = parse_content_type(&meta_content_type_node_attr_value);
                if !charset.is_empty() {
                    return Some(charset);
                }
            }
        }
    }

    None
}
