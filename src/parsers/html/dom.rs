use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{format_tendril, TendrilSink};
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::{ConvertError, ConvertResult};

/// 将 HTML 字节按给定编码解码后转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> ConvertResult<RcDom> {
    let s = match Encoding::for_label(document_encoding.as_bytes()) {
        Some(encoding) => {
            let (string, _, _) = encoding.decode(data);
            string.into_owned()
        }
        None => String::from_utf8_lossy(data).into_owned(),
    };

    parse_html(&s)
}

/// 将 HTML 字符串解析为 DOM
pub fn parse_html(html: &str) -> ConvertResult<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| ConvertError::Parse(format!("unable to read markup: {e}")))
}

/// 按文档顺序（深度优先、先序）查找所有指定名称的元素
pub fn find_elements(node: &Handle, element_name: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(node, element_name, &mut found);
    found
}

fn collect_elements(node: &Handle, element_name: &str, found: &mut Vec<Handle>) {
    if get_node_name(node) == Some(element_name) {
        found.push(node.clone());
    }

    for child_node in node.children.borrow().iter() {
        collect_elements(child_node, element_name, found);
    }
}

/// 按文档顺序返回第一个指定名称的元素
pub fn find_first_element(node: &Handle, element_name: &str) -> Option<Handle> {
    if get_node_name(node) == Some(element_name) {
        return Some(node.clone());
    }

    node.children
        .borrow()
        .iter()
        .find_map(|child| find_first_element(child, element_name))
}

/// 按文档顺序遍历所有元素节点
pub fn for_each_element<F>(node: &Handle, f: &mut F)
where
    F: FnMut(&Handle, &str),
{
    if let Some(name) = get_node_name(node) {
        f(node, name);
    }

    for child_node in node.children.borrow().iter() {
        for_each_element(child_node, f);
    }
}

/// 从整棵树中移除指定名称的元素（连同其全部子节点），返回移除数量
pub fn remove_elements(node: &Handle, element_names: &[&str]) -> usize {
    let mut removed = 0;

    node.children.borrow_mut().retain(|child| {
        let matches = get_node_name(child)
            .map(|name| element_names.contains(&name))
            .unwrap_or(false);
        if matches {
            removed += 1;
        }
        !matches
    });

    for child_node in node.children.borrow().iter() {
        removed += remove_elements(child_node, element_names);
    }

    removed
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 设置节点属性，`None` 表示删除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.as_deref() {
                    attrs_mut[i].value.clear();
                    attrs_mut[i].value.push_slice(attr_value);
                } else {
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value {
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// 将样式文本追加到元素现有的 `style` 属性之后
///
/// 纯字符串拼接，不做去重：对同一元素重复调用会得到重复的样式文本。
pub fn append_node_style(node: &Handle, style: &str) {
    let mut merged = get_node_attr(node, "style").unwrap_or_default();
    merged.push_str(style);
    set_node_attr(node, "style", Some(merged));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(dom: &RcDom) -> Handle {
        find_first_element(&dom.document, "body").unwrap()
    }

    #[test]
    fn test_find_elements_in_document_order() {
        let dom = parse_html("<div><pre>a</pre><section><pre>b</pre></section></div><pre>c</pre>")
            .unwrap();
        let pres = find_elements(&dom.document, "pre");
        assert_eq!(pres.len(), 3);

        let texts: Vec<String> = pres
            .iter()
            .map(|pre| match &pre.children.borrow()[0].data {
                NodeData::Text { contents } => contents.borrow().to_string(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_elements_recursively() {
        let dom = parse_html(
            "<body><p>keep</p><script>x()</script><div><iframe src=\"a\"></iframe><p>also</p></div></body>",
        )
        .unwrap();
        let removed = remove_elements(&dom.document, &["script", "iframe"]);
        assert_eq!(removed, 2);
        assert!(find_first_element(&dom.document, "script").is_none());
        assert!(find_first_element(&dom.document, "iframe").is_none());
        assert_eq!(find_elements(&body(&dom), "p").len(), 2);
    }

    #[test]
    fn test_set_and_remove_attr() {
        let dom = parse_html("<p id=\"x\">t</p>").unwrap();
        let p = find_first_element(&dom.document, "p").unwrap();

        set_node_attr(&p, "id", Some("y".to_string()));
        assert_eq!(get_node_attr(&p, "id").as_deref(), Some("y"));

        set_node_attr(&p, "title", Some("hello".to_string()));
        assert_eq!(get_node_attr(&p, "title").as_deref(), Some("hello"));

        set_node_attr(&p, "id", None);
        assert_eq!(get_node_attr(&p, "id"), None);
    }

    #[test]
    fn test_append_node_style_concatenates() {
        let dom = parse_html("<p style=\"color:red;\">t</p><span>s</span>").unwrap();
        let p = find_first_element(&dom.document, "p").unwrap();
        let span = find_first_element(&dom.document, "span").unwrap();

        append_node_style(&p, "margin:0;");
        append_node_style(&span, "margin:0;");
        append_node_style(&span, "margin:0;");

        assert_eq!(get_node_attr(&p, "style").as_deref(), Some("color:red;margin:0;"));
        assert_eq!(get_node_attr(&span, "style").as_deref(), Some("margin:0;margin:0;"));
    }

    #[test]
    fn test_html_to_dom_decodes_legacy_encoding() {
        let (bytes, _, _) = encoding_rs::GBK.encode("<p>中文</p>");
        let dom = html_to_dom(&bytes, "gbk").unwrap();
        let p = find_first_element(&dom.document, "p").unwrap();
        match &p.children.borrow()[0].data {
            NodeData::Text { contents } => assert_eq!(&**contents.borrow(), "中文"),
            _ => panic!("expected text node"),
        };
    }
}
