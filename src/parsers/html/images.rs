use crate::styles::TemplateStyles;
use crate::utils::url::{is_absolute_http_url, resolve_url, Url};

use super::dom::{append_node_style, get_node_attr, set_node_attr};
use super::extractor::ContentTree;

/// 处理所有 `<img>`：相对地址改写为绝对地址，并追加模板的图片样式
///
/// 无法解析的地址保持原样，不会中断整个转换。返回处理的图片数量。
pub fn normalize_images(tree: &mut ContentTree, page_url: &str, styles: &TemplateStyles) -> usize {
    let base_url = match Url::parse(page_url) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("页面地址 '{}' 无法作为基础地址: {}", page_url, e);
            None
        }
    };

    let images = tree.elements("img");
    for img in images.iter() {
        if let Some(src) = get_node_attr(img, "src") {
            if !src.is_empty() && !is_absolute_http_url(&src) {
                if let Some(absolute) = base_url
                    .as_ref()
                    .and_then(|base| resolve_url(base, &src).ok())
                {
                    set_node_attr(img, "src", Some(absolute.to_string()));
                } else {
                    tracing::debug!("图片地址 '{}' 无法解析，保持原样", src);
                }
            }
        }

        append_node_style(img, styles.img);
    }

    images.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::Template;

    fn srcs(tree: &ContentTree) -> Vec<Option<String>> {
        tree.elements("img")
            .iter()
            .map(|img| get_node_attr(img, "src"))
            .collect()
    }

    #[test]
    fn test_resolves_relative_sources() {
        let mut tree = ContentTree::from_markup(
            "<img src=\"/a.png\"><img src=\"b/c.jpg\"><img src=\"https://cdn.ex.com/d.gif\"><img src=\"HTTP://EX.COM/E.PNG\">",
        )
        .unwrap();

        assert_eq!(normalize_images(&mut tree, "https://ex.com/blog/p", Template::Simple.styles()), 4);
        assert_eq!(
            srcs(&tree),
            vec![
                Some("https://ex.com/a.png".to_string()),
                Some("https://ex.com/blog/b/c.jpg".to_string()),
                Some("https://cdn.ex.com/d.gif".to_string()),
                Some("HTTP://EX.COM/E.PNG".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_source_left_unchanged() {
        let mut tree =
            ContentTree::from_markup("<img src=\"//[::1\"><img src=\"/ok.png\">").unwrap();
        normalize_images(&mut tree, "https://ex.com/p", Template::Simple.styles());
        assert_eq!(
            srcs(&tree),
            vec![
                Some("//[::1".to_string()),
                Some("https://ex.com/ok.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_leaves_sources() {
        let mut tree = ContentTree::from_markup("<img src=\"/a.png\">").unwrap();
        normalize_images(&mut tree, "not a url", Template::Simple.styles());
        assert_eq!(srcs(&tree), vec![Some("/a.png".to_string())]);
    }

    #[test]
    fn test_appends_template_image_style() {
        let mut tree = ContentTree::from_markup("<img alt=\"x\"><img style=\"border:0;\" src=\"a.png\">")
            .unwrap();
        normalize_images(&mut tree, "https://ex.com/", Template::Clean.styles());

        let styles: Vec<Option<String>> = tree
            .elements("img")
            .iter()
            .map(|img| get_node_attr(img, "style"))
            .collect();
        assert_eq!(
            styles,
            vec![
                Some(Template::Clean.styles().img.to_string()),
                Some(format!("border:0;{}", Template::Clean.styles().img)),
            ]
        );
        assert_eq!(get_node_attr(&tree.elements("img")[0], "src"), None);
    }
}
