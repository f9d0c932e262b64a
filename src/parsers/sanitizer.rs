//! 白名单过滤
//!
//! 转换流程的最后一道关卡：只保留白名单中的标签与属性，其余全部丢弃。
//! 不在白名单里的标签只去掉标签本身，子内容保留；脚本、样式等标签连同内容一并删除。

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use ammonia::Builder;

/// 白名单配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SanitizeProfile {
    /// 所有标签都允许 style/colspan/rowspan/src/alt/id
    #[default]
    Standard,
    /// 按标签分配属性，并额外删除 `style` / `link` 元素
    Strict,
}

impl SanitizeProfile {
    pub fn name(&self) -> &'static str {
        match self {
            SanitizeProfile::Standard => "standard",
            SanitizeProfile::Strict => "strict",
        }
    }

    pub fn allow_list(&self) -> &'static AllowList {
        match self {
            SanitizeProfile::Standard => &STANDARD_ALLOW_LIST,
            SanitizeProfile::Strict => &STRICT_ALLOW_LIST,
        }
    }
}

impl fmt::Display for SanitizeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SanitizeProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(SanitizeProfile::Standard),
            "strict" => Ok(SanitizeProfile::Strict),
            _ => Err(format!("unknown sanitize profile '{s}'. Use: standard, strict")),
        }
    }
}

/// 标签与属性白名单
#[derive(Debug)]
pub struct AllowList {
    pub tags: &'static [&'static str],
    /// 对所有允许的标签生效的属性
    pub generic_attributes: &'static [&'static str],
    pub tag_attributes: &'static [(&'static str, &'static [&'static str])],
}

impl AllowList {
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }

    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.allows_tag(tag)
            && (self.generic_attributes.contains(&attribute)
                || self
                    .tag_attributes
                    .iter()
                    .any(|(name, attrs)| *name == tag && attrs.contains(&attribute)))
    }
}

pub const ALLOWED_TAGS: &[&str] = &[
    "p", "img", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "strong", "em", "ul", "ol",
    "li", "pre", "code", "section", "span", "table", "thead", "tbody", "tr", "th", "td",
];

/// 连同内容一起删除的标签
pub const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style", "iframe", "noscript"];

pub static STANDARD_ALLOW_LIST: AllowList = AllowList {
    tags: ALLOWED_TAGS,
    generic_attributes: &["style", "colspan", "rowspan", "src", "alt", "id"],
    tag_attributes: &[],
};

pub static STRICT_ALLOW_LIST: AllowList = AllowList {
    tags: ALLOWED_TAGS,
    generic_attributes: &["style"],
    tag_attributes: &[
        ("img", &["src", "alt"]),
        ("pre", &["id"]),
        ("th", &["colspan", "rowspan"]),
        ("td", &["colspan", "rowspan"]),
    ],
};

fn build_cleaner(allow_list: &'static AllowList) -> Builder<'static> {
    let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = allow_list
        .tag_attributes
        .iter()
        .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
        .collect();

    let mut builder = Builder::default();
    builder
        .tags(allow_list.tags.iter().copied().collect())
        .clean_content_tags(CLEAN_CONTENT_TAGS.iter().copied().collect())
        .generic_attributes(allow_list.generic_attributes.iter().copied().collect())
        .tag_attributes(tag_attributes)
        .link_rel(None);
    builder
}

/// 按白名单清理 HTML 片段
///
/// 不会失败：不允许的内容直接丢弃。
pub fn sanitize_html(html: &str, profile: SanitizeProfile) -> String {
    build_cleaner(profile.allow_list()).clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parse() {
        assert_eq!("standard".parse::<SanitizeProfile>().unwrap(), SanitizeProfile::Standard);
        assert_eq!("STRICT".parse::<SanitizeProfile>().unwrap(), SanitizeProfile::Strict);
        assert!("lenient".parse::<SanitizeProfile>().is_err());
    }

    #[test]
    fn test_unknown_tags_unwrapped() {
        let html = "<article><div><h1 style=\"a:b;\">T</h1></div></article>";
        assert_eq!(
            sanitize_html(html, SanitizeProfile::Standard),
            "<h1 style=\"a:b;\">T</h1>"
        );
    }

    #[test]
    fn test_dangerous_tags_dropped_with_content() {
        let html = "<p>a</p><script>alert(1)</script><style>p{}</style><iframe src=\"x\"></iframe>\
                    <link rel=\"stylesheet\" href=\"a.css\"><p>b</p>";
        let clean = sanitize_html(html, SanitizeProfile::Standard);
        assert_eq!(clean, "<p>a</p><p>b</p>");
        for tag in ["<script", "<style", "<iframe", "<link"] {
            assert!(!clean.contains(tag));
        }
    }

    #[test]
    fn test_attributes_filtered() {
        let html = "<p class=\"x\" onclick=\"evil()\" style=\"color:red;\" id=\"keep\">t</p>";
        assert_eq!(
            sanitize_html(html, SanitizeProfile::Standard),
            "<p style=\"color:red;\" id=\"keep\">t</p>"
        );
    }

    #[test]
    fn test_strict_attributes_per_tag() {
        let html = "<p id=\"drop\" style=\"a:b;\">t</p><pre id=\"pre-0-0\">c</pre>\
                    <img src=\"https://ex.com/a.png\" alt=\"a\" id=\"drop\">";
        assert_eq!(
            sanitize_html(html, SanitizeProfile::Strict),
            "<p style=\"a:b;\">t</p><pre id=\"pre-0-0\">c</pre><img src=\"https://ex.com/a.png\" alt=\"a\">"
        );
    }

    #[test]
    fn test_table_spans_kept() {
        let html = "<table><tbody><tr><td colspan=\"2\" rowspan=\"3\">x</td></tr></tbody></table>";
        for profile in [SanitizeProfile::Standard, SanitizeProfile::Strict] {
            assert_eq!(sanitize_html(html, profile), html);
        }
    }

    #[test]
    fn test_allow_list_queries() {
        let strict = SanitizeProfile::Strict.allow_list();
        assert!(strict.allows_attribute("img", "src"));
        assert!(strict.allows_attribute("pre", "id"));
        assert!(!strict.allows_attribute("p", "id"));
        assert!(!strict.allows_tag("article"));

        let standard = SanitizeProfile::Standard.allow_list();
        assert!(standard.allows_attribute("p", "id"));
        assert!(!standard.allows_attribute("a", "href"));
    }
}
