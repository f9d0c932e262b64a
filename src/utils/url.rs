use std::sync::OnceLock;

use regex::Regex;
pub use url::{ParseError, Url};

fn absolute_http_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i-u)^https?://").expect("valid absolute URL pattern"))
}

/// 是否已经是 `http(s)://` 开头的绝对地址（不区分大小写）
pub fn is_absolute_http_url(url: &str) -> bool {
    absolute_http_pattern().is_match(url)
}

/// 相对地址基于 `from` 解析为绝对地址
pub fn resolve_url(from: &Url, to: &str) -> Result<Url, ParseError> {
    from.join(to)
}
