use markup5ever_rcdom::RcDom;
use thiserror::Error;

use crate::network::{FetchedPage, PageFetcher};
use crate::parsers::html::{
    decode_document, extract_content, inline_structural_styles, normalize_images, parse_html,
    rewrite_code_blocks, rewrite_tables,
};
use crate::parsers::sanitizer::{sanitize_html, SanitizeProfile};
use crate::styles::Template;

/// 转换过程中可能出现的错误
///
/// 图片地址解析失败不属于错误，只会记录日志。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// 网络错误或非 2xx 响应
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// 文档无法解析
    #[error("parse failed: {0}")]
    Parse(String),

    /// 请求本身无效（缺少或错误的 URL 列表等）
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// 内部错误
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// 是否属于请求层面的错误（对应 4xx）
    pub fn is_request_error(&self) -> bool {
        matches!(self, ConvertError::InvalidRequest(_))
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// 转换选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub template: Template,
    pub profile: SanitizeProfile,
}

impl ConvertOptions {
    pub fn new(template: Template, profile: SanitizeProfile) -> Self {
        Self { template, profile }
    }
}

/// 用模板的 body 样式包裹清理后的内容
pub fn wrap_output(template: Template, content: &str) -> String {
    format!(
        "<section style=\"{}\">{}</section>",
        template.styles().body,
        content
    )
}

/// 单个 URL 的转换流程
///
/// 正文提取 -> 结构样式 -> 图片地址与样式 -> 代码块与表格 -> 白名单过滤 -> 包裹。
/// 各阶段依次独占正文树，白名单过滤只在最后执行一次。
pub struct ContentPipeline {
    options: ConvertOptions,
    url_index: usize,
}

impl ContentPipeline {
    pub fn new(options: ConvertOptions, url_index: usize) -> Self {
        Self { options, url_index }
    }

    /// 处理已解析的文档，`page_url` 用作图片地址的解析基础
    pub fn process(&self, dom: RcDom, page_url: &str) -> ConvertResult<String> {
        let styles = self.options.template.styles();

        // 1. 提取正文
        let mut tree = extract_content(&dom, self.options.profile)?;
        drop(dom);

        // 2. 结构标签样式
        let styled = inline_structural_styles(&mut tree);

        // 3. 图片
        let images = normalize_images(&mut tree, page_url, styles);

        // 4. 代码块与表格
        let blocks = rewrite_code_blocks(&mut tree, self.url_index, styles);
        let tables = rewrite_tables(&mut tree);

        tracing::debug!(
            "{}: {} 个结构元素, {} 张图片, {} 个代码块, {} 个表格",
            page_url,
            styled,
            images,
            blocks,
            tables
        );

        // 5. 白名单过滤
        let styled_html = tree.inner_html()?;
        let clean_html = sanitize_html(&styled_html, self.options.profile);

        // 6. 包裹
        Ok(wrap_output(self.options.template, &clean_html))
    }
}

/// 转换一段 HTML 字符串
pub fn convert_document(
    html: &str,
    page_url: &str,
    options: ConvertOptions,
    url_index: usize,
) -> ConvertResult<String> {
    let dom = parse_html(html)?;
    ContentPipeline::new(options, url_index).process(dom, page_url)
}

/// 转换已抓取的页面，按响应头与文档声明处理字符集
pub fn convert_page(
    page: &FetchedPage,
    options: ConvertOptions,
    url_index: usize,
) -> ConvertResult<String> {
    let dom = decode_document(&page.body, page.content_type.as_deref())?;
    ContentPipeline::new(options, url_index).process(dom, &page.final_url)
}

/// 抓取并转换一个 URL
pub fn convert_url(
    fetcher: &dyn PageFetcher,
    url: &str,
    options: ConvertOptions,
    url_index: usize,
) -> ConvertResult<String> {
    tracing::info!("开始转换 [{}] {} (模板: {})", url_index, url, options.template);
    let page = fetcher.fetch(url)?;
    let html = convert_page(&page, options, url_index)?;
    tracing::info!("转换完成 [{}] {} ({} 字节)", url_index, url, html.len());
    Ok(html)
}
