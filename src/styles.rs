//! 样式目录
//!
//! 所有样式都是进程级只读常量：
//!
//! - `Template`: 模板名 -> body/code/pre/img 四种角色样式
//! - `StructuralTag`: 结构标签（标题、段落、列表、引用）的固定样式
//! - 表格相关的固定样式，不随模板变化

use std::fmt;
use std::str::FromStr;

/// 表格本身的固定样式
pub const TABLE_STYLE: &str = "border-collapse:collapse;width:100%;margin:10px 0;overflow-x:auto;";
/// `th` / `td` 单元格的固定样式
pub const TABLE_CELL_STYLE: &str = "border:1px solid #ccc;padding:6px;text-align:left;";
/// 偶数行的斑马线底色
pub const TABLE_STRIPE_STYLE: &str = "background:#f9f9f9;";

/// 一个模板的四种角色样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStyles {
    pub body: &'static str,
    pub code: &'static str,
    pub pre: &'static str,
    pub img: &'static str,
}

const SIMPLE: TemplateStyles = TemplateStyles {
    body: "font-family:Arial,sans-serif;color:#333;line-height:1.8;",
    code: "font-family:Consolas, monospace;background:#f5f5f5;padding:2px 4px;border-radius:3px;",
    pre: "background:#f5f5f5;padding:8px;border-radius:4px;overflow:auto;margin:6px 0;",
    img: "max-width:100%;height:auto;margin:10px 0;",
};

const CLEAN: TemplateStyles = TemplateStyles {
    body: "font-family:'PingFang SC',Helvetica,Arial,sans-serif;color:#444;line-height:2;background:#fff;",
    code: "font-family:Consolas, monospace;background:#eee;padding:2px 4px;border-radius:3px;",
    pre: "background:#f5f5f5;padding:10px;border-radius:5px;overflow:auto;margin:6px 0;",
    img: "display:block;margin:10px auto;max-width:100%;",
};

const CODE: TemplateStyles = TemplateStyles {
    body: "font-family:Arial, sans-serif;color:#333;line-height:1.8;",
    code: "font-family:Consolas, monospace;background:#eee;padding:2px 4px;border-radius:3px;color:#2d2d2d;",
    pre: "background:#2d2d2d;color:#f8f8f2;padding:10px;border-radius:5px;overflow:auto;margin:6px 0;",
    img: "max-width:100%;height:auto;margin:10px 0;",
};

/// 可选模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Template {
    #[default]
    Simple,
    Clean,
    Code,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Simple, Template::Clean, Template::Code];

    /// 按名称查找模板，未知名称回退到默认模板
    ///
    /// 查找永远不会失败：空名称静默回退，无法识别的名称记录一条警告后回退。
    pub fn from_name(name: &str) -> Template {
        Template::from_name_or(name, Template::default())
    }

    /// 同 `from_name`，但回退到指定的模板
    pub fn from_name_or(name: &str, fallback: Template) -> Template {
        match name.parse::<Template>() {
            Ok(template) => template,
            Err(_) => {
                if !name.trim().is_empty() {
                    tracing::warn!("未知模板 '{}', 回退到 {}", name, fallback);
                }
                fallback
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Template::Simple => "simple",
            Template::Clean => "clean",
            Template::Code => "code",
        }
    }

    pub fn styles(&self) -> &'static TemplateStyles {
        match self {
            Template::Simple => &SIMPLE,
            Template::Clean => &CLEAN,
            Template::Code => &CODE,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 无法识别的模板名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTemplate(pub String);

impl fmt::Display for UnknownTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown template '{}'", self.0)
    }
}

impl std::error::Error for UnknownTemplate {}

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Template::Simple),
            "clean" => Ok(Template::Clean),
            "code" => Ok(Template::Code),
            _ => Err(UnknownTemplate(s.to_string())),
        }
    }
}

/// 接受固定内联样式的结构标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Ul,
    Ol,
    Li,
    Blockquote,
}

impl StructuralTag {
    pub const ALL: [StructuralTag; 11] = [
        StructuralTag::H1,
        StructuralTag::H2,
        StructuralTag::H3,
        StructuralTag::H4,
        StructuralTag::H5,
        StructuralTag::H6,
        StructuralTag::P,
        StructuralTag::Ul,
        StructuralTag::Ol,
        StructuralTag::Li,
        StructuralTag::Blockquote,
    ];

    /// 非结构标签返回 `None`
    pub fn from_name(name: &str) -> Option<StructuralTag> {
        match name {
            "h1" => Some(StructuralTag::H1),
            "h2" => Some(StructuralTag::H2),
            "h3" => Some(StructuralTag::H3),
            "h4" => Some(StructuralTag::H4),
            "h5" => Some(StructuralTag::H5),
            "h6" => Some(StructuralTag::H6),
            "p" => Some(StructuralTag::P),
            "ul" => Some(StructuralTag::Ul),
            "ol" => Some(StructuralTag::Ol),
            "li" => Some(StructuralTag::Li),
            "blockquote" => Some(StructuralTag::Blockquote),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StructuralTag::H1 => "h1",
            StructuralTag::H2 => "h2",
            StructuralTag::H3 => "h3",
            StructuralTag::H4 => "h4",
            StructuralTag::H5 => "h5",
            StructuralTag::H6 => "h6",
            StructuralTag::P => "p",
            StructuralTag::Ul => "ul",
            StructuralTag::Ol => "ol",
            StructuralTag::Li => "li",
            StructuralTag::Blockquote => "blockquote",
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            StructuralTag::H1 => "font-size:24px;font-weight:bold;margin:16px 0;color:#333;",
            StructuralTag::H2 => "font-size:22px;font-weight:bold;margin:14px 0;color:#333;",
            StructuralTag::H3 => "font-size:20px;font-weight:bold;margin:12px 0;color:#333;",
            StructuralTag::H4 => "font-size:18px;font-weight:bold;margin:10px 0;color:#333;",
            StructuralTag::H5 => "font-size:16px;font-weight:bold;margin:8px 0;color:#333;",
            StructuralTag::H6 => "font-size:14px;font-weight:bold;margin:8px 0;color:#555;",
            StructuralTag::P => "font-size:16px;margin:6px 0;color:#333;line-height:1.8;",
            StructuralTag::Ul | StructuralTag::Ol => "padding-left:20px;margin:6px 0;",
            StructuralTag::Li => "margin:4px 0;",
            StructuralTag::Blockquote => "border-left:4px solid #0078d7;padding-left:12px;color:#555;font-style:italic;margin:10px 0;background:#f3f7fb;",
        }
    }
}
