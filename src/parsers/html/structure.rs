//! 结构改写：代码块与表格
//!
//! - `pre` 追加模板样式并获得 `pre-{url序号}-{块序号}` 形式的 id，前端依赖该格式定位代码块
//! - `code` 追加模板样式
//! - `table` / `th` / `td` / 偶数行 `tr` 追加固定样式，与模板无关

use markup5ever_rcdom::Handle;

use crate::styles::{TemplateStyles, TABLE_CELL_STYLE, TABLE_STRIPE_STYLE, TABLE_STYLE};

use super::dom::{append_node_style, get_node_name, set_node_attr};
use super::extractor::ContentTree;

/// 代码块 id，`url_index` 为批次中的 URL 序号，`block_index` 为该页中 `pre` 的序号（均从 0 开始）
pub fn code_block_id(url_index: usize, block_index: usize) -> String {
    format!("pre-{url_index}-{block_index}")
}

/// 处理 `pre` 与 `code`，返回代码块（`pre`）数量
pub fn rewrite_code_blocks(
    tree: &mut ContentTree,
    url_index: usize,
    styles: &TemplateStyles,
) -> usize {
    let blocks = tree.elements("pre");
    for (block_index, pre) in blocks.iter().enumerate() {
        append_node_style(pre, styles.pre);
        set_node_attr(pre, "id", Some(code_block_id(url_index, block_index)));
    }

    for code in tree.elements("code").iter() {
        append_node_style(code, styles.code);
    }

    blocks.len()
}

/// 处理所有表格，返回表格数量
///
/// 每个 `table` 都处理其全部后代，嵌套表格中的单元格与行按外层表格数重复追加样式。
pub fn rewrite_tables(tree: &mut ContentTree) -> usize {
    let tables = tree.elements("table");
    for table in tables.iter() {
        append_node_style(table, TABLE_STYLE);
        style_table_descendants(table);
    }

    tables.len()
}

fn style_table_descendants(node: &Handle) {
    let mut element_position = 0;

    for child in node.children.borrow().iter() {
        let Some(name) = get_node_name(child) else {
            continue;
        };
        // nth-child 语义：在父元素的所有元素子节点中的位置（从 1 开始）
        element_position += 1;

        match name {
            "th" | "td" => append_node_style(child, TABLE_CELL_STYLE),
            "tr" if element_position % 2 == 0 => append_node_style(child, TABLE_STRIPE_STYLE),
            _ => {}
        }

        style_table_descendants(child);
    }
}
