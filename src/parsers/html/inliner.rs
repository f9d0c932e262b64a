use crate::styles::StructuralTag;

use super::dom::{append_node_style, for_each_element};
use super::extractor::ContentTree;

/// 为结构标签追加固定的内联样式，返回处理的元素数量
///
/// 已有的 `style` 属性保留在前面。样式不去重，同一棵树处理两次会出现重复的样式文本。
pub fn inline_structural_styles(tree: &mut ContentTree) -> usize {
    let mut styled = 0;

    for_each_element(tree.root(), &mut |node, name| {
        if let Some(tag) = StructuralTag::from_name(name) {
            append_node_style(node, tag.style());
            styled += 1;
        }
    });

    styled
}
