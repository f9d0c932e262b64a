use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, SerializableHandle};

use crate::core::{ConvertError, ConvertResult};

/// 序列化节点的全部子节点（不包含节点自身）
pub fn serialize_children(node: &Handle) -> ConvertResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    serialize(&mut buf, &serializable, opts)
        .map_err(|e| ConvertError::Internal(format!("unable to serialize DOM: {e}")))?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
