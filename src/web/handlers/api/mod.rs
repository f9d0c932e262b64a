//! API 处理器

pub mod convert;
pub mod meta;

pub use convert::*;
pub use meta::*;
