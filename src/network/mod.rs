//! # 网络模块
//!
//! 源页面的抓取。转换流程只依赖 `PageFetcher` 接口，默认实现为
//! 基于 reqwest 阻塞客户端的 `HttpFetcher`。

pub mod fetch;

pub use fetch::{parse_target_url, FetchedPage, HttpFetcher, PageFetcher};
