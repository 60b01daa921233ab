//! # 转发 API 客户端
//!
//! 平台转发服务 REST 接口的类型化封装，管理端其余能力都经由
//! 这里访问网络。
//!
//! ## 分层
//!
//! - [`api`]：`ForwardingApi` trait，上层（编辑会话、列表控制器）
//!   依赖的接口缝，测试里用内存假实现替换
//! - [`http`]：`ForwardingClient`，基于 reqwest 的真实实现
//! - [`convert`]：DTO 与领域类型互转；目标配置的不透明字符串在
//!   这一层被编解码，不会泄漏给上层
//! - [`error`]：`ClientError` 错误分类（传输 / 状态码 / 服务端错误
//!   信封 / 响应解码）
//!
//! 本层不做重试：任何失败立即向调用方返回。

pub mod api;
pub mod convert;
pub mod error;
pub mod http;

pub use api::ForwardingApi;
pub use error::ClientError;
pub use http::ForwardingClient;
