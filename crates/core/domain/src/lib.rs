//! 转发领域模型
//!
//! 定义数据转发管理端共享的领域类型：
//! - 转发规则：ForwardingRule、ForwardingSource
//! - 转发目标：ForwardingTarget、TargetConfig（HTTP/MQTT 标签联合）
//! - 目标配置编解码：codec（编码/解码/摘要）
//! - 转发脚本：ForwardingScript
//! - 设备分组树：GroupNode 与扁平化
//!
//! 线上传输形态（不透明字符串、DTO）不在本 crate：目标配置在领域层
//! 始终是带标签的联合类型，字符串只存在于 api-contract 边界。

pub mod codec;
pub mod group;
pub mod rule;
pub mod script;
pub mod target;

pub use codec::{decode_config, encode_config, summarize_config};
pub use group::{GroupNode, GroupOption, flatten_group_tree};
pub use rule::{ForwardingRule, ForwardingSource, SourceType};
pub use script::ForwardingScript;
pub use target::{
    ForwardingTarget, HttpMethod, HttpTargetConfig, MqttTargetConfig, TargetConfig,
    TargetConfigError, TargetKind,
};
