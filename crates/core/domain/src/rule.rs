//! 转发规则模型
//!
//! 规则把一个或多个数据来源绑定到一个或多个投递目标，
//! 可选地经过一段服务端执行的转换脚本。
//!
//! 不变式：
//! - 已持久化的规则必有服务端分配的 `id`；客户端正在编排的规则没有
//! - `sources` / `targets` 保持用户编排顺序
//! - 来源允许重复，客户端不做去重

use crate::target::ForwardingTarget;

/// 数据来源类型（闭集）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// 单台设备
    Device = 1,
    /// 产品（同配置的一类设备）
    Product = 2,
    /// 设备分组
    Group = 3,
}

impl SourceType {
    /// 线上传输使用的整数编码。
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl TryFrom<i32> for SourceType {
    type Error = UnknownSourceType;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SourceType::Device),
            2 => Ok(SourceType::Product),
            3 => Ok(SourceType::Group),
            other => Err(UnknownSourceType(other)),
        }
    }
}

/// 未知的来源类型编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown source type: {0}")]
pub struct UnknownSourceType(pub i32);

/// 规则的数据来源：类型 + 该类型命名空间下的外部标识。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingSource {
    pub source_type: SourceType,
    pub source_id: String,
}

impl ForwardingSource {
    pub fn new(source_type: SourceType, source_id: impl Into<String>) -> Self {
        Self {
            source_type,
            source_id: source_id.into(),
        }
    }

    /// 新增来源行的默认值：设备类型 + 空 id，待用户选择。
    pub fn placeholder() -> Self {
        Self::new(SourceType::Device, "")
    }
}

/// 转发规则。
#[derive(Debug, Clone, Default)]
pub struct ForwardingRule {
    /// 服务端分配；客户端编排中的规则为 None
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub remark: Option<String>,
    /// 0/1；None 表示尚未持久化、由服务端分配默认值
    pub enabled: Option<i32>,
    /// 可空引用转换脚本；None 表示不做转换
    pub script_id: Option<String>,
    pub script_name: Option<String>,
    /// 服务端分配的租户归属
    pub tenant_id: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub sources: Vec<ForwardingSource>,
    pub targets: Vec<ForwardingTarget>,
}

impl ForwardingRule {
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(1)
    }
}
