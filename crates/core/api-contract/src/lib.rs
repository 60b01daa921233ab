//! 转发 API 的稳定线上契约。
//!
//! 客户端与替身服务共享的 DTO 与响应信封：
//! - 响应信封：ApiResponse / ApiError（success + data + error 三件套）
//! - 分页契约：1 基 page + page_size，响应 {list, total}
//! - 规则与脚本 DTO：目标配置在这一层是不透明字符串，
//!   编解码发生在客户端边界，不会更深入
//! - 协作方引用数据 DTO：设备、产品、设备分组树
//!
//! 字段名即线上 JSON 字段名（snake_case，serde 默认），不做改名。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 分页响应体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub list: Vec<T>,
    pub total: i64,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

/// 规则列表查询参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulePageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<i32>,
}

/// 脚本列表查询参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 协作方列表查询参数（设备、产品）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// 规则的数据来源。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingSourceDto {
    /// 1=设备 2=产品 3=分组
    pub source_type: i32,
    pub source_id: String,
}

/// 规则的投递目标；`config` 是按 `target_type` 序列化的不透明串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingTargetDto {
    /// "http" | "mqtt"
    pub target_type: String,
    pub config: String,
}

/// 转发规则（创建请求不带 id，更新请求与响应带 id）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForwardingRuleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// 0/1；创建请求可缺省，由服务端分配
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub sources: Vec<ForwardingSourceDto>,
    #[serde(default)]
    pub targets: Vec<ForwardingTargetDto>,
}

/// 转发脚本（创建请求不带 id，更新请求与响应带 id）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForwardingScriptDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub script_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// 规则启停请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleStatusRequest {
    pub id: String,
    /// 目标状态 0/1
    pub enabled: i32,
}

/// 脚本试运行请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptTestRequest {
    pub script_content: String,
    pub test_data: String,
}

/// 脚本试运行结果。
///
/// `success:false` + `error` 表示脚本自身执行失败，是正常业务结果，
/// 与传输层错误无关。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptTestResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 设备摘要（下拉选项用）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSummaryDto {
    pub id: String,
    pub name: String,
}

/// 产品摘要（下拉选项用）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummaryDto {
    pub id: String,
    pub name: String,
}

/// 设备分组树节点；id/name 可能缺失，children 可缺省。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupTreeNodeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GroupTreeNodeDto>,
}
