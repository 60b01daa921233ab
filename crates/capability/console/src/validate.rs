//! 输入验证辅助与会话错误类型
//!
//! 验证规则：
//! - 去除首尾空格
//! - 必填字段非空才通过；失败在任何网络调用之前返回
//! - 可选字段空串视为未填写（提交载荷中省略）

use fwd_client::ClientError;

/// 客户端校验错误（拦截在网络调用之前）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} required")]
    Required(&'static str),
}

/// 会话操作错误：校验失败或 API 调用失败，会话保持打开可重试。
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// 验证必填字段，去除空格并检查非空。
pub fn normalize_required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// 规整可选字段：空串归一为 None。
pub fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
