//! 客户端错误类型
//!
//! 每次 API 调用的失败分类：
//! - Transport：连接、超时、请求构造等 reqwest 层错误
//! - Status：非 2xx 且响应体不是标准错误信封
//! - Api：服务端返回的错误信封（code + message）
//! - Decode：响应体外形不符
//! - MissingData：成功信封缺 data 字段

use reqwest::StatusCode;

/// 转发 API 调用错误。
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected http status: {0}")]
    Status(StatusCode),
    #[error("api error {code}: {message}")]
    Api { code: String, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("success response missing data")]
    MissingData,
}

impl ClientError {
    /// 用户可读的一行错误描述（会话层展示用）。
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
