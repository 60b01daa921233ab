//! HTTP 响应辅助函数
//!
//! 统一的错误响应构造：所有错误走 ApiResponse 信封，HTTP 状态码
//! 与错误码对应。

use crate::store::StoreError;
use api_contract::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// 错误请求响应（必填项缺失、取值非法）。
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到响应。
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 存储层错误响应。
pub fn storage_error(err: StoreError) -> Response {
    tracing::error!(error = %err, "stub store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("STORAGE.ERROR", err.to_string())),
    )
        .into_response()
}

/// 成功响应。
pub fn ok<T: serde::Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 无数据的成功响应（启停、删除）。
pub fn ok_empty() -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::<serde_json::Value>::success(
            serde_json::Value::Null,
        )),
    )
        .into_response()
}
