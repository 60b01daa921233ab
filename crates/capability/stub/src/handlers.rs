//! 转发契约 handlers
//!
//! 每个 REST 操作一个 handler：校验 → 存储调用 → 信封封装。
//! 校验规则与管理端的客户端校验对齐：
//! - 规则：name 必填；target_type 只接受 http/mqtt
//! - 脚本：name、script_content 必填
//! - 试运行：script_content 必填

use crate::response::{bad_request_error, not_found_error, ok, ok_empty, storage_error};
use crate::routes::StubState;
use api_contract::{
    ForwardingRuleDto, ForwardingScriptDto, PageQuery, RulePageQuery, RuleStatusRequest,
    ScriptPageQuery, ScriptTestRequest, ScriptTestResult,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

/// 验证必填字段：去除首尾空格并检查非空。
fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

fn validate_targets(rule: &ForwardingRuleDto) -> Result<(), Response> {
    for target in &rule.targets {
        if !matches!(target.target_type.as_str(), "http" | "mqtt") {
            return Err(bad_request_error(format!(
                "unknown target type: {}",
                target.target_type
            )));
        }
    }
    Ok(())
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

// ---------- 规则 ----------

pub async fn list_rules(
    State(state): State<StubState>,
    Query(query): Query<RulePageQuery>,
) -> Response {
    match state.rules.page(&query) {
        Ok(page) => ok(page),
        Err(err) => storage_error(err),
    }
}

pub async fn get_rule(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    match state.rules.find(&id) {
        Ok(Some(rule)) => ok(rule),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn create_rule(
    State(state): State<StubState>,
    Json(mut req): Json<ForwardingRuleDto>,
) -> Response {
    req.name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    if let Err(response) = validate_targets(&req) {
        return response;
    }
    match state.rules.create(req) {
        Ok(rule) => ok(rule),
        Err(err) => storage_error(err),
    }
}

pub async fn update_rule(
    State(state): State<StubState>,
    Json(mut req): Json<ForwardingRuleDto>,
) -> Response {
    if req.id.is_none() {
        return bad_request_error("id required");
    }
    req.name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    if let Err(response) = validate_targets(&req) {
        return response;
    }
    match state.rules.update(req) {
        Ok(Some(rule)) => ok(rule),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn set_rule_status(
    State(state): State<StubState>,
    Json(req): Json<RuleStatusRequest>,
) -> Response {
    if !matches!(req.enabled, 0 | 1) {
        return bad_request_error(format!("enabled out of range: {}", req.enabled));
    }
    match state.rules.set_status(&req.id, req.enabled) {
        Ok(true) => ok_empty(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_rule(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    match state.rules.delete(&id) {
        Ok(true) => ok_empty(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

// ---------- 脚本 ----------

pub async fn list_scripts(
    State(state): State<StubState>,
    Query(query): Query<ScriptPageQuery>,
) -> Response {
    match state.scripts.page(&query) {
        Ok(page) => ok(page),
        Err(err) => storage_error(err),
    }
}

pub async fn list_all_scripts(State(state): State<StubState>) -> Response {
    match state.scripts.list_all() {
        Ok(scripts) => ok(scripts),
        Err(err) => storage_error(err),
    }
}

pub async fn get_script(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    match state.scripts.find(&id) {
        Ok(Some(script)) => ok(script),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn create_script(
    State(state): State<StubState>,
    Json(mut req): Json<ForwardingScriptDto>,
) -> Response {
    req.name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    req.script_content = match normalize_required(req.script_content, "script_content") {
        Ok(content) => content,
        Err(response) => return response,
    };
    match state.scripts.create(req) {
        Ok(script) => ok(script),
        Err(err) => storage_error(err),
    }
}

pub async fn update_script(
    State(state): State<StubState>,
    Json(mut req): Json<ForwardingScriptDto>,
) -> Response {
    if req.id.is_none() {
        return bad_request_error("id required");
    }
    req.name = match normalize_required(req.name, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    req.script_content = match normalize_required(req.script_content, "script_content") {
        Ok(content) => content,
        Err(response) => return response,
    };
    match state.scripts.update(req) {
        Ok(Some(script)) => ok(script),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_script(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    match state.scripts.delete(&id) {
        Ok(true) => ok_empty(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 脚本试运行的确定性替身。
///
/// 真实平台在沙箱里执行脚本；这里只区分三种结果：
/// - 报文不是合法 JSON：success:false + 报文错误
/// - 脚本含 `throw`：success:false + 脚本错误
/// - 其余：success:true，原样回显报文
pub async fn test_script(Json(req): Json<ScriptTestRequest>) -> Response {
    if req.script_content.trim().is_empty() {
        return bad_request_error("script_content required");
    }
    let result = match serde_json::from_str::<serde_json::Value>(&req.test_data) {
        Err(err) => ScriptTestResult {
            success: false,
            output: None,
            error: Some(format!("invalid test data: {err}")),
        },
        Ok(_) if req.script_content.contains("throw") => ScriptTestResult {
            success: false,
            output: None,
            error: Some("script error: explicit throw".to_string()),
        },
        Ok(value) => ScriptTestResult {
            success: true,
            output: Some(value.to_string()),
            error: None,
        },
    };
    ok(result)
}

// ---------- 协作方引用数据 ----------

pub async fn list_devices(
    State(state): State<StubState>,
    Query(query): Query<PageQuery>,
) -> Response {
    ok(state.reference.devices_page(&query))
}

pub async fn list_products(
    State(state): State<StubState>,
    Query(query): Query<PageQuery>,
) -> Response {
    ok(state.reference.products_page(&query))
}

pub async fn group_tree(State(state): State<StubState>) -> Response {
    ok(state.reference.group_tree())
}
