//! 路由定义
//!
//! 集中管理替身服务的所有路由，将路径映射到对应的 handlers：
//! - 健康检查：/health
//! - 规则：/data_forwarding/rules*
//! - 脚本：/data_forwarding/scripts*
//! - 协作方引用数据：/devices、/products、/device_groups/tree

use crate::handlers::*;
use crate::store::{InMemoryRuleStore, InMemoryScriptStore, ReferenceData};
use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use fwd_telemetry::new_request_ids;
use std::sync::Arc;
use tracing::Instrument;

/// 替身服务共享状态。
#[derive(Clone)]
pub struct StubState {
    pub rules: Arc<InMemoryRuleStore>,
    pub scripts: Arc<InMemoryScriptStore>,
    pub reference: Arc<ReferenceData>,
}

impl StubState {
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            rules: Arc::new(InMemoryRuleStore::new()),
            scripts: Arc::new(InMemoryScriptStore::new()),
            reference: Arc::new(reference),
        }
    }

    /// 空的规则/脚本存储 + 演示引用数据。
    pub fn seeded() -> Self {
        Self::new(ReferenceData::seeded())
    }
}

/// 创建替身服务路由。
pub fn router(state: StubState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/data_forwarding/rules", get(list_rules).post(create_rule).put(update_rule))
        .route("/data_forwarding/rules/status", put(set_rule_status))
        .route(
            "/data_forwarding/rules/:id",
            get(get_rule).delete(delete_rule),
        )
        .route(
            "/data_forwarding/scripts",
            get(list_scripts).post(create_script).put(update_script),
        )
        .route("/data_forwarding/scripts/all", get(list_all_scripts))
        .route("/data_forwarding/scripts/test", post(test_script))
        .route(
            "/data_forwarding/scripts/:id",
            get(get_script).delete(delete_script),
        )
        .route("/devices", get(list_devices))
        .route("/products", get(list_products))
        .route("/device_groups/tree", get(group_tree))
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(middleware::from_fn(request_context))
}

/// 为每个请求生成追踪 ID：挂到 span 上并回写 x-request-id 响应头。
async fn request_context(request: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let span = tracing::info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
    );
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&ids.request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
