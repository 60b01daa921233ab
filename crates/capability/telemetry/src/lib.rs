//! 追踪与请求 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// API 调用计数快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub api_requests: u64,
    pub api_failures: u64,
}

/// API 调用计数。
pub struct TelemetryMetrics {
    api_requests: AtomicU64,
    api_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            api_requests: AtomicU64::new(0),
            api_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            api_requests: self.api_requests.load(Ordering::Relaxed),
            api_failures: self.api_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录一次 API 调用。
pub fn record_api_request() {
    metrics().api_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次 API 调用失败。
pub fn record_api_failure() {
    metrics().api_failures.fetch_add(1, Ordering::Relaxed);
}
