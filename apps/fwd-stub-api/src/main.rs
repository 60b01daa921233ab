//! 转发 API 替身服务入口
//!
//! 本地联调用：起一个实现转发 REST 契约的内存服务，
//! 管理端前端对着它开发，无需平台环境。

use fwd_config::AppConfig;
use fwd_stub::{StubState, router};
use fwd_telemetry::init_tracing;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 替身自身不要求 FWD_API_BASE_URL
    let config = AppConfig::stub_from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 演示引用数据 + 空的规则/脚本存储
    let state = StubState::seeded();
    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.stub_addr).await?;
    tracing::info!(addr = %config.stub_addr, "fwd-stub-api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
