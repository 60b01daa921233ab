//! # 转发 API 替身
//!
//! 平台转发服务 REST 契约的内存实现，供两处使用：
//! - 集成测试：进程内起一个真实 HTTP 服务，客户端对着它跑全量操作
//! - 本地联调：`fwd-stub-api` 二进制起同一个路由，前端无需平台环境
//!
//! 行为对齐真实服务端的外部可见面：
//! - `{success, data, error}` 响应信封，1 基分页 {list, total}
//! - 服务端分配 id（UUID v4）、租户（tenant-1）与毫秒时间戳
//! - name / script_content 必填校验返回 INVALID.REQUEST
//! - 未知 id 返回 RESOURCE.NOT_FOUND
//!
//! 脚本试运行是确定性替身：报文能解析成 JSON 则原样回显为输出；
//! 脚本含 `throw` 或报文不是 JSON 则按脚本失败返回。真实的脚本
//! 运行时在平台侧，不在本仓库。

pub mod handlers;
pub mod response;
pub mod routes;
pub mod store;

pub use routes::{StubState, router};
pub use store::{InMemoryRuleStore, InMemoryScriptStore, ReferenceData, StoreError};
