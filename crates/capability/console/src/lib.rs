//! # 管理端会话层
//!
//! 转发管理界面背后的状态机：每次打开弹窗构造一个显式会话对象，
//! 不复用被副作用重置的共享状态。
//!
//! - [`rule_editor`]：规则编辑会话（来源/目标动态列表 + 目标配置
//!   子弹窗）
//! - [`script_editor`]：脚本编辑会话
//! - [`script_tester`]：脚本测试台
//! - [`options`]：参考选项加载（脚本、设备、产品、分组树），
//!   四路并发、各自独立成败
//! - [`browse`]：列表控制器（分页、过滤、启停、删除后刷新）
//! - [`validate`]：必填项校验与会话错误类型
//!
//! 所有网络访问经由 `fwd_client::ForwardingApi` 接口缝；测试用
//! 记录调用的内存假实现替换。

pub mod browse;
pub mod options;
pub mod rule_editor;
pub mod script_editor;
pub mod script_tester;
pub mod validate;

pub use browse::{RuleBrowser, ScriptBrowser};
pub use options::ReferenceOptions;
pub use rule_editor::{EditorMode, RuleEditorSession, TargetDialog};
pub use script_editor::{SCRIPT_TEMPLATE, ScriptEditorSession};
pub use script_tester::ScriptTester;
pub use validate::{SessionError, ValidationError};
