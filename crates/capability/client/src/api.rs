//! 转发 API 接口缝
//!
//! 上层能力（编辑会话、列表控制器、选项加载）依赖本 trait 而非具体
//! 实现；测试用内存假实现替换网络。方法与服务端操作一一对应，
//! 除参数整形外不做业务逻辑。

use crate::error::ClientError;
use api_contract::{
    DeviceSummaryDto, PageQuery, PageResult, ProductSummaryDto, RulePageQuery, ScriptPageQuery,
    ScriptTestRequest, ScriptTestResult,
};
use async_trait::async_trait;
use domain::{ForwardingRule, ForwardingScript, GroupNode};

/// 平台转发服务的操作集合。
#[async_trait]
pub trait ForwardingApi: Send + Sync {
    /// GET /data_forwarding/rules
    async fn list_rules(
        &self,
        query: &RulePageQuery,
    ) -> Result<PageResult<ForwardingRule>, ClientError>;

    /// GET /data_forwarding/rules/{id}
    async fn get_rule(&self, id: &str) -> Result<ForwardingRule, ClientError>;

    /// POST /data_forwarding/rules（规则不带 id）
    async fn create_rule(&self, rule: &ForwardingRule) -> Result<ForwardingRule, ClientError>;

    /// PUT /data_forwarding/rules（规则带 id）
    async fn update_rule(&self, rule: &ForwardingRule) -> Result<ForwardingRule, ClientError>;

    /// PUT /data_forwarding/rules/status
    async fn set_rule_status(&self, id: &str, enabled: i32) -> Result<(), ClientError>;

    /// DELETE /data_forwarding/rules/{id}
    async fn delete_rule(&self, id: &str) -> Result<(), ClientError>;

    /// GET /data_forwarding/scripts
    async fn list_scripts(
        &self,
        query: &ScriptPageQuery,
    ) -> Result<PageResult<ForwardingScript>, ClientError>;

    /// GET /data_forwarding/scripts/all
    async fn list_all_scripts(&self) -> Result<Vec<ForwardingScript>, ClientError>;

    /// GET /data_forwarding/scripts/{id}
    async fn get_script(&self, id: &str) -> Result<ForwardingScript, ClientError>;

    /// POST /data_forwarding/scripts（脚本不带 id）
    async fn create_script(
        &self,
        script: &ForwardingScript,
    ) -> Result<ForwardingScript, ClientError>;

    /// PUT /data_forwarding/scripts（脚本带 id）
    async fn update_script(
        &self,
        script: &ForwardingScript,
    ) -> Result<ForwardingScript, ClientError>;

    /// DELETE /data_forwarding/scripts/{id}
    async fn delete_script(&self, id: &str) -> Result<(), ClientError>;

    /// POST /data_forwarding/scripts/test
    async fn test_script(
        &self,
        request: &ScriptTestRequest,
    ) -> Result<ScriptTestResult, ClientError>;

    /// GET /devices（协作方：设备选项）
    async fn list_devices(
        &self,
        query: &PageQuery,
    ) -> Result<PageResult<DeviceSummaryDto>, ClientError>;

    /// GET /products（协作方：产品选项）
    async fn list_products(
        &self,
        query: &PageQuery,
    ) -> Result<PageResult<ProductSummaryDto>, ClientError>;

    /// GET /device_groups/tree（协作方：分组树）
    async fn group_tree(&self) -> Result<Vec<GroupNode>, ClientError>;
}
