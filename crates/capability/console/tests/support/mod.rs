//! 测试用内存假 API：记录每次调用，支持按操作注入失败。
#![allow(dead_code)] // 各测试二进制只用到部分辅助方法

use api_contract::{
    DeviceSummaryDto, PageQuery, PageResult, ProductSummaryDto, RulePageQuery, ScriptPageQuery,
    ScriptTestRequest, ScriptTestResult,
};
use async_trait::async_trait;
use domain::{ForwardingRule, ForwardingScript, GroupNode};
use fwd_client::{ClientError, ForwardingApi};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    failing: HashSet<&'static str>,
    rules: HashMap<String, ForwardingRule>,
    scripts: HashMap<String, ForwardingScript>,
    group_tree: Vec<GroupNode>,
    next_id: u32,
    last_rule_query: Option<RulePageQuery>,
    last_script_query: Option<ScriptPageQuery>,
    last_created_rule: Option<ForwardingRule>,
    last_test_request: Option<ScriptTestRequest>,
    test_result: Option<ScriptTestResult>,
}

/// 记录调用的假 ForwardingApi。
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让指定操作开始失败。
    pub fn fail(&self, op: &'static str) {
        self.state.lock().expect("lock").failing.insert(op);
    }

    /// 恢复指定操作。
    pub fn recover(&self, op: &'static str) {
        self.state.lock().expect("lock").failing.remove(op);
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.state
            .lock()
            .expect("lock")
            .calls
            .iter()
            .filter(|call| call.as_str() == op)
            .count()
    }

    pub fn insert_rule(&self, rule: ForwardingRule) {
        let id = rule.id.clone().expect("rule id");
        self.state.lock().expect("lock").rules.insert(id, rule);
    }

    pub fn insert_script(&self, script: ForwardingScript) {
        let id = script.id.clone().expect("script id");
        self.state.lock().expect("lock").scripts.insert(id, script);
    }

    pub fn set_group_tree(&self, tree: Vec<GroupNode>) {
        self.state.lock().expect("lock").group_tree = tree;
    }

    pub fn set_test_result(&self, result: ScriptTestResult) {
        self.state.lock().expect("lock").test_result = Some(result);
    }

    pub fn rule(&self, id: &str) -> Option<ForwardingRule> {
        self.state.lock().expect("lock").rules.get(id).cloned()
    }

    pub fn last_rule_query(&self) -> Option<RulePageQuery> {
        self.state.lock().expect("lock").last_rule_query.clone()
    }

    pub fn last_script_query(&self) -> Option<ScriptPageQuery> {
        self.state.lock().expect("lock").last_script_query.clone()
    }

    pub fn last_created_rule(&self) -> Option<ForwardingRule> {
        self.state.lock().expect("lock").last_created_rule.clone()
    }

    pub fn last_test_request(&self) -> Option<ScriptTestRequest> {
        self.state.lock().expect("lock").last_test_request.clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ClientError> {
        let mut state = self.state.lock().expect("lock");
        state.calls.push(op.to_string());
        if state.failing.contains(op) {
            return Err(ClientError::Api {
                code: "STUB.FAIL".to_string(),
                message: format!("injected failure: {op}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ForwardingApi for FakeApi {
    async fn list_rules(
        &self,
        query: &RulePageQuery,
    ) -> Result<PageResult<ForwardingRule>, ClientError> {
        self.enter("list_rules")?;
        let mut state = self.state.lock().expect("lock");
        state.last_rule_query = Some(query.clone());
        let mut list: Vec<ForwardingRule> = state.rules.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        let total = list.len() as i64;
        Ok(PageResult { list, total })
    }

    async fn get_rule(&self, id: &str) -> Result<ForwardingRule, ClientError> {
        self.enter("get_rule")?;
        self.rule(id).ok_or(ClientError::Api {
            code: "RESOURCE.NOT_FOUND".to_string(),
            message: "not found".to_string(),
        })
    }

    async fn create_rule(&self, rule: &ForwardingRule) -> Result<ForwardingRule, ClientError> {
        self.enter("create_rule")?;
        let mut state = self.state.lock().expect("lock");
        state.next_id += 1;
        state.last_created_rule = Some(rule.clone());
        let mut saved = rule.clone();
        saved.id = Some(format!("rule-{}", state.next_id));
        saved.enabled = Some(saved.enabled.unwrap_or(1));
        if let Some(id) = &saved.id {
            state.rules.insert(id.clone(), saved.clone());
        }
        Ok(saved)
    }

    async fn update_rule(&self, rule: &ForwardingRule) -> Result<ForwardingRule, ClientError> {
        self.enter("update_rule")?;
        let mut state = self.state.lock().expect("lock");
        match rule.id.clone() {
            Some(id) if state.rules.contains_key(&id) => {
                state.rules.insert(id, rule.clone());
                Ok(rule.clone())
            }
            _ => Err(ClientError::Api {
                code: "RESOURCE.NOT_FOUND".to_string(),
                message: "not found".to_string(),
            }),
        }
    }

    async fn set_rule_status(&self, id: &str, enabled: i32) -> Result<(), ClientError> {
        self.enter("set_rule_status")?;
        let mut state = self.state.lock().expect("lock");
        match state.rules.get_mut(id) {
            Some(rule) => {
                rule.enabled = Some(enabled);
                Ok(())
            }
            None => Err(ClientError::Api {
                code: "RESOURCE.NOT_FOUND".to_string(),
                message: "not found".to_string(),
            }),
        }
    }

    async fn delete_rule(&self, id: &str) -> Result<(), ClientError> {
        self.enter("delete_rule")?;
        self.state.lock().expect("lock").rules.remove(id);
        Ok(())
    }

    async fn list_scripts(
        &self,
        query: &ScriptPageQuery,
    ) -> Result<PageResult<ForwardingScript>, ClientError> {
        self.enter("list_scripts")?;
        let mut state = self.state.lock().expect("lock");
        state.last_script_query = Some(query.clone());
        let mut list: Vec<ForwardingScript> = state.scripts.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        let total = list.len() as i64;
        Ok(PageResult { list, total })
    }

    async fn list_all_scripts(&self) -> Result<Vec<ForwardingScript>, ClientError> {
        self.enter("list_all_scripts")?;
        let state = self.state.lock().expect("lock");
        let mut list: Vec<ForwardingScript> = state.scripts.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    async fn get_script(&self, id: &str) -> Result<ForwardingScript, ClientError> {
        self.enter("get_script")?;
        let state = self.state.lock().expect("lock");
        state.scripts.get(id).cloned().ok_or(ClientError::Api {
            code: "RESOURCE.NOT_FOUND".to_string(),
            message: "not found".to_string(),
        })
    }

    async fn create_script(
        &self,
        script: &ForwardingScript,
    ) -> Result<ForwardingScript, ClientError> {
        self.enter("create_script")?;
        let mut state = self.state.lock().expect("lock");
        state.next_id += 1;
        let mut saved = script.clone();
        saved.id = Some(format!("script-{}", state.next_id));
        saved.enabled = Some(saved.enabled.unwrap_or(1));
        if let Some(id) = &saved.id {
            state.scripts.insert(id.clone(), saved.clone());
        }
        Ok(saved)
    }

    async fn update_script(
        &self,
        script: &ForwardingScript,
    ) -> Result<ForwardingScript, ClientError> {
        self.enter("update_script")?;
        let mut state = self.state.lock().expect("lock");
        match script.id.clone() {
            Some(id) if state.scripts.contains_key(&id) => {
                state.scripts.insert(id, script.clone());
                Ok(script.clone())
            }
            _ => Err(ClientError::Api {
                code: "RESOURCE.NOT_FOUND".to_string(),
                message: "not found".to_string(),
            }),
        }
    }

    async fn delete_script(&self, id: &str) -> Result<(), ClientError> {
        self.enter("delete_script")?;
        self.state.lock().expect("lock").scripts.remove(id);
        Ok(())
    }

    async fn test_script(
        &self,
        request: &ScriptTestRequest,
    ) -> Result<ScriptTestResult, ClientError> {
        self.enter("test_script")?;
        let mut state = self.state.lock().expect("lock");
        state.last_test_request = Some(request.clone());
        Ok(state.test_result.clone().unwrap_or(ScriptTestResult {
            success: true,
            output: Some(request.test_data.clone()),
            error: None,
        }))
    }

    async fn list_devices(
        &self,
        _query: &PageQuery,
    ) -> Result<PageResult<DeviceSummaryDto>, ClientError> {
        self.enter("list_devices")?;
        let list = vec![DeviceSummaryDto {
            id: "dev-1".to_string(),
            name: "温度计-01".to_string(),
        }];
        let total = list.len() as i64;
        Ok(PageResult { list, total })
    }

    async fn list_products(
        &self,
        _query: &PageQuery,
    ) -> Result<PageResult<ProductSummaryDto>, ClientError> {
        self.enter("list_products")?;
        let list = vec![ProductSummaryDto {
            id: "prod-1".to_string(),
            name: "温度计".to_string(),
        }];
        let total = list.len() as i64;
        Ok(PageResult { list, total })
    }

    async fn group_tree(&self) -> Result<Vec<GroupNode>, ClientError> {
        self.enter("group_tree")?;
        Ok(self.state.lock().expect("lock").group_tree.clone())
    }
}
