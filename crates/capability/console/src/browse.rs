//! 列表控制器
//!
//! 规则/脚本表格背后的分页、过滤与行操作。变更后的刷新是一次
//! 全新的列表拉取，不做增量修补；刷新只发生在变更调用成功之后。

use api_contract::{PageResult, RulePageQuery, ScriptPageQuery};
use domain::{ForwardingRule, ForwardingScript};
use fwd_client::{ClientError, ForwardingApi};
use std::sync::Arc;

/// 规则列表控制器。
pub struct RuleBrowser {
    api: Arc<dyn ForwardingApi>,
    pub page: u32,
    pub page_size: u32,
    pub name_filter: Option<String>,
    pub enabled_filter: Option<i32>,
    pub rows: Vec<ForwardingRule>,
    pub total: i64,
}

impl RuleBrowser {
    pub fn new(api: Arc<dyn ForwardingApi>, page_size: u32) -> Self {
        Self {
            api,
            page: 1,
            page_size,
            name_filter: None,
            enabled_filter: None,
            rows: Vec::new(),
            total: 0,
        }
    }

    fn query(&self) -> RulePageQuery {
        RulePageQuery {
            page: self.page,
            page_size: self.page_size,
            name: self.name_filter.clone(),
            enabled: self.enabled_filter,
        }
    }

    /// 按当前分页与过滤条件重新拉取一页。
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let PageResult { list, total } = self.api.list_rules(&self.query()).await?;
        self.rows = list;
        self.total = total;
        Ok(())
    }

    /// 翻页后刷新。
    pub async fn goto_page(&mut self, page: u32) -> Result<(), ClientError> {
        self.page = page.max(1);
        self.refresh().await
    }

    /// 切换某行的启停：只发一次状态调用，目标值取当前值的反面；
    /// 调用成功才翻转本地展示状态，失败保持原样。
    pub async fn toggle_enabled(&mut self, index: usize) -> Result<(), ClientError> {
        let (id, next) = match self.rows.get(index) {
            Some(row) => match &row.id {
                Some(id) => (id.clone(), 1 - row.enabled.unwrap_or(0)),
                None => return Ok(()),
            },
            None => return Ok(()),
        };
        self.api.set_rule_status(&id, next).await?;
        if let Some(row) = self.rows.get_mut(index) {
            row.enabled = Some(next);
        }
        Ok(())
    }

    /// 删除一条规则：一次删除调用，成功后恰好一次列表刷新。
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.api.delete_rule(id).await?;
        self.refresh().await
    }
}

/// 脚本列表控制器。
pub struct ScriptBrowser {
    api: Arc<dyn ForwardingApi>,
    pub page: u32,
    pub page_size: u32,
    pub name_filter: Option<String>,
    pub rows: Vec<ForwardingScript>,
    pub total: i64,
}

impl ScriptBrowser {
    pub fn new(api: Arc<dyn ForwardingApi>, page_size: u32) -> Self {
        Self {
            api,
            page: 1,
            page_size,
            name_filter: None,
            rows: Vec::new(),
            total: 0,
        }
    }

    fn query(&self) -> ScriptPageQuery {
        ScriptPageQuery {
            page: self.page,
            page_size: self.page_size,
            name: self.name_filter.clone(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let PageResult { list, total } = self.api.list_scripts(&self.query()).await?;
        self.rows = list;
        self.total = total;
        Ok(())
    }

    pub async fn goto_page(&mut self, page: u32) -> Result<(), ClientError> {
        self.page = page.max(1);
        self.refresh().await
    }

    /// 删除一个脚本：一次删除调用，成功后恰好一次列表刷新。
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.api.delete_script(id).await?;
        self.refresh().await
    }
}
