//! 内存存储实现
//!
//! 使用 RwLock + HashMap 提供线程安全的内存存储，仅用于测试与
//! 本地联调。记录直接采用线上 DTO 外形：替身和真实服务端一样，
//! 把目标配置当作不透明字符串保存，不做解码。

use api_contract::{
    DeviceSummaryDto, ForwardingRuleDto, ForwardingScriptDto, GroupTreeNodeDto, PageQuery,
    PageResult, ProductSummaryDto, RulePageQuery, ScriptPageQuery,
};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// 替身存储错误（锁中毒等内部故障）。
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn poisoned() -> Self {
        Self::new("store lock poisoned")
    }
}

/// 当前毫秒时间戳（服务端分配 created_at/updated_at 用）。
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// 替身统一的租户标记。
const STUB_TENANT: &str = "tenant-1";

fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageResult<T> {
    let total = items.len() as i64;
    let page = page.max(1) as usize;
    let page_size = page_size.max(1) as usize;
    let start = (page - 1) * page_size;
    let list = if start >= items.len() {
        Vec::new()
    } else {
        items[start..(start + page_size).min(items.len())].to_vec()
    };
    PageResult { list, total }
}

/// 规则内存存储。
pub struct InMemoryRuleStore {
    rules: RwLock<HashMap<String, ForwardingRuleDto>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(HashMap::new()),
        }
    }

    /// 过滤 + 分页；按创建时间（再按 id）稳定排序。
    pub fn page(
        &self,
        query: &RulePageQuery,
    ) -> Result<PageResult<ForwardingRuleDto>, StoreError> {
        let rules = self.rules.read().map_err(|_| StoreError::poisoned())?;
        let mut items: Vec<ForwardingRuleDto> = rules
            .values()
            .filter(|rule| match &query.name {
                Some(name) => rule.name.contains(name.as_str()),
                None => true,
            })
            .filter(|rule| match query.enabled {
                Some(enabled) => rule.enabled == Some(enabled),
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(paginate(&items, query.page, query.page_size))
    }

    pub fn find(&self, id: &str) -> Result<Option<ForwardingRuleDto>, StoreError> {
        let rules = self.rules.read().map_err(|_| StoreError::poisoned())?;
        Ok(rules.get(id).cloned())
    }

    /// 创建：分配 id/租户/时间戳，enabled 缺省为 1。
    pub fn create(
        &self,
        mut rule: ForwardingRuleDto,
    ) -> Result<ForwardingRuleDto, StoreError> {
        let now = now_ms();
        rule.id = Some(uuid::Uuid::new_v4().to_string());
        rule.tenant_id = Some(STUB_TENANT.to_string());
        rule.enabled = Some(rule.enabled.unwrap_or(1));
        rule.created_at = Some(now);
        rule.updated_at = Some(now);
        let mut rules = self.rules.write().map_err(|_| StoreError::poisoned())?;
        if let Some(id) = &rule.id {
            rules.insert(id.clone(), rule.clone());
        }
        Ok(rule)
    }

    /// 更新：保留创建侧字段，刷新 updated_at；id 不存在返回 None。
    pub fn update(
        &self,
        mut rule: ForwardingRuleDto,
    ) -> Result<Option<ForwardingRuleDto>, StoreError> {
        let mut rules = self.rules.write().map_err(|_| StoreError::poisoned())?;
        let id = match rule.id.clone() {
            Some(id) => id,
            None => return Ok(None),
        };
        let existing = match rules.get(&id) {
            Some(existing) => existing.clone(),
            None => return Ok(None),
        };
        rule.tenant_id = existing.tenant_id.clone();
        rule.created_at = existing.created_at;
        rule.enabled = Some(rule.enabled.or(existing.enabled).unwrap_or(1));
        rule.updated_at = Some(now_ms());
        rules.insert(id, rule.clone());
        Ok(Some(rule))
    }

    /// 启停：id 不存在返回 false。
    pub fn set_status(&self, id: &str, enabled: i32) -> Result<bool, StoreError> {
        let mut rules = self.rules.write().map_err(|_| StoreError::poisoned())?;
        match rules.get_mut(id) {
            Some(rule) => {
                rule.enabled = Some(enabled);
                rule.updated_at = Some(now_ms());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 删除：id 不存在返回 false。
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut rules = self.rules.write().map_err(|_| StoreError::poisoned())?;
        Ok(rules.remove(id).is_some())
    }
}

impl Default for InMemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 脚本内存存储。
pub struct InMemoryScriptStore {
    scripts: RwLock<HashMap<String, ForwardingScriptDto>>,
}

impl InMemoryScriptStore {
    pub fn new() -> Self {
        Self {
            scripts: RwLock::new(HashMap::new()),
        }
    }

    pub fn page(
        &self,
        query: &ScriptPageQuery,
    ) -> Result<PageResult<ForwardingScriptDto>, StoreError> {
        let scripts = self.scripts.read().map_err(|_| StoreError::poisoned())?;
        let mut items: Vec<ForwardingScriptDto> = scripts
            .values()
            .filter(|script| match &query.name {
                Some(name) => script.name.contains(name.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(paginate(&items, query.page, query.page_size))
    }

    /// 下拉选项用：全量列表，不分页。
    pub fn list_all(&self) -> Result<Vec<ForwardingScriptDto>, StoreError> {
        let scripts = self.scripts.read().map_err(|_| StoreError::poisoned())?;
        let mut items: Vec<ForwardingScriptDto> = scripts.values().cloned().collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }

    pub fn find(&self, id: &str) -> Result<Option<ForwardingScriptDto>, StoreError> {
        let scripts = self.scripts.read().map_err(|_| StoreError::poisoned())?;
        Ok(scripts.get(id).cloned())
    }

    pub fn create(
        &self,
        mut script: ForwardingScriptDto,
    ) -> Result<ForwardingScriptDto, StoreError> {
        let now = now_ms();
        script.id = Some(uuid::Uuid::new_v4().to_string());
        script.tenant_id = Some(STUB_TENANT.to_string());
        script.enabled = Some(script.enabled.unwrap_or(1));
        script.created_at = Some(now);
        script.updated_at = Some(now);
        let mut scripts = self.scripts.write().map_err(|_| StoreError::poisoned())?;
        if let Some(id) = &script.id {
            scripts.insert(id.clone(), script.clone());
        }
        Ok(script)
    }

    pub fn update(
        &self,
        mut script: ForwardingScriptDto,
    ) -> Result<Option<ForwardingScriptDto>, StoreError> {
        let mut scripts = self.scripts.write().map_err(|_| StoreError::poisoned())?;
        let id = match script.id.clone() {
            Some(id) => id,
            None => return Ok(None),
        };
        let existing = match scripts.get(&id) {
            Some(existing) => existing.clone(),
            None => return Ok(None),
        };
        script.tenant_id = existing.tenant_id.clone();
        script.created_at = existing.created_at;
        script.enabled = Some(script.enabled.or(existing.enabled).unwrap_or(1));
        script.updated_at = Some(now_ms());
        scripts.insert(id, script.clone());
        Ok(Some(script))
    }

    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut scripts = self.scripts.write().map_err(|_| StoreError::poisoned())?;
        Ok(scripts.remove(id).is_some())
    }
}

impl Default for InMemoryScriptStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 协作方引用数据（设备、产品、分组树），只读。
pub struct ReferenceData {
    devices: Vec<DeviceSummaryDto>,
    products: Vec<ProductSummaryDto>,
    group_tree: Vec<GroupTreeNodeDto>,
}

impl ReferenceData {
    pub fn new(
        devices: Vec<DeviceSummaryDto>,
        products: Vec<ProductSummaryDto>,
        group_tree: Vec<GroupTreeNodeDto>,
    ) -> Self {
        Self {
            devices,
            products,
            group_tree,
        }
    }

    /// 联调用的演示数据：三台设备、两个产品、两层分组树。
    pub fn seeded() -> Self {
        let devices = vec![
            DeviceSummaryDto {
                id: "dev-1".to_string(),
                name: "温度计-01".to_string(),
            },
            DeviceSummaryDto {
                id: "dev-2".to_string(),
                name: "温度计-02".to_string(),
            },
            DeviceSummaryDto {
                id: "dev-3".to_string(),
                name: "电表-01".to_string(),
            },
        ];
        let products = vec![
            ProductSummaryDto {
                id: "prod-1".to_string(),
                name: "温度计".to_string(),
            },
            ProductSummaryDto {
                id: "prod-2".to_string(),
                name: "电表".to_string(),
            },
        ];
        let group_tree = vec![GroupTreeNodeDto {
            id: Some("g-1".to_string()),
            name: Some("厂区A".to_string()),
            children: vec![
                GroupTreeNodeDto {
                    id: Some("g-1-1".to_string()),
                    name: Some("一号车间".to_string()),
                    children: Vec::new(),
                },
                GroupTreeNodeDto {
                    id: Some("g-1-2".to_string()),
                    name: Some("二号车间".to_string()),
                    children: Vec::new(),
                },
            ],
        }];
        Self::new(devices, products, group_tree)
    }

    pub fn devices_page(&self, query: &PageQuery) -> PageResult<DeviceSummaryDto> {
        paginate(&self.devices, query.page, query.page_size)
    }

    pub fn products_page(&self, query: &PageQuery) -> PageResult<ProductSummaryDto> {
        paginate(&self.products, query.page, query.page_size)
    }

    pub fn group_tree(&self) -> Vec<GroupTreeNodeDto> {
        self.group_tree.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_named(name: &str) -> ForwardingRuleDto {
        ForwardingRuleDto {
            name: name.to_string(),
            ..ForwardingRuleDto::default()
        }
    }

    #[test]
    fn create_assigns_server_side_fields() {
        let store = InMemoryRuleStore::new();
        let created = store.create(rule_named("r1")).expect("create");
        assert!(created.id.is_some());
        assert_eq!(created.tenant_id.as_deref(), Some("tenant-1"));
        assert_eq!(created.enabled, Some(1));
        assert!(created.created_at.is_some());
    }

    #[test]
    fn page_filters_by_name_and_enabled() {
        let store = InMemoryRuleStore::new();
        let kept = store.create(rule_named("温度上报")).expect("create");
        store.create(rule_named("电量上报")).expect("create");
        store
            .set_status(kept.id.as_deref().expect("id"), 0)
            .expect("status");

        let query = RulePageQuery {
            page: 1,
            page_size: 10,
            name: Some("温度".to_string()),
            enabled: Some(0),
        };
        let page = store.page(&query).expect("page");
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].name, "温度上报");
    }

    #[test]
    fn pagination_is_one_based_and_bounded() {
        let store = InMemoryScriptStore::new();
        for index in 0..5 {
            store
                .create(ForwardingScriptDto {
                    name: format!("s{index}"),
                    script_content: "return".to_string(),
                    ..ForwardingScriptDto::default()
                })
                .expect("create");
        }
        let query = ScriptPageQuery {
            page: 2,
            page_size: 2,
            name: None,
        };
        let page = store.page(&query).expect("page");
        assert_eq!(page.total, 5);
        assert_eq!(page.list.len(), 2);

        let query = ScriptPageQuery {
            page: 9,
            page_size: 2,
            name: None,
        };
        let page = store.page(&query).expect("page");
        assert_eq!(page.total, 5);
        assert!(page.list.is_empty());
    }

    #[test]
    fn update_preserves_creation_fields() {
        let store = InMemoryRuleStore::new();
        let created = store.create(rule_named("r1")).expect("create");
        let mut edited = created.clone();
        edited.name = "r1-改".to_string();
        edited.tenant_id = None;
        edited.created_at = None;
        let updated = store.update(edited).expect("update").expect("found");
        assert_eq!(updated.name, "r1-改");
        assert_eq!(updated.tenant_id, created.tenant_id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn missing_ids_are_reported() {
        let store = InMemoryRuleStore::new();
        assert!(store.find("nope").expect("find").is_none());
        assert!(!store.set_status("nope", 1).expect("status"));
        assert!(!store.delete("nope").expect("delete"));
        assert!(
            store
                .update(ForwardingRuleDto {
                    id: Some("nope".to_string()),
                    name: "r".to_string(),
                    ..ForwardingRuleDto::default()
                })
                .expect("update")
                .is_none()
        );
    }
}
