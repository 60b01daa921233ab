//! 参考选项加载
//!
//! 规则编辑器打开时并发拉取四类下拉选项：脚本、设备、产品、
//! 设备分组树。四路各自独立成败：某一路失败只标记该路错误，
//! 其余照常可用，不再整体放弃。

use api_contract::{DeviceSummaryDto, PageQuery, ProductSummaryDto};
use domain::{ForwardingScript, GroupOption, flatten_group_tree};
use fwd_client::{ClientError, ForwardingApi};

/// 选项拉取的每页条数：下拉场景一次取满。
const OPTION_PAGE_SIZE: u32 = 1000;

/// 四类下拉选项，每类独立携带成败。
pub struct ReferenceOptions {
    pub scripts: Result<Vec<ForwardingScript>, ClientError>,
    pub devices: Result<Vec<DeviceSummaryDto>, ClientError>,
    pub products: Result<Vec<ProductSummaryDto>, ClientError>,
    pub groups: Result<Vec<GroupOption>, ClientError>,
}

impl ReferenceOptions {
    /// 并发拉取全部选项；分组树在这里扁平化（父先于子）。
    pub async fn load(api: &dyn ForwardingApi) -> Self {
        let page = PageQuery {
            page: 1,
            page_size: OPTION_PAGE_SIZE,
        };
        let (scripts, devices, products, tree) = tokio::join!(
            api.list_all_scripts(),
            api.list_devices(&page),
            api.list_products(&page),
            api.group_tree(),
        );
        let options = Self {
            scripts,
            devices: devices.map(|page| page.list),
            products: products.map(|page| page.list),
            groups: tree.map(|nodes| flatten_group_tree(&nodes)),
        };
        for (list, result) in options.failures() {
            tracing::warn!(list, error = %result, "reference option load failed");
        }
        options
    }

    /// 空选项集（测试与降级路径用）。
    pub fn empty() -> Self {
        Self {
            scripts: Ok(Vec::new()),
            devices: Ok(Vec::new()),
            products: Ok(Vec::new()),
            groups: Ok(Vec::new()),
        }
    }

    pub fn scripts(&self) -> &[ForwardingScript] {
        self.scripts.as_deref().unwrap_or_default()
    }

    pub fn devices(&self) -> &[DeviceSummaryDto] {
        self.devices.as_deref().unwrap_or_default()
    }

    pub fn products(&self) -> &[ProductSummaryDto] {
        self.products.as_deref().unwrap_or_default()
    }

    pub fn groups(&self) -> &[GroupOption] {
        self.groups.as_deref().unwrap_or_default()
    }

    /// 按 id 查脚本名（提交时回填 script_name）。
    pub fn script_name(&self, script_id: &str) -> Option<String> {
        self.scripts()
            .iter()
            .find(|script| script.id.as_deref() == Some(script_id))
            .map(|script| script.name.clone())
    }

    /// 失败的选项列表（展示每路错误用）。
    pub fn failures(&self) -> Vec<(&'static str, &ClientError)> {
        let mut failures = Vec::new();
        if let Err(err) = &self.scripts {
            failures.push(("scripts", err));
        }
        if let Err(err) = &self.devices {
            failures.push(("devices", err));
        }
        if let Err(err) = &self.products {
            failures.push(("products", err));
        }
        if let Err(err) = &self.groups {
            failures.push(("groups", err));
        }
        failures
    }
}
