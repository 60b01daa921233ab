//! 基于 reqwest 的客户端实现
//!
//! 每个操作：整形参数 → 发请求 → 解信封 → DTO 转领域类型。
//! 失败立即返回，不做重试；调用计数与告警日志在本层统一记录。

use crate::api::ForwardingApi;
use crate::convert::{
    group_node_from_dto, rule_from_dto, rule_to_dto, script_from_dto, script_to_dto,
};
use crate::error::ClientError;
use api_contract::{
    ApiResponse, DeviceSummaryDto, ForwardingRuleDto, ForwardingScriptDto, GroupTreeNodeDto,
    PageQuery, PageResult, ProductSummaryDto, RulePageQuery, RuleStatusRequest, ScriptPageQuery,
    ScriptTestRequest, ScriptTestResult,
};
use async_trait::async_trait;
use domain::{ForwardingRule, ForwardingScript, GroupNode};
use fwd_telemetry::{record_api_failure, record_api_request};
use serde::de::DeserializeOwned;

/// 转发服务 REST 客户端。
pub struct ForwardingClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForwardingClient {
    /// 使用默认传输配置创建客户端。
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// 创建带整体请求超时（秒）的客户端。
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送请求并解出信封里的 data。
    async fn request_data<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        record_api_request();
        tracing::debug!(path, "forwarding api request");
        let result = read_envelope(builder.send().await).await;
        if let Err(err) = &result {
            record_api_failure();
            tracing::warn!(path, error = %err, "forwarding api request failed");
        }
        result
    }

    /// 发送无返回数据的请求（启停、删除）。
    async fn request_empty(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        record_api_request();
        tracing::debug!(path, "forwarding api request");
        let result = read_empty_envelope(builder.send().await).await;
        if let Err(err) = &result {
            record_api_failure();
            tracing::warn!(path, error = %err, "forwarding api request failed");
        }
        result
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

async fn read_envelope<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ClientError> {
    let response = response?;
    let status = response.status();
    let body = response.text().await?;
    match serde_json::from_str::<ApiResponse<T>>(&body) {
        Ok(envelope) if envelope.success => envelope.data.ok_or(ClientError::MissingData),
        Ok(envelope) => Err(envelope_error(envelope.error)),
        Err(_) if !status.is_success() => Err(ClientError::Status(status)),
        Err(err) => Err(ClientError::Decode(err.to_string())),
    }
}

async fn read_empty_envelope(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<(), ClientError> {
    let response = response?;
    let status = response.status();
    let body = response.text().await?;
    match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
        Ok(envelope) if envelope.success => Ok(()),
        Ok(envelope) => Err(envelope_error(envelope.error)),
        Err(_) if !status.is_success() => Err(ClientError::Status(status)),
        Err(err) => Err(ClientError::Decode(err.to_string())),
    }
}

fn envelope_error(error: Option<api_contract::ApiError>) -> ClientError {
    match error {
        Some(error) => ClientError::Api {
            code: error.code,
            message: error.message,
        },
        None => ClientError::Api {
            code: "UNKNOWN".to_string(),
            message: "unknown server error".to_string(),
        },
    }
}

fn rule_page_from_dto(
    page: PageResult<ForwardingRuleDto>,
) -> Result<PageResult<ForwardingRule>, ClientError> {
    let mut list = Vec::with_capacity(page.list.len());
    for dto in page.list {
        list.push(rule_from_dto(dto)?);
    }
    Ok(PageResult {
        list,
        total: page.total,
    })
}

#[async_trait]
impl ForwardingApi for ForwardingClient {
    async fn list_rules(
        &self,
        query: &RulePageQuery,
    ) -> Result<PageResult<ForwardingRule>, ClientError> {
        let path = "/data_forwarding/rules";
        let builder = self.http.get(self.url(path)).query(query);
        let page: PageResult<ForwardingRuleDto> = self.request_data(path, builder).await?;
        rule_page_from_dto(page)
    }

    async fn get_rule(&self, id: &str) -> Result<ForwardingRule, ClientError> {
        let path = format!("/data_forwarding/rules/{id}");
        let builder = self.http.get(self.url(&path));
        let dto: ForwardingRuleDto = self.request_data(&path, builder).await?;
        rule_from_dto(dto)
    }

    async fn create_rule(&self, rule: &ForwardingRule) -> Result<ForwardingRule, ClientError> {
        let path = "/data_forwarding/rules";
        let builder = self.http.post(self.url(path)).json(&rule_to_dto(rule));
        let dto: ForwardingRuleDto = self.request_data(path, builder).await?;
        rule_from_dto(dto)
    }

    async fn update_rule(&self, rule: &ForwardingRule) -> Result<ForwardingRule, ClientError> {
        let path = "/data_forwarding/rules";
        let builder = self.http.put(self.url(path)).json(&rule_to_dto(rule));
        let dto: ForwardingRuleDto = self.request_data(path, builder).await?;
        rule_from_dto(dto)
    }

    async fn set_rule_status(&self, id: &str, enabled: i32) -> Result<(), ClientError> {
        let path = "/data_forwarding/rules/status";
        let request = RuleStatusRequest {
            id: id.to_string(),
            enabled,
        };
        let builder = self.http.put(self.url(path)).json(&request);
        self.request_empty(path, builder).await
    }

    async fn delete_rule(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/data_forwarding/rules/{id}");
        let builder = self.http.delete(self.url(&path));
        self.request_empty(&path, builder).await
    }

    async fn list_scripts(
        &self,
        query: &ScriptPageQuery,
    ) -> Result<PageResult<ForwardingScript>, ClientError> {
        let path = "/data_forwarding/scripts";
        let builder = self.http.get(self.url(path)).query(query);
        let page: PageResult<ForwardingScriptDto> = self.request_data(path, builder).await?;
        Ok(PageResult {
            list: page.list.into_iter().map(script_from_dto).collect(),
            total: page.total,
        })
    }

    async fn list_all_scripts(&self) -> Result<Vec<ForwardingScript>, ClientError> {
        let path = "/data_forwarding/scripts/all";
        let builder = self.http.get(self.url(path));
        let list: Vec<ForwardingScriptDto> = self.request_data(path, builder).await?;
        Ok(list.into_iter().map(script_from_dto).collect())
    }

    async fn get_script(&self, id: &str) -> Result<ForwardingScript, ClientError> {
        let path = format!("/data_forwarding/scripts/{id}");
        let builder = self.http.get(self.url(&path));
        let dto: ForwardingScriptDto = self.request_data(&path, builder).await?;
        Ok(script_from_dto(dto))
    }

    async fn create_script(
        &self,
        script: &ForwardingScript,
    ) -> Result<ForwardingScript, ClientError> {
        let path = "/data_forwarding/scripts";
        let builder = self.http.post(self.url(path)).json(&script_to_dto(script));
        let dto: ForwardingScriptDto = self.request_data(path, builder).await?;
        Ok(script_from_dto(dto))
    }

    async fn update_script(
        &self,
        script: &ForwardingScript,
    ) -> Result<ForwardingScript, ClientError> {
        let path = "/data_forwarding/scripts";
        let builder = self.http.put(self.url(path)).json(&script_to_dto(script));
        let dto: ForwardingScriptDto = self.request_data(path, builder).await?;
        Ok(script_from_dto(dto))
    }

    async fn delete_script(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/data_forwarding/scripts/{id}");
        let builder = self.http.delete(self.url(&path));
        self.request_empty(&path, builder).await
    }

    async fn test_script(
        &self,
        request: &ScriptTestRequest,
    ) -> Result<ScriptTestResult, ClientError> {
        let path = "/data_forwarding/scripts/test";
        let builder = self.http.post(self.url(path)).json(request);
        self.request_data(path, builder).await
    }

    async fn list_devices(
        &self,
        query: &PageQuery,
    ) -> Result<PageResult<DeviceSummaryDto>, ClientError> {
        let path = "/devices";
        let builder = self.http.get(self.url(path)).query(query);
        self.request_data(path, builder).await
    }

    async fn list_products(
        &self,
        query: &PageQuery,
    ) -> Result<PageResult<ProductSummaryDto>, ClientError> {
        let path = "/products";
        let builder = self.http.get(self.url(path)).query(query);
        self.request_data(path, builder).await
    }

    async fn group_tree(&self) -> Result<Vec<GroupNode>, ClientError> {
        let path = "/device_groups/tree";
        let builder = self.http.get(self.url(path));
        let nodes: Vec<GroupTreeNodeDto> = self.request_data(path, builder).await?;
        Ok(nodes.into_iter().map(group_node_from_dto).collect())
    }
}
