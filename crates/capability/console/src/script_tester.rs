//! 脚本测试台
//!
//! 每次运行彼此独立：把当前脚本与 JSON 试运行报文发给服务端
//! 干跑接口，保存 {success, output, error}。脚本执行失败
//! （success:false + error）是正常业务结果，按独立结果面板展示，
//! 不等同于传输错误。

use crate::validate::{SessionError, normalize_required};
use api_contract::{ScriptTestRequest, ScriptTestResult};
use fwd_client::ForwardingApi;
use std::sync::Arc;

/// 脚本测试台状态。
pub struct ScriptTester {
    api: Arc<dyn ForwardingApi>,
    pub script_content: String,
    pub test_data: String,
    /// 最近一次运行结果；未运行过为 None
    pub result: Option<ScriptTestResult>,
    /// 空脚本拦截提示
    pub warning: Option<String>,
}

impl ScriptTester {
    pub fn new(api: Arc<dyn ForwardingApi>) -> Self {
        Self {
            api,
            script_content: String::new(),
            test_data: "{}".to_string(),
            result: None,
            warning: None,
        }
    }

    /// 运行一次：脚本为空时提示并中止，不发网络请求。
    /// 可反复运行，每次用编辑后的输入。
    pub async fn run(&mut self) -> Result<(), SessionError> {
        let script_content = match normalize_required(&self.script_content, "script_content") {
            Ok(content) => content,
            Err(err) => {
                self.warning = Some(err.to_string());
                return Err(err.into());
            }
        };
        self.warning = None;
        let request = ScriptTestRequest {
            script_content,
            test_data: self.test_data.clone(),
        };
        let result = self.api.test_script(&request).await?;
        self.result = Some(result);
        Ok(())
    }

    /// 输出面板内容：能按 JSON 解析则美化缩进，否则原样展示。
    pub fn output_display(&self) -> Option<String> {
        self.result
            .as_ref()
            .and_then(|result| result.output.as_deref())
            .map(pretty_or_raw)
    }

    /// 错误面板内容：同样尝试 JSON 美化。
    pub fn error_display(&self) -> Option<String> {
        self.result
            .as_ref()
            .and_then(|result| result.error.as_deref())
            .map(pretty_or_raw)
    }
}

fn pretty_or_raw(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}
