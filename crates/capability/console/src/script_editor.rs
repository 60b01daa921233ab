//! 脚本编辑会话
//!
//! 与规则编辑同一套打开/提交模式，但表单是平的：没有动态列表，
//! 也不需要参考选项。新建时脚本内容预填模板示例。

use crate::validate::{SessionError, normalize_optional, normalize_required};
use domain::ForwardingScript;
use fwd_client::{ClientError, ForwardingApi};
use std::sync::Arc;

use crate::rule_editor::EditorMode;

/// 新建脚本时预填的模板示例。
pub const SCRIPT_TEMPLATE: &str = "function transform(payload) {\n    return payload;\n}\n";

/// 脚本表单字段。
#[derive(Debug, Clone, Default)]
pub struct ScriptForm {
    pub name: String,
    pub description: String,
    pub script_content: String,
    pub remark: String,
}

/// 脚本编辑会话。
pub struct ScriptEditorSession {
    api: Arc<dyn ForwardingApi>,
    mode: EditorMode,
    pub form: ScriptForm,
    /// 编辑态加载的服务端原件
    loaded: Option<ForwardingScript>,
    submitting: bool,
    closed: bool,
    pub error: Option<String>,
}

impl ScriptEditorSession {
    /// 新建模式打开：脚本内容预填模板，其余为空。
    pub fn open_create(api: Arc<dyn ForwardingApi>) -> Self {
        Self {
            api,
            mode: EditorMode::Create,
            form: ScriptForm {
                script_content: SCRIPT_TEMPLATE.to_string(),
                ..ScriptForm::default()
            },
            loaded: None,
            submitting: false,
            closed: false,
            error: None,
        }
    }

    /// 编辑模式打开：拉取详情回填表单；详情失败则无法开启会话。
    pub async fn open_edit(
        api: Arc<dyn ForwardingApi>,
        id: &str,
    ) -> Result<Self, ClientError> {
        let script = api.get_script(id).await?;
        Ok(Self {
            mode: EditorMode::Edit(id.to_string()),
            form: ScriptForm {
                name: script.name.clone(),
                description: script.description.clone().unwrap_or_default(),
                script_content: script.script_content.clone(),
                remark: script.remark.clone().unwrap_or_default(),
            },
            loaded: Some(script),
            submitting: false,
            closed: false,
            error: None,
            api,
        })
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// 校验 name 与 script_content 后创建或更新；成功关闭会话。
    pub async fn submit(&mut self) -> Result<ForwardingScript, SessionError> {
        let name = normalize_required(&self.form.name, "name")?;
        let script_content = normalize_required(&self.form.script_content, "script_content")?;
        self.submitting = true;
        self.error = None;
        let loaded = self.loaded.as_ref();
        let script = ForwardingScript {
            id: match &self.mode {
                EditorMode::Create => None,
                EditorMode::Edit(id) => Some(id.clone()),
            },
            name,
            script_content,
            description: normalize_optional(&self.form.description),
            enabled: loaded.and_then(|script| script.enabled),
            remark: normalize_optional(&self.form.remark),
            tenant_id: loaded.and_then(|script| script.tenant_id.clone()),
            created_at: loaded.and_then(|script| script.created_at),
            updated_at: loaded.and_then(|script| script.updated_at),
        };
        let result = match &self.mode {
            EditorMode::Create => self.api.create_script(&script).await,
            EditorMode::Edit(_) => self.api.update_script(&script).await,
        };
        self.submitting = false;
        match result {
            Ok(saved) => {
                self.closed = true;
                Ok(saved)
            }
            Err(err) => {
                self.error = Some(err.display_message());
                Err(err.into())
            }
        }
    }
}
