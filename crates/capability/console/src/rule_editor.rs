//! 规则编辑会话
//!
//! 一次弹窗一个会话对象：打开（拉取参考选项，编辑态再拉详情）→
//! 编辑（来源/目标动态列表、目标配置子弹窗）→ 提交（校验 → 创建
//! 或更新）→ 成功关闭 / 失败保持打开可重试。
//!
//! 目标在会话内始终是带标签的领域配置；不透明字符串在客户端边界
//! 已经解码，损坏的配置带着 corrupt 标记进来，按默认表单展示。

use crate::options::ReferenceOptions;
use crate::validate::{SessionError, normalize_optional, normalize_required};
use domain::{
    ForwardingRule, ForwardingSource, ForwardingTarget, TargetConfig, TargetConfigError,
    TargetKind,
};
use fwd_client::{ClientError, ForwardingApi};
use std::sync::Arc;

/// 会话模式：新建或编辑既有规则。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

/// 规则表单的标量字段；列表字段见会话本体。
#[derive(Debug, Clone, Default)]
pub struct RuleForm {
    pub name: String,
    pub description: String,
    pub remark: String,
    /// 选中的转换脚本；None 表示不做转换
    pub script_id: Option<String>,
}

/// 目标配置子弹窗：记录父列表中的下标，保存时写回。
#[derive(Debug, Clone)]
pub struct TargetDialog {
    index: usize,
    pub config: TargetConfig,
}

impl TargetDialog {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> TargetKind {
        self.config.kind()
    }

    /// 切换目标类型：换类型即换表单，重置为该类型默认配置。
    pub fn set_kind(&mut self, kind: TargetKind) {
        if self.config.kind() != kind {
            self.config = TargetConfig::default_for(kind);
        }
    }
}

/// 规则编辑会话。
pub struct RuleEditorSession {
    api: Arc<dyn ForwardingApi>,
    mode: EditorMode,
    pub form: RuleForm,
    pub sources: Vec<ForwardingSource>,
    pub targets: Vec<ForwardingTarget>,
    pub options: ReferenceOptions,
    /// 编辑态加载的服务端原件（enabled、时间戳等回传字段）
    loaded: Option<ForwardingRule>,
    dialog: Option<TargetDialog>,
    submitting: bool,
    closed: bool,
    /// 最近一次提交失败的展示信息
    pub error: Option<String>,
}

impl RuleEditorSession {
    /// 新建模式打开：表单全部为空/默认，选项并发拉取。
    pub async fn open_create(api: Arc<dyn ForwardingApi>) -> Self {
        let options = ReferenceOptions::load(api.as_ref()).await;
        Self {
            api,
            mode: EditorMode::Create,
            form: RuleForm::default(),
            sources: Vec::new(),
            targets: Vec::new(),
            options,
            loaded: None,
            dialog: None,
            submitting: false,
            closed: false,
            error: None,
        }
    }

    /// 编辑模式打开：详情与选项并发拉取；详情失败则无法开启会话。
    pub async fn open_edit(
        api: Arc<dyn ForwardingApi>,
        id: &str,
    ) -> Result<Self, ClientError> {
        let (detail, options) =
            tokio::join!(api.get_rule(id), ReferenceOptions::load(api.as_ref()));
        let rule = detail?;
        Ok(Self {
            mode: EditorMode::Edit(id.to_string()),
            form: RuleForm {
                name: rule.name.clone(),
                description: rule.description.clone().unwrap_or_default(),
                remark: rule.remark.clone().unwrap_or_default(),
                script_id: rule.script_id.clone(),
            },
            sources: rule.sources.clone(),
            targets: rule.targets.clone(),
            options,
            loaded: Some(rule),
            dialog: None,
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

    // ---------- 来源列表 ----------

    /// 追加一行来源：设备类型 + 空 id。数量不设上限，不去重。
    pub fn add_source(&mut self) {
        self.sources.push(ForwardingSource::placeholder());
    }

    pub fn remove_source(&mut self, index: usize) {
        if index < self.sources.len() {
            self.sources.remove(index);
        }
    }

    // ---------- 目标列表 ----------

    /// 追加一行目标：HTTP 类型 + 默认配置。
    pub fn add_target(&mut self) {
        self.targets.push(ForwardingTarget::placeholder());
    }

    pub fn remove_target(&mut self, index: usize) {
        if index >= self.targets.len() {
            return;
        }
        self.targets.remove(index);
        // 被配置中的目标删掉后，悬空的子弹窗一并关闭；
        // 其后的目标下标整体前移
        if matches!(&self.dialog, Some(dialog) if dialog.index == index) {
            self.dialog = None;
        } else if let Some(dialog) = &mut self.dialog {
            if dialog.index > index {
                dialog.index -= 1;
            }
        }
    }

    /// 打开目标配置子弹窗：按当前配置预填，记录下标。
    /// 下标越界不开弹窗。
    pub fn open_target_dialog(&mut self, index: usize) {
        if let Some(target) = self.targets.get(index) {
            self.dialog = Some(TargetDialog {
                index,
                config: target.config.clone(),
            });
        }
    }

    pub fn target_dialog(&self) -> Option<&TargetDialog> {
        self.dialog.as_ref()
    }

    pub fn target_dialog_mut(&mut self) -> Option<&mut TargetDialog> {
        self.dialog.as_mut()
    }

    /// 保存子弹窗：校验后把配置与类型写回记录的下标并关闭弹窗。
    /// 没有打开的弹窗时保存是空操作。
    pub fn save_target_dialog(&mut self) -> Result<(), TargetConfigError> {
        let dialog = match self.dialog.take() {
            Some(dialog) => dialog,
            None => return Ok(()),
        };
        if let Err(err) = dialog.config.validate() {
            // 校验失败弹窗保持打开
            self.dialog = Some(dialog);
            return Err(err);
        }
        if let Some(target) = self.targets.get_mut(dialog.index) {
            target.config = dialog.config;
            target.corrupt = false;
        }
        Ok(())
    }

    pub fn cancel_target_dialog(&mut self) {
        self.dialog = None;
    }

    // ---------- 提交 ----------

    /// 校验通过后按模式创建或更新；成功关闭会话并返回服务端结果
    /// （调用方据此刷新列表），失败保持打开。
    pub async fn submit(&mut self) -> Result<ForwardingRule, SessionError> {
        // 必填校验在任何网络调用之前
        let name = normalize_required(&self.form.name, "name")?;
        self.submitting = true;
        self.error = None;
        let rule = self.build_submission(name);
        let result = match &self.mode {
            EditorMode::Create => self.api.create_rule(&rule).await,
            EditorMode::Edit(_) => self.api.update_rule(&rule).await,
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

    /// 组装提交对象：未填写的可选字段保持 None，不进载荷。
    fn build_submission(&self, name: String) -> ForwardingRule {
        let loaded = self.loaded.as_ref();
        let script_id = self.form.script_id.clone();
        let script_name = script_id
            .as_deref()
            .and_then(|id| self.options.script_name(id))
            .or_else(|| loaded.and_then(|rule| rule.script_name.clone()));
        ForwardingRule {
            id: match &self.mode {
                EditorMode::Create => None,
                EditorMode::Edit(id) => Some(id.clone()),
            },
            name,
            description: normalize_optional(&self.form.description),
            remark: normalize_optional(&self.form.remark),
            enabled: loaded.and_then(|rule| rule.enabled),
            script_id,
            script_name,
            tenant_id: loaded.and_then(|rule| rule.tenant_id.clone()),
            created_at: loaded.and_then(|rule| rule.created_at),
            updated_at: loaded.and_then(|rule| rule.updated_at),
            sources: self.sources.clone(),
            targets: self.targets.clone(),
        }
    }
}
