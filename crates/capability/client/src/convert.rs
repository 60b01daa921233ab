//! DTO 与领域类型互转
//!
//! 目标配置的不透明字符串只在这里被编解码：
//! - 入站：按 target_type 解码，解析失败回落默认配置并带 corrupt 标记
//! - 出站：按标签重新编码；corrupt 目标会以默认配置覆盖原串
//!   （与编辑器"按默认表单展示后保存"的行为一致）
//!
//! 闭集字段（source_type、target_type）出现未知值按解码错误处理，
//! 不做静默映射。

use crate::error::ClientError;
use api_contract::{
    ForwardingRuleDto, ForwardingScriptDto, ForwardingSourceDto, ForwardingTargetDto,
    GroupTreeNodeDto,
};
use domain::{
    ForwardingRule, ForwardingScript, ForwardingSource, ForwardingTarget, GroupNode, SourceType,
    TargetKind, decode_config, encode_config,
};

/// 规则 DTO 转领域规则。
pub fn rule_from_dto(dto: ForwardingRuleDto) -> Result<ForwardingRule, ClientError> {
    let mut sources = Vec::with_capacity(dto.sources.len());
    for source in dto.sources {
        sources.push(source_from_dto(source)?);
    }
    let mut targets = Vec::with_capacity(dto.targets.len());
    for target in dto.targets {
        targets.push(target_from_dto(&target)?);
    }
    Ok(ForwardingRule {
        id: dto.id,
        name: dto.name,
        description: dto.description,
        remark: dto.remark,
        enabled: dto.enabled,
        script_id: dto.script_id,
        script_name: dto.script_name,
        tenant_id: dto.tenant_id,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
        sources,
        targets,
    })
}

/// 领域规则转提交 DTO；未设置的可选字段不进载荷。
pub fn rule_to_dto(rule: &ForwardingRule) -> ForwardingRuleDto {
    ForwardingRuleDto {
        id: rule.id.clone(),
        name: rule.name.clone(),
        description: rule.description.clone(),
        remark: rule.remark.clone(),
        enabled: rule.enabled,
        script_id: rule.script_id.clone(),
        script_name: rule.script_name.clone(),
        tenant_id: rule.tenant_id.clone(),
        created_at: rule.created_at,
        updated_at: rule.updated_at,
        sources: rule.sources.iter().map(source_to_dto).collect(),
        targets: rule.targets.iter().map(target_to_dto).collect(),
    }
}

fn source_from_dto(dto: ForwardingSourceDto) -> Result<ForwardingSource, ClientError> {
    let source_type = SourceType::try_from(dto.source_type)
        .map_err(|err| ClientError::Decode(err.to_string()))?;
    Ok(ForwardingSource {
        source_type,
        source_id: dto.source_id,
    })
}

fn source_to_dto(source: &ForwardingSource) -> ForwardingSourceDto {
    ForwardingSourceDto {
        source_type: source.source_type.as_i32(),
        source_id: source.source_id.clone(),
    }
}

fn target_from_dto(dto: &ForwardingTargetDto) -> Result<ForwardingTarget, ClientError> {
    let kind = TargetKind::parse(&dto.target_type)
        .ok_or_else(|| ClientError::Decode(format!("unknown target type: {}", dto.target_type)))?;
    Ok(decode_config(kind, &dto.config))
}

fn target_to_dto(target: &ForwardingTarget) -> ForwardingTargetDto {
    ForwardingTargetDto {
        target_type: target.kind().as_str().to_string(),
        config: encode_config(&target.config),
    }
}

/// 脚本 DTO 转领域脚本。
pub fn script_from_dto(dto: ForwardingScriptDto) -> ForwardingScript {
    ForwardingScript {
        id: dto.id,
        name: dto.name,
        script_content: dto.script_content,
        description: dto.description,
        enabled: dto.enabled,
        remark: dto.remark,
        tenant_id: dto.tenant_id,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    }
}

/// 领域脚本转提交 DTO。
pub fn script_to_dto(script: &ForwardingScript) -> ForwardingScriptDto {
    ForwardingScriptDto {
        id: script.id.clone(),
        name: script.name.clone(),
        script_content: script.script_content.clone(),
        description: script.description.clone(),
        enabled: script.enabled,
        remark: script.remark.clone(),
        tenant_id: script.tenant_id.clone(),
        created_at: script.created_at,
        updated_at: script.updated_at,
    }
}

/// 分组树节点 DTO 转领域节点（递归）。
pub fn group_node_from_dto(dto: GroupTreeNodeDto) -> GroupNode {
    GroupNode {
        id: dto.id,
        name: dto.name,
        children: dto.children.into_iter().map(group_node_from_dto).collect(),
    }
}
