//! 目标配置编解码
//!
//! 带标签的 [`TargetConfig`] 与线上存储的不透明 JSON 字符串之间的
//! 双向转换：
//! - encode：按当前标签序列化为规范 JSON 文本，decode(encode(x)) == x
//! - decode：按目标类型解析；解析失败不报错，回落到该类型的默认配置
//!   并置 corrupt 标记
//! - summarize：列表展示用的单行摘要，解析失败时返回占位符 "-"

use crate::target::{ForwardingTarget, HttpTargetConfig, MqttTargetConfig, TargetConfig, TargetKind};

/// 摘要占位符：配置串无法解析时展示。
pub const SUMMARY_PLACEHOLDER: &str = "-";

/// 将目标配置序列化为线上存储的 JSON 文本。
///
/// 配置结构只含标量、字符串与有序映射，序列化不会失败；
/// 与锁中毒同级的理论性失败按空串兜底。
pub fn encode_config(config: &TargetConfig) -> String {
    let encoded = match config {
        TargetConfig::Http(config) => serde_json::to_string(config),
        TargetConfig::Mqtt(config) => serde_json::to_string(config),
    };
    encoded.unwrap_or_default()
}

/// 按目标类型解码线上配置串。
///
/// 解析失败（非 JSON、缺必填字段、外形不符）不会向编辑流程抛错：
/// 返回该类型的默认配置并置 `corrupt`，由调用方决定是否提示。
pub fn decode_config(kind: TargetKind, raw: &str) -> ForwardingTarget {
    match kind {
        TargetKind::Http => match serde_json::from_str::<HttpTargetConfig>(raw) {
            Ok(config) => ForwardingTarget::new(TargetConfig::Http(config)),
            Err(_) => corrupt_fallback(kind),
        },
        TargetKind::Mqtt => match serde_json::from_str::<MqttTargetConfig>(raw) {
            Ok(config) => ForwardingTarget::new(TargetConfig::Mqtt(config)),
            Err(_) => corrupt_fallback(kind),
        },
    }
}

fn corrupt_fallback(kind: TargetKind) -> ForwardingTarget {
    ForwardingTarget {
        config: TargetConfig::default_for(kind),
        corrupt: true,
    }
}

/// 生成目标的单行摘要：HTTP 取 URL，MQTT 取 "broker (topic)"。
pub fn summarize_config(kind: TargetKind, raw: &str) -> String {
    let decoded = decode_config(kind, raw);
    if decoded.corrupt {
        return SUMMARY_PLACEHOLDER.to_string();
    }
    match decoded.config {
        TargetConfig::Http(config) => config.url,
        TargetConfig::Mqtt(config) => format!("{} ({})", config.broker, config.topic),
    }
}
