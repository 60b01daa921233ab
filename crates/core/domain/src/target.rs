//! 转发目标模型
//!
//! 目标是 HTTP 或 MQTT 两种投递配置之一。领域层用带标签的联合
//! `TargetConfig` 表示；线上存储的不透明字符串只在 api-contract 边界
//! 经 [`crate::codec`] 转换，不会渗入领域层。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// 目标类型标签（闭集，扩展方式是新增配置结构）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Http,
    Mqtt,
}

impl TargetKind {
    /// 线上传输使用的字符串编码。
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Http => "http",
            TargetKind::Mqtt => "mqtt",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "http" => Some(TargetKind::Http),
            "mqtt" => Some(TargetKind::Mqtt),
            _ => None,
        }
    }
}

/// HTTP 请求方法（闭集）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Put,
    Get,
}

fn default_http_timeout() -> u32 {
    30
}

/// HTTP 目标配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTargetConfig {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// 附加请求头；有序映射保证编码结果可比较
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// 签名/鉴权令牌，由服务端投递时使用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// 秒，取值 1..=120
    #[serde(default = "default_http_timeout")]
    pub timeout: u32,
}

impl Default for HttpTargetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::default(),
            headers: None,
            secret: None,
            timeout: default_http_timeout(),
        }
    }
}

fn default_mqtt_port() -> u16 {
    1883
}

fn default_mqtt_qos() -> u8 {
    1
}

/// MQTT 目标配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttTargetConfig {
    /// host 或 host:port
    pub broker: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// 0/1/2
    #[serde(default = "default_mqtt_qos")]
    pub qos: u8,
    /// 协议版本标记，例如 "3.1.1" / "5"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for MqttTargetConfig {
    fn default() -> Self {
        Self {
            broker: String::new(),
            port: default_mqtt_port(),
            topic: String::new(),
            username: None,
            password: None,
            client_id: None,
            qos: default_mqtt_qos(),
            version: None,
        }
    }
}

/// 目标配置校验错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetConfigError {
    #[error("url required")]
    UrlRequired,
    #[error("invalid url: {0}")]
    UrlInvalid(String),
    #[error("timeout out of range: {0}")]
    TimeoutOutOfRange(u32),
    #[error("broker required")]
    BrokerRequired,
    #[error("topic required")]
    TopicRequired,
    #[error("port out of range: {0}")]
    PortOutOfRange(u16),
    #[error("qos out of range: {0}")]
    QosOutOfRange(u8),
}

/// 带标签的目标配置联合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetConfig {
    Http(HttpTargetConfig),
    Mqtt(MqttTargetConfig),
}

impl TargetConfig {
    pub fn kind(&self) -> TargetKind {
        match self {
            TargetConfig::Http(_) => TargetKind::Http,
            TargetConfig::Mqtt(_) => TargetKind::Mqtt,
        }
    }

    /// 指定类型的默认配置（新增目标行、解码失败兜底时使用）。
    pub fn default_for(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Http => TargetConfig::Http(HttpTargetConfig::default()),
            TargetKind::Mqtt => TargetConfig::Mqtt(MqttTargetConfig::default()),
        }
    }

    /// 保存前校验：必填项与取值域。
    pub fn validate(&self) -> Result<(), TargetConfigError> {
        match self {
            TargetConfig::Http(config) => {
                let url = config.url.trim();
                if url.is_empty() {
                    return Err(TargetConfigError::UrlRequired);
                }
                if Url::parse(url).is_err() {
                    return Err(TargetConfigError::UrlInvalid(config.url.clone()));
                }
                if !(1..=120).contains(&config.timeout) {
                    return Err(TargetConfigError::TimeoutOutOfRange(config.timeout));
                }
                Ok(())
            }
            TargetConfig::Mqtt(config) => {
                if config.broker.trim().is_empty() {
                    return Err(TargetConfigError::BrokerRequired);
                }
                if config.topic.trim().is_empty() {
                    return Err(TargetConfigError::TopicRequired);
                }
                if config.port == 0 {
                    return Err(TargetConfigError::PortOutOfRange(config.port));
                }
                if config.qos > 2 {
                    return Err(TargetConfigError::QosOutOfRange(config.qos));
                }
                Ok(())
            }
        }
    }
}

/// 规则上的一个投递目标。
///
/// `corrupt` 标记该目标的线上配置串未能按类型解码，当前配置是兜底
/// 默认值。编辑器照常展示默认表单，调用方可据此提示用户。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingTarget {
    pub config: TargetConfig,
    pub corrupt: bool,
}

impl ForwardingTarget {
    pub fn new(config: TargetConfig) -> Self {
        Self {
            config,
            corrupt: false,
        }
    }

    /// 新增目标行的默认值：HTTP 类型 + 默认配置。
    pub fn placeholder() -> Self {
        Self::new(TargetConfig::default_for(TargetKind::Http))
    }

    pub fn kind(&self) -> TargetKind {
        self.config.kind()
    }
}
