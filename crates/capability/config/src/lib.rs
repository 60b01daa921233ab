//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 平台转发服务的基础地址（客户端必填）
    pub api_base_url: String,
    /// 客户端整体请求超时（秒）
    pub http_timeout_seconds: u64,
    /// 列表页默认每页条数
    pub page_size: u32,
    /// 替身服务监听地址
    pub stub_addr: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = env::var("FWD_API_BASE_URL")
            .map_err(|_| ConfigError::Missing("FWD_API_BASE_URL".to_string()))?;
        let http_timeout_seconds = read_u64_with_default("FWD_HTTP_TIMEOUT_SECONDS", 30)?;
        let page_size = read_u32_with_default("FWD_PAGE_SIZE", 10)?;
        let stub_addr = env::var("FWD_STUB_ADDR").unwrap_or_else(|_| "127.0.0.1:8090".to_string());
        Ok(Self {
            api_base_url,
            http_timeout_seconds,
            page_size,
            stub_addr,
        })
    }

    /// 替身服务自身的配置：不要求 FWD_API_BASE_URL。
    pub fn stub_from_env() -> Result<Self, ConfigError> {
        let api_base_url = env::var("FWD_API_BASE_URL").unwrap_or_default();
        let http_timeout_seconds = read_u64_with_default("FWD_HTTP_TIMEOUT_SECONDS", 30)?;
        let page_size = read_u32_with_default("FWD_PAGE_SIZE", 10)?;
        let stub_addr = env::var("FWD_STUB_ADDR").unwrap_or_else(|_| "127.0.0.1:8090".to_string());
        Ok(Self {
            api_base_url,
            http_timeout_seconds,
            page_size,
            stub_addr,
        })
    }
}

/// 读取带默认值的 u64 环境变量。
fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

/// 读取带默认值的 u32 环境变量。
fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
