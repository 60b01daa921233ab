//! 转发脚本模型
//!
//! 脚本是一小段服务端执行的转换程序，把输入报文映射为输出报文。
//! 执行运行时在平台侧，本仓库只管理脚本的元数据与源文本。

/// 转发脚本。
#[derive(Debug, Clone, Default)]
pub struct ForwardingScript {
    /// 服务端分配；客户端编排中的脚本为 None
    pub id: Option<String>,
    pub name: String,
    /// 转换脚本源文本，必填
    pub script_content: String,
    pub description: Option<String>,
    /// 0/1；None 表示尚未持久化、由服务端分配默认值
    pub enabled: Option<i32>,
    pub remark: Option<String>,
    /// 服务端分配的租户归属
    pub tenant_id: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl ForwardingScript {
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(1)
    }
}
