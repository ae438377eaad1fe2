// ==========================================
// 员工档案管理 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

/// 日志中预览文件内容的默认字符数
pub const DEFAULT_LOG_PREVIEW_CHARS: usize = 200;

/// 默认允许的导入文件扩展名
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["csv"];

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）, DefaultImportConfig（内置默认值）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取日志中预览文件内容的字符数
    ///
    /// # 默认值
    /// - 200
    async fn get_log_preview_chars(&self) -> Result<usize, Box<dyn Error + Send + Sync>>;

    /// 获取允许导入的文件扩展名（小写，不含点）
    ///
    /// # 默认值
    /// - ["csv"]
    async fn get_allowed_extensions(&self) -> Result<Vec<String>, Box<dyn Error + Send + Sync>>;
}

// ==========================================
// DefaultImportConfig - 内置默认配置
// ==========================================
// 用途: 无数据库时运行导入（测试/命令行预检）
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImportConfig;

#[async_trait]
impl ImportConfigReader for DefaultImportConfig {
    async fn get_log_preview_chars(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Ok(DEFAULT_LOG_PREVIEW_CHARS)
    }

    async fn get_allowed_extensions(&self) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        Ok(DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .collect())
    }
}
