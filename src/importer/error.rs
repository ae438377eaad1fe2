// ==========================================
// 员工档案管理 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件结构错误（解析错误） =====
    #[error("Error parsing CSV file: File does not contain data or has an invalid format")]
    NoData,

    #[error("Error parsing CSV file: Missing required headers: {}", .0.join(", "))]
    MissingRequiredHeaders(Vec<String>),

    // ===== 文件相关错误 =====
    #[error("File read failed: {0}")]
    FileReadError(String),

    // ===== 数据库错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    /// 是否为文件结构错误（无数据 / 缺少必需表头）
    pub fn is_parsing_error(&self) -> bool {
        matches!(
            self,
            ImportError::NoData | ImportError::MissingRequiredHeaders(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImporterResult<T> = Result<T, ImportError>;
