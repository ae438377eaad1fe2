// ==========================================
// 员工档案管理 - 应用层
// ==========================================
// 职责: 组装共享连接、仓储、导入器与 API 实例
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
