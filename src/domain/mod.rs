// ==========================================
// 员工档案管理 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod employee;
pub mod types;

// 重导出核心类型
pub use employee::{Employee, ImportResult};
pub use types::{EmployeeQuery, SortField, SortOrder};
