// ==========================================
// 员工档案管理 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/请求处理层调用
// ==========================================

pub mod employee_api;
pub mod error;
pub mod import_api;
pub mod validator;

// 重导出核心类型
pub use employee_api::EmployeeApi;
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use import_api::ImportApi;
pub use validator::EmployeeValidator;
