// ==========================================
// 员工档案管理 - 员工 Repository 实现
// ==========================================
// 职责: 实现 EmployeeRepository（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::EmployeeRepositoryImpl;
