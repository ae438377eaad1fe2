// ==========================================
// 员工档案管理 - 员工 Repository Trait
// ==========================================
// 职责: 定义员工档案数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::{Employee, EmployeeQuery};
use crate::repository::error::RepositoryResult;

// ==========================================
// EmployeeRepository Trait
// ==========================================
// 用途: 导入协调器与 API 层共用的存储网关
// 实现者: EmployeeRepositoryImpl（使用 rusqlite）
pub trait EmployeeRepository: Send + Sync {
    // ===== 查询 =====

    /// 查询全部员工（按 id 升序）
    fn get_all(&self) -> RepositoryResult<Vec<Employee>>;

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(Employee)): 找到
    /// - Ok(None): 未找到
    fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>>;

    /// 按工资号查询（约定唯一，若有重复返回 id 最小者）
    fn get_by_payroll_number(&self, payroll_number: &str) -> RepositoryResult<Option<Employee>>;

    /// 过滤 + 排序查询（先过滤后排序）
    fn query_filtered(&self, query: &EmployeeQuery) -> RepositoryResult<Vec<Employee>>;

    /// 统计 employee 表记录数
    fn count(&self) -> RepositoryResult<usize>;

    // ===== 写入 =====

    /// 新增员工（忽略传入 id，返回带新 id 的记录）
    fn add(&self, employee: &Employee) -> RepositoryResult<Employee>;

    /// 批量新增（逐行独立写入，不做整体事务）
    ///
    /// # 返回
    /// - Ok(usize): 成功写入的记录数（单行失败只记日志，不影响后续行）
    fn add_range(&self, employees: &[Employee]) -> RepositoryResult<usize>;

    /// 更新员工
    ///
    /// # 返回
    /// - Err(RepositoryError::NotFound): id 不存在
    fn update(&self, employee: &Employee) -> RepositoryResult<Employee>;

    /// 删除员工
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): id 不存在
    fn delete(&self, id: i64) -> RepositoryResult<bool>;
}
