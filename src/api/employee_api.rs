// ==========================================
// 员工档案管理 - 员工 API
// ==========================================
// 职责: 列表查询（过滤 + 排序）、单条读取 / 新增 / 更新 / 删除
// 约定: get / update / delete 先做存在性检查，不存在返回 NotFound
// ==========================================

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::EmployeeValidator;
use crate::config::config_manager::ConfigManager;
use crate::domain::{Employee, EmployeeQuery};
use crate::repository::{EmployeeRepository, EmployeeRepositoryImpl};

// ==========================================
// EmployeeApi - 员工 API
// ==========================================

/// 员工API
///
/// 职责：
/// 1. 列表查询参数归一化（排序字段 / 方向 / 搜索串），委托仓储执行
/// 2. 单条操作的存在性检查与字段校验
pub struct EmployeeApi {
    employee_repo: Arc<EmployeeRepositoryImpl>,
    config_manager: Arc<ConfigManager>,
    validator: EmployeeValidator,
}

impl EmployeeApi {
    /// 创建新的EmployeeApi实例
    ///
    /// # 参数
    /// - employee_repo: 员工仓储
    /// - config_manager: 配置管理器（列表默认排序）
    pub fn new(
        employee_repo: Arc<EmployeeRepositoryImpl>,
        config_manager: Arc<ConfigManager>,
    ) -> ApiResult<Self> {
        Ok(Self {
            employee_repo,
            config_manager,
            validator: EmployeeValidator::new()?,
        })
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 过滤 + 排序查询
    ///
    /// # 参数
    /// - sort_field: 排序字段（不区分大小写，无法识别时按 Surname；空串取配置默认值）
    /// - sort_order: "desc" 为降序，其余升序（空串取配置默认值）
    /// - search: 搜索串（空或全空白视为不过滤）
    pub fn query_employees(
        &self,
        sort_field: &str,
        sort_order: &str,
        search: Option<&str>,
    ) -> ApiResult<Vec<Employee>> {
        let (default_field, default_order) = self
            .config_manager
            .get_default_sort()
            .map_err(|e| ApiError::DatabaseError(format!("failed to read grid defaults: {}", e)))?;

        let sort_field = if sort_field.trim().is_empty() {
            default_field.as_str()
        } else {
            sort_field
        };
        let sort_order = if sort_order.trim().is_empty() {
            default_order.as_str()
        } else {
            sort_order
        };

        let query = EmployeeQuery::from_params(sort_field, sort_order, search);
        debug!(
            sort_field = %query.sort_field,
            sort_order = %query.sort_order,
            search = ?query.search,
            "查询员工列表"
        );

        Ok(self.employee_repo.query_filtered(&query)?)
    }

    /// 列表默认视图（配置的默认排序）
    pub fn list_employees(&self, search: Option<&str>) -> ApiResult<Vec<Employee>> {
        self.query_employees("", "", search)
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): id 不存在
    pub fn get_employee_by_id(&self, id: i64) -> ApiResult<Employee> {
        self.employee_repo
            .get_by_id(id)?
            .ok_or_else(|| ApiError::employee_not_found(id))
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 新增员工（忽略传入 id）
    pub fn create_employee(&self, employee: &Employee) -> ApiResult<Employee> {
        self.validator.validate(employee)?;

        let stored = self.employee_repo.add(employee)?;
        info!(id = stored.id, payroll_number = %stored.payroll_number, "员工已新增");
        Ok(stored)
    }

    /// 更新员工
    ///
    /// # 流程
    /// 1. 字段校验
    /// 2. 存在性检查（不存在 → NotFound）
    /// 3. 写入
    pub fn update_employee(&self, employee: &Employee) -> ApiResult<Employee> {
        self.validator.validate(employee)?;

        if self.employee_repo.get_by_id(employee.id)?.is_none() {
            warn!(id = employee.id, "更新失败: 员工不存在");
            return Err(ApiError::employee_not_found(employee.id));
        }

        let updated = self.employee_repo.update(employee)?;
        info!(id = updated.id, "员工已更新");
        Ok(updated)
    }

    /// 删除员工
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Err(ApiError::NotFound): id 不存在
    pub fn delete_employee(&self, id: i64) -> ApiResult<bool> {
        if self.employee_repo.get_by_id(id)?.is_none() {
            warn!(id, "删除失败: 员工不存在");
            return Err(ApiError::employee_not_found(id));
        }

        let deleted = self.employee_repo.delete(id)?;
        info!(id, deleted, "员工已删除");
        Ok(deleted)
    }
}
