use super::core::{EmployeeRepositoryImpl, EMPLOYEE_COLUMNS};
use crate::db::UNICODE_LOWER_FN;
use crate::domain::{Employee, EmployeeQuery};
use crate::repository::error::RepositoryResult;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// 参与模糊搜索的列（任一命中即可）
const SEARCH_COLUMNS: [&str; 7] = [
    "payroll_number",
    "forenames",
    "surname",
    "email_home",
    "address",
    "address2",
    "postcode",
];

/// 转义 LIKE 通配符（ESCAPE '\'）
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构建过滤 + 排序 SQL
///
/// 说明：排序列来自 SortField 白名单，不拼接用户输入
fn build_filtered_sql(query: &EmployeeQuery) -> String {
    let mut sql = format!("SELECT {} FROM employee", EMPLOYEE_COLUMNS);

    if query.search.is_some() {
        let predicates: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|col| {
                format!(
                    "{}(COALESCE({}, '')) LIKE ?1 ESCAPE '\\'",
                    UNICODE_LOWER_FN, col
                )
            })
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" OR "));
    }

    let column = query.sort_field.column();
    let direction = query.sort_order.as_sql();
    if query.sort_field.is_text() {
        sql.push_str(&format!(
            " ORDER BY {} COLLATE NOCASE {}, id ASC",
            column, direction
        ));
    } else if column == "id" {
        sql.push_str(&format!(" ORDER BY id {}", direction));
    } else {
        sql.push_str(&format!(" ORDER BY {} {}, id ASC", column, direction));
    }

    sql
}

impl EmployeeRepositoryImpl {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询全部员工
    pub(super) fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM employee ORDER BY id ASC",
            EMPLOYEE_COLUMNS
        ))?;

        let employees = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// 按 id 查询
    pub(super) fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM employee WHERE id = ?1",
            EMPLOYEE_COLUMNS
        ))?;

        let employee = stmt.query_row(params![id], Self::map_row).optional()?;
        Ok(employee)
    }

    /// 按工资号查询
    pub(super) fn find_by_payroll_number(
        &self,
        payroll_number: &str,
    ) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM employee WHERE payroll_number = ?1 ORDER BY id ASC LIMIT 1",
            EMPLOYEE_COLUMNS
        ))?;

        let employee = stmt
            .query_row(params![payroll_number], Self::map_row)
            .optional()?;
        Ok(employee)
    }

    /// 过滤 + 排序
    pub(super) fn find_filtered(&self, query: &EmployeeQuery) -> RepositoryResult<Vec<Employee>> {
        let sql = build_filtered_sql(query);
        debug!(
            sort_field = %query.sort_field,
            sort_order = %query.sort_order,
            search = ?query.search,
            "查询员工列表"
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;

        let employees = match &query.search {
            Some(term) => {
                let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
                stmt.query_map(params![pattern], Self::map_row)?
                    .collect::<Result<Vec<_>, _>>()?
            }
            None => stmt
                .query_map([], Self::map_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(employees)
    }

    /// 统计记录数
    pub(super) fn count_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
