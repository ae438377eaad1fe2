use crate::db::open_sqlite_connection;
use crate::domain::{Employee, EmployeeQuery};
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

/// SELECT 列顺序（与 map_row 对齐）
pub(super) const EMPLOYEE_COLUMNS: &str = r#"
    id, payroll_number, forenames, surname, date_of_birth,
    telephone, mobile, address, address2, postcode, email_home, start_date
"#;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 未设置日期的落库值（零日期），读回时还原为 None
pub(super) const UNSET_DATE: &str = "0001-01-01";

// ==========================================
// EmployeeRepositoryImpl - 员工档案仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct EmployeeRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 行 → Employee
    pub(super) fn map_row(row: &Row) -> SqliteResult<Employee> {
        Ok(Employee {
            id: row.get(0)?,
            payroll_number: row.get(1)?,
            forenames: row.get(2)?,
            surname: row.get(3)?,
            date_of_birth: parse_date_column(row.get(4)?),
            telephone: row.get(5)?,
            mobile: row.get(6)?,
            address: row.get(7)?,
            address2: row.get(8)?,
            postcode: row.get(9)?,
            email_home: row.get(10)?,
            start_date: parse_date_column(row.get(11)?),
        })
    }

    /// 插入单条记录（忽略传入 id），返回新 id
    fn insert_one(conn: &Connection, employee: &Employee) -> RepositoryResult<i64> {
        conn.execute(
            r#"
            INSERT INTO employee (
                payroll_number, forenames, surname, date_of_birth,
                telephone, mobile, address, address2, postcode, email_home, start_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                employee.payroll_number,
                employee.forenames,
                employee.surname,
                format_date_column(employee.date_of_birth),
                employee.telephone,
                employee.mobile,
                employee.address,
                employee.address2,
                employee.postcode,
                employee.email_home,
                format_date_column(employee.start_date),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }
}

fn format_date_column(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DATE_FORMAT).to_string(),
        None => UNSET_DATE.to_string(),
    }
}

fn parse_date_column(raw: Option<String>) -> Option<NaiveDate> {
    raw.filter(|s| s != UNSET_DATE)
        .and_then(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).ok())
}

impl EmployeeRepository for EmployeeRepositoryImpl {
    fn get_all(&self) -> RepositoryResult<Vec<Employee>> {
        self.find_all()
    }

    fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>> {
        self.find_by_id(id)
    }

    fn get_by_payroll_number(&self, payroll_number: &str) -> RepositoryResult<Option<Employee>> {
        self.find_by_payroll_number(payroll_number)
    }

    fn query_filtered(&self, query: &EmployeeQuery) -> RepositoryResult<Vec<Employee>> {
        self.find_filtered(query)
    }

    fn count(&self) -> RepositoryResult<usize> {
        self.count_all()
    }

    fn add(&self, employee: &Employee) -> RepositoryResult<Employee> {
        let conn = self.get_conn()?;
        let id = Self::insert_one(&conn, employee).map_err(|e| {
            error!(payroll_number = %employee.payroll_number, error = %e, "新增员工失败");
            e
        })?;

        info!(
            id = id,
            payroll_number = %employee.payroll_number,
            name = %employee.display_name(),
            "新增员工成功"
        );

        Ok(Employee {
            id,
            ..employee.clone()
        })
    }

    fn add_range(&self, employees: &[Employee]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        // 逐行写入: 单行失败不影响后续行
        let mut success_count = 0;
        for employee in employees {
            match Self::insert_one(&conn, employee) {
                Ok(id) => {
                    debug!(
                        id = id,
                        payroll_number = %employee.payroll_number,
                        name = %employee.display_name(),
                        "新增员工成功"
                    );
                    success_count += 1;
                }
                Err(e) => {
                    error!(
                        payroll_number = %employee.payroll_number,
                        error = %e,
                        "新增员工失败，跳过该行"
                    );
                }
            }
        }

        info!(
            total = employees.len(),
            success = success_count,
            "批量新增员工完成"
        );
        Ok(success_count)
    }

    fn update(&self, employee: &Employee) -> RepositoryResult<Employee> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE employee SET
                payroll_number = ?2, forenames = ?3, surname = ?4, date_of_birth = ?5,
                telephone = ?6, mobile = ?7, address = ?8, address2 = ?9,
                postcode = ?10, email_home = ?11, start_date = ?12
            WHERE id = ?1
            "#,
            params![
                employee.id,
                employee.payroll_number,
                employee.forenames,
                employee.surname,
                format_date_column(employee.date_of_birth),
                employee.telephone,
                employee.mobile,
                employee.address,
                employee.address2,
                employee.postcode,
                employee.email_home,
                format_date_column(employee.start_date),
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::employee_not_found(employee.id));
        }

        info!(
            id = employee.id,
            payroll_number = %employee.payroll_number,
            name = %employee.display_name(),
            "更新员工成功"
        );
        Ok(employee.clone())
    }

    fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM employee WHERE id = ?1", params![id])?;

        if rows == 0 {
            warn!(id = id, "尝试删除不存在的员工");
            return Ok(false);
        }

        info!(id = id, "删除员工成功");
        Ok(true)
    }
}
