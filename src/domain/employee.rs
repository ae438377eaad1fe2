// ==========================================
// 员工档案管理 - 员工领域模型
// ==========================================
// 职责: 员工档案实体 + 导入结果汇总
// 红线: 实体只含属性,不含数据访问与导入逻辑
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 字段长度上限（与 employee 表列宽对齐）
// ==========================================
pub mod limits {
    pub const PAYROLL_NUMBER_MAX: usize = 50;
    pub const FORENAMES_MAX: usize = 100;
    pub const SURNAME_MAX: usize = 100;
    pub const TELEPHONE_MAX: usize = 20;
    pub const MOBILE_MAX: usize = 20;
    pub const ADDRESS_MAX: usize = 200;
    pub const ADDRESS2_MAX: usize = 200;
    pub const POSTCODE_MAX: usize = 20;
    pub const EMAIL_HOME_MAX: usize = 100;
}

// ==========================================
// Employee - 员工档案
// ==========================================
// 用途: 导入层生成,仓储层持久化,API 层读写
// 对齐: employee 表
// 说明: id 由存储层在插入时分配,插入时忽略传入值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    // ===== 主键 =====
    pub id: i64, // 代理主键（0 = 未落库）

    // ===== 必填字段 =====
    pub payroll_number: String, // 工资号（约定唯一）
    pub forenames: String,      // 名
    pub surname: String,        // 姓

    // ===== 日期 =====
    pub date_of_birth: Option<NaiveDate>, // 出生日期（None = 未解析出有效日期）
    pub start_date: Option<NaiveDate>,    // 入职日期（允许未来日期）

    // ===== 联系方式（可选）=====
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,  // 地址第一行
    pub address2: Option<String>, // 地址第二行
    pub postcode: Option<String>,
    pub email_home: Option<String>,
}

impl Employee {
    /// 姓名展示（"名 姓"），用于日志
    pub fn display_name(&self) -> String {
        format!("{} {}", self.forenames, self.surname)
    }
}

// ==========================================
// ImportResult - 单次导入结果汇总
// ==========================================
// 用途: 导入协调器返回给调用方（UI 层渲染部分成功）
// 生命周期: 每次导入新建,返回后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub success_count: usize,
    pub error_count: usize,
    pub error_messages: Vec<String>,
    /// 解析器返回的全部记录（与落库成功数无关）
    pub imported_employees: Vec<Employee>,
}

impl ImportResult {
    /// 导入成功: 至少一行落库且无错误
    pub fn is_success(&self) -> bool {
        self.success_count > 0 && self.error_count == 0
    }

    /// 构造仅含一条错误的结果
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            success_count: 0,
            error_count: 1,
            error_messages: vec![message.into()],
            imported_employees: Vec::new(),
        }
    }

    /// 构造落库后的结果（success 由计数派生）
    pub fn completed(success_count: usize, imported_employees: Vec<Employee>) -> Self {
        let mut result = Self {
            success: false,
            success_count,
            error_count: 0,
            error_messages: Vec::new(),
            imported_employees,
        };
        result.success = result.is_success();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_is_not_success() {
        let result = ImportResult::failed("boom");
        assert!(!result.success);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.error_messages, vec!["boom".to_string()]);
    }

    #[test]
    fn test_completed_result_success_flag() {
        let result = ImportResult::completed(2, vec![Employee::default(), Employee::default()]);
        assert!(result.success);

        // 全部落库失败: 列表仍保留解析结果
        let result = ImportResult::completed(0, vec![Employee::default()]);
        assert!(!result.success);
        assert_eq!(result.imported_employees.len(), 1);
    }

    #[test]
    fn test_employee_serializes_camel_case() {
        let employee = Employee {
            id: 7,
            payroll_number: "PI123".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 1),
            email_home: Some("john@example.com".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["payrollNumber"], "PI123");
        assert_eq!(json["dateOfBirth"], "1980-01-01");
        assert_eq!(json["emailHome"], "john@example.com");
    }
}
