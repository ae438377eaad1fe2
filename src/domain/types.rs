// ==========================================
// 员工档案管理 - 领域类型定义
// ==========================================
// 职责: 列表查询的排序字段/排序方向/查询请求
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 排序字段 (Sort Field)
// ==========================================
// 参数匹配不区分大小写,无法识别时回退为 Surname
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortField {
    Id,
    PayrollNumber,
    Forenames,
    #[default]
    Surname,
    DateOfBirth,
    Telephone,
    Mobile,
    Address,
    Address2,
    Postcode,
    EmailHome,
    StartDate,
}

impl SortField {
    /// 从 UI 参数解析（如 "payrollNumber" / "SURNAME"）
    pub fn from_param(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "id" => SortField::Id,
            "payrollnumber" => SortField::PayrollNumber,
            "forenames" => SortField::Forenames,
            "surname" => SortField::Surname,
            "dateofbirth" => SortField::DateOfBirth,
            "telephone" => SortField::Telephone,
            "mobile" => SortField::Mobile,
            "address" => SortField::Address,
            "address2" => SortField::Address2,
            "postcode" => SortField::Postcode,
            "emailhome" => SortField::EmailHome,
            "startdate" => SortField::StartDate,
            _ => SortField::Surname,
        }
    }

    /// 对应 employee 表列名
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::PayrollNumber => "payroll_number",
            SortField::Forenames => "forenames",
            SortField::Surname => "surname",
            SortField::DateOfBirth => "date_of_birth",
            SortField::Telephone => "telephone",
            SortField::Mobile => "mobile",
            SortField::Address => "address",
            SortField::Address2 => "address2",
            SortField::Postcode => "postcode",
            SortField::EmailHome => "email_home",
            SortField::StartDate => "start_date",
        }
    }

    /// 是否文本列（文本列排序不区分大小写）
    pub fn is_text(&self) -> bool {
        !matches!(
            self,
            SortField::Id | SortField::DateOfBirth | SortField::StartDate
        )
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ==========================================
// 排序方向 (Sort Order)
// ==========================================
// 仅 "desc"（不区分大小写）为降序,其余一律升序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

// ==========================================
// EmployeeQuery - 列表查询请求
// ==========================================
// 语义: 先过滤后排序
// 过滤: search 非空时,对 工资号/名/姓/邮箱/地址1/地址2/邮编 做不区分大小写的子串匹配（任一命中即可）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub search: Option<String>,
}

impl EmployeeQuery {
    /// 由 UI 三元参数归一化得到查询请求
    pub fn from_params(sort_field: &str, sort_order: &str, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Self {
            sort_field: SortField::from_param(sort_field),
            sort_order: SortOrder::from_param(sort_order),
            search,
        }
    }
}
