// ==========================================
// 员工档案管理 - 字段映射器实现
// ==========================================
// 职责: 表头 → Employee 字段映射 + 日期解析
// 映射: 静态表（小写表头 → 字段写入函数），每列解析一次
// ==========================================

use crate::domain::employee::Employee;
use crate::importer::employee_importer_trait::{FieldMapper, FieldSetter};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

// ==========================================
// 表头常量
// ==========================================
pub const HEADER_PAYROLL_NUMBER: &str = "Personnel_Records.Payroll_Number";
pub const HEADER_FORENAMES: &str = "Personnel_Records.Forenames";
pub const HEADER_SURNAME: &str = "Personnel_Records.Surname";
pub const HEADER_DATE_OF_BIRTH: &str = "Personnel_Records.Date_of_Birth";
pub const HEADER_TELEPHONE: &str = "Personnel_Records.Telephone";
pub const HEADER_MOBILE: &str = "Personnel_Records.Mobile";
pub const HEADER_ADDRESS: &str = "Personnel_Records.Address";
pub const HEADER_ADDRESS_2: &str = "Personnel_Records.Address_2";
pub const HEADER_POSTCODE: &str = "Personnel_Records.Postcode";
pub const HEADER_EMAIL_HOME: &str = "Personnel_Records.EMail_Home";
pub const HEADER_START_DATE: &str = "Personnel_Records.Start_Date";

/// 必需表头
pub const REQUIRED_HEADERS: [&str; 5] = [
    HEADER_PAYROLL_NUMBER,
    HEADER_FORENAMES,
    HEADER_SURNAME,
    HEADER_DATE_OF_BIRTH,
    HEADER_START_DATE,
];

/// 首选日期格式（DD/MM/YYYY）
pub const PRIMARY_DATE_FORMAT: &str = "%d/%m/%Y";

/// 兜底日期格式（按顺序尝试）
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// 兜底日期时间格式（时间部分丢弃）
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// ==========================================
// 字段映射表
// ==========================================
static FIELD_TABLE: &[(&str, FieldSetter)] = &[
    ("personnel_records.payroll_number", set_payroll_number),
    ("personnel_records.forenames", set_forenames),
    ("personnel_records.surname", set_surname),
    ("personnel_records.date_of_birth", set_date_of_birth),
    ("personnel_records.telephone", set_telephone),
    ("personnel_records.mobile", set_mobile),
    ("personnel_records.address", set_address),
    ("personnel_records.address_2", set_address2),
    ("personnel_records.postcode", set_postcode),
    ("personnel_records.email_home", set_email_home),
    ("personnel_records.start_date", set_start_date),
];

fn set_payroll_number(e: &mut Employee, v: &str) {
    e.payroll_number = v.to_string();
}

fn set_forenames(e: &mut Employee, v: &str) {
    e.forenames = v.to_string();
}

fn set_surname(e: &mut Employee, v: &str) {
    e.surname = v.to_string();
}

fn set_date_of_birth(e: &mut Employee, v: &str) {
    e.date_of_birth = parse_date(v);
}

fn set_telephone(e: &mut Employee, v: &str) {
    e.telephone = non_empty(v);
}

fn set_mobile(e: &mut Employee, v: &str) {
    e.mobile = non_empty(v);
}

fn set_address(e: &mut Employee, v: &str) {
    e.address = non_empty(v);
}

fn set_address2(e: &mut Employee, v: &str) {
    e.address2 = non_empty(v);
}

fn set_postcode(e: &mut Employee, v: &str) {
    e.postcode = non_empty(v);
}

fn set_email_home(e: &mut Employee, v: &str) {
    e.email_home = non_empty(v);
}

fn set_start_date(e: &mut Employee, v: &str) {
    e.start_date = parse_date(v);
}

/// 查找表头对应的字段写入函数（不区分大小写）
pub fn lookup_setter(header: &str) -> Option<FieldSetter> {
    let key = header.to_lowercase();
    FIELD_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, setter)| *setter)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// 解析日期
///
/// # 规则
/// 1. 精确匹配 DD/MM/YYYY
/// 2. 兜底: 常见日期 / 日期时间 / RFC 3339 格式
/// 3. 全部失败 → None（不中断该行）
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, PRIMARY_DATE_FORMAT) {
        return Some(date);
    }

    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

// ==========================================
// EmployeeFieldMapper - 字段映射器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeFieldMapper;

impl FieldMapper for EmployeeFieldMapper {
    fn resolve_columns(&self, headers: &[String]) -> Vec<Option<FieldSetter>> {
        headers.iter().map(|h| lookup_setter(h)).collect()
    }

    fn map_row(&self, columns: &[Option<FieldSetter>], values: &StringRecord) -> Employee {
        let mut employee = Employee::default();

        for (setter, value) in columns.iter().zip(values.iter()) {
            if let Some(set) = setter {
                set(&mut employee, value.trim());
            }
        }

        employee
    }
}
