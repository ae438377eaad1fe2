// ==========================================
// 员工档案管理 - 员工字段校验器
// ==========================================
// 职责: 直接新增/更新员工时的字段校验
// 说明: 违规全部收集后一次返回，不在第一条处中断
//       导入流程不经过本校验器（导入使用行过滤策略）
// ==========================================

use chrono::{NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::employee::{limits, Employee};

/// 邮箱格式：恰好一个 @，两侧非空且不含空白
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

// ==========================================
// EmployeeValidator - 员工字段校验器
// ==========================================
pub struct EmployeeValidator {
    email_re: Regex,
}

impl EmployeeValidator {
    /// 创建新的EmployeeValidator实例
    pub fn new() -> ApiResult<Self> {
        let email_re = Regex::new(EMAIL_PATTERN)
            .map_err(|e| ApiError::InternalError(format!("invalid email pattern: {}", e)))?;
        Ok(Self { email_re })
    }

    /// 以当前时刻校验
    pub fn validate(&self, employee: &Employee) -> ApiResult<()> {
        self.validate_at(employee, chrono::Local::now().naive_local())
    }

    /// 以指定时刻校验（出生日期须早于 now）
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(ApiError::ValidationError): 含全部违规明细
    pub fn validate_at(&self, employee: &Employee, now: NaiveDateTime) -> ApiResult<()> {
        let violations = self.collect_violations(employee, now);

        if violations.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            payroll_number = %employee.payroll_number,
            count = violations.len(),
            "员工字段校验失败"
        );

        Err(ApiError::ValidationError {
            reason: violations
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            violations,
        })
    }

    /// 收集全部违规
    pub fn collect_violations(
        &self,
        employee: &Employee,
        now: NaiveDateTime,
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();

        // 必填文本
        required_text(
            &mut violations,
            "payrollNumber",
            &employee.payroll_number,
            limits::PAYROLL_NUMBER_MAX,
            "Payroll number is required",
            "Payroll number must not exceed 50 characters",
        );
        required_text(
            &mut violations,
            "forenames",
            &employee.forenames,
            limits::FORENAMES_MAX,
            "Forename is required",
            "Forename must not exceed 100 characters",
        );
        required_text(
            &mut violations,
            "surname",
            &employee.surname,
            limits::SURNAME_MAX,
            "Surname is required",
            "Surname must not exceed 100 characters",
        );

        // 出生日期
        match employee.date_of_birth {
            None => violations.push(ValidationViolation::new(
                "dateOfBirth",
                "Date of birth is required",
            )),
            Some(dob) if dob.and_time(NaiveTime::MIN) >= now => violations.push(
                ValidationViolation::new("dateOfBirth", "Date of birth must be in the past"),
            ),
            Some(_) => {}
        }

        // 可选文本
        optional_text(
            &mut violations,
            "telephone",
            employee.telephone.as_deref(),
            limits::TELEPHONE_MAX,
            "Telephone number must not exceed 20 characters",
        );
        optional_text(
            &mut violations,
            "mobile",
            employee.mobile.as_deref(),
            limits::MOBILE_MAX,
            "Mobile phone number must not exceed 20 characters",
        );
        optional_text(
            &mut violations,
            "address",
            employee.address.as_deref(),
            limits::ADDRESS_MAX,
            "Address must not exceed 200 characters",
        );
        optional_text(
            &mut violations,
            "address2",
            employee.address2.as_deref(),
            limits::ADDRESS2_MAX,
            "Address line 2 must not exceed 200 characters",
        );
        optional_text(
            &mut violations,
            "postcode",
            employee.postcode.as_deref(),
            limits::POSTCODE_MAX,
            "Postcode must not exceed 20 characters",
        );
        optional_text(
            &mut violations,
            "emailHome",
            employee.email_home.as_deref(),
            limits::EMAIL_HOME_MAX,
            "Email must not exceed 100 characters",
        );

        if let Some(email) = employee.email_home.as_deref().filter(|e| !e.is_empty()) {
            if !self.email_re.is_match(email) {
                violations.push(ValidationViolation::new("emailHome", "Invalid email format"));
            }
        }

        // 入职日期（允许未来日期）
        if employee.start_date.is_none() {
            violations.push(ValidationViolation::new("startDate", "Start date is required"));
        }

        violations
    }
}

fn required_text(
    violations: &mut Vec<ValidationViolation>,
    field: &str,
    value: &str,
    max: usize,
    required_message: &str,
    length_message: &str,
) {
    if value.trim().is_empty() {
        violations.push(ValidationViolation::new(field, required_message));
    } else if value.chars().count() > max {
        violations.push(ValidationViolation::new(field, length_message));
    }
}

fn optional_text(
    violations: &mut Vec<ValidationViolation>,
    field: &str,
    value: Option<&str>,
    max: usize,
    length_message: &str,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        violations.push(ValidationViolation::new(field, length_message));
    }
}
