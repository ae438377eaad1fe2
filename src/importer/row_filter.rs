// ==========================================
// 员工档案管理 - 行过滤器实现
// ==========================================
// 职责: 导入时的行级跳过策略
// 规则（任一命中即跳过）:
//   1. 工资号为空（去空白后）
//   2. 出生日期不早于当前时刻
//   3. 入职日期晚于当前时刻
// 说明: 日期未解析（None）不触发跳过
// ==========================================

use crate::domain::employee::Employee;
use crate::importer::employee_importer_trait::{RowFilter, SkipReason};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeRowFilter;

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

impl RowFilter for EmployeeRowFilter {
    fn check(&self, employee: &Employee, now: NaiveDateTime) -> Option<SkipReason> {
        if employee.payroll_number.trim().is_empty() {
            return Some(SkipReason::EmptyPayrollNumber);
        }

        if let Some(dob) = employee.date_of_birth {
            if at_midnight(dob) >= now {
                return Some(SkipReason::DateOfBirthNotInPast);
            }
        }

        if let Some(start) = employee.start_date {
            if at_midnight(start) > now {
                return Some(SkipReason::FutureStartDate);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn employee(payroll: &str, dob: Option<NaiveDate>, start: Option<NaiveDate>) -> Employee {
        Employee {
            payroll_number: payroll.to_string(),
            date_of_birth: dob,
            start_date: start,
            ..Default::default()
        }
    }

    #[test]
    fn test_keeps_valid_row() {
        let e = employee(
            "PI123",
            NaiveDate::from_ymd_opt(1980, 1, 1),
            NaiveDate::from_ymd_opt(2020, 1, 1),
        );
        assert_eq!(EmployeeRowFilter.check(&e, now()), None);
    }

    #[test]
    fn test_skips_blank_payroll() {
        let e = employee("   ", NaiveDate::from_ymd_opt(1980, 1, 1), None);
        assert_eq!(
            EmployeeRowFilter.check(&e, now()),
            Some(SkipReason::EmptyPayrollNumber)
        );
    }

    #[test]
    fn test_date_of_birth_boundaries() {
        // 当天 00:00 早于 12:00，保留
        let today = employee("PI1", NaiveDate::from_ymd_opt(2024, 6, 15), None);
        assert_eq!(EmployeeRowFilter.check(&today, now()), None);

        let tomorrow = employee("PI2", NaiveDate::from_ymd_opt(2024, 6, 16), None);
        assert_eq!(
            EmployeeRowFilter.check(&tomorrow, now()),
            Some(SkipReason::DateOfBirthNotInPast)
        );

        // 恰好等于当前时刻也跳过
        let midnight = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            EmployeeRowFilter.check(&today, midnight),
            Some(SkipReason::DateOfBirthNotInPast)
        );
    }

    #[test]
    fn test_future_start_date() {
        let future = employee(
            "PI1",
            NaiveDate::from_ymd_opt(1980, 1, 1),
            NaiveDate::from_ymd_opt(2024, 7, 1),
        );
        assert_eq!(
            EmployeeRowFilter.check(&future, now()),
            Some(SkipReason::FutureStartDate)
        );

        let today = employee(
            "PI2",
            NaiveDate::from_ymd_opt(1980, 1, 1),
            NaiveDate::from_ymd_opt(2024, 6, 15),
        );
        assert_eq!(EmployeeRowFilter.check(&today, now()), None);
    }

    #[test]
    fn test_unparsed_dates_pass() {
        let e = employee("PI1", None, None);
        assert_eq!(EmployeeRowFilter.check(&e, now()), None);
    }
}
