use super::EmployeeRepositoryImpl;
use crate::domain::{Employee, EmployeeQuery};
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

fn make_test_employee(payroll_number: &str, forenames: &str, surname: &str) -> Employee {
    Employee {
        id: 0,
        payroll_number: payroll_number.to_string(),
        forenames: forenames.to_string(),
        surname: surname.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 1),
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        ..Default::default()
    }
}

fn surnames(employees: &[Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.surname.as_str()).collect()
}

#[test]
fn test_add_ignores_supplied_id() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());

    let mut employee = make_test_employee("PI123", "John", "Doe");
    employee.id = 999;

    let stored = repo.add(&employee).unwrap();
    assert_ne!(stored.id, 999);
    assert!(stored.id > 0);

    let found = repo.get_by_id(stored.id).unwrap().unwrap();
    assert_eq!(found.payroll_number, "PI123");
    assert_eq!(found.date_of_birth, NaiveDate::from_ymd_opt(1980, 1, 1));
    assert!(repo.get_by_id(999).unwrap().is_none());
}

#[test]
fn test_get_by_payroll_number() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    repo.add(&make_test_employee("PI123", "John", "Doe")).unwrap();
    repo.add(&make_test_employee("PI456", "Jane", "Smith")).unwrap();

    let found = repo.get_by_payroll_number("PI456").unwrap().unwrap();
    assert_eq!(found.surname, "Smith");
    assert!(repo.get_by_payroll_number("PI789").unwrap().is_none());
}

#[test]
fn test_add_range_continues_past_failures() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());

    // 工资号超长 → CHECK 约束失败
    let broken = make_test_employee(&"P".repeat(60), "Jane", "Smith");

    let employees = vec![
        make_test_employee("PI123", "John", "Doe"),
        broken,
        make_test_employee("PI789", "Bob", "Williams"),
    ];

    let success = repo.add_range(&employees).unwrap();
    assert_eq!(success, 2);
    assert_eq!(repo.count().unwrap(), 2);
    assert!(repo.get_by_payroll_number("PI789").unwrap().is_some());
}

#[test]
fn test_unset_dates_round_trip_as_none() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());

    let mut employee = make_test_employee("PI123", "John", "Doe");
    employee.date_of_birth = None;
    employee.start_date = None;

    let stored = repo.add(&employee).unwrap();
    let found = repo.get_by_id(stored.id).unwrap().unwrap();
    assert_eq!(found.date_of_birth, None);
    assert_eq!(found.start_date, None);
}

#[test]
fn test_column_length_limits_enforced() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());

    assert!(repo.add(&make_test_employee(&"P".repeat(50), "John", "Doe")).is_ok());
    assert!(repo.add(&make_test_employee(&"P".repeat(51), "John", "Doe")).is_err());
    assert!(repo.add(&make_test_employee("PI2", &"é".repeat(101), "Doe")).is_err());

    let mut long_postcode = make_test_employee("PI3", "John", "Doe");
    long_postcode.postcode = Some("X".repeat(21));
    assert!(repo.add(&long_postcode).is_err());

    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn test_update_existing_and_missing() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    let mut stored = repo.add(&make_test_employee("PI123", "John", "Doe")).unwrap();

    stored.mobile = Some("07700900123".to_string());
    stored.surname = "Doe-Smith".to_string();
    repo.update(&stored).unwrap();

    let found = repo.get_by_id(stored.id).unwrap().unwrap();
    assert_eq!(found.surname, "Doe-Smith");
    assert_eq!(found.mobile.as_deref(), Some("07700900123"));

    let mut missing = stored.clone();
    missing.id = 4242;
    let result = repo.update(&missing);
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_delete() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    let stored = repo.add(&make_test_employee("PI123", "John", "Doe")).unwrap();

    assert!(repo.delete(stored.id).unwrap());
    assert!(!repo.delete(stored.id).unwrap());
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn test_query_sort_surname_desc() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    repo.add(&make_test_employee("PI2", "Jane", "Smith")).unwrap();
    repo.add(&make_test_employee("PI1", "John", "Doe")).unwrap();
    repo.add(&make_test_employee("PI3", "Bob", "Williams")).unwrap();

    let query = EmployeeQuery::from_params("surname", "desc", None);
    let result = repo.query_filtered(&query).unwrap();
    assert_eq!(surnames(&result), vec!["Williams", "Smith", "Doe"]);
}

#[test]
fn test_query_unknown_sort_field_matches_surname() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    repo.add(&make_test_employee("PI2", "Jane", "Smith")).unwrap();
    repo.add(&make_test_employee("PI1", "John", "doe")).unwrap();
    repo.add(&make_test_employee("PI3", "Bob", "Williams")).unwrap();

    let by_surname = repo
        .query_filtered(&EmployeeQuery::from_params("Surname", "asc", None))
        .unwrap();
    let by_unknown = repo
        .query_filtered(&EmployeeQuery::from_params("favouriteColour", "asc", None))
        .unwrap();

    assert_eq!(by_surname, by_unknown);
    // 文本排序不区分大小写
    assert_eq!(surnames(&by_surname), vec!["doe", "Smith", "Williams"]);
}

#[test]
fn test_query_search_matches_postcode_only() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());

    let mut with_postcode = make_test_employee("PI1", "John", "Doe");
    with_postcode.postcode = Some("AB12 3CD".to_string());
    repo.add(&with_postcode).unwrap();
    repo.add(&make_test_employee("PI2", "Jane", "Smith")).unwrap();

    let query = EmployeeQuery::from_params("surname", "asc", Some("ab12"));
    let result = repo.query_filtered(&query).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].payroll_number, "PI1");
}

#[test]
fn test_query_search_is_or_across_fields() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());

    let mut by_email = make_test_employee("PI1", "John", "Doe");
    by_email.email_home = Some("MARKET@example.com".to_string());
    repo.add(&by_email).unwrap();

    let mut by_address = make_test_employee("PI2", "Jane", "Smith");
    by_address.address2 = Some("Market Street".to_string());
    repo.add(&by_address).unwrap();

    repo.add(&make_test_employee("PI3", "Bob", "Williams")).unwrap();

    let query = EmployeeQuery::from_params("payrollNumber", "asc", Some("market"));
    let result = repo.query_filtered(&query).unwrap();

    let payrolls: Vec<&str> = result.iter().map(|e| e.payroll_number.as_str()).collect();
    assert_eq!(payrolls, vec!["PI1", "PI2"]);
}

#[test]
fn test_query_search_treats_wildcards_literally() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    repo.add(&make_test_employee("PI_1", "John", "Doe")).unwrap();
    repo.add(&make_test_employee("PIX1", "Jane", "Smith")).unwrap();

    let query = EmployeeQuery::from_params("surname", "asc", Some("_"));
    let result = repo.query_filtered(&query).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].payroll_number, "PI_1");
}

#[test]
fn test_query_search_folds_non_ascii_case() {
    let repo = EmployeeRepositoryImpl::from_connection(setup_test_db());
    repo.add(&make_test_employee("PI1", "Émile", "Zola")).unwrap();
    repo.add(&make_test_employee("PI2", "Emma", "Smith")).unwrap();

    for term in ["ÉMILE", "émile", "Émile"] {
        let query = EmployeeQuery::from_params("surname", "asc", Some(term));
        let result = repo.query_filtered(&query).unwrap();
        assert_eq!(result.len(), 1, "search term {term}");
        assert_eq!(result[0].payroll_number, "PI1");
    }
}
