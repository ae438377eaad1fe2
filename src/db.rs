// ==========================================
// 员工档案管理 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 启动时建表（幂等），并记录 schema_version
// ==========================================

use crate::domain::employee::limits;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;
use tracing::{info, warn};

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Unicode 小写函数名（SQLite 内置 LOWER 只处理 ASCII）
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
/// - unicode_lower 需要“每个连接”单独注册
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    register_unicode_lower(conn)?;
    Ok(())
}

/// 注册 unicode_lower(text)：NULL 原样返回
fn register_unicode_lower(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 表:
/// - schema_version: 已应用的 schema 版本
/// - config_kv: 系统配置（key-value）
/// - employee: 员工档案
///
/// 说明：必填列为 NOT NULL；文本列带长度 CHECK（与 domain::employee::limits 一致），
/// 超长记录插入失败。日期列为 ISO 文本（YYYY-MM-DD），未设置日期存为 0001-01-01。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    info!("初始化数据库 schema");

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS employee (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            payroll_number TEXT NOT NULL CHECK (length(payroll_number) <= {payroll}),
            forenames TEXT NOT NULL CHECK (length(forenames) <= {forenames}),
            surname TEXT NOT NULL CHECK (length(surname) <= {surname}),
            date_of_birth TEXT NOT NULL,
            telephone TEXT CHECK (length(telephone) <= {telephone}),
            mobile TEXT CHECK (length(mobile) <= {mobile}),
            address TEXT CHECK (length(address) <= {address}),
            address2 TEXT CHECK (length(address2) <= {address2}),
            postcode TEXT CHECK (length(postcode) <= {postcode}),
            email_home TEXT CHECK (length(email_home) <= {email_home}),
            start_date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_employee_surname ON employee(surname);
        CREATE INDEX IF NOT EXISTS idx_employee_payroll_number ON employee(payroll_number);
        "#,
        payroll = limits::PAYROLL_NUMBER_MAX,
        forenames = limits::FORENAMES_MAX,
        surname = limits::SURNAME_MAX,
        telephone = limits::TELEPHONE_MAX,
        mobile = limits::MOBILE_MAX,
        address = limits::ADDRESS_MAX,
        address2 = limits::ADDRESS2_MAX,
        postcode = limits::POSTCODE_MAX,
        email_home = limits::EMAIL_HOME_MAX,
    ))?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;

    if let Some(v) = read_schema_version(conn)?.filter(|v| *v > CURRENT_SCHEMA_VERSION) {
        warn!(
            db_version = v,
            expected = CURRENT_SCHEMA_VERSION,
            "数据库 schema 版本高于当前程序版本"
        );
    }

    info!("数据库 schema 初始化完成");
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
