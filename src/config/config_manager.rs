// ==========================================
// 员工档案管理 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::config::import_config_trait::{
    ImportConfigReader, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_LOG_PREVIEW_CHARS,
};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 列表默认排序字段
    pub const GRID_DEFAULT_SORT_FIELD: &str = "grid.default_sort_field";
    /// 列表默认排序方向
    pub const GRID_DEFAULT_SORT_ORDER: &str = "grid.default_sort_order";
    /// 允许导入的扩展名（逗号分隔）
    pub const IMPORT_ALLOWED_EXTENSIONS: &str = "import.allowed_extensions";
    /// 日志中预览文件内容的字符数
    pub const IMPORT_LOG_PREVIEW_CHARS: &str = "import.log_preview_chars";
}

/// 列表默认排序字段
pub const DEFAULT_SORT_FIELD: &str = "Surname";
/// 列表默认排序方向
pub const DEFAULT_SORT_ORDER: &str = "asc";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(
        &self,
        key: &str,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 从 config_kv 表读取配置值，带默认值
    pub fn get_config_or_default(
        &self,
        key: &str,
        default: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(self
            .get_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_config_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        info!(key = %key, value = %value, "配置已更新");
        Ok(())
    }

    /// 列出全部配置
    pub fn list_configs(&self) -> Result<BTreeMap<String, String>, Box<dyn Error + Send + Sync>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let configs = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(configs)
    }

    /// 获取列表默认排序（字段, 方向）
    pub fn get_default_sort(&self) -> Result<(String, String), Box<dyn Error + Send + Sync>> {
        let field =
            self.get_config_or_default(config_keys::GRID_DEFAULT_SORT_FIELD, DEFAULT_SORT_FIELD)?;
        let order =
            self.get_config_or_default(config_keys::GRID_DEFAULT_SORT_ORDER, DEFAULT_SORT_ORDER)?;
        Ok((field, order))
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_log_preview_chars(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let raw = match self.get_config_value(config_keys::IMPORT_LOG_PREVIEW_CHARS)? {
            Some(v) => v,
            None => return Ok(DEFAULT_LOG_PREVIEW_CHARS),
        };

        match raw.trim().parse::<usize>() {
            Ok(v) => Ok(v),
            Err(_) => {
                warn!(value = %raw, "import.log_preview_chars 配置格式错误，使用默认值");
                Ok(DEFAULT_LOG_PREVIEW_CHARS)
            }
        }
    }

    async fn get_allowed_extensions(&self) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        let default = DEFAULT_ALLOWED_EXTENSIONS.join(",");
        let raw = self.get_config_or_default(config_keys::IMPORT_ALLOWED_EXTENSIONS, &default)?;

        let extensions: Vec<String> = raw
            .split(',')
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        if extensions.is_empty() {
            return Ok(DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect());
        }
        Ok(extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let manager = setup_manager();
        let (field, order) = manager.get_default_sort().unwrap();
        assert_eq!(field, "Surname");
        assert_eq!(order, "asc");
        assert!(manager.list_configs().unwrap().is_empty());
    }

    #[test]
    fn test_set_and_override() {
        let manager = setup_manager();
        manager
            .set_config_value(config_keys::GRID_DEFAULT_SORT_ORDER, "desc")
            .unwrap();
        manager
            .set_config_value(config_keys::GRID_DEFAULT_SORT_ORDER, "DESC")
            .unwrap();

        let (_, order) = manager.get_default_sort().unwrap();
        assert_eq!(order, "DESC");
        assert_eq!(manager.list_configs().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_config_reader() {
        let manager = setup_manager();
        assert_eq!(manager.get_log_preview_chars().await.unwrap(), 200);
        assert_eq!(manager.get_allowed_extensions().await.unwrap(), vec!["csv"]);

        manager
            .set_config_value(config_keys::IMPORT_ALLOWED_EXTENSIONS, " .CSV, tsv ,")
            .unwrap();
        manager
            .set_config_value(config_keys::IMPORT_LOG_PREVIEW_CHARS, "not-a-number")
            .unwrap();

        assert_eq!(
            manager.get_allowed_extensions().await.unwrap(),
            vec!["csv", "tsv"]
        );
        assert_eq!(manager.get_log_preview_chars().await.unwrap(), 200);
    }
}
