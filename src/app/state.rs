// ==========================================
// 员工档案管理 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{EmployeeApi, ImportApi};
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::importer::EmployeeImporterImpl;
use crate::repository::EmployeeRepositoryImpl;

/// 应用状态
///
/// 包含所有API实例和共享资源（同一数据库连接）
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 员工API
    pub employee_api: Arc<EmployeeApi>,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 1. 打开共享连接并初始化表结构
    /// 2. 初始化 Repository / ConfigManager
    /// 3. 组装导入器与 API 实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "初始化AppState");

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let employee_repo = Arc::new(EmployeeRepositoryImpl::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化导入层
        // ==========================================
        let importer = EmployeeImporterImpl::with_default_parser(
            EmployeeRepositoryImpl::from_connection(conn.clone()),
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let employee_api = Arc::new(
            EmployeeApi::new(employee_repo, config_manager.clone())
                .map_err(|e| format!("无法创建EmployeeApi: {}", e))?,
        );

        let import_api = Arc::new(ImportApi::new(
            Arc::new(importer),
            config_manager.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            employee_api,
            import_api,
            config_manager,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 EMPLOYEE_IMPORT_DB_PATH（非空时）
/// - 开发环境: 用户数据目录/employee-import-dev/employee_import.db
/// - 生产环境: 用户数据目录/employee-import/employee_import.db
/// - 无用户数据目录: ./employee_import.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("EMPLOYEE_IMPORT_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./employee_import.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("employee-import-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("employee-import");

        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("employee_import.db");
        }
    }

    path.to_string_lossy().to_string()
}
