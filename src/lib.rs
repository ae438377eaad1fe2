// ==========================================
// 员工档案管理 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 员工档案增删改查 + 分隔文本批量导入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/表结构）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// 命令行参数
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体与类型
pub use domain::{Employee, EmployeeQuery, ImportResult, SortField, SortOrder};

// 导入
pub use importer::{EmployeeImporter, EmployeeImporterImpl, ImportError, ImportFile};

// 仓储
pub use repository::{EmployeeRepository, EmployeeRepositoryImpl, RepositoryError};

// API
pub use api::{ApiError, EmployeeApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "employee-import";
