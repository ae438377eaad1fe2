// ==========================================
// 员工档案管理 - 配置层
// ==========================================
// 职责: 系统配置管理,支持运行期覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_SORT_FIELD, DEFAULT_SORT_ORDER};
pub use import_config_trait::{DefaultImportConfig, ImportConfigReader};
