// ==========================================
// 员工档案管理 - 导入层
// ==========================================
// 职责: 分隔文本文件 → 员工档案 → 存储，汇总导入结果
// 支持: 逗号 / 制表符分隔文本
// ==========================================

// 模块声明
pub mod employee_importer_impl;
pub mod employee_importer_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod import_file;
pub mod row_filter;

// 重导出核心类型
pub use employee_importer_impl::EmployeeImporterImpl;
pub use error::{ImportError, ImporterResult};
pub use field_mapper::EmployeeFieldMapper;
pub use file_parser::DelimitedEmployeeParser;
pub use import_file::{is_csv_file, ImportFile, InMemoryImportFile, PathImportFile};
pub use row_filter::EmployeeRowFilter;

// 重导出 Trait 接口
pub use employee_importer_trait::{
    EmployeeFileParser, EmployeeImporter, FieldMapper, RowFilter, SkipReason,
};
