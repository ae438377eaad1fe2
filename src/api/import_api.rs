// ==========================================
// 员工档案导入API
// ==========================================
// 职责: 上传文件检查（非空 / 扩展名）后委托导入协调器
// 约定: 文件内容问题不作为错误返回，统一体现在 ImportResult
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::ImportResult;
use crate::importer::import_file::{has_allowed_extension, ImportFile, PathImportFile};
use crate::importer::EmployeeImporter;

/// 未选择文件
pub const MSG_SELECT_FILE: &str = "Please select a file";
/// 扩展名不在允许列表中
pub const MSG_SELECT_CSV: &str = "Please select a CSV file";

/// 导入API
pub struct ImportApi {
    importer: Arc<dyn EmployeeImporter>,
    config: Arc<dyn ImportConfigReader>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    ///
    /// # 参数
    /// - importer: 导入协调器
    /// - config: 导入配置（允许的扩展名）
    pub fn new(importer: Arc<dyn EmployeeImporter>, config: Arc<dyn ImportConfigReader>) -> Self {
        Self { importer, config }
    }

    /// 导入员工档案
    ///
    /// # 返回
    /// - Ok(ImportResult): 导入结果（可能部分成功）
    /// - Err(ApiError::InvalidInput): 未选择文件 / 文件类型不允许
    pub async fn import_employees(&self, file: &dyn ImportFile) -> ApiResult<ImportResult> {
        if file.is_empty() {
            warn!(file_name = %file.file_name(), "导入文件为空");
            return Err(ApiError::InvalidInput(MSG_SELECT_FILE.to_string()));
        }

        let allowed = self
            .config
            .get_allowed_extensions()
            .await
            .map_err(|e| ApiError::InternalError(format!("failed to read import config: {}", e)))?;

        if !has_allowed_extension(file, &allowed) {
            warn!(file_name = %file.file_name(), allowed = ?allowed, "导入文件类型不允许");
            return Err(ApiError::InvalidInput(MSG_SELECT_CSV.to_string()));
        }

        let result = self.importer.import_from_file(file).await;
        info!(
            file_name = %file.file_name(),
            success = result.success,
            success_count = result.success_count,
            error_count = result.error_count,
            "导入请求完成"
        );
        Ok(result)
    }

    /// 从磁盘路径导入（命令行入口）
    pub async fn import_from_path(&self, path: &str) -> ApiResult<ImportResult> {
        let file = PathImportFile::open(path)
            .map_err(|e| ApiError::InvalidInput(format!("{}: {}", MSG_SELECT_FILE, e)))?;
        self.import_employees(&file).await
    }
}
