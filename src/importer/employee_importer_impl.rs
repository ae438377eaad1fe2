// ==========================================
// 员工档案管理 - 员工导入协调器实现
// ==========================================
// 职责: 整合导入流程，从文件到数据库
// 流程: 读取 → 解析 → 空结果检查 → 批量落库 → 汇总
// 约定: 不向调用方返回错误，所有失败折叠进 ImportResult
// ==========================================

use crate::config::ImportConfigReader;
use crate::config::import_config_trait::DEFAULT_LOG_PREVIEW_CHARS;
use crate::domain::employee::{Employee, ImportResult};
use crate::importer::employee_importer_trait::{EmployeeFileParser, EmployeeImporter};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::file_parser::DelimitedEmployeeParser;
use crate::importer::import_file::ImportFile;
use crate::repository::EmployeeRepository;
use std::io::Read;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 空结果错误信息
pub const NO_DATA_MESSAGE: &str = "The file contains no data or has an invalid format";

/// 截取文件内容预览（超长追加 "..."）
pub fn content_preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}

// ==========================================
// EmployeeImporterImpl - 员工导入协调器
// ==========================================
pub struct EmployeeImporterImpl<R, C>
where
    R: EmployeeRepository,
    C: ImportConfigReader,
{
    // 数据访问层
    employee_repo: R,

    // 配置读取器
    config: C,

    // 文件解析器
    file_parser: Box<dyn EmployeeFileParser>,
}

impl<R, C> EmployeeImporterImpl<R, C>
where
    R: EmployeeRepository,
    C: ImportConfigReader,
{
    /// 创建新的 EmployeeImporter 实例
    ///
    /// # 参数
    /// - employee_repo: 员工仓储
    /// - config: 配置读取器
    /// - file_parser: 文件解析器
    pub fn new(employee_repo: R, config: C, file_parser: Box<dyn EmployeeFileParser>) -> Self {
        Self {
            employee_repo,
            config,
            file_parser,
        }
    }

    /// 使用默认解析器创建
    pub fn with_default_parser(employee_repo: R, config: C) -> Self {
        Self::new(
            employee_repo,
            config,
            Box::new(DelimitedEmployeeParser::default()),
        )
    }

    /// 记录文件内容预览
    async fn log_preview(&self, content: &[u8]) {
        let max_chars = match self.config.get_log_preview_chars().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "读取 import.log_preview_chars 失败，使用默认值");
                DEFAULT_LOG_PREVIEW_CHARS
            }
        };

        let text = String::from_utf8_lossy(content);
        info!(
            content = %content_preview(&text, max_chars),
            "File content preview"
        );
    }

    /// 解析 + 落库（错误向上传递，由调用方折叠）
    async fn run_import(&self, content: &[u8]) -> ImporterResult<ImportResult> {
        // === 步骤 1: 解析 ===
        debug!("步骤 1: 解析文件");
        let employees: Vec<Employee> = self.file_parser.parse(content)?;

        // === 步骤 2: 空结果检查 ===
        if employees.is_empty() {
            warn!("解析结果为空，未调用存储");
            return Ok(ImportResult::failed(NO_DATA_MESSAGE));
        }

        // === 步骤 3: 批量落库（逐行独立，失败不阻断） ===
        debug!(count = employees.len(), "步骤 2: 批量落库");
        let success_count = self
            .employee_repo
            .add_range(&employees)
            .map_err(ImportError::from)?;

        if success_count < employees.len() {
            warn!(
                parsed = employees.len(),
                stored = success_count,
                "部分记录落库失败"
            );
        }

        Ok(ImportResult::completed(success_count, employees))
    }
}

#[async_trait::async_trait]
impl<R, C> EmployeeImporter for EmployeeImporterImpl<R, C>
where
    R: EmployeeRepository + Send + Sync,
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file), fields(file_name = %file.file_name(), file_len = file.len()))]
    async fn import_from_file(&self, file: &dyn ImportFile) -> ImportResult {
        match file.open_read_stream() {
            Ok(reader) => self.import_from_reader(reader).await,
            Err(e) => {
                error!(error = %e, "打开导入文件失败");
                ImportResult::failed(format!("Import error: {}", ImportError::from(e)))
            }
        }
    }

    async fn import_from_reader(&self, mut reader: Box<dyn Read + Send>) -> ImportResult {
        let mut content = Vec::new();
        if let Err(e) = reader.read_to_end(&mut content) {
            error!(error = %e, "读取导入文件失败");
            return ImportResult::failed(format!("Import error: {}", ImportError::from(e)));
        }

        self.import_from_bytes(&content).await
    }

    #[instrument(skip(self, content), fields(batch_id, bytes = content.len()))]
    async fn import_from_bytes(&self, content: &[u8]) -> ImportResult {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, "开始导入员工档案");

        self.log_preview(content).await;

        match self.run_import(content).await {
            Ok(result) => {
                info!(
                    batch_id = %batch_id,
                    success_count = result.success_count,
                    parsed = result.imported_employees.len(),
                    error_count = result.error_count,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "导入完成"
                );
                result
            }
            Err(e) => {
                error!(batch_id = %batch_id, error = %e, "导入失败");
                ImportResult::failed(format!("Import error: {}", e))
            }
        }
    }
}
