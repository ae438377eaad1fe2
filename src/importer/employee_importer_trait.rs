// ==========================================
// 员工档案管理 - 员工导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 读取 → 解析（分隔符/表头/字段映射）→ 行过滤 → 落库 → 汇总
// ==========================================

use crate::domain::employee::{Employee, ImportResult};
use crate::importer::error::ImporterResult;
use crate::importer::import_file::ImportFile;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::io::Read;

/// 字段写入函数（表头 → Employee 字段）
pub type FieldSetter = fn(&mut Employee, &str);

// ==========================================
// EmployeeImporter Trait
// ==========================================
// 用途: 导入协调器主接口
// 实现者: EmployeeImporterImpl
// 约定: 永不返回错误，全部失败折叠进 ImportResult
#[async_trait]
pub trait EmployeeImporter: Send + Sync {
    /// 从导入文件导入员工档案
    ///
    /// # 参数
    /// - file: 导入文件（磁盘文件或已上传字节）
    ///
    /// # 返回
    /// - ImportResult: 成功数、错误数、错误信息、解析出的全部记录
    async fn import_from_file(&self, file: &dyn ImportFile) -> ImportResult;

    /// 从字节流导入员工档案
    ///
    /// # 参数
    /// - reader: 可读字节流
    async fn import_from_reader(&self, reader: Box<dyn Read + Send>) -> ImportResult;

    /// 从内存字节导入员工档案
    async fn import_from_bytes(&self, content: &[u8]) -> ImportResult;
}

// ==========================================
// EmployeeFileParser Trait
// ==========================================
// 用途: 分隔文本解析（读取 → Vec<Employee>）
// 实现者: DelimitedEmployeeParser
pub trait EmployeeFileParser: Send + Sync {
    /// 以当前时刻为基准解析
    ///
    /// # 返回
    /// - Ok(Vec<Employee>): 通过行过滤的记录（保持输入行序）
    /// - Err(NoData / MissingRequiredHeaders): 文件结构错误
    fn parse(&self, content: &[u8]) -> ImporterResult<Vec<Employee>> {
        self.parse_at(content, chrono::Local::now().naive_local())
    }

    /// 以指定时刻为基准解析（日期过滤规则以 now 判定）
    fn parse_at(&self, content: &[u8], now: NaiveDateTime) -> ImporterResult<Vec<Employee>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 表头解析 + 单行字段映射
// 实现者: EmployeeFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 按列解析表头，每列对应一个字段写入函数（未识别列为 None）
    fn resolve_columns(&self, headers: &[String]) -> Vec<Option<FieldSetter>>;

    /// 将一行值映射为 Employee
    ///
    /// # 说明
    /// - 值两端空白去除
    /// - 行列数少于表头时，缺失列保持默认值
    fn map_row(&self, columns: &[Option<FieldSetter>], values: &StringRecord) -> Employee;
}

// ==========================================
// RowFilter Trait
// ==========================================
// 用途: 行级跳过策略（跳过不报错，只记日志）
// 实现者: EmployeeRowFilter
pub trait RowFilter: Send + Sync {
    /// 检查记录
    ///
    /// # 返回
    /// - None: 保留
    /// - Some(SkipReason): 跳过原因
    fn check(&self, employee: &Employee, now: NaiveDateTime) -> Option<SkipReason>;
}

/// 行跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 工资号为空
    EmptyPayrollNumber,
    /// 出生日期不早于当前时刻
    DateOfBirthNotInPast,
    /// 入职日期晚于当前时刻
    FutureStartDate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyPayrollNumber => write!(f, "Empty PayrollNumber"),
            SkipReason::DateOfBirthNotInPast => write!(f, "Invalid DateOfBirth"),
            SkipReason::FutureStartDate => write!(f, "Future StartDate"),
        }
    }
}
