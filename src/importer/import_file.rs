// ==========================================
// 员工档案管理 - 导入文件抽象
// ==========================================
// 职责: 屏蔽上传文件/磁盘文件差异，只暴露文件名、长度、读取流
// ==========================================

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// ImportFile Trait
// ==========================================
// 实现者: PathImportFile（磁盘文件）, InMemoryImportFile（已上传字节）
pub trait ImportFile: Send + Sync {
    /// 文件名（含扩展名）
    fn file_name(&self) -> &str;

    /// 文件长度（字节）
    fn len(&self) -> u64;

    /// 文件是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 打开读取流
    fn open_read_stream(&self) -> io::Result<Box<dyn Read + Send>>;
}

// ==========================================
// PathImportFile - 磁盘文件
// ==========================================
#[derive(Debug, Clone)]
pub struct PathImportFile {
    path: PathBuf,
    file_name: String,
    len: u64,
}

impl PathImportFile {
    /// 打开磁盘文件（读取元数据，不读取内容）
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file: {}", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            file_name,
            len: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImportFile for PathImportFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn open_read_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(file))
    }
}

// ==========================================
// InMemoryImportFile - 已上传字节
// ==========================================
#[derive(Debug, Clone)]
pub struct InMemoryImportFile {
    file_name: String,
    content: Vec<u8>,
}

impl InMemoryImportFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

impl ImportFile for InMemoryImportFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn len(&self) -> u64 {
        self.content.len() as u64
    }

    fn open_read_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.content.clone())))
    }
}

/// 文件扩展名是否在允许列表中（不区分大小写，列表项不含点）
pub fn has_allowed_extension(file: &dyn ImportFile, allowed: &[String]) -> bool {
    let name = file.file_name().to_lowercase();
    let matched = allowed
        .iter()
        .any(|ext| name.ends_with(&format!(".{}", ext.to_lowercase())));

    debug!(file_name = %name, matched, "检查导入文件扩展名");
    matched
}

/// 是否为 CSV 文件
pub fn is_csv_file(file: &dyn ImportFile) -> bool {
    has_allowed_extension(file, &["csv".to_string()])
}
