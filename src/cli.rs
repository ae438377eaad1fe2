// ==========================================
// 员工档案管理 - 命令行参数
// ==========================================
// 子命令: import / list / get / delete
// 数据库: --db-path 或 EMPLOYEE_IMPORT_DB_PATH，缺省时取用户数据目录
// ==========================================

use clap::{Args, Parser, Subcommand};

/// 员工档案管理命令行
#[derive(Parser, Debug)]
#[command(name = "employee-import")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite 数据库文件路径
    #[arg(long, env = "EMPLOYEE_IMPORT_DB_PATH")]
    pub db_path: Option<String>,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 从分隔文本文件导入员工档案
    Import {
        /// 导入文件路径
        file: String,
    },

    /// 列出员工（过滤 + 排序）
    List(ListArgs),

    /// 按 id 查询员工
    Get {
        /// 员工 id
        id: i64,
    },

    /// 按 id 删除员工
    Delete {
        /// 员工 id
        id: i64,
    },
}

/// list 子命令参数
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// 搜索串（任一字段包含即命中，不区分大小写）
    #[arg(short, long)]
    pub search: Option<String>,

    /// 排序字段（如 surname / startDate），缺省取配置
    #[arg(long, default_value = "")]
    pub sort_field: String,

    /// 排序方向（asc / desc），缺省取配置
    #[arg(long, default_value = "")]
    pub sort_order: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["employee-import", "import", "staff.csv"]);
        assert!(matches!(cli.command, Commands::Import { ref file } if file == "staff.csv"));
    }

    #[test]
    fn test_cli_parse_list_defaults() {
        let cli = Cli::parse_from(["employee-import", "list"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.search, None);
                assert_eq!(args.sort_field, "");
                assert_eq!(args.sort_order, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_list_with_options() {
        let cli = Cli::parse_from([
            "employee-import",
            "list",
            "--search",
            "smith",
            "--sort-field",
            "startDate",
            "--sort-order",
            "desc",
        ]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.search.as_deref(), Some("smith"));
                assert_eq!(args.sort_field, "startDate");
                assert_eq!(args.sort_order, "desc");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_db_path_and_id() {
        let cli = Cli::parse_from(["employee-import", "--db-path", "/tmp/e.db", "get", "42"]);
        assert_eq!(cli.db_path.as_deref(), Some("/tmp/e.db"));
        assert!(matches!(cli.command, Commands::Get { id: 42 }));
    }

    #[test]
    fn test_cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["employee-import", "delete", "abc"]).is_err());
    }
}
