// ==========================================
// 员工档案管理 - 命令行入口
// ==========================================
// 输出: JSON（stdout），日志输出到 stderr
// ==========================================

use anyhow::anyhow;
use clap::Parser;
use employee_import::app::{get_default_db_path, AppState};
use employee_import::cli::{Cli, Commands};
use employee_import::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    logging::init();

    let db_path = cli
        .db_path
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(get_default_db_path);
    tracing::info!(
        version = employee_import::VERSION,
        db_path = %db_path,
        "启动 {}",
        employee_import::APP_NAME
    );

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let output = match cli.command {
        Commands::Import { file } => {
            let result = state.import_api.import_from_path(&file).await?;
            serde_json::to_string_pretty(&result)?
        }
        Commands::List(args) => {
            let employees = state.employee_api.query_employees(
                &args.sort_field,
                &args.sort_order,
                args.search.as_deref(),
            )?;
            serde_json::to_string_pretty(&employees)?
        }
        Commands::Get { id } => {
            let employee = state.employee_api.get_employee_by_id(id)?;
            serde_json::to_string_pretty(&employee)?
        }
        Commands::Delete { id } => {
            let deleted = state.employee_api.delete_employee(id)?;
            serde_json::to_string_pretty(&serde_json::json!({ "id": id, "deleted": deleted }))?
        }
    };

    println!("{}", output);
    Ok(())
}
