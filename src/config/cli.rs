use crate::config::toml_config::DirectoryConfig;
use crate::core::aggregate::DEFAULT_TOP_EARNERS;
use crate::domain::model::EmployeeInput;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "employee-directory")]
#[command(about = "Query and manage employees through the upstream employee API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override the upstream employee endpoint")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 列出所有員工
    List,
    /// 依 ID 查詢
    Get { id: String },
    /// 姓名子字串搜尋（不分大小寫）
    Search {
        #[arg(default_value = "")]
        text: String,
    },
    HighestSalary,
    TopEarners {
        #[arg(long, default_value_t = DEFAULT_TOP_EARNERS)]
        limit: usize,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: u64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        title: String,
    },
    Delete { id: String },
}

impl CliConfig {
    /// CLI 參數優先於設定檔，設定檔優先於預設值
    pub fn resolve(&self) -> Result<DirectoryConfig> {
        let mut config = match &self.config {
            Some(path) => DirectoryConfig::from_file(path)?,
            None => DirectoryConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

impl Command {
    /// 只在 create 時回傳已驗證的輸入
    pub fn employee_input(&self) -> Option<Result<EmployeeInput>> {
        match self {
            Command::Create {
                name,
                salary,
                age,
                title,
            } => {
                let input = EmployeeInput {
                    name: name.clone(),
                    salary: *salary,
                    age: *age,
                    title: title.clone(),
                };
                Some(input.validate().map(|_| input))
            }
            _ => None,
        }
    }
}
