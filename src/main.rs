use anyhow::Context;
use clap::Parser;
use employee_directory::utils::logger;
use employee_directory::{
    CliConfig, Command, DirectoryError, EmployeeDirectory, EmployeeInput, ErrorKind,
    ReqwestTransport,
};

fn exit_code(error: &DirectoryError) -> i32 {
    match error.kind() {
        Some(ErrorKind::NotFound) => 2,
        Some(ErrorKind::RateLimited) => 3,
        Some(ErrorKind::ExternalFailure) => 4,
        None => 1,
    }
}

async fn execute(
    directory: &EmployeeDirectory<ReqwestTransport>,
    command: &Command,
    input: Option<&EmployeeInput>,
) -> Result<serde_json::Value, DirectoryError> {
    let value = match command {
        Command::List => serde_json::to_value(directory.get_all().await?)?,
        Command::Get { id } => serde_json::to_value(directory.get_by_id(id).await?)?,
        Command::Search { text } => serde_json::to_value(directory.search(text).await?)?,
        Command::HighestSalary => serde_json::to_value(directory.highest_salary().await?)?,
        Command::TopEarners { limit } => {
            serde_json::to_value(directory.top_earning_names(*limit).await?)?
        }
        Command::Create { .. } => match input {
            Some(input) => serde_json::to_value(directory.create(input).await?)?,
            None => serde_json::Value::Null,
        },
        Command::Delete { id } => serde_json::to_value(directory.delete_by_id(id).await?)?,
    };
    Ok(value)
}

fn report_and_exit(error: DirectoryError) -> ! {
    tracing::error!(
        "❌ {} (Kind: {:?}, Retryable: {})",
        error,
        error.kind(),
        error.is_retryable()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 Suggestion: {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.resolve().context("Failed to load configuration")?;
    tracing::debug!("Resolved config: {:?}", config);

    // 本地驗證先於任何上游呼叫
    let input = match cli.command.employee_input().transpose() {
        Ok(input) => input,
        Err(e) => report_and_exit(e),
    };

    let directory =
        EmployeeDirectory::from_config(&config).context("Failed to initialise the HTTP client")?;
    tracing::info!("Using upstream employee API at {}", directory.base_url());

    match execute(&directory, &cli.command, input.as_ref()).await {
        Ok(value) => {
            let rendered = serde_json::to_string_pretty(&value).context("Failed to render output")?;
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => report_and_exit(e),
    }
}
