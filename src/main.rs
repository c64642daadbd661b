mod datasource;
mod http_client;
mod linode;
mod model;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use datasource::{AccountLookup, schema};
use linode::LinodeClient;
use model::arg::{Args, Command, OutputFormat};
use model::config::Config;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let guard = match init_logging(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("初始化日志失败: {:#}", e);
            std::process::exit(1);
        }
    };

    let echo_to_stderr = error_needs_stderr(guard.is_some());
    let result = run(args).await;
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    // 退出前刷新文件日志
    drop(guard);

    if let Err(e) = result {
        if echo_to_stderr {
            eprintln!("错误: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// 日志写文件时 stderr 看不到 `tracing::error!`，需要再输出一次
fn error_needs_stderr(logs_to_file: bool) -> bool {
    logs_to_file
}

/// 初始化日志，默认写 stderr，stdout 只输出结果
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("日志文件路径无效: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let command = args.command.unwrap_or(Command::Account);

    if command == Command::Schema {
        match args.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(datasource::account_schema())?
            ),
            OutputFormat::Text => print!("{}", schema::describe(datasource::account_schema())),
        }
        return Ok(());
    }

    let config_path = args
        .config
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = Config::load(&config_path)?;
    if let Some(path) = config.config_path() {
        tracing::debug!("配置文件: {}", path.display());
    }

    if let Some(token) = args.token {
        config.token = Some(token);
    }
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    let client = LinodeClient::from_config(&config)?;
    tracing::debug!("API 地址: {}", client.base_url());

    let state = AccountLookup::new(&client).fetch().await?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
        OutputFormat::Text => print!("{}", state),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_printed_once() {
        assert!(!error_needs_stderr(false));
        assert!(error_needs_stderr(true));
    }

    #[test]
    fn test_schema_output_needs_no_client() {
        let json = serde_json::to_value(datasource::account_schema()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), schema::ACCOUNT_SCHEMA.len());
        assert!(schema::describe(datasource::account_schema()).starts_with("email "));
    }
}
