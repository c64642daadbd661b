use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// 查询 Linode 账户信息
#[derive(Parser, Debug)]
#[command(name = "linode-account", version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// Personal Access Token（优先于配置文件和 LINODE_TOKEN）
    #[arg(long)]
    pub token: Option<String>,

    /// 覆盖配置中的 API 地址
    #[arg(long)]
    pub api_url: Option<String>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// 日志写入文件而不是 stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 获取账户信息（默认）
    Account,
    /// 打印字段 schema
    Schema,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}
