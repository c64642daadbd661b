use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::http_client::ProxyConfig;

/// 未配置 token 时读取的环境变量
pub const TOKEN_ENV: &str = "LINODE_TOKEN";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TlsBackend {
    #[default]
    Rustls,
    NativeTls,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Linode API 地址（不含版本号）
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Personal Access Token，未配置时回退到 `LINODE_TOKEN` 环境变量
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// 请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub tls_backend: TlsBackend,

    /// HTTP 代理地址（可选）
    /// 支持格式: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// 代理认证用户名（可选）
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// 代理认证密码（可选）
    #[serde(default)]
    pub proxy_password: Option<String>,

    /// User-Agent 前缀（可选）
    #[serde(default)]
    pub ua_prefix: Option<String>,

    /// 配置文件路径（运行时元数据，不写入 JSON）
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_api_url() -> String {
    "https://api.linode.com".to_string()
}

fn default_api_version() -> String {
    "v4".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: default_api_version(),
            token: None,
            timeout_secs: default_timeout_secs(),
            tls_backend: TlsBackend::default(),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
            ua_prefix: None,
            config_path: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置，文件不存在时返回默认配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// 获取配置文件路径（如果有）
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 带版本号的 API 根地址，例如 `https://api.linode.com/v4`
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// 获取有效的 token
    /// 优先使用配置中的 token，未配置时回退到 `LINODE_TOKEN`
    pub fn effective_token(&self) -> Option<String> {
        pick_token(self.token.as_deref(), std::env::var(TOKEN_ENV).ok())
    }

    /// 由 proxy_* 字段组装代理配置
    pub fn proxy_config(&self) -> Option<ProxyConfig> {
        let url = self.proxy_url.as_deref().filter(|url| !url.is_empty())?;
        let mut proxy = ProxyConfig::new(url);
        if let (Some(username), Some(password)) = (&self.proxy_username, &self.proxy_password) {
            proxy = proxy.with_auth(username.as_str(), password.as_str());
        }
        Some(proxy)
    }
}

/// 空白 token 视为未配置，继续向下回退
fn pick_token(configured: Option<&str>, env: Option<String>) -> Option<String> {
    let non_blank = |token: &str| Some(token.trim()).filter(|t| !t.is_empty()).map(str::to_string);
    configured
        .and_then(non_blank)
        .or_else(|| env.as_deref().and_then(non_blank))
}
