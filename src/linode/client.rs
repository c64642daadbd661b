//! Linode API 客户端

use std::future::Future;

use anyhow::{Context, Result};
use reqwest::Client;

use super::model::account::{Account, ApiErrorResponse};
use crate::http_client::{ProxyConfig, build_client};
use crate::model::config::{Config, TOKEN_ENV, TlsBackend};

/// 获取账户信息的能力
///
/// 数据源只依赖这个 trait，便于在测试中替换真实 API
pub trait AccountApi {
    fn get_account(&self) -> impl Future<Output = Result<Account>> + Send;
}

/// 基于 reqwest 的 Linode API 客户端
#[derive(Clone)]
pub struct LinodeClient {
    /// HTTP 客户端
    client: Client,
    /// 带版本号的 API 根地址
    base_url: String,
    /// Personal Access Token
    token: String,
    user_agent: String,
}

impl LinodeClient {
    /// 创建新的 API 客户端
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        proxy: Option<&ProxyConfig>,
        timeout_secs: u64,
        tls_backend: TlsBackend,
    ) -> Result<Self> {
        let client =
            build_client(proxy, timeout_secs, tls_backend).context("创建 HTTP 客户端失败")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            user_agent: default_user_agent(),
        })
    }

    /// 根据应用配置创建客户端
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.effective_token().with_context(|| {
            format!("未配置 API token，请通过 --token、配置文件或 {} 提供", TOKEN_ENV)
        })?;

        let mut client = Self::new(
            config.base_url(),
            token,
            config.proxy_config().as_ref(),
            config.timeout_secs,
            config.tls_backend,
        )?;

        if let Some(prefix) = config.ua_prefix.as_deref().filter(|p| !p.is_empty()) {
            client.user_agent = format!("{} {}", prefix, client.user_agent);
        }

        Ok(client)
    }

    /// API 根地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl AccountApi for LinodeClient {
    async fn get_account(&self) -> Result<Account> {
        let url = format!("{}/account", self.base_url);
        tracing::debug!("发送账户查询请求到: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .context("发送账户查询请求失败")?;

        let status = response.status();
        let response_text = response.text().await.context("读取响应文本失败")?;
        tracing::debug!("账户查询响应: HTTP {} {}", status, response_text);

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&response_text)
                .map(|e| e.message())
                .unwrap_or(response_text);
            anyhow::bail!("HTTP {} - {}", status, detail);
        }

        serde_json::from_str::<Account>(&response_text)
            .with_context(|| format!("解析账户响应失败，原始响应: {}", response_text))
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
