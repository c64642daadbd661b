//! Linode API 使用的 reqwest Client
//!
//! 超时、TLS 实现和代理都来自 [`Config`](crate::model::config::Config)

use anyhow::Context;
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;

use crate::model::config::TlsBackend;

/// 出站代理
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    /// http/https/socks5 地址
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// 附加 Basic 认证
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    fn to_proxy(&self) -> anyhow::Result<Proxy> {
        let proxy = Proxy::all(&self.url).with_context(|| format!("代理地址无效: {}", self.url))?;
        Ok(match (&self.username, &self.password) {
            (Some(username), Some(password)) => proxy.basic_auth(username, password),
            _ => proxy,
        })
    }
}

/// 构建 HTTP Client
///
/// `timeout_secs` 为 0 时不设置请求超时
pub fn build_client(
    proxy: Option<&ProxyConfig>,
    timeout_secs: u64,
    tls_backend: TlsBackend,
) -> anyhow::Result<Client> {
    let mut builder = with_tls(Client::builder(), tls_backend);

    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    if let Some(proxy_config) = proxy {
        builder = builder.proxy(proxy_config.to_proxy()?);
        tracing::debug!("HTTP Client 使用代理: {}", proxy_config.url);
    }

    builder.build().context("构建 HTTP Client 失败")
}

/// NativeTls 使用 reqwest 默认的 TLS 实现
fn with_tls(builder: ClientBuilder, tls_backend: TlsBackend) -> ClientBuilder {
    match tls_backend {
        TlsBackend::Rustls => builder.use_rustls_tls(),
        TlsBackend::NativeTls => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_config_with_auth() {
        let config = ProxyConfig::new("socks5://127.0.0.1:1080").with_auth("user", "pass");
        assert_eq!(config.url, "socks5://127.0.0.1:1080");
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("pass"));
        assert!(config.to_proxy().is_ok());
    }

    #[test]
    fn test_build_client_with_proxy() {
        let config = ProxyConfig::new("http://127.0.0.1:7890");
        assert!(build_client(Some(&config), 30, TlsBackend::Rustls).is_ok());
    }

    #[test]
    fn test_build_client_native_tls() {
        assert!(build_client(None, 30, TlsBackend::NativeTls).is_ok());

        let config = ProxyConfig::new("socks5://127.0.0.1:1080").with_auth("user", "pass");
        assert!(build_client(Some(&config), 30, TlsBackend::NativeTls).is_ok());
    }

    #[test]
    fn test_build_client_without_timeout() {
        assert!(build_client(None, 0, TlsBackend::Rustls).is_ok());
    }
}
