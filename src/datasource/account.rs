//! 账户数据源
//!
//! 调用一次 `GET /account`，把响应逐字段复制到 [`AccountState`]

use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use super::schema::{self, ACCOUNT_SCHEMA, FieldSchema};
use crate::linode::AccountApi;
use crate::linode::model::account::{Account, CreditCard};

/// 数据源的输出记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountState {
    /// 以账户邮箱作为标识
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
    /// 最多一项，未绑定信用卡时为空
    credit_card: Vec<CreditCardState>,
    pub tax_id: Option<String>,
    pub balance: i64,
}

/// 展开后的信用卡记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreditCardState {
    pub last_four: String,
    pub expiry: String,
}

impl AccountState {
    pub fn credit_card(&self) -> &[CreditCardState] {
        &self.credit_card
    }

    /// 写入信用卡列表，元素数不能超过字段声明的 `max_items`
    pub fn set_credit_card(&mut self, cards: Vec<CreditCardState>) -> Result<()> {
        if let Some(max_items) = schema::field("credit_card").and_then(|f| f.max_items) {
            if cards.len() > max_items {
                anyhow::bail!("credit_card 最多允许 {} 项，实际 {} 项", max_items, cards.len());
            }
        }
        self.credit_card = cards;
        Ok(())
    }
}

/// 把嵌套的信用卡对象展开成单元素列表
pub fn flatten_credit_card(card: &CreditCard) -> Vec<CreditCardState> {
    vec![CreditCardState {
        last_four: card.last_four.clone(),
        expiry: card.expiry.clone(),
    }]
}

/// 账户数据源的字段声明
pub fn account_schema() -> &'static [FieldSchema] {
    ACCOUNT_SCHEMA
}

/// 账户查询
pub struct AccountLookup<'a, C> {
    client: &'a C,
}

impl<'a, C: AccountApi> AccountLookup<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// 查询账户并返回新的记录
    pub async fn fetch(&self) -> Result<AccountState> {
        let mut state = AccountState::default();
        self.read_into(&mut state).await?;
        Ok(state)
    }

    /// 查询账户并填充已有记录
    ///
    /// 请求失败时 `state` 保持不变
    pub async fn read_into(&self, state: &mut AccountState) -> Result<()> {
        let account = self
            .client
            .get_account()
            .await
            .context("获取账户信息失败")?;

        populate(state, account)?;
        tracing::info!("已获取账户信息: {}", state.id);
        tracing::debug!("信用卡记录数: {}", state.credit_card().len());
        Ok(())
    }
}

fn populate(state: &mut AccountState, account: Account) -> Result<()> {
    let cards = account
        .credit_card
        .as_ref()
        .map(flatten_credit_card)
        .unwrap_or_default();

    let mut next = AccountState {
        id: account.email.clone(),
        email: account.email,
        first_name: account.first_name,
        last_name: account.last_name,
        company: account.company,
        address_1: account.address_1,
        address_2: account.address_2,
        phone: account.phone,
        city: account.city,
        state: account.state,
        country: account.country,
        zip: account.zip,
        credit_card: Vec::new(),
        tax_id: account.tax_id,
        balance: account.balance,
    };
    next.set_credit_card(cards)
        .context("解析账户信用卡信息失败")?;

    *state = next;
    Ok(())
}

/// 以 `key = value` 形式逐行输出，顺序与字段声明一致
impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = serde_json::to_value(self).map_err(|_| fmt::Error)?;
        writeln!(f, "id = {}", self.id)?;
        for field in ACCOUNT_SCHEMA {
            write_value(f, field.name, &value[field.name])?;
        }
        Ok(())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, key: &str, value: &Value) -> fmt::Result {
    match value {
        Value::Null => writeln!(f, "{} =", key),
        Value::String(s) => writeln!(f, "{} = {}", key, s),
        Value::Array(items) => {
            writeln!(f, "{}.# = {}", key, items.len())?;
            for (i, item) in items.iter().enumerate() {
                write_value(f, &format!("{}.{}", key, i), item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            for (k, v) in map {
                write_value(f, &format!("{}.{}", key, k), v)?;
            }
            Ok(())
        }
        other => writeln!(f, "{} = {}", key, other),
    }
}
