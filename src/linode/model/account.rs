//! 账户信息数据模型
//!
//! 包含 `GET /account` API 的响应类型定义

use serde::{Deserialize, Deserializer};

/// 账户信息查询响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// 账户邮箱，用于账户管理通知
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,

    /// 账单地址第一行
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address_1: String,

    /// 账单地址第二行
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address_2: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,

    /// 美国地址为州，其他地区为省
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,

    /// 两位国家代码
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub zip: String,

    /// 税号，不征税的国家为 null
    #[serde(default)]
    pub tax_id: Option<String>,

    /// 账户余额（美元），API 返回浮点数，截断为整数
    #[serde(default, deserialize_with = "number_as_i64")]
    pub balance: i64,

    /// 绑定的信用卡
    #[serde(default)]
    pub credit_card: Option<CreditCard>,
}

/// 信用卡信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreditCard {
    /// 卡号后四位
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_four: String,

    /// 过期月份和年份，例如 `12/2025`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expiry: String,
}

/// API 错误响应
///
/// 形如 `{"errors": [{"reason": "Invalid Token", "field": "token"}]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub errors: Vec<ApiErrorReason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorReason {
    pub reason: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl ApiErrorResponse {
    /// 合并所有错误原因，带字段名的写成 `field: reason`
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| match &e.field {
                Some(field) => format!("{}: {}", field, e.reason),
                None => e.reason.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn number_as_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map_or(0, |n| n.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialize() {
        let json = r#"{
            "email": "a@b.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "company": "Analytical Engines",
            "address_1": "1 Main St",
            "address_2": "Suite 2",
            "phone": "215-555-1212",
            "city": "Philadelphia",
            "state": "PA",
            "country": "US",
            "zip": "19102",
            "tax_id": null,
            "balance": 500,
            "credit_card": {"last_four": "1234", "expiry": "12/25"},
            "active_since": "2018-01-01T00:01:01"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.address_1, "1 Main St");
        assert_eq!(account.address_2, "Suite 2");
        assert_eq!(account.tax_id, None);
        assert_eq!(account.balance, 500);
        assert_eq!(
            account.credit_card,
            Some(CreditCard {
                last_four: "1234".to_string(),
                expiry: "12/25".to_string(),
            })
        );
    }

    #[test]
    fn test_account_null_fields() {
        let json = r#"{"email": "a@b.com", "company": null, "credit_card": null}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.company, "");
        assert_eq!(account.balance, 0);
        assert!(account.credit_card.is_none());
    }

    #[test]
    fn test_account_fractional_balance() {
        let account: Account = serde_json::from_str(r#"{"email":"a@b.com","balance":0.0}"#).unwrap();
        assert_eq!(account.balance, 0);

        let account: Account = serde_json::from_str(r#"{"email":"a@b.com","balance":12.5}"#).unwrap();
        assert_eq!(account.balance, 12);

        let account: Account = serde_json::from_str(r#"{"email":"a@b.com","balance":-3.75}"#).unwrap();
        assert_eq!(account.balance, -3);

        let account: Account = serde_json::from_str(r#"{"email":"a@b.com","balance":null}"#).unwrap();
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_api_error_message() {
        let json = r#"{"errors": [{"reason": "Invalid Token"}, {"reason": "required", "field": "token"}]}"#;
        let resp: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.message(), "Invalid Token; token: required");
    }
}
