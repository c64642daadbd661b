//! 账户数据源的字段声明
//!
//! 所有字段都是只读的计算字段，值全部来自 API 响应

use serde::Serialize;

/// 字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    List,
}

/// 单个字段的声明
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub description: &'static str,
    /// 只能由数据源填充，不能由用户配置
    pub computed: bool,
    /// 列表字段允许的最大元素数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// 列表元素的字段声明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<&'static [FieldSchema]>,
}

impl FieldSchema {
    const fn computed(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            description,
            computed: true,
            max_items: None,
            elem: None,
        }
    }

    const fn computed_list(
        name: &'static str,
        description: &'static str,
        max_items: usize,
        elem: &'static [FieldSchema],
    ) -> Self {
        Self {
            name,
            field_type: FieldType::List,
            description,
            computed: true,
            max_items: Some(max_items),
            elem: Some(elem),
        }
    }
}

pub const CREDIT_CARD_SCHEMA: &[FieldSchema] = &[
    FieldSchema::computed(
        "last_four",
        FieldType::String,
        "The last four digits of the credit card associated with this Account.",
    ),
    FieldSchema::computed(
        "expiry",
        FieldType::String,
        "The expiration month and year of the credit card.",
    ),
];

pub const ACCOUNT_SCHEMA: &[FieldSchema] = &[
    FieldSchema::computed(
        "email",
        FieldType::String,
        "The email address for this Account, for account management communications, and may be used for other communications as configured.",
    ),
    FieldSchema::computed(
        "first_name",
        FieldType::String,
        "The first name of the person associated with this Account.",
    ),
    FieldSchema::computed(
        "last_name",
        FieldType::String,
        "The last name of the person associated with this Account.",
    ),
    FieldSchema::computed(
        "company",
        FieldType::String,
        "The company name associated with this Account.",
    ),
    FieldSchema::computed(
        "address_1",
        FieldType::String,
        "First line of this Account's billing address.",
    ),
    FieldSchema::computed(
        "address_2",
        FieldType::String,
        "Second line of this Account's billing address.",
    ),
    FieldSchema::computed(
        "phone",
        FieldType::String,
        "The phone number associated with this Account.",
    ),
    FieldSchema::computed(
        "city",
        FieldType::String,
        "The city for this Account's billing address.",
    ),
    FieldSchema::computed(
        "state",
        FieldType::String,
        "If billing address is in the United States, this is the State portion of the Account's billing address. If the address is outside the US, this is the Province associated with the Account's billing address.",
    ),
    FieldSchema::computed(
        "country",
        FieldType::String,
        "The two-letter country code of this Account's billing address.",
    ),
    FieldSchema::computed(
        "zip",
        FieldType::String,
        "The zip code of this Account's billing address.",
    ),
    FieldSchema::computed_list(
        "credit_card",
        "Credit Card information associated with this Account.",
        1,
        CREDIT_CARD_SCHEMA,
    ),
    FieldSchema::computed(
        "tax_id",
        FieldType::String,
        "The tax identification number associated with this Account, for tax calculations in some countries. If the account is not based in a country that collects tax, this should be null.",
    ),
    FieldSchema::computed(
        "balance",
        FieldType::Int,
        "This Account's balance, in US dollars.",
    ),
];

/// 按名称查找账户字段
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    ACCOUNT_SCHEMA.iter().find(|f| f.name == name)
}

/// 每个字段一行：`名称  类型  描述`，列表元素以 `父字段.子字段` 展开
pub fn describe(fields: &[FieldSchema]) -> String {
    let mut out = String::new();
    describe_into(&mut out, "", fields);
    out
}

fn describe_into(out: &mut String, prefix: &str, fields: &[FieldSchema]) {
    for field in fields {
        let name = format!("{}{}", prefix, field.name);
        let field_type = match (field.field_type, field.max_items) {
            (FieldType::String, _) => "string".to_string(),
            (FieldType::Int, _) => "int".to_string(),
            (FieldType::List, Some(max)) => format!("list(max {})", max),
            (FieldType::List, None) => "list".to_string(),
        };
        out.push_str(&format!("{:<24}{:<14}{}\n", name, field_type, field.description));
        if let Some(elem) = field.elem {
            describe_into(out, &format!("{}.", name), elem);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_computed() {
        assert!(ACCOUNT_SCHEMA.iter().all(|f| f.computed));
        assert!(CREDIT_CARD_SCHEMA.iter().all(|f| f.computed));
    }

    #[test]
    fn test_credit_card_is_single_item_list() {
        let credit_card = field("credit_card").unwrap();
        assert_eq!(credit_card.field_type, FieldType::List);
        assert_eq!(credit_card.max_items, Some(1));

        let names: Vec<_> = credit_card.elem.unwrap().iter().map(|f| f.name).collect();
        assert_eq!(names, ["last_four", "expiry"]);
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(field("balance").unwrap().field_type, FieldType::Int);
        assert!(field("id").is_none());
    }

    #[test]
    fn test_describe_expands_nested_fields() {
        let text = describe(ACCOUNT_SCHEMA);
        assert_eq!(text.lines().count(), ACCOUNT_SCHEMA.len() + CREDIT_CARD_SCHEMA.len());
        assert!(text.lines().any(|l| l.starts_with("credit_card ") && l.contains("list(max 1)")));
        assert!(text.lines().any(|l| l.starts_with("credit_card.last_four ")));
        assert!(text.lines().any(|l| l.starts_with("balance ") && l.contains("int")));
    }

    #[test]
    fn test_serialize_shape() {
        let value = serde_json::to_value(field("credit_card").unwrap()).unwrap();
        assert_eq!(value["type"], "list");
        assert_eq!(value["max_items"], 1);
        assert_eq!(value["elem"][0]["name"], "last_four");
        assert!(value["elem"][0].get("max_items").is_none());

        let value = serde_json::to_value(field("email").unwrap()).unwrap();
        assert_eq!(value["type"], "string");
        assert!(value.get("elem").is_none());
    }
}
