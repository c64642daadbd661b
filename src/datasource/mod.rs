//! 只读数据源
//!
//! 字段声明与填充逻辑分开存放

pub mod account;
pub mod schema;

pub use account::{AccountLookup, account_schema};
