//! Linode API 模块
//!
//! 只实现账户查询所需的部分

pub mod client;
pub mod model;

pub use client::{AccountApi, LinodeClient};
