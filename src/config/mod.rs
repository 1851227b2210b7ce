//! 配置管理
//!
//! 按 `config.toml` → `config.{APP_ENV}.toml` → `UMC__*` 环境变量的顺序合并。

mod r#impl;
mod structs;

pub use structs::*;
