//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义和 JSON 数据结构。

pub mod prelude;

// === JSON 数据结构（嵌入文本列）===
pub mod lists;

// === SeaORM 实体（对应数据库表）===
pub mod games;
pub mod threads;
pub mod user;
