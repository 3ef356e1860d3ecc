//! 预导入模块
//!
//! 提供常用类型的快捷导入。

// === SeaORM 实体 ===
pub use super::games::Entity as Games;
pub use super::threads::Entity as Threads;
pub use super::user::Entity as User;

// === JSON 数据结构（嵌入 games / threads 表）===
// 注意：列表结构体（TagList, SavePathList）已直接在实体文件中使用，
// 无需在 prelude 中重复导出
