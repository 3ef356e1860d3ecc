//! 订阅帖子实体
//!
//! threads 表记录用户在目录平台上关注的帖子。
//! 主键为从帖子链接中提取的 ID，不使用自增。
//! update_available 仅在观察到链接变化时置位（见 sync::threads 模块说明）。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lists::TagList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "threads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    // === 核心信息 ===
    #[sea_orm(column_type = "Text")]
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub tags: TagList,

    // === 更新状态 ===
    pub update_available: bool,
    pub marked_as_read: bool,

    // === 时间戳 ===
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
