//! 游戏数据实体
//!
//! games 表是核心表，记录本地已安装的游戏及其目录平台元数据。
//! 主键为目录平台分配的稳定 ID，不使用自增。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lists::{SavePathList, TagList};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    // === 核心信息 ===
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// 无法解析时为 "Unknown"
    #[sea_orm(column_type = "Text")]
    pub version: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub author: Option<String>,

    // === JSON 列 ===
    #[sea_orm(column_type = "Text")]
    pub tags: TagList,
    #[sea_orm(column_type = "Text")]
    pub save_paths: SavePathList,

    // === 本地状态 ===
    #[sea_orm(column_type = "Text")]
    pub game_directory: String,

    // === 时间戳 ===
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
