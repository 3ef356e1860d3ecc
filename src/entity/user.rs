//! 用户设置实体
//!
//! user 表只有一条固定记录（ID 为 1），存储应用级配置。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    /// 本地游戏库根目录
    #[sea_orm(column_type = "Text", nullable)]
    pub library_root_path: Option<String>,
    /// 目录平台地址（为空时使用默认值）
    #[sea_orm(column_type = "Text", nullable)]
    pub catalog_base_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
