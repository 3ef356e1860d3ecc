//! 游戏库数据仓库（单表架构）
//!
//! games 表包含全部元数据，标签与存档路径以 JSON 列存储。
//! 游戏 id 由远端目录分配，插入时不使用自增。

use crate::database::dto::NewGame;
use crate::entity::games;
use crate::entity::prelude::*;
use crate::sync::store::{GameFilter, GameSortField, SortOrder};
use sea_orm::*;

/// 游戏库数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏数据（单表操作）
    pub async fn insert(db: &DatabaseConnection, game: NewGame) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let game_active = games::ActiveModel {
            id: Set(game.id),
            name: Set(game.name),
            version: Set(game.version),
            author: Set(game.author),
            tags: Set(game.tags.into()),
            save_paths: Set(game.save_paths.into()),
            game_directory: Set(game.game_directory),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        game_active.insert(db).await
    }

    /// 写入游戏数据：已存在则整体覆盖，否则插入
    ///
    /// 覆盖时保留原 created_at，updated_at 刷新为当前时间
    pub async fn write(db: &DatabaseConnection, game: games::Model) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;
        let existing = Games::find_by_id(game.id).one(db).await?;

        let game_active = games::ActiveModel {
            id: Set(game.id),
            name: Set(game.name),
            version: Set(game.version),
            author: Set(game.author),
            tags: Set(game.tags),
            save_paths: Set(game.save_paths),
            game_directory: Set(game.game_directory),
            created_at: match &existing {
                Some(record) => Set(record.created_at),
                None => Set(game.created_at.or(Some(now))),
            },
            updated_at: Set(Some(now)),
        };

        match existing {
            Some(_) => game_active.update(db).await,
            None => game_active.insert(db).await,
        }
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询游戏
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// 按条件查询游戏，支持排序
    pub async fn search(
        db: &DatabaseConnection,
        filter: GameFilter,
        sort: GameSortField,
        order: SortOrder,
    ) -> Result<Vec<games::Model>, DbErr> {
        let query = Self::build_base_query(&filter);
        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let query = match sort {
            GameSortField::Id => query.order_by(games::Column::Id, order),
            GameSortField::Name => query.order_by(games::Column::Name, order),
            GameSortField::Addtime => query.order_by(games::Column::CreatedAt, order),
        };
        query.all(db).await
    }

    /// 删除游戏
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Games::delete_by_id(id).exec(db).await
    }

    /// 获取游戏总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }

    // ==================== 私有方法 ====================

    /// 通用的查询构建器：应用筛选条件
    fn build_base_query(filter: &GameFilter) -> Select<Games> {
        let mut query = Games::find();

        if let Some(id) = filter.id {
            query = query.filter(games::Column::Id.eq(id));
        }
        if let Some(name) = &filter.name {
            query = query.filter(games::Column::Name.contains(name));
        }
        query
    }
}
