//! 持久层访问契约
//!
//! 引擎组件不直接接触数据库连接，只依赖这里定义的两个 trait。
//! 生产实现见 `database::store`（SQLite），测试使用内存假实现。
//! 契约刻意保持最小：search（部分匹配 + 排序）、insert、write（按 ID 全量覆盖）。

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};

use crate::database::dto::{NewGame, NewThread};
use crate::entity::{games, threads};

// ==================== 筛选与排序 ====================

/// 游戏查询条件（部分记录匹配，通常为空或只含 id）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
}

/// 帖子查询条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadFilter {
    pub id: Option<i32>,
    pub update_available: Option<bool>,
    pub marked_as_read: Option<bool>,
}

/// 游戏排序字段
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSortField {
    Id,
    Name,
    Addtime,
}

/// 帖子排序字段
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadSortField {
    Id,
    Name,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

// ==================== 存储契约 ====================

/// 已安装游戏的存储
#[async_trait::async_trait]
pub trait LibraryStore: Send + Sync {
    /// 按条件查询，结果按指定字段排序
    async fn search(
        &self,
        filter: GameFilter,
        sort: GameSortField,
        order: SortOrder,
    ) -> Result<Vec<games::Model>, DbErr>;

    /// 插入新记录（ID 由调用方提供）
    async fn insert(&self, game: NewGame) -> Result<games::Model, DbErr>;

    /// 按 ID 全量覆盖（不存在时插入）
    async fn write(&self, game: games::Model) -> Result<games::Model, DbErr>;
}

/// 订阅帖子的存储
#[async_trait::async_trait]
pub trait ThreadStore: Send + Sync {
    /// 按条件查询，结果按指定字段排序
    async fn search(
        &self,
        filter: ThreadFilter,
        sort: ThreadSortField,
        order: SortOrder,
    ) -> Result<Vec<threads::Model>, DbErr>;

    /// 插入新记录（ID 由调用方提供）
    async fn insert(&self, thread: NewThread) -> Result<threads::Model, DbErr>;

    /// 按 ID 全量覆盖（不存在时插入）
    async fn write(&self, thread: threads::Model) -> Result<threads::Model, DbErr>;
}
