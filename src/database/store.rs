//! 存储契约的 SQLite 实现
//!
//! 把 [`LibraryStore`] / [`ThreadStore`] 的调用转发给对应的数据仓库，
//! 引擎层只依赖契约本身。

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use crate::database::dto::{NewGame, NewThread};
use crate::database::repository::games_repository::GamesRepository;
use crate::database::repository::threads_repository::ThreadsRepository;
use crate::entity::{games, threads};
use crate::sync::store::{
    GameFilter, GameSortField, LibraryStore, SortOrder, ThreadFilter, ThreadSortField,
    ThreadStore,
};

/// games 表对应的存储实现
pub struct SqliteLibraryStore {
    db: DatabaseConnection,
}

impl SqliteLibraryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LibraryStore for SqliteLibraryStore {
    async fn search(
        &self,
        filter: GameFilter,
        sort: GameSortField,
        order: SortOrder,
    ) -> Result<Vec<games::Model>, DbErr> {
        GamesRepository::search(&self.db, filter, sort, order).await
    }

    async fn insert(&self, game: NewGame) -> Result<games::Model, DbErr> {
        GamesRepository::insert(&self.db, game).await
    }

    async fn write(&self, game: games::Model) -> Result<games::Model, DbErr> {
        GamesRepository::write(&self.db, game).await
    }
}

/// threads 表对应的存储实现
pub struct SqliteThreadStore {
    db: DatabaseConnection,
}

impl SqliteThreadStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ThreadStore for SqliteThreadStore {
    async fn search(
        &self,
        filter: ThreadFilter,
        sort: ThreadSortField,
        order: SortOrder,
    ) -> Result<Vec<threads::Model>, DbErr> {
        ThreadsRepository::search(&self.db, filter, sort, order).await
    }

    async fn insert(&self, thread: NewThread) -> Result<threads::Model, DbErr> {
        ThreadsRepository::insert(&self.db, thread).await
    }

    async fn write(&self, thread: threads::Model) -> Result<threads::Model, DbErr> {
        ThreadsRepository::write(&self.db, thread).await
    }
}
