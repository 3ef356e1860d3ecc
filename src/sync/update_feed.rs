//! 待处理更新列表
//!
//! 汇总有更新且未读的帖子，并剔除其对应游戏已在本地安装的条目。

use std::collections::HashSet;
use std::sync::Arc;

use crate::entity::threads;
use crate::error::AppResult;
use crate::sync::store::{
    GameFilter, GameSortField, LibraryStore, SortOrder, ThreadFilter, ThreadSortField,
    ThreadStore,
};

/// 更新列表构建器
pub struct UpdateFeedBuilder {
    library: Arc<dyn LibraryStore>,
    threads: Arc<dyn ThreadStore>,
}

impl UpdateFeedBuilder {
    pub fn new(library: Arc<dyn LibraryStore>, threads: Arc<dyn ThreadStore>) -> Self {
        Self { library, threads }
    }

    /// 查询待处理更新：update_available 且未标记已读，且未对应已安装游戏
    pub async fn pending_updates(&self) -> AppResult<Vec<threads::Model>> {
        let pending = self
            .threads
            .search(
                ThreadFilter {
                    id: None,
                    update_available: Some(true),
                    marked_as_read: Some(false),
                },
                ThreadSortField::Name,
                SortOrder::Asc,
            )
            .await?;

        let installed_ids: HashSet<i32> = self
            .library
            .search(GameFilter::default(), GameSortField::Id, SortOrder::Asc)
            .await?
            .into_iter()
            .map(|game| game.id)
            .collect();

        Ok(pending
            .into_iter()
            .filter(|thread| !installed_ids.contains(&thread.id))
            .collect())
    }
}
