//! 基于标签频率的推荐
//!
//! 从已安装游戏和关注帖子两侧统计标签频率，取频率最高的若干标签向远端
//! 查询。结果不足时从末尾逐个放宽标签约束重新查询，直到凑满或标签用尽。

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::{GameInfo, RemoteCatalog, UpdateFilter, UpdateSorting};
use crate::error::AppResult;
use crate::sync::ranking::top_n;
use crate::sync::store::{
    GameFilter, GameSortField, LibraryStore, SortOrder, ThreadFilter, ThreadSortField,
    ThreadStore,
};

/// 参与查询的标签数量上限
pub const MAX_TAGS: usize = 5;
/// 推荐结果数量上限
pub const MAX_GAMES: usize = 10;
/// 单次远端查询的候选数量
pub const MAX_FETCHED_GAMES: u32 = 15;

/// 推荐引擎
pub struct RecommendationEngine {
    library: Arc<dyn LibraryStore>,
    threads: Arc<dyn ThreadStore>,
    catalog: Arc<dyn RemoteCatalog>,
}

impl RecommendationEngine {
    pub fn new(
        library: Arc<dyn LibraryStore>,
        threads: Arc<dyn ThreadStore>,
        catalog: Arc<dyn RemoteCatalog>,
    ) -> Self {
        Self {
            library,
            threads,
            catalog,
        }
    }

    /// 生成推荐列表，排除已安装游戏并跨查询去重
    pub async fn recommend(&self) -> AppResult<Vec<GameInfo>> {
        let installed = self
            .library
            .search(GameFilter::default(), GameSortField::Id, SortOrder::Asc)
            .await?;
        let watched = self
            .threads
            .search(ThreadFilter::default(), ThreadSortField::Id, SortOrder::Asc)
            .await?;

        let installed_ids: HashSet<i32> = installed.iter().map(|game| game.id).collect();

        let library_tags: Vec<String> = installed
            .iter()
            .flat_map(|game| game.tags.0.iter().cloned())
            .collect();
        let thread_tags: Vec<String> = watched
            .iter()
            .flat_map(|thread| thread.tags.0.iter().cloned())
            .collect();

        // 两侧各取前 MAX_TAGS 后合并再排一次，双侧共有的标签自然靠前
        let mut combined = top_n(&library_tags, MAX_TAGS);
        combined.extend(top_n(&thread_tags, MAX_TAGS));
        let mut tags = top_n(&combined, MAX_TAGS);

        log::info!("推荐标签: {:?}", tags);

        let mut picks: Vec<GameInfo> = Vec::new();
        let mut seen: HashSet<i32> = HashSet::new();

        while picks.len() < MAX_GAMES && !tags.is_empty() {
            let filter = UpdateFilter {
                tags: tags.clone(),
                sort: UpdateSorting::Rating,
            };
            let candidates = self
                .catalog
                .latest_updates(&filter, MAX_FETCHED_GAMES)
                .await?;

            for candidate in candidates {
                if picks.len() >= MAX_GAMES {
                    break;
                }
                if installed_ids.contains(&candidate.id) || !seen.insert(candidate.id) {
                    continue;
                }
                picks.push(candidate);
            }

            // 放宽约束：去掉频率最低的标签再查
            tags.pop();
        }

        Ok(picks)
    }
}
