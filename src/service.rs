//! 应用服务层
//!
//! 聚合数据库连接、远端目录客户端与各同步引擎，向上提供统一入口。
//! 引擎通过存储契约访问数据，连接级操作（设置、删除）直接走仓库。

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};

use crate::catalog::{GameInfo, RemoteCatalog};
use crate::database::dto::NewGame;
use crate::database::repository::games_repository::GamesRepository;
use crate::database::repository::settings_repository::SettingsRepository;
use crate::database::repository::threads_repository::ThreadsRepository;
use crate::database::store::{SqliteLibraryStore, SqliteThreadStore};
use crate::entity::{games, threads, user};
use crate::error::{AppError, AppResult};
use crate::sync::dedup::{DedupResolver, FilterReport};
use crate::sync::naming;
use crate::sync::recommend::RecommendationEngine;
use crate::sync::store::{
    GameFilter, GameSortField, LibraryStore, SortOrder, ThreadFilter, ThreadSortField,
    ThreadStore,
};
use crate::sync::threads::{SyncOutcome, ThreadSyncEngine};
use crate::sync::update_feed::UpdateFeedBuilder;
use crate::utils::scan;

// ==================== 安装解析相关类型 ====================

/// 单个目录的安装解析结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InstallResolution {
    /// 远端唯一匹配，已入库
    Added(games::Model),
    /// 远端没有匹配条目
    NoMatch,
    /// 远端有多个候选，需要人工选择
    Ambiguous { candidates: Vec<GameInfo> },
}

/// 等待人工选择的安装目录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguousInstall {
    pub path: String,
    pub candidates: Vec<GameInfo>,
}

/// 批量导入汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub added: Vec<games::Model>,
    pub no_match: Vec<String>,
    pub ambiguous: Vec<AmbiguousInstall>,
    pub failed: Vec<(String, String)>,
    /// 去重阶段产生的提示
    pub notices: Vec<String>,
    pub message: String,
}

/// 设置缓存，应用运行期间复用已读取的配置
#[derive(Debug, Default)]
struct SettingsCache {
    library_root_path: Option<String>,
    catalog_base_url: Option<String>,
}

// ==================== 应用服务 ====================

/// 应用服务
pub struct AppService {
    db: DatabaseConnection,
    library: Arc<dyn LibraryStore>,
    threads: Arc<dyn ThreadStore>,
    catalog: Arc<dyn RemoteCatalog>,
    dedup: DedupResolver,
    thread_sync: ThreadSyncEngine,
    update_feed: UpdateFeedBuilder,
    recommend: RecommendationEngine,
    cache: Mutex<SettingsCache>,
}

impl AppService {
    /// 以 SQLite 存储构建服务
    pub fn new(db: DatabaseConnection, catalog: Arc<dyn RemoteCatalog>) -> Self {
        let library: Arc<dyn LibraryStore> = Arc::new(SqliteLibraryStore::new(db.clone()));
        let threads: Arc<dyn ThreadStore> = Arc::new(SqliteThreadStore::new(db.clone()));
        Self::with_stores(db, library, threads, catalog)
    }

    /// 以外部提供的存储实现构建服务
    pub fn with_stores(
        db: DatabaseConnection,
        library: Arc<dyn LibraryStore>,
        threads: Arc<dyn ThreadStore>,
        catalog: Arc<dyn RemoteCatalog>,
    ) -> Self {
        Self {
            dedup: DedupResolver::new(library.clone()),
            thread_sync: ThreadSyncEngine::new(threads.clone(), catalog.clone()),
            update_feed: UpdateFeedBuilder::new(library.clone(), threads.clone()),
            recommend: RecommendationEngine::new(
                library.clone(),
                threads.clone(),
                catalog.clone(),
            ),
            db,
            library,
            threads,
            catalog,
            cache: Mutex::new(SettingsCache::default()),
        }
    }

    // ==================== 设置 ====================

    /// 获取游戏库根目录，优先读缓存
    pub async fn library_root_path(&self) -> AppResult<Option<String>> {
        {
            let cache = self.cache.lock();
            if let Some(path) = &cache.library_root_path {
                return Ok(Some(path.clone()));
            }
        }

        let path = SettingsRepository::get_library_root_path(&self.db).await?;
        if path.is_empty() {
            return Ok(None);
        }

        {
            let mut cache = self.cache.lock();
            cache.library_root_path = Some(path.clone());
        }
        Ok(Some(path))
    }

    /// 设置游戏库根目录，目录必须已存在
    pub async fn set_library_root_path(&self, path: String) -> AppResult<()> {
        if !Path::new(&path).is_dir() {
            return Err(AppError::InvalidPath(path));
        }
        SettingsRepository::set_library_root_path(&self.db, path.clone()).await?;
        self.cache.lock().library_root_path = Some(path);
        Ok(())
    }

    /// 获取远端目录服务地址，优先读缓存
    pub async fn catalog_base_url(&self) -> AppResult<Option<String>> {
        {
            let cache = self.cache.lock();
            if let Some(url) = &cache.catalog_base_url {
                return Ok(Some(url.clone()));
            }
        }

        let url = SettingsRepository::get_catalog_base_url(&self.db).await?;
        if url.is_empty() {
            return Ok(None);
        }

        {
            let mut cache = self.cache.lock();
            cache.catalog_base_url = Some(url.clone());
        }
        Ok(Some(url))
    }

    /// 设置远端目录服务地址，下次构建客户端时生效
    pub async fn set_catalog_base_url(&self, url: String) -> AppResult<()> {
        SettingsRepository::set_catalog_base_url(&self.db, url.clone()).await?;
        self.cache.lock().catalog_base_url = Some(url);
        Ok(())
    }

    /// 获取所有设置
    pub async fn all_settings(&self) -> AppResult<user::Model> {
        Ok(SettingsRepository::get_all_settings(&self.db).await?)
    }

    /// 清空设置缓存
    pub fn clear_settings_cache(&self) {
        *self.cache.lock() = SettingsCache::default();
    }

    // ==================== 库扫描与导入 ====================

    /// 扫描库根目录，返回判定为游戏目录的路径
    pub async fn scan_library(&self) -> AppResult<Vec<String>> {
        let root = self
            .library_root_path()
            .await?
            .ok_or(AppError::LibraryRootNotSet)?;
        scan::scan_game_library(&root)
    }

    /// 过滤掉已入库的候选目录
    pub async fn filter_new_paths(&self, paths: &[String]) -> AppResult<FilterReport> {
        self.dedup.filter_new_paths(paths).await
    }

    /// 扫描库根目录并过滤已入库目录
    pub async fn discover_new_games(&self) -> AppResult<FilterReport> {
        let paths = self.scan_library().await?;
        self.filter_new_paths(&paths).await
    }

    /// 解析单个游戏目录：用清洗后的目录名搜索远端目录
    ///
    /// 唯一匹配直接入库，多个候选交由调用方选择后走 [`Self::add_resolved`]
    pub async fn resolve_install(&self, path: &str) -> AppResult<InstallResolution> {
        let base_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());
        let query = naming::clean_game_name(&base_name);

        let mut candidates = self.catalog.search_games(&query, false).await?;
        match candidates.len() {
            0 => Ok(InstallResolution::NoMatch),
            1 => {
                let info = candidates.remove(0);
                let game = self.add_resolved(&info, path).await?;
                Ok(InstallResolution::Added(game))
            }
            _ => Ok(InstallResolution::Ambiguous { candidates }),
        }
    }

    /// 将已确认的远端条目与本地目录关联入库
    pub async fn add_resolved(&self, info: &GameInfo, path: &str) -> AppResult<games::Model> {
        let save_paths = scan::detect_save_paths(path);
        let game = self
            .library
            .insert(NewGame::from_info(info, path.to_string(), save_paths))
            .await?;
        log::info!("游戏入库: {} (id={})", game.name, game.id);
        Ok(game)
    }

    /// 批量导入：先去重，再逐个解析，单条失败不中断整批
    pub async fn import_paths(&self, paths: &[String]) -> AppResult<ImportOutcome> {
        let report = self.dedup.filter_new_paths(paths).await?;

        let mut outcome = ImportOutcome {
            notices: report.notices,
            ..Default::default()
        };

        for path in &report.unlisted {
            match self.resolve_install(path).await {
                Ok(InstallResolution::Added(game)) => outcome.added.push(game),
                Ok(InstallResolution::NoMatch) => outcome.no_match.push(path.clone()),
                Ok(InstallResolution::Ambiguous { candidates }) => {
                    outcome.ambiguous.push(AmbiguousInstall {
                        path: path.clone(),
                        candidates,
                    });
                }
                Err(e) => {
                    log::warn!("导入游戏目录失败: {} ({})", path, e);
                    outcome.failed.push((path.clone(), e.to_string()));
                }
            }
        }

        outcome.message = format!(
            "导入完成: 入库 {}，未匹配 {}，待选择 {}，失败 {}",
            outcome.added.len(),
            outcome.no_match.len(),
            outcome.ambiguous.len(),
            outcome.failed.len()
        );
        Ok(outcome)
    }

    // ==================== 帖子同步 ====================

    /// 同步一批帖子链接
    pub async fn sync_thread_urls(&self, urls: &[String]) -> SyncOutcome {
        self.thread_sync.sync_batch(urls).await
    }

    /// 同步远端账号的关注列表
    pub async fn sync_watched_threads(&self) -> AppResult<SyncOutcome> {
        self.thread_sync.sync_watched().await
    }

    /// 查询待处理更新
    pub async fn pending_updates(&self) -> AppResult<Vec<threads::Model>> {
        self.update_feed.pending_updates().await
    }

    /// 标记帖子已读
    pub async fn mark_thread_read(&self, id: i32) -> AppResult<threads::Model> {
        match ThreadsRepository::mark_read(&self.db, id).await {
            Ok(thread) => Ok(thread),
            Err(DbErr::RecordNotFound(_)) => Err(AppError::ThreadNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// 列出关注帖子
    pub async fn list_threads(
        &self,
        sort: ThreadSortField,
        order: SortOrder,
    ) -> AppResult<Vec<threads::Model>> {
        Ok(self
            .threads
            .search(ThreadFilter::default(), sort, order)
            .await?)
    }

    /// 取消关注帖子
    pub async fn remove_thread(&self, id: i32) -> AppResult<u64> {
        let result = ThreadsRepository::delete(&self.db, id).await?;
        if result.rows_affected == 0 {
            return Err(AppError::ThreadNotFound(id));
        }
        Ok(result.rows_affected)
    }

    /// 获取关注帖子总数
    pub async fn count_threads(&self) -> AppResult<u64> {
        Ok(ThreadsRepository::count(&self.db).await?)
    }

    // ==================== 游戏库查询 ====================

    /// 获取游戏列表
    pub async fn list_games(
        &self,
        sort: GameSortField,
        order: SortOrder,
    ) -> AppResult<Vec<games::Model>> {
        Ok(self.library.search(GameFilter::default(), sort, order).await?)
    }

    /// 根据 ID 查询游戏
    pub async fn game_by_id(&self, id: i32) -> AppResult<games::Model> {
        GamesRepository::find_by_id(&self.db, id)
            .await?
            .ok_or(AppError::GameNotFound(id))
    }

    /// 从库中移除游戏（不触碰磁盘上的目录）
    pub async fn remove_game(&self, id: i32) -> AppResult<u64> {
        let result = GamesRepository::delete(&self.db, id).await?;
        if result.rows_affected == 0 {
            return Err(AppError::GameNotFound(id));
        }
        Ok(result.rows_affected)
    }

    /// 获取游戏总数
    pub async fn count_games(&self) -> AppResult<u64> {
        Ok(GamesRepository::count(&self.db).await?)
    }

    // ==================== 推荐 ====================

    /// 生成推荐列表
    pub async fn recommend_games(&self) -> AppResult<Vec<GameInfo>> {
        self.recommend.recommend().await
    }
}
