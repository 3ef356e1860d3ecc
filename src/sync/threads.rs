//! 关注帖子的批量同步
//!
//! 按链接逐个对账本地帖子记录与远端目录。变化检测只比较链接本身：
//! 链接不同视为有更新，其余字段的变化不会触发更新标记。
//! 批量同步中单条失败不会中断整批，结果逐条归入 skipped / failed。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::RemoteCatalog;
use crate::database::dto::NewThread;
use crate::error::{AppError, AppResult};
use crate::sync::naming;
use crate::sync::store::{SortOrder, ThreadFilter, ThreadSortField, ThreadStore};

/// 单条帖子同步后的归类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadChange {
    /// 本地尚无记录，新建
    Added,
    /// 链接发生变化，已刷新并标记有更新
    Updated,
    /// 链接一致，未做任何写入
    Unchanged,
}

/// 批量同步汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// 无法解析帖子 ID 的链接
    pub skipped: Vec<String>,
    /// 同步失败的链接及原因
    pub failed: Vec<(String, String)>,
    pub message: String,
}

impl SyncOutcome {
    fn record(&mut self, change: ThreadChange) {
        match change {
            ThreadChange::Added => self.added += 1,
            ThreadChange::Updated => self.updated += 1,
            ThreadChange::Unchanged => self.unchanged += 1,
        }
    }

    fn finish(&mut self) {
        self.message = format!(
            "同步完成: 新增 {}，更新 {}，无变化 {}，跳过 {}，失败 {}",
            self.added,
            self.updated,
            self.unchanged,
            self.skipped.len(),
            self.failed.len()
        );
    }
}

/// 帖子同步引擎
pub struct ThreadSyncEngine {
    threads: Arc<dyn ThreadStore>,
    catalog: Arc<dyn RemoteCatalog>,
}

impl ThreadSyncEngine {
    pub fn new(threads: Arc<dyn ThreadStore>, catalog: Arc<dyn RemoteCatalog>) -> Self {
        Self { threads, catalog }
    }

    /// 同步单个帖子链接
    ///
    /// 本地已有记录且链接一致时直接返回，不请求远端。
    pub async fn sync_one(&self, url: &str) -> AppResult<ThreadChange> {
        let thread_id = naming::extract_thread_id(url)
            .ok_or_else(|| AppError::MissingThreadId(url.to_string()))?;

        let existing = self
            .threads
            .search(
                ThreadFilter {
                    id: Some(thread_id),
                    ..Default::default()
                },
                ThreadSortField::Id,
                SortOrder::Asc,
            )
            .await?
            .into_iter()
            .next();

        match existing {
            None => {
                let info = self.catalog.game_from_url(url).await?;
                self.threads
                    .insert(NewThread::from_info(thread_id, url.to_string(), &info))
                    .await?;
                log::info!("新增关注帖子: {} (id={})", url, thread_id);
                Ok(ThreadChange::Added)
            }
            Some(record) if record.url == url => Ok(ThreadChange::Unchanged),
            Some(mut record) => {
                let info = self.catalog.game_from_url(url).await?;
                record.url = url.to_string();
                record.name = info.name;
                record.tags = info.tags.into();
                record.update_available = true;
                record.marked_as_read = false;
                self.threads.write(record).await?;
                log::info!("帖子链接变化，已标记更新: id={}", thread_id);
                Ok(ThreadChange::Updated)
            }
        }
    }

    /// 批量同步，逐条隔离错误
    pub async fn sync_batch(&self, urls: &[String]) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        for url in urls {
            match self.sync_one(url).await {
                Ok(change) => outcome.record(change),
                Err(AppError::MissingThreadId(_)) => {
                    log::warn!("链接中没有可解析的帖子 ID，跳过: {}", url);
                    outcome.skipped.push(url.clone());
                }
                Err(e) => {
                    log::warn!("同步帖子失败: {} ({})", url, e);
                    outcome.failed.push((url.clone(), e.to_string()));
                }
            }
        }

        outcome.finish();
        outcome
    }

    /// 拉取远端账号的关注列表并同步
    pub async fn sync_watched(&self) -> AppResult<SyncOutcome> {
        let user = self.catalog.user_data().await?;
        log::info!("开始同步 {} 个关注帖子", user.watched_threads.len());
        Ok(self.sync_batch(&user.watched_threads).await)
    }
}
