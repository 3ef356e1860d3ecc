//! 测试用的内存仓库与假远端目录

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use sea_orm::DbErr;

use crate::catalog::{CatalogError, GameInfo, RemoteCatalog, UpdateFilter, UserData};
use crate::database::dto::{NewGame, NewThread};
use crate::entity::{games, threads};
use crate::sync::store::{
    GameFilter, GameSortField, LibraryStore, SortOrder, ThreadFilter, ThreadSortField,
    ThreadStore,
};

pub(crate) fn installed_game(id: i32, name: &str) -> games::Model {
    installed_game_with_tags(id, name, vec![])
}

pub(crate) fn installed_game_with_tags(id: i32, name: &str, tags: Vec<&str>) -> games::Model {
    games::Model {
        id,
        name: name.to_string(),
        version: "1.0".to_string(),
        author: None,
        tags: tags.into_iter().map(String::from).collect::<Vec<_>>().into(),
        save_paths: Vec::new().into(),
        game_directory: format!("/library/{}", name),
        created_at: Some(Utc::now().timestamp() as i32),
        updated_at: Some(Utc::now().timestamp() as i32),
    }
}

pub(crate) fn thread_record(
    id: i32,
    name: &str,
    update_available: bool,
    marked_as_read: bool,
) -> threads::Model {
    let mut record = thread_record_with_tags(id, name, vec![]);
    record.update_available = update_available;
    record.marked_as_read = marked_as_read;
    record
}

pub(crate) fn thread_record_with_tags(id: i32, name: &str, tags: Vec<&str>) -> threads::Model {
    threads::Model {
        id,
        url: format!("https://forum.example.net/threads/{}.{}/", name, id),
        name: name.to_string(),
        tags: tags.into_iter().map(String::from).collect::<Vec<_>>().into(),
        update_available: false,
        marked_as_read: false,
        created_at: Some(Utc::now().timestamp() as i32),
        updated_at: Some(Utc::now().timestamp() as i32),
    }
}

// ==================== 内存游戏库 ====================

#[derive(Default)]
pub(crate) struct MemoryLibraryStore {
    games: Mutex<Vec<games::Model>>,
}

impl MemoryLibraryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_games(games: Vec<games::Model>) -> Self {
        Self {
            games: Mutex::new(games),
        }
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn search(
        &self,
        filter: GameFilter,
        sort: GameSortField,
        order: SortOrder,
    ) -> Result<Vec<games::Model>, DbErr> {
        let mut result: Vec<games::Model> = self
            .games
            .lock()
            .iter()
            .filter(|game| filter.id.is_none_or(|id| game.id == id))
            .filter(|game| {
                filter
                    .name
                    .as_ref()
                    .is_none_or(|name| game.name.contains(name))
            })
            .cloned()
            .collect();

        match sort {
            GameSortField::Id => result.sort_by_key(|game| game.id),
            GameSortField::Name => result.sort_by(|a, b| a.name.cmp(&b.name)),
            GameSortField::Addtime => result.sort_by_key(|game| game.created_at),
        }
        if order == SortOrder::Desc {
            result.reverse();
        }
        Ok(result)
    }

    async fn insert(&self, game: NewGame) -> Result<games::Model, DbErr> {
        let now = Utc::now().timestamp() as i32;
        let model = games::Model {
            id: game.id,
            name: game.name,
            version: game.version,
            author: game.author,
            tags: game.tags.into(),
            save_paths: game.save_paths.into(),
            game_directory: game.game_directory,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.games.lock().push(model.clone());
        Ok(model)
    }

    async fn write(&self, game: games::Model) -> Result<games::Model, DbErr> {
        let mut games = self.games.lock();
        match games.iter_mut().find(|existing| existing.id == game.id) {
            Some(existing) => *existing = game.clone(),
            None => games.push(game.clone()),
        }
        Ok(game)
    }
}

// ==================== 内存帖子库 ====================

#[derive(Default)]
pub(crate) struct MemoryThreadStore {
    threads: Mutex<Vec<threads::Model>>,
}

impl MemoryThreadStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_threads(threads: Vec<threads::Model>) -> Self {
        Self {
            threads: Mutex::new(threads),
        }
    }

    pub(crate) fn all(&self) -> Vec<threads::Model> {
        self.threads.lock().clone()
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn search(
        &self,
        filter: ThreadFilter,
        sort: ThreadSortField,
        order: SortOrder,
    ) -> Result<Vec<threads::Model>, DbErr> {
        let mut result: Vec<threads::Model> = self
            .threads
            .lock()
            .iter()
            .filter(|thread| filter.id.is_none_or(|id| thread.id == id))
            .filter(|thread| {
                filter
                    .update_available
                    .is_none_or(|flag| thread.update_available == flag)
            })
            .filter(|thread| {
                filter
                    .marked_as_read
                    .is_none_or(|flag| thread.marked_as_read == flag)
            })
            .cloned()
            .collect();

        match sort {
            ThreadSortField::Id => result.sort_by_key(|thread| thread.id),
            ThreadSortField::Name => result.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        if order == SortOrder::Desc {
            result.reverse();
        }
        Ok(result)
    }

    async fn insert(&self, thread: NewThread) -> Result<threads::Model, DbErr> {
        let now = Utc::now().timestamp() as i32;
        let model = threads::Model {
            id: thread.id,
            url: thread.url,
            name: thread.name,
            tags: thread.tags.into(),
            update_available: false,
            marked_as_read: false,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.threads.lock().push(model.clone());
        Ok(model)
    }

    async fn write(&self, thread: threads::Model) -> Result<threads::Model, DbErr> {
        let mut threads = self.threads.lock();
        match threads.iter_mut().find(|existing| existing.id == thread.id) {
            Some(existing) => *existing = thread.clone(),
            None => threads.push(thread.clone()),
        }
        Ok(thread)
    }
}

// ==================== 假远端目录 ====================

#[derive(Default)]
pub(crate) struct FakeCatalog {
    url_games: Mutex<HashMap<String, GameInfo>>,
    update_pages: Mutex<VecDeque<Vec<GameInfo>>>,
    recorded_filters: Mutex<Vec<UpdateFilter>>,
    user: Mutex<Option<UserData>>,
    url_calls: AtomicUsize,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put_url_game(&self, url: &str, info: GameInfo) {
        self.url_games.lock().insert(url.to_string(), info);
    }

    pub(crate) fn push_update_page(&self, page: Vec<GameInfo>) {
        self.update_pages.lock().push_back(page);
    }

    pub(crate) fn put_user(&self, user: UserData) {
        *self.user.lock() = Some(user);
    }

    pub(crate) fn recorded_filters(&self) -> Vec<UpdateFilter> {
        self.recorded_filters.lock().clone()
    }

    pub(crate) fn url_call_count(&self) -> usize {
        self.url_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCatalog for FakeCatalog {
    async fn game_from_url(&self, url: &str) -> Result<GameInfo, CatalogError> {
        self.url_calls.fetch_add(1, Ordering::SeqCst);
        self.url_games
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(url.to_string()))
    }

    async fn search_games(
        &self,
        _name: &str,
        _include_mods: bool,
    ) -> Result<Vec<GameInfo>, CatalogError> {
        Ok(Vec::new())
    }

    async fn latest_updates(
        &self,
        filter: &UpdateFilter,
        _limit: u32,
    ) -> Result<Vec<GameInfo>, CatalogError> {
        self.recorded_filters.lock().push(filter.clone());
        Ok(self.update_pages.lock().pop_front().unwrap_or_default())
    }

    async fn user_data(&self) -> Result<UserData, CatalogError> {
        self.user
            .lock()
            .clone()
            .ok_or_else(|| CatalogError::NotFound("user".to_string()))
    }
}
