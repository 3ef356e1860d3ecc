//! 基于内存数据库的端到端服务测试
//!
//! 每个用例独立建库并执行迁移，远端目录用脚本化的假实现代替。

use std::collections::{HashMap, VecDeque};
use std::fs::{self, File};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::tempdir;

use kagami_manager_lib::catalog::{CatalogError, GameInfo, RemoteCatalog, UpdateFilter, UserData};
use kagami_manager_lib::database::dto::NewGame;
use kagami_manager_lib::database::repository::games_repository::GamesRepository;
use kagami_manager_lib::database::repository::threads_repository::ThreadsRepository;
use kagami_manager_lib::database::{establish_memory_connection, run_migrations};
use kagami_manager_lib::entity::threads;
use kagami_manager_lib::service::InstallResolution;
use kagami_manager_lib::sync::store::{GameSortField, SortOrder, ThreadSortField};
use kagami_manager_lib::{AppError, AppService};

// ==================== 脚本化远端目录 ====================

#[derive(Default)]
struct ScriptedCatalog {
    url_games: Mutex<HashMap<String, GameInfo>>,
    search_results: Mutex<HashMap<String, Vec<GameInfo>>>,
    update_pages: Mutex<VecDeque<Vec<GameInfo>>>,
    user: Mutex<Option<UserData>>,
}

impl ScriptedCatalog {
    fn put_url_game(&self, url: &str, info: GameInfo) {
        self.url_games.lock().insert(url.to_string(), info);
    }

    fn put_search_results(&self, name: &str, results: Vec<GameInfo>) {
        self.search_results.lock().insert(name.to_string(), results);
    }

    fn push_update_page(&self, page: Vec<GameInfo>) {
        self.update_pages.lock().push_back(page);
    }

    fn put_user(&self, user: UserData) {
        *self.user.lock() = Some(user);
    }
}

#[async_trait]
impl RemoteCatalog for ScriptedCatalog {
    async fn game_from_url(&self, url: &str) -> Result<GameInfo, CatalogError> {
        self.url_games
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(url.to_string()))
    }

    async fn search_games(
        &self,
        name: &str,
        _include_mods: bool,
    ) -> Result<Vec<GameInfo>, CatalogError> {
        Ok(self
            .search_results
            .lock()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn latest_updates(
        &self,
        _filter: &UpdateFilter,
        _limit: u32,
    ) -> Result<Vec<GameInfo>, CatalogError> {
        Ok(self.update_pages.lock().pop_front().unwrap_or_default())
    }

    async fn user_data(&self) -> Result<UserData, CatalogError> {
        self.user
            .lock()
            .clone()
            .ok_or_else(|| CatalogError::NotFound("user".to_string()))
    }
}

// ==================== 公共辅助 ====================

async fn setup(catalog: Arc<ScriptedCatalog>) -> (sea_orm::DatabaseConnection, AppService) {
    let conn = establish_memory_connection().await.unwrap();
    run_migrations(&conn).await.unwrap();
    let service = AppService::new(conn.clone(), catalog);
    (conn, service)
}

fn catalog_info(id: i32, name: &str, tags: &[&str]) -> GameInfo {
    GameInfo {
        id,
        name: name.to_string(),
        version: Some("1.0".to_string()),
        author: Some("author".to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating: Some(4.0),
        url: format!("https://forum.example.net/threads/{}.{}/", name, id),
    }
}

fn new_game(id: i32, name: &str, tags: &[&str]) -> NewGame {
    NewGame {
        id,
        name: name.to_string(),
        version: "1.0".to_string(),
        author: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        game_directory: format!("/library/{}", name),
        save_paths: vec![],
    }
}

fn watched_thread(id: i32, name: &str, tags: &[&str], update_available: bool) -> threads::Model {
    threads::Model {
        id,
        url: format!("https://forum.example.net/threads/{}.{}/", name, id),
        name: name.to_string(),
        tags: tags
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .into(),
        update_available,
        marked_as_read: false,
        created_at: None,
        updated_at: None,
    }
}

// ==================== 设置 ====================

#[tokio::test]
async fn settings_round_trip_through_database() {
    let (_conn, service) = setup(Arc::new(ScriptedCatalog::default())).await;

    assert!(service.library_root_path().await.unwrap().is_none());

    let dir = tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();
    service.set_library_root_path(path.clone()).await.unwrap();
    assert_eq!(
        service.library_root_path().await.unwrap(),
        Some(path.clone())
    );

    // 清缓存后仍能从数据库读回
    service.clear_settings_cache();
    assert_eq!(service.library_root_path().await.unwrap(), Some(path));
}

#[tokio::test]
async fn missing_library_root_directory_is_rejected() {
    let (_conn, service) = setup(Arc::new(ScriptedCatalog::default())).await;

    let result = service
        .set_library_root_path("/definitely/not/a/real/dir".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidPath(_))));
}

#[tokio::test]
async fn catalog_base_url_is_persisted() {
    let (_conn, service) = setup(Arc::new(ScriptedCatalog::default())).await;

    assert!(service.catalog_base_url().await.unwrap().is_none());
    service
        .set_catalog_base_url("https://mirror.example.net/".to_string())
        .await
        .unwrap();
    service.clear_settings_cache();

    assert_eq!(
        service.catalog_base_url().await.unwrap().as_deref(),
        Some("https://mirror.example.net/")
    );

    let settings = service.all_settings().await.unwrap();
    assert_eq!(
        settings.catalog_base_url.as_deref(),
        Some("https://mirror.example.net/")
    );
}

// ==================== 导入 ====================

#[tokio::test]
async fn import_adds_uniquely_matched_game_with_save_paths() {
    let catalog = Arc::new(ScriptedCatalog::default());
    catalog.put_search_results(
        "Starlit Harbor",
        vec![catalog_info(4821, "Starlit Harbor", &["adventure", "pixel"])],
    );
    let (conn, service) = setup(catalog).await;

    let dir = tempdir().unwrap();
    let game_dir = dir.path().join("Starlit Harbor [v.0.7]");
    fs::create_dir_all(game_dir.join("saves")).unwrap();
    let path = game_dir.to_string_lossy().to_string();

    let outcome = service.import_paths(&[path]).await.unwrap();

    assert_eq!(outcome.added.len(), 1);
    let added = &outcome.added[0];
    assert_eq!(added.id, 4821);
    assert_eq!(added.version, "1.0");
    assert_eq!(added.tags.0, vec!["adventure", "pixel"]);
    assert_eq!(added.save_paths.0.len(), 1);

    // JSON 列经过数据库往返后保持不变
    let stored = GamesRepository::find_by_id(&conn, 4821).await.unwrap().unwrap();
    assert_eq!(stored.tags.0, vec!["adventure", "pixel"]);
    assert!(stored.save_paths.0[0].ends_with("saves"));
}

#[tokio::test]
async fn second_import_of_same_game_is_deduplicated() {
    let catalog = Arc::new(ScriptedCatalog::default());
    catalog.put_search_results(
        "Starlit Harbor",
        vec![catalog_info(4821, "Starlit Harbor", &[])],
    );
    let (_conn, service) = setup(catalog).await;

    let dir = tempdir().unwrap();
    let game_dir = dir.path().join("Starlit Harbor [v.0.7]");
    fs::create_dir_all(&game_dir).unwrap();
    let path = game_dir.to_string_lossy().to_string();

    service.import_paths(&[path.clone()]).await.unwrap();
    let second = service.import_paths(&[path]).await.unwrap();

    assert!(second.added.is_empty());
    assert_eq!(second.notices.len(), 1);
    assert!(second.notices[0].contains("已安装"));
}

#[tokio::test]
async fn unmatched_and_ambiguous_paths_are_classified() {
    let catalog = Arc::new(ScriptedCatalog::default());
    catalog.put_search_results(
        "Foggy Town",
        vec![
            catalog_info(10, "Foggy Town", &[]),
            catalog_info(11, "Foggy Town Remake", &[]),
        ],
    );
    let (_conn, service) = setup(catalog).await;

    let resolution = service.resolve_install("/library/Foggy Town").await.unwrap();
    assert!(matches!(
        resolution,
        InstallResolution::Ambiguous { ref candidates } if candidates.len() == 2
    ));

    let outcome = service
        .import_paths(&[
            "/library/Foggy Town".to_string(),
            "/library/Nowhere Game".to_string(),
        ])
        .await
        .unwrap();

    assert_eq!(outcome.ambiguous.len(), 1);
    assert_eq!(outcome.no_match, vec!["/library/Nowhere Game".to_string()]);
    assert!(outcome.added.is_empty());
}

#[tokio::test]
async fn discover_scans_root_and_filters_installed() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let (conn, service) = setup(catalog).await;

    let root = tempdir().unwrap();
    for name in ["Known Game", "Fresh Game"] {
        let game = root.path().join(name);
        fs::create_dir_all(game.join("renpy")).unwrap();
        File::create(game.join("Game.exe")).unwrap();
    }
    GamesRepository::insert(&conn, new_game(1, "Known Game", &[]))
        .await
        .unwrap();

    service
        .set_library_root_path(root.path().to_string_lossy().to_string())
        .await
        .unwrap();
    let report = service.discover_new_games().await.unwrap();

    assert_eq!(report.unlisted.len(), 1);
    assert!(report.unlisted[0].ends_with("Fresh Game"));
    assert_eq!(report.skipped, vec!["Known Game".to_string()]);
}

#[tokio::test]
async fn discover_without_configured_root_fails() {
    let (_conn, service) = setup(Arc::new(ScriptedCatalog::default())).await;

    let result = service.discover_new_games().await;

    assert!(matches!(result, Err(AppError::LibraryRootNotSet)));
}

// ==================== 帖子同步 ====================

#[tokio::test]
async fn thread_sync_persists_and_detects_url_changes() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let old_url = "https://forum.example.net/threads/some-game.303/";
    let new_url = "https://forum.example.net/threads/some-game-part-2.303/";
    catalog.put_url_game(old_url, catalog_info(303, "Some Game", &["rpg"]));
    catalog.put_url_game(new_url, catalog_info(303, "Some Game Part 2", &["rpg"]));
    let (conn, service) = setup(catalog).await;

    let first = service.sync_thread_urls(&[old_url.to_string()]).await;
    assert_eq!(first.added, 1);
    let stored = ThreadsRepository::find_by_id(&conn, 303).await.unwrap().unwrap();
    assert!(!stored.update_available);

    let second = service.sync_thread_urls(&[old_url.to_string()]).await;
    assert_eq!(second.unchanged, 1);

    let third = service.sync_thread_urls(&[new_url.to_string()]).await;
    assert_eq!(third.updated, 1);
    let stored = ThreadsRepository::find_by_id(&conn, 303).await.unwrap().unwrap();
    assert!(stored.update_available);
    assert_eq!(stored.name, "Some Game Part 2");
    assert_eq!(stored.url, new_url);
}

#[tokio::test]
async fn watched_threads_are_synced_from_account() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let url = "https://forum.example.net/threads/watched.606/";
    catalog.put_url_game(url, catalog_info(606, "Watched", &[]));
    catalog.put_user(UserData {
        username: Some("rin".to_string()),
        watched_threads: vec![
            url.to_string(),
            "https://forum.example.net/threads/no-id/".to_string(),
        ],
    });
    let (_conn, service) = setup(catalog).await;

    let outcome = service.sync_watched_threads().await.unwrap();

    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.skipped.len(), 1);

    let listed = service
        .list_threads(ThreadSortField::Name, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Watched");
}

#[tokio::test]
async fn pending_updates_excludes_installed_and_read_threads() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let (conn, service) = setup(catalog).await;

    GamesRepository::insert(&conn, new_game(77, "Installed Game", &[]))
        .await
        .unwrap();
    ThreadsRepository::write(&conn, watched_thread(77, "Installed Game", &[], true))
        .await
        .unwrap();
    ThreadsRepository::write(&conn, watched_thread(88, "Other Game", &[], true))
        .await
        .unwrap();

    let pending = service.pending_updates().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 88);

    service.mark_thread_read(88).await.unwrap();
    let pending = service.pending_updates().await.unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn marking_unknown_thread_fails() {
    let (_conn, service) = setup(Arc::new(ScriptedCatalog::default())).await;

    let result = service.mark_thread_read(999).await;

    assert!(matches!(result, Err(AppError::ThreadNotFound(999))));
}

#[tokio::test]
async fn removed_thread_no_longer_counts() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let (conn, service) = setup(catalog).await;
    ThreadsRepository::write(&conn, watched_thread(5, "Five", &[], false))
        .await
        .unwrap();

    assert_eq!(service.count_threads().await.unwrap(), 1);
    service.remove_thread(5).await.unwrap();
    assert_eq!(service.count_threads().await.unwrap(), 0);
    assert!(matches!(
        service.remove_thread(5).await,
        Err(AppError::ThreadNotFound(5))
    ));
}

// ==================== 游戏库查询与推荐 ====================

#[tokio::test]
async fn games_are_listed_with_requested_order() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let (conn, service) = setup(catalog).await;
    GamesRepository::insert(&conn, new_game(2, "Beta", &[])).await.unwrap();
    GamesRepository::insert(&conn, new_game(1, "Alpha", &[])).await.unwrap();

    let by_name = service
        .list_games(GameSortField::Name, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(by_name[0].name, "Alpha");

    let by_id_desc = service
        .list_games(GameSortField::Id, SortOrder::Desc)
        .await
        .unwrap();
    assert_eq!(by_id_desc[0].id, 2);

    assert_eq!(service.count_games().await.unwrap(), 2);
    assert_eq!(service.game_by_id(1).await.unwrap().name, "Alpha");
}

#[tokio::test]
async fn removing_a_game_frees_its_slot() {
    let catalog = Arc::new(ScriptedCatalog::default());
    let (conn, service) = setup(catalog).await;
    GamesRepository::insert(&conn, new_game(9, "Nine", &[])).await.unwrap();

    service.remove_game(9).await.unwrap();

    assert_eq!(service.count_games().await.unwrap(), 0);
    assert!(matches!(
        service.game_by_id(9).await,
        Err(AppError::GameNotFound(9))
    ));
    assert!(matches!(
        service.remove_game(9).await,
        Err(AppError::GameNotFound(9))
    ));
}

#[tokio::test]
async fn recommendations_skip_installed_games() {
    let catalog = Arc::new(ScriptedCatalog::default());
    catalog.push_update_page(vec![
        catalog_info(77, "Installed Game", &["rpg"]),
        catalog_info(500, "Fresh Pick", &["rpg"]),
    ]);
    let (conn, service) = setup(catalog).await;

    GamesRepository::insert(&conn, new_game(77, "Installed Game", &["rpg", "story"]))
        .await
        .unwrap();
    ThreadsRepository::write(&conn, watched_thread(90, "Watched", &["story"], false))
        .await
        .unwrap();

    let picks = service.recommend_games().await.unwrap();

    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].id, 500);
}
