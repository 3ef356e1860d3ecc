//! KagamiManager 核心库
//!
//! 管理论坛发布的游戏库：扫描本地游戏目录并与远端目录对账入库，
//! 跟踪关注帖子的更新状态，基于标签频率生成推荐。

pub mod catalog;
pub mod database;
pub mod entity;
pub mod error;
pub mod service;
pub mod sync;
pub mod utils;

use std::path::Path;
use std::sync::Arc;

use catalog::HttpCatalog;
use database::repository::settings_repository::SettingsRepository;

pub use error::{AppError, AppResult};
pub use service::AppService;

/// 初始化数据库并构建应用服务
///
/// `data_dir` 为空时按便携/标准模式自动定位数据目录，
/// 远端目录地址优先使用设置中保存的值。
pub async fn init_service(
    data_dir: Option<&Path>,
    api_key: Option<String>,
) -> AppResult<AppService> {
    let conn = database::establish_connection(data_dir).await?;
    log::info!("数据库连接建立成功");

    log::info!("开始执行数据库迁移...");
    database::run_migrations(&conn).await?;
    log::info!("数据库迁移完成");

    let stored = SettingsRepository::get_catalog_base_url(&conn).await?;
    let base_url = if stored.is_empty() {
        catalog::DEFAULT_BASE_URL.to_string()
    } else {
        stored
    };
    let http_catalog = HttpCatalog::new(&base_url, api_key)?;

    Ok(AppService::new(conn, Arc::new(http_catalog)))
}
