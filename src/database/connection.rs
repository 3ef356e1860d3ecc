use kagami_path::{DB_DATA_DIR, DB_FILE_NAME};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// 解析数据库文件路径
///
/// 传入目录时固定使用其下的 data 子目录，否则按便携/标准模式自动解析
fn resolve_db_path(data_dir: Option<&Path>) -> Result<PathBuf, DbErr> {
    match data_dir {
        Some(dir) => Ok(dir.join(DB_DATA_DIR).join(DB_FILE_NAME)),
        None => kagami_path::get_db_path().map_err(|e| DbErr::Conn(RuntimeErr::Internal(e))),
    }
}

/// Establish a SeaORM database connection.
pub async fn establish_connection(data_dir: Option<&Path>) -> Result<DatabaseConnection, DbErr> {
    // 1. 解析数据库文件路径
    let db_path = resolve_db_path(data_dir)?;

    // 2. 确保数据库所在的目录存在
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
        })?;
    }

    if data_dir.is_none() && kagami_path::is_portable_mode() {
        log::info!("便携模式: 数据库位于 {}", db_path.display());
    } else {
        log::info!("标准模式: 数据库位于 {}", db_path.display());
    }

    // 3. 使用 `url` crate 安全地构建连接字符串
    let db_url = Url::from_file_path(&db_path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            db_path.display()
        )))
    })?;

    // 注意：对于本地文件，sqlite 驱动通常期望的格式是 sqlite:path (没有 //)
    // 但 sqlx-sqlite 对 sqlite:// 也有很好的兼容性。更通用的写法是直接用路径。
    let connection_string = format!("sqlite:{}?mode=rwc", db_url.path());

    connect_with_options(connection_string).await
}

/// 建立内存数据库连接（测试用）
pub async fn establish_memory_connection() -> Result<DatabaseConnection, DbErr> {
    connect_with_options("sqlite::memory:".to_string()).await
}

async fn connect_with_options(connection_string: String) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(connection_string);
    options
        .max_connections(1) // 对于本地 SQLite，连接池大小为 1 即可
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8));

    // 在开发模式下启用日志，在发布模式下禁用
    #[cfg(debug_assertions)]
    {
        options.sqlx_logging(false);
    }
    #[cfg(not(debug_assertions))]
    {
        options.sqlx_logging(false);
    }

    Database::connect(options).await
}

/// 执行所有未应用的数据库迁移
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}
