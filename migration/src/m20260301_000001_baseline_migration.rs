//! 初始数据库结构
//!
//! 此迁移创建三张表：
//! 1. games：本地已安装的游戏（主键为目录平台 ID）
//! 2. threads：订阅的帖子（主键为帖子链接中的 ID）
//! 3. user：单行用户设置（ID 固定为 1）

use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::TransactionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 开启事务，保证所有操作的原子性
        let txn = conn.begin().await?;

        create_schema(&txn).await?;
        create_indexes(&txn).await?;

        // 提交事务
        txn.commit().await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(
            "此迁移无法回滚，请删除数据库文件后重建".to_string(),
        ))
    }
}

/// 创建核心数据表
async fn create_schema<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    // 1. 创建 games 表（主键为目录平台分配的 ID，不自增）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "games" (
            "id" INTEGER NOT NULL PRIMARY KEY,
            "name" TEXT NOT NULL,
            "version" TEXT NOT NULL DEFAULT 'Unknown',
            "author" TEXT,
            "tags" TEXT NOT NULL DEFAULT '[]',
            "save_paths" TEXT NOT NULL DEFAULT '[]',
            "game_directory" TEXT NOT NULL,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER DEFAULT (strftime('%s', 'now'))
        )"#,
    ))
    .await?;

    // 2. 创建 threads 表（主键为帖子链接中的 ID，不自增）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "threads" (
            "id" INTEGER NOT NULL PRIMARY KEY,
            "url" TEXT NOT NULL,
            "name" TEXT NOT NULL,
            "tags" TEXT NOT NULL DEFAULT '[]',
            "update_available" INTEGER NOT NULL DEFAULT 0,
            "marked_as_read" INTEGER NOT NULL DEFAULT 0,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER DEFAULT (strftime('%s', 'now'))
        )"#,
    ))
    .await?;

    // 3. 创建用户表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "user" (
            "id" INTEGER PRIMARY KEY,
            "library_root_path" TEXT,
            "catalog_base_url" TEXT
        )"#,
    ))
    .await?;

    Ok(())
}

/// 创建索引
async fn create_indexes<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let indexes = [
        // games 表索引
        ("idx_games_name", "games", "name"),
        ("idx_games_created_at", "games", "created_at"),
        // threads 表索引
        ("idx_threads_name", "threads", "name"),
        ("idx_threads_update_available", "threads", "update_available"),
        ("idx_threads_marked_as_read", "threads", "marked_as_read"),
    ];

    for (index_name, table_name, column_name) in &indexes {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!(
                r#"CREATE INDEX IF NOT EXISTS "{}" ON "{}" ("{}")"#,
                index_name, table_name, column_name
            ),
        ))
        .await?;
    }

    Ok(())
}
