//! 应用级错误类型
//!
//! 仓库层直接返回 `sea_orm::DbErr`，引擎与服务层统一使用 `AppError`。

use crate::catalog::CatalogError;

/// 应用级错误
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("数据库操作失败: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("目录平台请求失败: {0}")]
    Catalog(#[from] CatalogError),

    #[error("无法从链接中提取帖子 ID: {0}")]
    MissingThreadId(String),

    #[error("游戏不存在: {0}")]
    GameNotFound(i32),

    #[error("帖子不存在: {0}")]
    ThreadNotFound(i32),

    #[error("游戏库根目录未设置")]
    LibraryRootNotSet,

    #[error("Provided path does not exist or is not a directory: {0}")]
    InvalidPath(String),

    #[error("无效的日志级别: {0}")]
    InvalidLogLevel(String),
}

pub type AppResult<T> = Result<T, AppError>;
