//! 目录平台抽象
//!
//! 目录平台是一个黑盒数据源，提供按链接、按名称、按标签筛选的游戏元数据查询，
//! 以及当前用户的订阅信息。引擎层只通过 [`RemoteCatalog`] trait 访问它，
//! 测试中以内存假实现替换。

use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{HttpCatalog, DEFAULT_BASE_URL};

/// 目录平台错误
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("返回错误状态: {0}")]
    Status(reqwest::StatusCode),

    #[error("条目不存在: {0}")]
    NotFound(String),

    #[error("无法从链接中提取帖子 ID: {0}")]
    InvalidThreadUrl(String),

    #[error("地址无效: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// 目录平台返回的游戏元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub url: String,
}

/// 最新更新列表的排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateSorting {
    #[default]
    Rating,
    Date,
    Likes,
}

impl UpdateSorting {
    /// 用于查询参数的字符串表示
    pub fn as_query(&self) -> &'static str {
        match self {
            UpdateSorting::Rating => "rating",
            UpdateSorting::Date => "date",
            UpdateSorting::Likes => "likes",
        }
    }
}

/// 最新更新列表的筛选条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateFilter {
    pub tags: Vec<String>,
    pub sort: UpdateSorting,
}

/// 当前用户在目录平台上的数据
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 订阅帖子的链接列表
    pub watched_threads: Vec<String>,
}

/// 目录平台查询接口
#[async_trait::async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// 按帖子链接查询游戏元数据（ID 从链接中提取）
    async fn game_from_url(&self, url: &str) -> Result<GameInfo, CatalogError>;

    /// 按名称搜索游戏，可以选择是否包含 MOD 条目
    async fn search_games(&self, name: &str, include_mods: bool)
        -> Result<Vec<GameInfo>, CatalogError>;

    /// 查询最新更新列表，按筛选条件过滤
    async fn latest_updates(
        &self,
        filter: &UpdateFilter,
        limit: u32,
    ) -> Result<Vec<GameInfo>, CatalogError>;

    /// 查询当前用户数据（订阅列表等）
    async fn user_data(&self) -> Result<UserData, CatalogError>;
}
