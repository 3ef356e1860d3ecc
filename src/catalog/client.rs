//! 目录平台 HTTP 客户端
//!
//! 通过目录平台的 JSON API 实现 [`RemoteCatalog`]。
//!
//! 接口约定：
//! 1. 按 ID 查询：GET /api/games/{id}
//! 2. 按名称搜索：GET /api/games?name=...&include_mods=...
//! 3. 最新更新：GET /api/updates?tags=a,b&sort=rating&limit=15
//! 4. 用户数据：GET /api/me

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{CatalogError, GameInfo, RemoteCatalog, UpdateFilter, UserData};
use crate::sync::naming;

/// 默认的目录平台地址（可在设置中覆盖）
pub const DEFAULT_BASE_URL: &str = "https://forum.kagamihub.net/";

// ==================== 接口返回结构 ====================

/// 接口返回的游戏条目
#[derive(Debug, Clone, Deserialize)]
pub struct ApiGame {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub thread_url: String,
}

impl From<ApiGame> for GameInfo {
    fn from(game: ApiGame) -> Self {
        Self {
            id: game.id,
            name: game.title,
            version: game.version,
            author: game.creator,
            tags: game.tags,
            rating: game.rating,
            url: game.thread_url,
        }
    }
}

/// 接口返回的用户数据
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUserData {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub watched_threads: Vec<String>,
}

impl From<ApiUserData> for UserData {
    fn from(user: ApiUserData) -> Self {
        Self {
            username: user.username,
            watched_threads: user.watched_threads,
        }
    }
}

// ==================== HTTP 客户端 ====================

/// 目录平台 HTTP 客户端
#[derive(Clone)]
pub struct HttpCatalog {
    http_client: HttpClient,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpCatalog {
    /// 创建客户端，`api_key` 为空时以匿名身份请求
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, CatalogError> {
        // 确保末尾带斜杠，否则 join 会替换最后一段路径
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http_client: HttpClient::new(),
            base_url: Url::parse(&base)?,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.base_url.join(path)?)
    }

    async fn fetch_json<T>(&self, url: Url) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let mut request = self.http_client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn game_from_url(&self, url: &str) -> Result<GameInfo, CatalogError> {
        let id = naming::extract_thread_id(url)
            .ok_or_else(|| CatalogError::InvalidThreadUrl(url.to_string()))?;

        let endpoint = self.endpoint(&format!("api/games/{}", id))?;
        let game: ApiGame = self.fetch_json(endpoint).await?;
        Ok(game.into())
    }

    async fn search_games(
        &self,
        name: &str,
        include_mods: bool,
    ) -> Result<Vec<GameInfo>, CatalogError> {
        let mut endpoint = self.endpoint("api/games")?;
        endpoint
            .query_pairs_mut()
            .append_pair("name", name)
            .append_pair("include_mods", if include_mods { "1" } else { "0" });

        let games: Vec<ApiGame> = self.fetch_json(endpoint).await?;
        Ok(games.into_iter().map(GameInfo::from).collect())
    }

    async fn latest_updates(
        &self,
        filter: &UpdateFilter,
        limit: u32,
    ) -> Result<Vec<GameInfo>, CatalogError> {
        let mut endpoint = self.endpoint("api/updates")?;
        endpoint
            .query_pairs_mut()
            .append_pair("tags", &filter.tags.join(","))
            .append_pair("sort", filter.sort.as_query())
            .append_pair("limit", &limit.to_string());

        let games: Vec<ApiGame> = self.fetch_json(endpoint).await?;
        Ok(games.into_iter().map(GameInfo::from).collect())
    }

    async fn user_data(&self) -> Result<UserData, CatalogError> {
        let endpoint = self.endpoint("api/me")?;
        let user: ApiUserData = self.fetch_json(endpoint).await?;
        Ok(user.into())
    }
}
