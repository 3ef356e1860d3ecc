//! 数据传输对象 (DTO)
//!
//! 入库前的游戏与帖子数据结构。id 均由远端目录分配，本地不自增。

use crate::catalog::GameInfo;
use crate::sync::naming;
use serde::{Deserialize, Serialize};

/// 用于插入游戏的数据结构
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewGame {
    pub id: i32,
    pub name: String,
    pub version: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub game_directory: String,
    pub save_paths: Vec<String>,
}

impl NewGame {
    /// 由远端目录条目构造插入数据
    ///
    /// 远端未提供版本时从名称中的版本标记解析，解析失败记为 "Unknown"
    pub fn from_info(info: &GameInfo, game_directory: String, save_paths: Vec<String>) -> Self {
        let version = info
            .version
            .as_ref()
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| naming::extract_version(&info.name));

        Self {
            id: info.id,
            name: info.name.clone(),
            version,
            author: info.author.clone(),
            tags: info.tags.clone(),
            game_directory,
            save_paths,
        }
    }
}

/// 用于插入帖子的数据结构
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewThread {
    pub id: i32,
    pub url: String,
    pub name: String,
    pub tags: Vec<String>,
}

impl NewThread {
    /// 由帖子链接及其对应的目录条目构造插入数据
    pub fn from_info(id: i32, url: String, info: &GameInfo) -> Self {
        Self {
            id,
            url,
            name: info.name.clone(),
            tags: info.tags.clone(),
        }
    }
}
