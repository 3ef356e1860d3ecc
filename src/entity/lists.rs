//! 嵌入 JSON 列的列表结构体
//!
//! 此文件定义了以 JSON 形式存储在 games / threads 表文本列中的列表类型。
//! 不作为独立的数据表实体使用。

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 标签列表（存储为 JSON）
///
/// 注意：
/// - 保留来源顺序，允许重复（推荐引擎的频率统计依赖重复项）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, FromJsonQueryResult)]
pub struct TagList(pub Vec<String>);

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

/// 存档路径列表（存储为 JSON，可以为空）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, FromJsonQueryResult)]
pub struct SavePathList(pub Vec<String>);

impl From<Vec<String>> for SavePathList {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}
