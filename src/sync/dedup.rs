//! 新发现目录与已安装库的去重
//!
//! 对扫描得到的候选目录做精确匹配去重：目录名和已安装游戏名经过同一条
//! 规范化管线后比较，完全相等才算重复，不做模糊匹配。

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::games;
use crate::error::AppResult;
use crate::sync::naming;
use crate::sync::store::{GameFilter, GameSortField, LibraryStore, SortOrder};

/// 单独列出被跳过目录的数量上限，超过后改为汇总一条
pub const DEDUP_NOTICE_LIMIT: usize = 5;

/// 去重结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterReport {
    /// 未安装的候选目录（保持输入顺序）
    pub unlisted: Vec<String>,
    /// 被跳过的候选目录名
    pub skipped: Vec<String>,
    /// 面向用户的提示信息
    pub notices: Vec<String>,
}

/// 去重比较键：清洗游戏名，再次去除保留字符后转为大写
pub fn dedup_key(name: &str) -> String {
    naming::strip_reserved(&naming::clean_game_name(name)).to_uppercase()
}

/// 过滤掉已对应安装记录的候选目录（纯函数）
///
/// 候选目录取路径最后一段作为名称。排除的目录以名称记入 skipped，
/// 数量不超过 [`DEDUP_NOTICE_LIMIT`] 时逐条生成提示，否则只生成一条汇总。
pub fn filter_unlisted(paths: &[String], installed: &[games::Model]) -> FilterReport {
    let installed_keys: HashSet<String> =
        installed.iter().map(|game| dedup_key(&game.name)).collect();

    let mut report = FilterReport::default();

    for path in paths {
        let base_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());

        if installed_keys.contains(&dedup_key(&base_name)) {
            report.skipped.push(base_name);
        } else {
            report.unlisted.push(path.clone());
        }
    }

    if report.skipped.len() <= DEDUP_NOTICE_LIMIT {
        for name in &report.skipped {
            report.notices.push(format!("已安装，跳过: {}", name));
        }
    } else {
        report
            .notices
            .push(format!("已跳过 {} 个重复的游戏目录", report.skipped.len()));
    }

    report
}

/// 去重解析器：从库中读取已安装记录后应用 [`filter_unlisted`]
pub struct DedupResolver {
    library: Arc<dyn LibraryStore>,
}

impl DedupResolver {
    pub fn new(library: Arc<dyn LibraryStore>) -> Self {
        Self { library }
    }

    /// 过滤一批候选目录，返回其中尚未入库的部分
    pub async fn filter_new_paths(&self, paths: &[String]) -> AppResult<FilterReport> {
        let installed = self
            .library
            .search(GameFilter::default(), GameSortField::Id, SortOrder::Asc)
            .await?;

        let report = filter_unlisted(paths, &installed);
        if !report.skipped.is_empty() {
            log::info!(
                "去重完成: {} 个候选目录中有 {} 个已安装",
                paths.len(),
                report.skipped.len()
            );
        }
        Ok(report)
    }
}
