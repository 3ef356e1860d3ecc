//! 名称规范化原语
//!
//! 把用户目录名 / 帖子标题转换成可比较的规范形式，并提取内嵌的
//! 版本号和帖子 ID。所有函数均为纯函数，规范化满足幂等性。

use once_cell::sync::Lazy;
use regex::Regex;

/// 版本号无法解析时的占位值
pub const UNKNOWN_VERSION: &str = "Unknown";

/// 文件系统保留字符
const RESERVED_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// cleanGameName 的豁免字符表（数字、连字符、方括号、点）
const NAME_EXEMPT_CHARS: &[char] = &[
    '-', '[', ']', '.', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

static BRACKET_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("invalid bracket group regex"));
static VERSION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[v\.([^\]]*)\]").expect("invalid version tag regex"));
static THREAD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(\d+)").expect("invalid thread id regex"));

/// 字符级过滤：保留字母、空白和豁免表中的字符，丢弃其余所有字符
///
/// 是否为字母通过大小写变换是否产生差异来判断，
/// 因此对 CJK 等无大小写的文字同样只保留豁免表中的字符。
/// 结果去除首尾空白。
pub fn normalize(raw: &str, allowed: &[char]) -> String {
    raw.chars()
        .filter(|c| {
            let cased = !c.to_lowercase().eq(c.to_uppercase());
            cased || c.is_whitespace() || allowed.contains(c)
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// 去除字符串中的文件系统保留字符
pub fn strip_reserved(raw: &str) -> String {
    raw.chars().filter(|c| !RESERVED_CHARS.contains(c)).collect()
}

/// 清洗游戏名：先做字符过滤（保留版本标记所需的数字与方括号），
/// 再去掉所有 `[...]` 标注组（如 `[MOD]`、`[v.1.2]`），
/// 最后去除文件系统保留字符并修剪空白
pub fn clean_game_name(raw: &str) -> String {
    let filtered = normalize(raw, NAME_EXEMPT_CHARS);
    let without_tags = BRACKET_GROUP.replace_all(&filtered, "");
    strip_reserved(&without_tags).trim().to_string()
}

/// 提取内嵌版本号
///
/// 大小写不敏感地查找 `[v.` 前缀，取其后到 `]` 之间的内容（保留原始大小写）。
/// 找不到时返回 "Unknown"。
pub fn extract_version(raw: &str) -> String {
    VERSION_TAG
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

/// 从帖子链接中提取 ID（第一个「点 + 数字」片段）
///
/// 链接中不存在该模式时返回 None，调用方记录日志后跳过该链接。
pub fn extract_thread_id(url: &str) -> Option<i32> {
    THREAD_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
}
