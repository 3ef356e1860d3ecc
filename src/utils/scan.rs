//! 一些特化的目录扫描逻辑，有待增加灵活性
//!
//! 按常见游戏引擎的文件特征判定目录类型：库目录继续下钻，
//! 游戏目录作为候选返回，压缩包目录只记录不返回。

use std::{
    collections::VecDeque,
    fs::read_dir,
    path::{Path, PathBuf},
};

use log::debug;
use walkdir::WalkDir;

use crate::error::{AppError, AppResult};

/// 判定为存档目录的目录名
const SAVE_DIR_NAMES: &[&str] = &["save", "saves", "savedata", "savegames"];

#[derive(Debug)]
enum DirKind {
    Lib,
    Game(GameKind),
    Unknown,
}

#[derive(Debug)]
enum GameKind {
    Compressed,
    Dir,
}

fn is_archive_name(name: &str) -> bool {
    name.ends_with(".zip") || name.ends_with(".7z") || name.ends_with(".rar")
}

fn scan_dir_kind(dir_path: &Path) -> DirKind {
    let entries: Vec<_> = match read_dir(dir_path) {
        Ok(entries) => entries.filter_map(Result::ok).collect(),
        Err(_) => return DirKind::Unknown,
    };

    let mut exe = false;
    let mut sh = false;
    let mut rpa = false;
    let mut rgss = false;
    let mut pck = false;
    let mut unity_dll = false;
    let mut html = false;
    let mut renpy_dir = false;
    let mut www_dir = false;
    let mut data_dir = false;
    let mut save_dir = false;
    let mut has_files = false;
    let mut has_dirs = false;
    let mut only_compressed_files = true;

    for entry in &entries {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy().to_lowercase();

        if entry.path().is_dir() {
            has_dirs = true;
            match name.as_str() {
                "renpy" => renpy_dir = true,
                "www" => www_dir = true,
                _ => {}
            }
            if name.ends_with("_data") {
                data_dir = true;
            }
            if SAVE_DIR_NAMES.contains(&name.as_str()) {
                save_dir = true;
            }
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }

        has_files = true;
        if !is_archive_name(&name) {
            only_compressed_files = false;
        }
        if name.ends_with(".exe") {
            exe = true;
        } else if name.ends_with(".sh") {
            sh = true;
        } else if name.ends_with(".rpa") {
            rpa = true;
        } else if name.ends_with(".rgss3a") || name.ends_with(".rgssad") {
            rgss = true;
        } else if name.ends_with(".pck") {
            pck = true;
        } else if name == "unityplayer.dll" {
            unity_dll = true;
        } else if name == "index.html" {
            html = true;
        }
    }

    if has_dirs && !has_files {
        return DirKind::Lib;
    }
    if has_dirs && has_files && only_compressed_files {
        return DirKind::Lib;
    }

    let launcher = exe || sh;
    let engine_payload = rpa || rgss || pck || unity_dll || renpy_dir || www_dir || data_dir;
    if launcher && engine_payload {
        return DirKind::Game(GameKind::Dir);
    }
    // 带存档目录的也算游戏目录
    if save_dir {
        return DirKind::Game(GameKind::Dir);
    }
    // HTML 游戏没有可执行文件
    if html && !exe {
        return DirKind::Game(GameKind::Dir);
    }

    let mut compressed = 0;
    let mut volume_count = 0;
    let mut sub_game_dir = 0;
    for entry in &entries {
        // 如果只有一个子游戏文件夹判定为游戏目录，或只有一个压缩文件
        if entry.path().is_dir() {
            if let DirKind::Game(_) = scan_dir_kind(&entry.path()) {
                sub_game_dir += 1;
            }
        }
        if entry.path().is_file() {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().to_lowercase();

            if is_archive_name(&name) || name.ends_with(".iso") {
                compressed += 1;
            }
            // 考虑分卷压缩
            if name.contains(".part") && (name.ends_with(".rar") || name.ends_with(".7z")) {
                volume_count += 1;
            }
        }
    }
    if sub_game_dir == 1 {
        return DirKind::Game(GameKind::Dir);
    }
    if compressed == 1 {
        return DirKind::Game(GameKind::Compressed);
    }
    if volume_count == compressed && compressed > 0 {
        return DirKind::Game(GameKind::Compressed);
    }

    DirKind::Unknown
}

fn scan_library_dirs(lib_path: &str) -> Vec<String> {
    let mut game_dirs = Vec::new();
    let mut dirs_to_process = VecDeque::new();
    dirs_to_process.push_back(lib_path.to_string());

    while let Some(current_path) = dirs_to_process.pop_front() {
        let entries: Vec<_> = match read_dir(Path::new(&current_path)) {
            Ok(entries) => entries.filter_map(Result::ok).collect(),
            Err(_) => continue,
        };

        for d in entries {
            if !d.path().is_dir() {
                continue;
            }
            let dir_path = d.path().to_string_lossy().to_string();
            match scan_dir_kind(&d.path()) {
                DirKind::Lib => {
                    // 添加到待处理队列，而不是递归调用
                    dirs_to_process.push_back(dir_path);
                }
                DirKind::Game(GameKind::Dir) => {
                    debug!("Found game directory: {}", dir_path);
                    game_dirs.push(dir_path);
                }
                DirKind::Game(GameKind::Compressed) => {
                    debug!("Found compressed game directory: {}", dir_path);
                }
                DirKind::Unknown => {}
            }
        }
    }

    game_dirs
}

/// 扫描游戏库根目录，返回判定为游戏目录的路径列表
pub fn scan_game_library(path: &str) -> AppResult<Vec<String>> {
    let scan_path = PathBuf::from(path);
    if !scan_path.exists() || !scan_path.is_dir() {
        return Err(AppError::InvalidPath(path.to_string()));
    }
    Ok(scan_library_dirs(path))
}

/// 在游戏目录内查找存档目录（最多下钻三层），结果按路径排序
pub fn detect_save_paths(game_dir: &str) -> Vec<String> {
    let mut found: Vec<String> = WalkDir::new(game_dir)
        .max_depth(3)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            SAVE_DIR_NAMES.contains(&name.as_str())
        })
        .map(|entry| entry.path().to_string_lossy().to_string())
        .collect();
    found.sort();
    found
}
