use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::datatypes::Language;

/// 项目目录配置
///
/// 脚本文件名都是相对 `base_dir` 的路径（如 `game/script.rpy`），
/// 生成的翻译文件位于 `base_dir/game_dir/tl_directory/<语言>/`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// 项目根目录
    pub base_dir: PathBuf,
    /// 游戏目录（相对 base_dir）
    pub game_dir: String,
    /// 运行时公共代码目录（相对 base_dir）
    pub common_dir: String,
    /// 翻译目录（相对 game_dir）
    pub tl_directory: String,
    /// 是否为启动器翻译（影响默认最大优先级，并在生成后复制启动器脚本）
    pub translate_launcher: bool,
    /// 运行时安装目录（相对 base_dir）
    pub renpy_base: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            game_dir: "game".to_string(),
            common_dir: "renpy/common".to_string(),
            tl_directory: "tl".to_string(),
            translate_launcher: false,
            renpy_base: PathBuf::from("."),
        }
    }
}

impl ProjectLayout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// 去掉目录前缀
    ///
    /// # 返回
    /// `(相对路径, 是否位于公共目录)`；既不在公共目录也不在游戏目录时返回文件名
    pub fn shorten_filename(&self, filename: &str) -> (String, bool) {
        let filename = self.elide_filename(filename);

        if let Some(rest) = strip_dir(&filename, &self.common_dir) {
            return (rest.to_string(), true);
        }
        if let Some(rest) = strip_dir(&filename, &self.game_dir) {
            return (rest.to_string(), false);
        }

        let name = filename.rsplit('/').next().unwrap_or(&filename).to_string();
        (name, false)
    }

    /// 统一分隔符，并去掉 base_dir 前缀
    pub fn elide_filename(&self, filename: &str) -> String {
        let normalized = filename.replace('\\', "/");
        let base = self.base_dir.to_string_lossy().replace('\\', "/");
        let base = base.trim_end_matches('/');

        if !base.is_empty() && base != "." {
            if let Some(rest) = strip_dir(&normalized, base) {
                return rest.to_string();
            }
        }
        normalized.trim_start_matches("./").to_string()
    }

    /// 语言的翻译目录
    pub fn tl_dir(&self, language: &Language) -> PathBuf {
        self.base_dir
            .join(&self.game_dir)
            .join(&self.tl_directory)
            .join(language.tag())
    }

    /// 翻译目录下的文件路径
    pub fn tl_path(&self, language: &Language, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.tl_dir(language), |path, part| path.join(part))
    }

    /// 未指定 `--max-priority` 时的默认值
    pub fn default_max_priority(&self) -> i32 {
        if self.translate_launcher {
            499
        } else {
            299
        }
    }

    /// 启动器模板脚本 `<renpy_base>/gui/game/script.rpy`
    pub fn launcher_script_source(&self) -> PathBuf {
        self.base_dir
            .join(&self.renpy_base)
            .join("gui")
            .join("game")
            .join("script.rpy")
    }

    /// 启动器脚本在语言翻译目录中的副本
    pub fn launcher_script_target(&self, language: &Language) -> PathBuf {
        self.tl_path(language, "script.rpym")
    }

    /// 脚本文件是否位于翻译目录中（这类文件本身就是译文，不参与提取）
    pub fn is_tl_file(&self, filename: &str) -> bool {
        let (short, common) = self.shorten_filename(filename);
        !common && strip_dir(&short, &self.tl_directory).is_some()
    }
}

fn strip_dir<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    path.strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
}
