//! JSON 语料快照
//!
//! 宿主运行时把解析好的翻译单元、源码中已有的译文和扫描出的字符串
//! 导出为一份 JSON 文档，命令行工具通过它驱动提取与生成。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::layout::ProjectLayout;
use super::traits::{ScriptHost, SourceTranslations, StringScanner, TranslateCorpus};
use crate::catalog::GameInfo;
use crate::datatypes::{Language, RawText};
use crate::script::{Statement, StringEntry, TranslatableUnit};
use crate::string_routes::{DefaultStringRouter, StringRouter};
use crate::utils::TlError;

/// 一个脚本文件及其翻译单元
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub filename: String,
    #[serde(default)]
    pub units: Vec<TranslatableUnit>,
}

/// 源码中已有的对话翻译
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTranslation {
    pub identifier: String,
    /// `null` 或 `"None"` 表示中性语言池
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// 快照文档（磁盘格式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotDocument {
    pub game_info: GameInfo,
    pub layout: ProjectLayout,
    /// 按加载顺序排列
    pub files: Vec<SnapshotFile>,
    pub translations: Vec<SourceTranslation>,
    /// 语言（中性语言池为 `"None"`）-> 原文 -> 译文
    pub string_translations: HashMap<String, HashMap<String, String>>,
    pub strings: Vec<StringEntry>,
}

/// 基于快照的宿主实现
#[derive(Debug)]
pub struct ScriptSnapshot {
    game_info: GameInfo,
    layout: ProjectLayout,
    files: Vec<SnapshotFile>,
    file_index: HashMap<String, usize>,
    translations: HashMap<(String, Option<String>), Vec<Statement>>,
    string_tables: HashMap<Option<String>, HashMap<String, String>>,
    strings: Vec<StringEntry>,
    router: DefaultStringRouter,
}

impl ScriptSnapshot {
    pub fn new(document: SnapshotDocument) -> Self {
        let file_index = document
            .files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.filename.clone(), i))
            .collect();

        let translations = document
            .translations
            .into_iter()
            .map(|t| {
                let language = normalize_language(t.language.as_deref());
                ((t.identifier, language), t.statements)
            })
            .collect();

        let string_tables = document
            .string_translations
            .into_iter()
            .map(|(language, table)| (Language::parse(&language).to_record_language(), table))
            .collect();

        Self {
            router: DefaultStringRouter::new(document.layout.clone()),
            game_info: document.game_info,
            layout: document.layout,
            files: document.files,
            file_index,
            translations,
            string_tables,
            strings: document.strings,
        }
    }

    /// 从 JSON 文本构建，`path` 只用于错误信息
    pub fn from_json_str(json: &str, path: &Path) -> Result<Self, TlError> {
        let document: SnapshotDocument =
            serde_json::from_str(json).map_err(|e| TlError::parse(path, e))?;
        Ok(Self::new(document))
    }

    /// 读取快照文件
    pub fn load(path: &Path) -> Result<Self, TlError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TlError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let text = RawText::decode(&bytes);
        Self::from_json_str(&text.content, path)
    }

    /// 设置基目录（快照中的相对基目录以快照所在目录为准）
    pub fn with_base_dir(mut self, base_dir: impl Into<std::path::PathBuf>) -> Self {
        self.layout.base_dir = base_dir.into();
        self.router = DefaultStringRouter::new(self.layout.clone());
        self
    }

    pub fn unit_count(&self) -> usize {
        self.files.iter().map(|f| f.units.len()).sum()
    }
}

fn normalize_language(language: Option<&str>) -> Option<String> {
    language.and_then(|l| Language::parse(l).to_record_language())
}

impl TranslateCorpus for ScriptSnapshot {
    fn translate_files(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|f| !self.layout.is_tl_file(&f.filename))
            .map(|f| f.filename.clone())
            .collect()
    }

    fn file_units(&self, filename: &str) -> &[TranslatableUnit] {
        self.file_index
            .get(filename)
            .map(|&i| self.files[i].units.as_slice())
            .unwrap_or(&[])
    }
}

impl SourceTranslations for ScriptSnapshot {
    fn dialogue_translation(&self, identifier: &str, language: Option<&str>) -> Option<&[Statement]> {
        self.translations
            .get(&(identifier.to_string(), language.map(str::to_string)))
            .map(Vec::as_slice)
    }

    fn string_translation(&self, language: Option<&str>, text: &str) -> Option<&str> {
        self.string_tables
            .get(&language.map(str::to_string))
            .and_then(|table| table.get(text))
            .map(String::as_str)
    }
}

impl StringScanner for ScriptSnapshot {
    fn scan(&self, min_priority: i32, max_priority: i32, common_only: bool) -> Vec<StringEntry> {
        self.strings
            .iter()
            .filter(|s| s.priority >= min_priority && s.priority <= max_priority)
            .filter(|s| !common_only || s.common)
            .cloned()
            .collect()
    }
}

impl ScriptHost for ScriptSnapshot {
    fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    fn string_router(&self) -> &dyn StringRouter {
        &self.router
    }

    fn game_info(&self) -> GameInfo {
        self.game_info.clone()
    }
}
