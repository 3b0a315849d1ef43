//! 交换目录（JSON）数据模型
//!
//! 提取时写出、译者编辑、生成时读回的文档结构。

mod index;

pub use index::{CatalogIndex, TranslationIndex};

use crate::filters::TextFilter;
use crate::script::Statement;
use serde::{Deserialize, Serialize};

/// 块条目的语句类型
///
/// 序列化为宿主的类型名：对话固定为 `"Say"`，字符串为 `"String"`，
/// 其它语句保留原始类型名。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatementKind {
    Dialogue,
    String,
    Opaque(String),
}

impl StatementKind {
    pub fn is_dialogue(&self) -> bool {
        matches!(self, StatementKind::Dialogue)
    }

    pub fn of(statement: &Statement) -> Self {
        match statement {
            Statement::Dialogue(_) => StatementKind::Dialogue,
            Statement::Opaque(o) => StatementKind::Opaque(o.kind.clone()),
        }
    }
}

impl From<String> for StatementKind {
    fn from(name: String) -> Self {
        if name == "String" {
            StatementKind::String
        } else if name.contains("Say") {
            // 包括 TranslateSay 等派生类型
            StatementKind::Dialogue
        } else {
            StatementKind::Opaque(name)
        }
    }
}

impl From<StatementKind> for String {
    fn from(kind: StatementKind) -> Self {
        match kind {
            StatementKind::Dialogue => "Say".to_string(),
            StatementKind::String => "String".to_string(),
            StatementKind::Opaque(name) => name,
        }
    }
}

/// 块中的一条语句
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockItem {
    #[serde(rename = "type")]
    pub kind: StatementKind,
    /// 原文（对话文本或字符串）
    #[serde(default)]
    pub what: Option<String>,
    /// 说话人
    #[serde(default)]
    pub who: Option<String>,
    /// 原语句的代码
    #[serde(default)]
    pub code: Option<String>,
    /// 译文（对话为文本，其它语句为完整代码）
    #[serde(default)]
    pub new_code: Option<String>,
}

impl BlockItem {
    /// 从源语句构建条目，`code` 为应用过滤器后的代码
    pub fn from_statement(statement: &Statement, filter: TextFilter) -> Self {
        let (what, who) = match statement {
            Statement::Dialogue(d) => (Some(d.what.clone()), d.who.clone()),
            Statement::Opaque(_) => (None, None),
        };
        BlockItem {
            kind: StatementKind::of(statement),
            what,
            who,
            code: Some(statement.get_code(filter)),
            new_code: None,
        }
    }

    pub fn string(what: String, new_code: Option<String>) -> Self {
        BlockItem {
            kind: StatementKind::String,
            what: Some(what),
            who: None,
            code: None,
            new_code,
        }
    }

    /// 对话替换文本：优先 `new_code`，否则原文
    pub fn dialogue_text(&self) -> Option<&str> {
        self.new_code.as_deref().or(self.what.as_deref())
    }

    /// 非对话语句的输出代码：优先 `new_code`，否则原代码
    pub fn output_code(&self) -> Option<&str> {
        self.new_code.as_deref().or(self.code.as_deref())
    }
}

/// 目录记录（对话块或字符串）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub identifier: String,
    /// `null` 表示中性语言池
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub linenumber: u32,
    #[serde(default)]
    pub block: Vec<BlockItem>,
}

impl CatalogRecord {
    pub fn new(identifier: String, language: Option<String>, filename: String, linenumber: u32) -> Self {
        CatalogRecord {
            identifier,
            language,
            filename,
            linenumber,
            block: Vec::new(),
        }
    }

    /// 按顺序返回对话条目的替换文本
    pub fn dialogue_texts(&self) -> impl Iterator<Item = Option<&str>> {
        self.block
            .iter()
            .filter(|item| item.kind.is_dialogue())
            .map(BlockItem::dialogue_text)
    }

    /// 字符串记录的译文
    pub fn string_translation(&self) -> Option<&str> {
        self.block
            .iter()
            .find(|item| item.kind == StatementKind::String)
            .and_then(|item| item.new_code.as_deref())
    }
}

/// 提取结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItems {
    #[serde(default)]
    pub dialogues: Vec<CatalogRecord>,
    #[serde(default)]
    pub strings: Vec<CatalogRecord>,
}

impl CatalogItems {
    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty() && self.strings.is_empty()
    }
}

/// `items` 字段：提取/统计模式为记录，生成模式为写出的文件列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogPayload {
    // 数组优先匹配文件列表，结构体也能从数组反序列化
    WrittenFiles(Vec<String>),
    Records(CatalogItems),
}

/// 游戏信息快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub game_version: String,
    /// 宿主运行时版本
    #[serde(default, rename = "renpy_version")]
    pub runtime_version: String,
}

/// 交换目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub uuid: String,
    #[serde(default)]
    pub game_info: GameInfo,
    #[serde(default)]
    pub args: Option<String>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub items: Option<CatalogPayload>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ok: Option<bool>,
}

impl Catalog {
    /// 组装新目录，时间戳取当前时间（秒）
    pub fn compose(
        uuid: &str,
        game_info: GameInfo,
        args: String,
        items: Option<CatalogPayload>,
        message: Option<String>,
        ok: bool,
    ) -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        Catalog {
            uuid: uuid.to_string(),
            game_info,
            args: Some(args),
            timestamp: Some(timestamp),
            items,
            message,
            ok: Some(ok),
        }
    }

    /// 目录中的记录（生成模式写出的目录没有记录）
    pub fn records(&self) -> Option<&CatalogItems> {
        match &self.items {
            Some(CatalogPayload::Records(items)) => Some(items),
            _ => None,
        }
    }
}
