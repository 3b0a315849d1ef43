pub mod utils;
pub mod datatypes;
pub mod filters;
pub mod script;
pub mod catalog;
pub mod io;
pub mod host;
pub mod string_routes;
pub mod resolver;
pub mod extractor;
pub mod registry;
pub mod generator;
pub mod command;

// 重新导出主要结构
pub use catalog::{BlockItem, Catalog, CatalogIndex, CatalogItems, CatalogPayload, CatalogRecord, GameInfo, StatementKind, TranslationIndex};
pub use command::{run, run_with, Mode, RunOptions, RunOutcome};
pub use datatypes::{Language, ScanFlags, ScanOptions};
pub use extractor::Extractor;
pub use filters::TextFilter;
pub use generator::{GenerationCount, Generator};
pub use host::{ProjectLayout, ScriptHost, ScriptSnapshot};
pub use registry::OutputFileRegistry;
pub use resolver::{IdentifierResolver, Resolution};
pub use script::{DialogueStatement, OpaqueStatement, Statement, StringEntry, TranslatableUnit};
pub use string_routes::{DefaultStringRouter, StringRouter};
pub use utils::TlError;

// 常量定义
pub const SCRIPT_EXTENSION: &str = "rpy";
pub const MERGED_MODULE_EXTENSION: &str = "rpym";
/// 公共字符串的默认目标文件
pub const COMMON_TARGET: &str = "common.rpy";
