//! 提取器
//!
//! 遍历全部翻译单元和扫描出的字符串，生成目录记录：
//! - `count_missing`: 统计缺失的译文（不写任何文件）
//! - `extract`: 导出完整的待翻译目录

use crate::catalog::{BlockItem, CatalogItems, CatalogRecord};
use crate::datatypes::{Language, ScanOptions};
use crate::host::ScriptHost;
use crate::resolver::IdentifierResolver;
use crate::script::{Statement, StringEntry, TranslatableUnit};
use crate::string_routes::group_by_target;

/// 提取器
pub struct Extractor<'a, H: ScriptHost + ?Sized> {
    host: &'a H,
    resolver: IdentifierResolver<'a, H>,
}

impl<'a, H: ScriptHost + ?Sized> Extractor<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self {
            host,
            resolver: IdentifierResolver::new(host),
        }
    }

    /// 统计缺失的译文
    ///
    /// # 返回
    /// `(摘要, 缺失记录)`
    pub fn count_missing(&self, language: &Language, options: &ScanOptions) -> (String, CatalogItems) {
        let key = language.key();
        let mut items = CatalogItems::default();

        for filename in self.host.translate_files() {
            for unit in self.host.file_units(&filename) {
                if self.host.is_excluded(unit) || self.resolver.in_source(unit, key) {
                    continue;
                }

                let mut record = self.unit_record(unit, unit.normalized_identifier(), language);
                record.block = source_block(&unit.statements, options);
                if !record.block.is_empty() {
                    items.dialogues.push(record);
                }
            }
        }

        let router = self.host.string_router();
        for entry in self.scan(options) {
            if router.translation_filename(&entry).is_none() {
                continue;
            }
            if self.host.string_translation(key, &entry.text).is_some() {
                continue;
            }
            items.strings.push(self.string_record(&entry, language, options, None));
        }

        let message = format!(
            "{}: {} missing dialogue translations, {} missing string translations.",
            language,
            items.dialogues.len(),
            items.strings.len()
        );
        (message, items)
    }

    /// 导出目录
    pub fn extract(&self, language: &Language, options: &ScanOptions) -> CatalogItems {
        let mut items = CatalogItems::default();

        if !options.strings_only() {
            for filename in self.host.translate_files() {
                items.dialogues.extend(self.extract_file(&filename, language, options));
            }
        }
        items.strings = self.extract_strings(language, options);

        items
    }

    /// 导出单个脚本文件中的对话
    pub fn extract_file(&self, filename: &str, language: &Language, options: &ScanOptions) -> Vec<CatalogRecord> {
        let (_, common) = self.host.layout().shorten_filename(filename);
        // 公共目录中没有对话
        if common {
            return Vec::new();
        }

        let key = language.key();
        let mut records = Vec::new();

        for unit in self.host.file_units(filename) {
            if self.host.is_excluded(unit) {
                continue;
            }

            let source_identifier = self.resolver.source_identifier(unit, key);
            if options.translated_only() && source_identifier.is_none() {
                continue;
            }

            let translated = source_identifier
                .and_then(|id| self.host.dialogue_translation(id, key).map(|stmts| (id, stmts)));

            let record = match translated {
                Some((id, statements)) => {
                    let identifier = if id == unit.identifier {
                        unit.normalized_identifier()
                    } else {
                        id.to_string()
                    };
                    let mut record = self.unit_record(unit, identifier, language);
                    record.block = translated_block(statements, options);
                    record
                }
                None => {
                    let mut record = self.unit_record(unit, unit.normalized_identifier(), language);
                    record.block = source_block(&unit.statements, options);
                    record
                }
            };

            if record.block.is_empty() {
                #[cfg(debug_assertions)]
                eprintln!("[extract] 跳过空单元: {} ({}:{})", unit.identifier, unit.filename, unit.linenumber);
                continue;
            }
            records.push(record);
        }

        records
    }

    /// 导出字符串，按目标文件分组排列
    pub fn extract_strings(&self, language: &Language, options: &ScanOptions) -> Vec<CatalogRecord> {
        let key = language.key();
        let scanned = self.scan(options);
        let groups = group_by_target(self.host.string_router(), language, &scanned);

        let mut records = Vec::new();
        for (_, entries) in groups {
            for entry in entries {
                let translation = self.host.string_translation(key, &entry.text);
                if options.translated_only() && translation.is_none() {
                    continue;
                }
                records.push(self.string_record(entry, language, options, translation));
            }
        }
        records
    }

    fn scan(&self, options: &ScanOptions) -> Vec<StringEntry> {
        self.host
            .scan(options.min_priority, options.max_priority, options.common_only())
    }

    fn unit_record(&self, unit: &TranslatableUnit, identifier: String, language: &Language) -> CatalogRecord {
        CatalogRecord::new(
            identifier,
            language.to_record_language(),
            unit.filename.clone(),
            unit.linenumber,
        )
    }

    fn string_record(
        &self,
        entry: &StringEntry,
        language: &Language,
        options: &ScanOptions,
        translation: Option<&str>,
    ) -> CatalogRecord {
        let filename = entry
            .filename
            .as_deref()
            .map(|f| self.host.layout().elide_filename(f))
            .unwrap_or_default();

        let mut record = CatalogRecord::new(
            entry.text.clone(),
            language.to_record_language(),
            filename,
            entry.line,
        );
        record.block.push(BlockItem::string(
            options.filter.apply(&entry.text),
            translation.map(str::to_string),
        ));
        record
    }
}

/// 未翻译单元：原文 + 过滤后的代码
fn source_block(statements: &[Statement], options: &ScanOptions) -> Vec<BlockItem> {
    statements
        .iter()
        .filter(|s| !options.say_only() || s.is_dialogue())
        .map(|s| BlockItem::from_statement(s, options.filter))
        .collect()
}

/// 已翻译单元：译文放入 `new_code`
fn translated_block(statements: &[Statement], options: &ScanOptions) -> Vec<BlockItem> {
    statements
        .iter()
        .filter(|s| !options.say_only() || s.is_dialogue())
        .map(|s| {
            let mut item = BlockItem::from_statement(s, options.filter);
            item.new_code = match s {
                Statement::Dialogue(d) => Some(d.what.clone()),
                Statement::Opaque(o) => Some(o.code.clone()),
            };
            item.what = None;
            item
        })
        .collect()
}
