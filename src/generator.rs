//! 生成器
//!
//! 读取译者编辑后的目录，为每个脚本文件重新生成翻译存根。

use std::fmt::{self, Write as _};
use std::io::Write;
use std::ops::AddAssign;
use std::path::PathBuf;

use crate::catalog::{CatalogRecord, StatementKind, TranslationIndex};
use crate::datatypes::{Language, ScanOptions};
use crate::filters::TextFilter;
use crate::host::ScriptHost;
use crate::registry::OutputFileRegistry;
use crate::resolver::IdentifierResolver;
use crate::script::{Statement, StringEntry, TranslatableUnit};
use crate::string_routes::group_by_target;
use crate::utils::{quote_text, TlError};
use crate::MERGED_MODULE_EXTENSION;

/// 生成统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationCount {
    /// 目录中找不到译文的条目数
    pub missing_count: usize,
    /// 使用了目录译文的条目数
    pub usage_count: usize,
}

impl AddAssign for GenerationCount {
    fn add_assign(&mut self, other: Self) {
        self.missing_count += other.missing_count;
        self.usage_count += other.usage_count;
    }
}

impl fmt::Display for GenerationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "using {} and missing {}", self.usage_count, self.missing_count)
    }
}

/// 翻译存根生成器
///
/// 独占一个输出文件注册表，`finish` 时统一写入横幅。
pub struct Generator<'a, H: ScriptHost + ?Sized> {
    host: &'a H,
    resolver: IdentifierResolver<'a, H>,
    registry: OutputFileRegistry,
}

impl<'a, H: ScriptHost + ?Sized> Generator<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self {
            host,
            resolver: IdentifierResolver::new(host),
            registry: OutputFileRegistry::new(),
        }
    }

    /// 生成单个脚本文件的对话翻译
    pub fn generate_dialogue(
        &mut self,
        edited: &TranslationIndex,
        filename: &str,
        language: &Language,
        options: &ScanOptions,
    ) -> Result<GenerationCount, TlError> {
        let mut count = GenerationCount::default();
        let host = self.host;

        let layout = host.layout();
        let (mut relative, common) = layout.shorten_filename(filename);
        // 公共目录中没有对话
        if common {
            return Ok(count);
        }
        if relative.ends_with(&format!(".{}", MERGED_MODULE_EXTENSION)) {
            relative.pop();
        }
        let tl_path = layout.tl_path(language, &relative);

        let key = language.key();
        for unit in host.file_units(filename) {
            if host.is_excluded(unit) {
                continue;
            }

            let normalized = unit.normalized_identifier();
            let resolution = self.resolver.resolve(unit, &normalized, key, edited);
            // 源码中的译文优先，不重新生成
            if resolution.already_in_source {
                continue;
            }

            match resolution.found {
                Some(_) => count.usage_count += 1,
                None => {
                    count.missing_count += 1;
                    if options.translated_only() {
                        continue;
                    }
                }
            }

            let section = render_unit(
                unit,
                language,
                resolution.effective_identifier,
                resolution.found,
                options,
            );
            self.registry.acquire(&tl_path)?.write_all(section.as_bytes())?;
        }

        Ok(count)
    }

    /// 生成字符串翻译
    pub fn generate_strings(
        &mut self,
        edited: &TranslationIndex,
        language: &Language,
        options: &ScanOptions,
    ) -> Result<GenerationCount, TlError> {
        let mut count = GenerationCount::default();
        let host = self.host;
        let key = language.key();

        let scanned = host.scan(options.min_priority, options.max_priority, options.common_only());

        let mut pending: Vec<&StringEntry> = Vec::new();
        for entry in &scanned {
            if !host.string_router().is_translatable(entry) {
                continue;
            }
            if host.string_translation(key, &entry.text).is_some() {
                continue;
            }
            if !edited.contains(&entry.text, key) {
                count.missing_count += 1;
                if options.translated_only() {
                    continue;
                }
            }
            pending.push(entry);
        }

        let layout = host.layout();
        for (target, entries) in group_by_target(host.string_router(), language, pending) {
            let tl_path = layout.tl_path(language, &target);

            let mut section = String::new();
            let _ = writeln!(section, "translate {} strings:", language);
            let _ = writeln!(section);

            for entry in entries {
                let replacement = edited
                    .get(&entry.text, key)
                    .and_then(CatalogRecord::string_translation);
                let new_text = match replacement {
                    Some(text) => {
                        count.usage_count += 1;
                        text.to_string()
                    }
                    None => options.filter.apply(&entry.text),
                };

                let location = entry
                    .filename
                    .as_deref()
                    .map(|f| layout.elide_filename(f))
                    .unwrap_or_default();
                let _ = writeln!(section, "    # {}:{}", location, entry.line);
                let _ = writeln!(section, "    old \"{}\"", quote_text(&entry.text));
                let _ = writeln!(section, "    new \"{}\"", quote_text(&new_text));
                let _ = writeln!(section);
            }

            self.registry.acquire(&tl_path)?.write_all(section.as_bytes())?;
        }

        Ok(count)
    }

    /// 写入横幅并关闭所有输出文件
    pub fn finish(self) -> Result<Vec<PathBuf>, TlError> {
        self.registry.finalize()
    }
}

/// 渲染一个翻译块
fn render_unit(
    unit: &TranslatableUnit,
    language: &Language,
    identifier: &str,
    record: Option<&CatalogRecord>,
    options: &ScanOptions,
) -> String {
    let filter = options.filter;
    let mut out = String::new();

    let _ = writeln!(out, "# {}:{}", unit.filename, unit.linenumber);
    let _ = writeln!(out, "translate {} {}:", language, identifier);
    let _ = writeln!(out);

    for statement in &unit.statements {
        let _ = writeln!(out, "    # {}", statement.get_code(TextFilter::Null));
    }

    match record {
        Some(record) if !options.say_only() => {
            let mut dialogues = unit.dialogues();
            for item in &record.block {
                if item.kind.is_dialogue() {
                    let (Some(text), Some(say)) = (item.dialogue_text(), dialogues.next()) else {
                        continue;
                    };
                    let _ = writeln!(out, "    {}", say.with_text(text).get_code(filter));
                } else if item.kind != StatementKind::String {
                    if let Some(code) = item.output_code() {
                        let _ = writeln!(out, "    {}", code.trim());
                    }
                }
            }
        }
        _ => {
            let mut texts = record.into_iter().flat_map(|r| r.dialogue_texts());
            for statement in &unit.statements {
                let code = match statement {
                    Statement::Dialogue(say) => match texts.next().flatten() {
                        Some(text) => say.with_text(text).get_code(filter),
                        None => say.get_code(filter),
                    },
                    Statement::Opaque(_) => statement.get_code(filter),
                };
                let _ = writeln!(out, "    {}", code);
            }
        }
    }

    let _ = writeln!(out);
    out
}
