//! 命令编排
//!
//! 一次调用对应一种模式：仅测试、统计缺失、生成存根或导出目录。
//! 每种模式最后都把结果写回同一个目录文件。

use std::fs;
use std::path::PathBuf;

use crate::catalog::{Catalog, CatalogIndex, CatalogPayload};
use crate::datatypes::{Language, ScanOptions};
use crate::extractor::Extractor;
use crate::generator::{GenerationCount, Generator};
use crate::host::{ProjectLayout, ScriptHost};
use crate::io::{CatalogReader, CatalogWriter, DefaultCatalogReader, DefaultCatalogWriter};
use crate::utils::TlError;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// 导出待翻译目录
    #[default]
    Extract,
    /// 统计缺失的译文
    Count,
    /// 从编辑后的目录生成翻译存根
    Generate,
}

/// 一次运行的参数
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 目录文件（输入兼输出）
    pub catalog_path: PathBuf,
    /// 调用方生成的 uuid，用于确认目录属于本次调用
    pub uuid: String,
    pub language: Language,
    pub mode: Mode,
    /// 只写入 `ok = true`，不遍历语料
    pub test_only: bool,
    pub scan: ScanOptions,
}

/// 运行结果
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub message: Option<String>,
    pub ok: bool,
    /// 生成模式写出的存根文件
    pub written_files: Vec<PathBuf>,
}

/// 使用默认的文件读写器运行
pub fn run<H: ScriptHost + ?Sized>(host: &H, options: &RunOptions) -> Result<RunOutcome, TlError> {
    run_with(host, options, &DefaultCatalogReader, &DefaultCatalogWriter)
}

/// 运行命令
///
/// # 错误
/// 目录缺失、格式错误或 uuid 不匹配时返回错误，此时不会写入任何文件
pub fn run_with<H: ScriptHost + ?Sized>(
    host: &H,
    options: &RunOptions,
    reader: &dyn CatalogReader,
    writer: &dyn CatalogWriter,
) -> Result<RunOutcome, TlError> {
    let write = |items: Option<CatalogPayload>, message: Option<String>| {
        let catalog = Catalog::compose(
            &options.uuid,
            host.game_info(),
            format!("{:?}", options),
            items,
            message,
            true,
        );
        writer.write(&catalog, &options.catalog_path)
    };

    if options.test_only {
        write(None, None)?;
        return Ok(RunOutcome {
            message: None,
            ok: true,
            written_files: Vec::new(),
        });
    }

    let language = &options.language;
    let mut outcome = RunOutcome {
        ok: true,
        ..RunOutcome::default()
    };

    let (items, message) = match options.mode {
        Mode::Count => {
            let (message, items) = Extractor::new(host).count_missing(language, &options.scan);
            (CatalogPayload::Records(items), message)
        }
        Mode::Generate => {
            let catalog = reader.read(&options.catalog_path, &options.uuid)?;
            let edited = CatalogIndex::from_catalog(catalog);
            let (dialogue, strings, written) = generate(host, &edited, language, &options.scan)?;

            let message = format!(
                "{}: dialogue translation: {}, string translation: {}",
                language, dialogue, strings
            );
            let paths = written.iter().map(|p| p.to_string_lossy().into_owned()).collect();
            outcome.written_files = written;
            (CatalogPayload::WrittenFiles(paths), message)
        }
        Mode::Extract => {
            let items = Extractor::new(host).extract(language, &options.scan);
            let message = format!(
                "{}: {} dialogue translations and {} string translations found",
                language,
                items.dialogues.len(),
                items.strings.len()
            );
            (CatalogPayload::Records(items), message)
        }
    };

    write(Some(items), Some(message.clone()))?;
    outcome.message = Some(message);
    Ok(outcome)
}

/// 生成对话与字符串存根，返回两类统计和写出的文件
fn generate<H: ScriptHost + ?Sized>(
    host: &H,
    edited: &CatalogIndex,
    language: &Language,
    scan: &ScanOptions,
) -> Result<(GenerationCount, GenerationCount, Vec<PathBuf>), TlError> {
    let mut generator = Generator::new(host);

    let mut dialogue = GenerationCount::default();
    if !scan.strings_only() {
        for filename in host.translate_files() {
            dialogue += generator.generate_dialogue(&edited.dialogues, &filename, language, scan)?;
        }
    }
    let strings = generator.generate_strings(&edited.strings, language, scan)?;

    let written = generator.finish()?;

    let layout = host.layout();
    if layout.translate_launcher && !scan.strings_only() {
        copy_launcher_script(layout, language)?;
    }

    Ok((dialogue, strings, written))
}

/// 把启动器模板脚本复制到语言翻译目录
///
/// 模板不存在或目标已存在时什么都不做，返回 `None`
fn copy_launcher_script(layout: &ProjectLayout, language: &Language) -> Result<Option<PathBuf>, TlError> {
    let source = layout.launcher_script_source();
    let target = layout.launcher_script_target(language);
    if !source.exists() || target.exists() {
        return Ok(None);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&source, &target)?;

    #[cfg(debug_assertions)]
    eprintln!("[generate] 复制启动器脚本: {:?} -> {:?}", source, target);

    Ok(Some(target))
}
