use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use rpy_tl_extractor::host::ScriptHost;
use rpy_tl_extractor::{
    run, Language, Mode, RunOptions, ScanFlags, ScanOptions, ScriptSnapshot, TextFilter,
};

#[derive(Parser, Debug)]
#[command(name = "rpy_tl_extractor")]
#[command(about = "提取脚本中的可翻译内容，或根据编辑后的目录生成翻译文件")]
#[command(version = "0.1.0")]
struct Cli {
    /// 目录 JSON 文件（读取并写回）
    file: PathBuf,

    /// 标识本次调用的 uuid，生成模式下必须与目录中的一致
    #[arg(long)]
    uuid: String,

    /// 语料快照 JSON 文件
    #[arg(long)]
    snapshot: PathBuf,

    /// 项目根目录（默认为快照中的设置，相对快照所在目录）
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// 只写入 ok=true，不做任何处理
    #[arg(long)]
    test_only: bool,

    /// 对话只处理 Say 语句
    #[arg(long)]
    say_only: bool,

    /// 只处理已有译文的条目
    #[arg(long)]
    translated_only: bool,

    /// 目标语言（None 表示中性语言池，rot13/piglatin 同时选择过滤器）
    #[arg(long, default_value = "None")]
    language: String,

    /// 使用 rot13 代替翻译
    #[arg(long)]
    rot13: bool,

    /// 使用 pig latin 代替翻译
    #[arg(long)]
    piglatin: bool,

    /// 统计缺失的译文
    #[arg(long)]
    count: bool,

    /// 根据编辑后的目录生成翻译文件
    #[arg(long)]
    generate: bool,

    /// 字符串最小优先级
    #[arg(long, default_value_t = 0)]
    min_priority: i32,

    /// 字符串最大优先级（0 表示使用项目默认值）
    #[arg(long, default_value_t = 0)]
    max_priority: i32,

    /// 只处理字符串（跳过对话）
    #[arg(long)]
    strings_only: bool,

    /// 只处理公共代码中的字符串
    #[arg(long)]
    common_only: bool,

    /// 静默模式(仅输出错误)
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let host = load_snapshot(&cli)?;
    let options = build_options(&cli, host.layout().default_max_priority());

    #[cfg(debug_assertions)]
    if !cli.quiet {
        println!("运行参数: {:?}", options);
    }

    let outcome = run(&host, &options)
        .with_context(|| format!("处理目录失败: {:?}", cli.file))?;

    if !cli.quiet {
        if let Some(message) = &outcome.message {
            println!("{}", message);
        }
        for path in &outcome.written_files {
            println!("  写入: {}", path.display());
        }
        println!("目录已保存到: {:?}", cli.file);
    }

    Ok(())
}

/// 加载语料快照，并确定项目根目录
fn load_snapshot(cli: &Cli) -> Result<ScriptSnapshot> {
    let snapshot = ScriptSnapshot::load(&cli.snapshot)
        .with_context(|| format!("读取语料快照失败: {:?}", cli.snapshot))?;

    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => {
            let snapshot_dir = cli.snapshot.parent().unwrap_or(Path::new("."));
            snapshot_dir.join(&snapshot.layout().base_dir)
        }
    };

    Ok(snapshot.with_base_dir(base_dir))
}

/// 将命令行参数转换为运行参数
///
/// `--count` 与 `--generate` 同时给出时按统计模式运行
fn build_options(cli: &Cli, default_max_priority: i32) -> RunOptions {
    let mode = if cli.count {
        Mode::Count
    } else if cli.generate {
        Mode::Generate
    } else {
        Mode::Extract
    };

    let max_priority = if cli.max_priority == 0 {
        default_max_priority
    } else {
        cli.max_priority
    };

    let mut flags = ScanFlags::empty();
    flags.set(ScanFlags::SAY_ONLY, cli.say_only);
    flags.set(ScanFlags::TRANSLATED_ONLY, cli.translated_only);
    flags.set(ScanFlags::STRINGS_ONLY, cli.strings_only);
    flags.set(ScanFlags::COMMON_ONLY, cli.common_only);

    let filter = TextFilter::select(&cli.language, cli.rot13, cli.piglatin);

    RunOptions {
        catalog_path: cli.file.clone(),
        uuid: cli.uuid.clone(),
        language: Language::parse(&cli.language),
        mode,
        test_only: cli.test_only,
        scan: ScanOptions::new(filter, cli.min_priority, max_priority).with_flags(flags),
    }
}
