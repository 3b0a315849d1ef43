//! 输出文件注册表
//!
//! 一次运行中同一个翻译文件只打开一次：首次获取时截断并写入文件头，
//! 之后的获取都在同一个句柄上追加；运行结束时统一写入结尾横幅并关闭。

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::utils::TlError;

/// 每个生成文件末尾的横幅
pub const GENERATED_BANNER: &str = "\
###########################################################
#  This file is generated by rpy_tl_extractor.            #
#  It is rewritten every time translations are generated, #
#  edit the interchange catalog instead.                  #
###########################################################";

/// 输出文件注册表
#[derive(Debug, Default)]
pub struct OutputFileRegistry {
    // 按首次打开的顺序
    files: Vec<(PathBuf, BufWriter<File>)>,
    index: HashMap<PathBuf, usize>,
}

impl OutputFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取可写句柄
    ///
    /// 首次获取时创建父目录、截断文件并写入生成时间；
    /// 同一次运行中再次获取返回同一个句柄（追加，不截断）。
    pub fn acquire(&mut self, path: &Path) -> Result<&mut BufWriter<File>, TlError> {
        let existing = self.index.get(path).copied();
        let pos = match existing {
            Some(pos) => pos,
            None => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }

                let mut writer = BufWriter::new(File::create(path)?);
                writeln!(
                    writer,
                    "# Translation updated at {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M")
                )?;
                writeln!(writer)?;

                #[cfg(debug_assertions)]
                eprintln!("[registry] 打开输出文件: {}", path.display());

                let pos = self.files.len();
                self.files.push((path.to_path_buf(), writer));
                self.index.insert(path.to_path_buf(), pos);
                pos
            }
        };
        Ok(&mut self.files[pos].1)
    }

    /// 本次运行已打开的文件（按首次打开的顺序）
    pub fn written_files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|(path, _)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 写入结尾横幅并关闭所有文件
    ///
    /// 消耗注册表本身，因此每个文件只会收到一次横幅。
    pub fn finalize(self) -> Result<Vec<PathBuf>, TlError> {
        let mut written = Vec::with_capacity(self.files.len());
        for (path, mut writer) in self.files {
            write!(writer, "\n{}\n", GENERATED_BANNER)?;
            writer.flush()?;
            written.push(path);
        }
        Ok(written)
    }
}
