use std::collections::HashMap;

use crate::datatypes::Language;
use crate::host::ProjectLayout;
use crate::script::StringEntry;
use crate::{COMMON_TARGET, MERGED_MODULE_EXTENSION, SCRIPT_EXTENSION};

/// 字符串路由器 trait
///
/// 负责判断字符串应写入哪个翻译文件
pub trait StringRouter: std::fmt::Debug {
    /// 字符串的目标文件（相对语言翻译目录）
    ///
    /// # 返回
    /// - `Some(path)`: 目标文件，如 `chapter1/script.rpy`、`common.rpy`
    /// - `None`: 该字符串不参与翻译
    fn translation_filename(&self, entry: &StringEntry) -> Option<String>;

    /// 检查字符串是否可翻译
    fn is_translatable(&self, entry: &StringEntry) -> bool {
        self.translation_filename(entry).is_some()
    }
}

/// 默认字符串路由器实现
///
/// 公共代码中的字符串归入 `common.rpy`，游戏脚本中的字符串归入同名翻译文件
#[derive(Debug, Clone, Default)]
pub struct DefaultStringRouter {
    layout: ProjectLayout,
}

impl DefaultStringRouter {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }
}

impl StringRouter for DefaultStringRouter {
    fn translation_filename(&self, entry: &StringEntry) -> Option<String> {
        if entry.common {
            return Some(COMMON_TARGET.to_string());
        }

        let filename = entry.filename.as_deref()?;
        let (mut short, common) = self.layout.shorten_filename(filename);
        if common {
            return Some(COMMON_TARGET.to_string());
        }

        // .rpym 的字符串写入对应的 .rpy
        if short.ends_with('m') {
            short.pop();
        }
        Some(short)
    }
}

/// 中性语言池的默认目标改为合并模块扩展名（`common.rpy` -> `common.rpym`）
pub fn neutral_target(target: String, language: &Language) -> String {
    if !language.is_neutral() || target != COMMON_TARGET {
        return target;
    }
    match target.strip_suffix(SCRIPT_EXTENSION) {
        Some(stem) => format!("{}{}", stem, MERGED_MODULE_EXTENSION),
        None => target,
    }
}

/// 按目标文件分组，组与组内条目都保持首次出现的顺序
///
/// 分组键已经过 `neutral_target` 处理；没有目标文件的字符串被丢弃
pub fn group_by_target<'a, I>(
    router: &dyn StringRouter,
    language: &Language,
    entries: I,
) -> Vec<(String, Vec<&'a StringEntry>)>
where
    I: IntoIterator<Item = &'a StringEntry>,
{
    let mut groups: Vec<(String, Vec<&'a StringEntry>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let Some(target) = router.translation_filename(entry) else {
            continue;
        };
        let target = neutral_target(target, language);
        match positions.get(&target) {
            Some(&pos) => groups[pos].1.push(entry),
            None => {
                positions.insert(target.clone(), groups.len());
                groups.push((target, vec![entry]));
            }
        }
    }

    groups
}
