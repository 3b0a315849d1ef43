//! 宿主协作者 - trait 定义

use crate::catalog::GameInfo;
use crate::script::{Statement, StringEntry, TranslatableUnit};
use crate::string_routes::StringRouter;
use super::layout::ProjectLayout;

/// 翻译单元提供者
pub trait TranslateCorpus {
    /// 含有翻译单元的脚本文件（按加载顺序）
    fn translate_files(&self) -> Vec<String>;

    /// 指定文件中的翻译单元（按出现顺序），未知文件返回空切片
    fn file_units(&self, filename: &str) -> &[TranslatableUnit];

    /// 是否为空的 extend 单元（这类单元不参与任何处理）
    ///
    /// 默认实现：唯一的语句是说话人为 `extend` 且文本为空的对话
    fn is_empty_extend(&self, unit: &TranslatableUnit) -> bool {
        match unit.statements.as_slice() {
            [Statement::Dialogue(say)] => {
                say.who.as_deref() == Some("extend") && say.what.trim().is_empty()
            }
            _ => false,
        }
    }

    /// 单元是否被排除在提取、统计与生成之外：没有语句，或为空的 extend
    fn is_excluded(&self, unit: &TranslatableUnit) -> bool {
        unit.statements.is_empty() || self.is_empty_extend(unit)
    }
}

/// 源码中已有的译文
pub trait SourceTranslations {
    /// (标识符, 语言) 对应的已翻译语句块
    fn dialogue_translation(&self, identifier: &str, language: Option<&str>) -> Option<&[Statement]>;

    fn has_dialogue_translation(&self, identifier: &str, language: Option<&str>) -> bool {
        self.dialogue_translation(identifier, language).is_some()
    }

    /// 字符串译文表中的译文
    fn string_translation(&self, language: Option<&str>, text: &str) -> Option<&str>;
}

/// 字符串扫描器
pub trait StringScanner {
    /// 扫描优先级在 `[min_priority, max_priority]` 内的字符串
    fn scan(&self, min_priority: i32, max_priority: i32, common_only: bool) -> Vec<StringEntry>;
}

/// 完整的宿主接口
pub trait ScriptHost: TranslateCorpus + SourceTranslations + StringScanner {
    fn layout(&self) -> &ProjectLayout;

    /// 字符串路由器（决定字符串写入哪个翻译文件）
    fn string_router(&self) -> &dyn StringRouter;

    fn game_info(&self) -> GameInfo;
}
