//! 标识符解析
//!
//! 判断翻译单元是否已在源码中翻译，并在重命名/合并的单元上
//! 回退到旧标识符。

use crate::catalog::{CatalogRecord, TranslationIndex};
use crate::host::SourceTranslations;
use crate::script::TranslatableUnit;

/// 单元的解析结果
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// 源码中已有该语言的译文（主标识符或旧标识符）
    pub already_in_source: bool,
    /// 写入文件头与目录时使用的标识符
    pub effective_identifier: &'a str,
    /// 编辑后目录中找到的记录
    pub found: Option<&'a CatalogRecord>,
}

/// 标识符解析器
pub struct IdentifierResolver<'a, S: SourceTranslations + ?Sized> {
    source: &'a S,
}

impl<'a, S: SourceTranslations + ?Sized> IdentifierResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// 源码中是否已有译文
    pub fn in_source(&self, unit: &TranslatableUnit, language: Option<&str>) -> bool {
        self.source_identifier(unit, language).is_some()
    }

    /// 源码中有译文的那个标识符（先主后旧）
    pub fn source_identifier<'u>(&self, unit: &'u TranslatableUnit, language: Option<&str>) -> Option<&'u str> {
        if self.source.has_dialogue_translation(&unit.identifier, language) {
            return Some(unit.identifier.as_str());
        }
        unit.alternate
            .as_deref()
            .filter(|alt| self.source.has_dialogue_translation(alt, language))
    }

    /// 对照编辑后的目录解析单元
    ///
    /// `normalized` 是调用方预先计算的规范化主标识符
    pub fn resolve<'r>(
        &self,
        unit: &'r TranslatableUnit,
        normalized: &'r str,
        language: Option<&str>,
        edited: &'r TranslationIndex,
    ) -> Resolution<'r> {
        let already_in_source = self.in_source(unit, language);

        if let Some(record) = edited.get(normalized, language) {
            return Resolution {
                already_in_source,
                effective_identifier: normalized,
                found: Some(record),
            };
        }

        if let Some(alternate) = unit.alternate.as_deref() {
            if let Some(record) = edited.get(alternate, language) {
                return Resolution {
                    already_in_source,
                    effective_identifier: alternate,
                    found: Some(record),
                };
            }
        }

        Resolution {
            already_in_source,
            effective_identifier: normalized,
            found: None,
        }
    }
}
