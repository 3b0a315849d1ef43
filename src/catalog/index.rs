use std::collections::HashMap;

use super::{Catalog, CatalogPayload, CatalogRecord};

/// 按 (标识符, 语言) 查找记录
///
/// 同一个键出现多次时以最后一条为准。
#[derive(Debug, Clone, Default)]
pub struct TranslationIndex {
    records: HashMap<(String, Option<String>), CatalogRecord>,
}

impl TranslationIndex {
    pub fn new(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| ((r.identifier.clone(), r.language.clone()), r))
            .collect();
        Self { records }
    }

    pub fn get(&self, identifier: &str, language: Option<&str>) -> Option<&CatalogRecord> {
        self.records
            .get(&(identifier.to_string(), language.map(str::to_string)))
    }

    pub fn contains(&self, identifier: &str, language: Option<&str>) -> bool {
        self.get(identifier, language).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 编辑后目录的两张查找表
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    pub dialogues: TranslationIndex,
    pub strings: TranslationIndex,
}

impl CatalogIndex {
    /// 生成模式写出的目录（只有文件列表）会得到空索引
    pub fn from_catalog(catalog: Catalog) -> Self {
        let Some(CatalogPayload::Records(items)) = catalog.items else {
            return Self::default();
        };
        Self {
            dialogues: TranslationIndex::new(items.dialogues),
            strings: TranslationIndex::new(items.strings),
        }
    }
}
