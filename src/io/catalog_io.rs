//! 目录文件 IO 实现
//!
//! 提供基于文件系统的默认目录读写实现

use std::path::Path;
use serde_json::Value;
use super::traits::{CatalogReader, CatalogWriter};
use crate::catalog::Catalog;
use crate::datatypes::RawText;
use crate::utils::TlError;

/// 默认的目录读取器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultCatalogReader;

impl CatalogReader for DefaultCatalogReader {
    fn read(&self, path: &Path, expected_uuid: &str) -> Result<Catalog, TlError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TlError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        // 译者的编辑器可能带 BOM 或另存为 UTF-16
        let text = RawText::decode(&bytes);
        let value: Value = serde_json::from_str(&text.content)
            .map_err(|e| TlError::parse(path, e))?;

        // 先校验 uuid，再解析其余字段
        let actual = value
            .get("uuid")
            .and_then(Value::as_str)
            .ok_or_else(|| TlError::parse(path, "missing string field `uuid`"))?;
        if actual != expected_uuid {
            return Err(TlError::Integrity {
                expected: expected_uuid.to_string(),
                actual: actual.to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| TlError::parse(path, e))
    }
}

/// 默认的目录写入器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultCatalogWriter;

impl CatalogWriter for DefaultCatalogWriter {
    fn write(&self, catalog: &Catalog, path: &Path) -> Result<(), TlError> {
        // 确保父目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(catalog)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItems, CatalogPayload, GameInfo};
    use tempfile::TempDir;

    fn sample_catalog(uuid: &str) -> Catalog {
        Catalog::compose(
            uuid,
            GameInfo {
                game_name: "Demo".to_string(),
                game_version: "1.0".to_string(),
                runtime_version: "8.1.3".to_string(),
            },
            "Namespace(language='fr')".to_string(),
            Some(CatalogPayload::Records(CatalogItems::default())),
            Some("fr: 0 dialogue translations and 0 string translations found".to_string()),
            true,
        )
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("fr.json");

        let catalog = sample_catalog("uuid-1");
        DefaultCatalogWriter.write(&catalog, &path).unwrap();

        let loaded = DefaultCatalogReader.read(&path, "uuid-1").unwrap();
        assert_eq!(loaded.game_info.runtime_version, "8.1.3");
        assert_eq!(loaded.ok, Some(true));
        assert!(loaded.records().unwrap().is_empty());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"renpy_version\": \"8.1.3\""));
    }

    #[test]
    fn test_uuid_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        DefaultCatalogWriter.write(&sample_catalog("Y"), &path).unwrap();

        match DefaultCatalogReader.read(&path, "X") {
            Err(TlError::Integrity { expected, actual }) => {
                assert_eq!(expected, "X");
                assert_eq!(actual, "Y");
            }
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = DefaultCatalogReader.read(&temp_dir.path().join("nope.json"), "X");
        assert!(matches!(result, Err(TlError::NotFound(_))));
    }

    #[test]
    fn test_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(DefaultCatalogReader.read(&path, "X"), Err(TlError::Parse { .. })));

        std::fs::write(&path, r#"{"items": {}}"#).unwrap();
        assert!(matches!(DefaultCatalogReader.read(&path, "X"), Err(TlError::Parse { .. })));
    }

    #[test]
    fn test_read_with_bom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.json");

        let mut data = vec![0xEF, 0xBB, 0xBF];
        data.extend_from_slice(r#"{"uuid": "X", "items": {"dialogues": [], "strings": []}}"#.as_bytes());
        std::fs::write(&path, data).unwrap();

        let catalog = DefaultCatalogReader.read(&path, "X").unwrap();
        assert_eq!(catalog.uuid, "X");
        assert!(catalog.records().is_some());
    }
}
