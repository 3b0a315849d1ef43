//! 提取 -> 编辑 -> 生成 完整流程测试
//!
//! 测试场景：
//! - 从语料快照导出目录
//! - 模拟译者填写 new_code
//! - 用编辑后的目录生成翻译文件，检查内容与统计

use rpy_tl_extractor::io::{CatalogReader, CatalogWriter, DefaultCatalogReader, DefaultCatalogWriter};
use rpy_tl_extractor::registry::GENERATED_BANNER;
use rpy_tl_extractor::{run, CatalogPayload, Language, Mode, RunOptions, ScanFlags, ScanOptions, ScriptSnapshot, TextFilter, TlError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "game_info": {"game_name": "Demo", "game_version": "1.0", "renpy_version": "8.1.3"},
    "files": [
        {"filename": "game/script.rpy", "units": [
            {"identifier": "start.a170b500", "filename": "game/script.rpy", "linenumber": 12,
             "statements": [
                {"type": "opaque", "kind": "Show", "code": "show eileen happy"},
                {"type": "dialogue", "who": "e", "what": "Welcome to the demo!"}
             ]},
            {"identifier": "start.3c7a1b2e", "alternate": "start_legacy", "filename": "game/script.rpy", "linenumber": 15,
             "statements": [{"type": "dialogue", "who": null, "what": "It is \"raining\" today."}]},
            {"identifier": "start.ffffffff", "filename": "game/script.rpy", "linenumber": 18,
             "statements": [{"type": "dialogue", "who": "e", "what": "Already translated."}]}
        ]}
    ],
    "translations": [
        {"identifier": "start.ffffffff", "language": "french",
         "statements": [{"type": "dialogue", "who": "e", "what": "Déjà traduit."}]}
    ],
    "string_translations": {"french": {"Quit": "Quitter"}},
    "strings": [
        {"text": "Start", "filename": "game/screens.rpy", "line": 40, "priority": 100, "common": false},
        {"text": "Quit", "filename": "game/screens.rpy", "line": 41, "priority": 100, "common": false},
        {"text": "Back", "filename": "renpy/common/00gui.rpy", "line": 7, "priority": 400, "common": true}
    ]
}"#;

fn setup() -> (TempDir, ScriptSnapshot) {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("snapshot.json");
    std::fs::write(&snapshot_path, SNAPSHOT).unwrap();

    let host = ScriptSnapshot::load(&snapshot_path).unwrap().with_base_dir(temp_dir.path());
    (temp_dir, host)
}

fn options(catalog: &Path, mode: Mode, scan: ScanOptions) -> RunOptions {
    RunOptions {
        catalog_path: catalog.to_path_buf(),
        uuid: "6f1c2d9e".to_string(),
        language: Language::parse("french"),
        mode,
        test_only: false,
        scan,
    }
}

/// 模拟译者：给每条对话与字符串填上译文
fn translate_catalog(path: &Path) {
    let mut catalog = DefaultCatalogReader.read(path, "6f1c2d9e").unwrap();
    let Some(CatalogPayload::Records(items)) = catalog.items.as_mut() else {
        panic!("extracted catalog should carry records");
    };

    for record in &mut items.dialogues {
        for item in &mut record.block {
            if item.kind.is_dialogue() {
                item.new_code = item.what.as_ref().map(|w| format!("[fr] {}", w));
            }
        }
    }
    for record in &mut items.strings {
        if record.identifier == "Start" {
            record.block[0].new_code = Some("Commencer".to_string());
        }
    }

    DefaultCatalogWriter.write(&catalog, path).unwrap();
}

fn tl_file(base: &Path, name: &str) -> PathBuf {
    base.join("game").join("tl").join("french").join(name)
}

#[test]
fn test_extract_edit_generate() {
    let (temp_dir, host) = setup();
    let catalog_path = temp_dir.path().join("catalog.json");

    let outcome = run(&host, &options(&catalog_path, Mode::Extract, ScanOptions::default())).unwrap();
    assert_eq!(
        outcome.message.as_deref(),
        Some("french: 3 dialogue translations and 2 string translations found")
    );

    translate_catalog(&catalog_path);

    let outcome = run(&host, &options(&catalog_path, Mode::Generate, ScanOptions::default())).unwrap();
    assert_eq!(
        outcome.message.as_deref(),
        Some("french: dialogue translation: using 2 and missing 0, string translation: using 1 and missing 0")
    );
    assert_eq!(
        outcome.written_files,
        vec![tl_file(temp_dir.path(), "script.rpy"), tl_file(temp_dir.path(), "screens.rpy")]
    );

    let script = std::fs::read_to_string(tl_file(temp_dir.path(), "script.rpy")).unwrap();
    assert!(script.contains(
        "# game/script.rpy:12\ntranslate french start_a170b500:\n\n    # show eileen happy\n    # e \"Welcome to the demo!\"\n    show eileen happy\n    e \"[fr] Welcome to the demo!\"\n\n"
    ));
    assert!(script.contains("    \"[fr] It is \\\"raining\\\" today.\""));
    // 源码中已翻译的单元不会重新生成
    assert!(!script.contains("start_ffffffff"));
    assert_eq!(script.matches(GENERATED_BANNER).count(), 1);

    let screens = std::fs::read_to_string(tl_file(temp_dir.path(), "screens.rpy")).unwrap();
    assert!(screens.contains("    old \"Start\"\n    new \"Commencer\"\n"));
    assert!(!screens.contains("old \"Quit\""));

    let catalog = DefaultCatalogReader.read(&catalog_path, "6f1c2d9e").unwrap();
    match catalog.items {
        Some(CatalogPayload::WrittenFiles(files)) => assert_eq!(files.len(), 2),
        other => panic!("expected written files, got {:?}", other),
    }
}

#[test]
fn test_generate_with_legacy_identifier() {
    let (temp_dir, host) = setup();
    let catalog_path = temp_dir.path().join("catalog.json");

    // 译者提供的是重命名前的标识符
    let catalog = serde_json::json!({
        "uuid": "6f1c2d9e",
        "items": {
            "dialogues": [{
                "identifier": "start_legacy",
                "language": "french",
                "filename": "game/script.rpy",
                "linenumber": 15,
                "block": [{"type": "Say", "what": "It is \"raining\" today.", "who": null,
                           "code": null, "new_code": "Il pleut."}]
            }],
            "strings": []
        }
    });
    std::fs::write(&catalog_path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

    let scan = ScanOptions::default().with_flags(ScanFlags::TRANSLATED_ONLY);
    let outcome = run(&host, &options(&catalog_path, Mode::Generate, scan)).unwrap();
    assert_eq!(
        outcome.message.as_deref(),
        Some("french: dialogue translation: using 1 and missing 1, string translation: using 0 and missing 1")
    );

    let script = std::fs::read_to_string(tl_file(temp_dir.path(), "script.rpy")).unwrap();
    assert!(script.contains("translate french start_legacy:"));
    assert!(script.contains("    \"Il pleut.\""));
    assert!(!script.contains("start_a170b500"));
}

#[test]
fn test_rot13_round_trip() {
    let (temp_dir, host) = setup();
    let catalog_path = temp_dir.path().join("catalog.json");

    let scan = ScanOptions::new(TextFilter::Rot13, 0, 299).with_flags(ScanFlags::STRINGS_ONLY);
    run(&host, &options(&catalog_path, Mode::Extract, scan)).unwrap();

    let catalog = DefaultCatalogReader.read(&catalog_path, "6f1c2d9e").unwrap();
    let items = catalog.records().unwrap();
    assert!(items.dialogues.is_empty());

    let start = items.strings.iter().find(|r| r.identifier == "Start").unwrap();
    let obfuscated = start.block[0].what.as_deref().unwrap();
    assert_eq!(obfuscated, "Fgneg");
    assert_eq!(TextFilter::Rot13.apply(obfuscated), "Start");
}

#[test]
fn test_uuid_mismatch_aborts_generation() {
    let (temp_dir, host) = setup();
    let catalog_path = temp_dir.path().join("catalog.json");
    run(&host, &options(&catalog_path, Mode::Extract, ScanOptions::default())).unwrap();
    let before = std::fs::read_to_string(&catalog_path).unwrap();

    let mut opts = options(&catalog_path, Mode::Generate, ScanOptions::default());
    opts.uuid = "another-run".to_string();
    let result = run(&host, &opts);

    assert!(matches!(result, Err(TlError::Integrity { .. })));
    assert!(!temp_dir.path().join("game").exists());
    assert_eq!(std::fs::read_to_string(&catalog_path).unwrap(), before);
}

#[test]
fn test_count_and_common_strings() {
    let (temp_dir, host) = setup();
    let catalog_path = temp_dir.path().join("count.json");

    let scan = ScanOptions::new(TextFilter::Null, 0, 499).with_flags(ScanFlags::COMMON_ONLY);
    let outcome = run(&host, &options(&catalog_path, Mode::Count, scan)).unwrap();
    assert_eq!(
        outcome.message.as_deref(),
        Some("french: 2 missing dialogue translations, 1 missing string translations.")
    );

    let catalog = DefaultCatalogReader.read(&catalog_path, "6f1c2d9e").unwrap();
    let items = catalog.records().unwrap();
    assert_eq!(items.strings[0].identifier, "Back");
    assert_eq!(items.strings[0].filename, "renpy/common/00gui.rpy");
}
