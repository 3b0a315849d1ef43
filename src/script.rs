use crate::filters::TextFilter;
use crate::utils::encode_say_string;
use serde::{Deserialize, Serialize};

/// 可翻译单元（一个 translate 块）
///
/// 由外部解析器在加载脚本时创建，运行期间只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatableUnit {
    /// 翻译标识符（可能包含 `.`）
    pub identifier: String,
    /// 重命名/合并前的旧标识符
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,
    pub filename: String,
    pub linenumber: u32,
    pub statements: Vec<Statement>,
}

impl TranslatableUnit {
    /// 输出用标识符：`.` 替换为 `_`
    pub fn normalized_identifier(&self) -> String {
        normalize_identifier(&self.identifier)
    }

    /// 按顺序返回所有对话语句
    pub fn dialogues(&self) -> impl Iterator<Item = &DialogueStatement> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Dialogue(d) => Some(d),
            Statement::Opaque(_) => None,
        })
    }
}

pub fn normalize_identifier(identifier: &str) -> String {
    identifier.replace('.', "_")
}

/// 脚本语句
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    /// 对话（唯一携带自然语言文本的语句）
    Dialogue(DialogueStatement),
    /// 其它语句，原样输出
    Opaque(OpaqueStatement),
}

impl Statement {
    pub fn is_dialogue(&self) -> bool {
        matches!(self, Statement::Dialogue(_))
    }

    /// 序列化为脚本代码，过滤器只作用于对话文本
    pub fn get_code(&self, filter: TextFilter) -> String {
        match self {
            Statement::Dialogue(d) => d.get_code(filter),
            Statement::Opaque(o) => o.code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueStatement {
    #[serde(default)]
    pub who: Option<String>,
    pub what: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temporary_attributes: Vec<String>,
    #[serde(default = "default_interact")]
    pub interact: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
    #[serde(default, rename = "with", skip_serializing_if = "Option::is_none")]
    pub with_transition: Option<String>,
}

fn default_interact() -> bool {
    true
}

impl DialogueStatement {
    pub fn new(who: Option<&str>, what: &str) -> Self {
        DialogueStatement {
            who: who.map(str::to_string),
            what: what.to_string(),
            attributes: Vec::new(),
            temporary_attributes: Vec::new(),
            interact: true,
            arguments: None,
            with_transition: None,
        }
    }

    /// 替换文本后的副本
    pub fn with_text(&self, what: &str) -> Self {
        DialogueStatement {
            what: what.to_string(),
            ..self.clone()
        }
    }

    pub fn get_code(&self, filter: TextFilter) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(who) = &self.who {
            parts.push(who.clone());
        }
        parts.extend(self.attributes.iter().cloned());
        if !self.temporary_attributes.is_empty() {
            parts.push("@".to_string());
            parts.extend(self.temporary_attributes.iter().cloned());
        }

        parts.push(encode_say_string(&filter.apply(&self.what)));

        if !self.interact {
            parts.push("nointeract".to_string());
        }
        if let Some(arguments) = &self.arguments {
            parts.push(arguments.clone());
        }
        if let Some(with) = &self.with_transition {
            parts.push("with".to_string());
            parts.push(with.clone());
        }

        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueStatement {
    /// 宿主的语句类型名（如 `Show`、`Python`）
    pub kind: String,
    pub code: String,
}

/// 扫描出的候选字符串
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringEntry {
    pub text: String,
    /// 源文件（已省略基目录）
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub common: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_identifier() {
        let unit = TranslatableUnit {
            identifier: "lbl.1a".to_string(),
            alternate: None,
            filename: "game/script.rpy".to_string(),
            linenumber: 3,
            statements: vec![],
        };
        assert_eq!(unit.normalized_identifier(), "lbl_1a");
    }

    #[test]
    fn test_dialogue_code() {
        let say = DialogueStatement::new(Some("e"), "Hello");
        assert_eq!(say.get_code(TextFilter::Null), "e \"Hello\"");
        assert_eq!(say.get_code(TextFilter::Rot13), "e \"Uryyb\"");

        let narration = DialogueStatement::new(None, "It rains.");
        assert_eq!(narration.get_code(TextFilter::Null), "\"It rains.\"");
    }

    #[test]
    fn test_dialogue_code_full() {
        let say = DialogueStatement {
            who: Some("e".to_string()),
            what: "Hi".to_string(),
            attributes: vec!["happy".to_string()],
            temporary_attributes: vec!["wink".to_string()],
            interact: false,
            arguments: Some("(pause=1)".to_string()),
            with_transition: Some("dissolve".to_string()),
        };
        assert_eq!(
            say.get_code(TextFilter::Null),
            "e happy @ wink \"Hi\" nointeract (pause=1) with dissolve"
        );
    }

    #[test]
    fn test_opaque_code_ignores_filter() {
        let stmt = Statement::Opaque(OpaqueStatement {
            kind: "Show".to_string(),
            code: "show eileen happy".to_string(),
        });
        assert_eq!(stmt.get_code(TextFilter::Rot13), "show eileen happy");
        assert!(!stmt.is_dialogue());
    }

    #[test]
    fn test_statement_json_shape() {
        let json = r#"[
            {"type": "dialogue", "who": "e", "what": "Hi"},
            {"type": "opaque", "kind": "Show", "code": "show e"}
        ]"#;
        let statements: Vec<Statement> = serde_json::from_str(json).unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].is_dialogue());
        match &statements[0] {
            Statement::Dialogue(d) => assert!(d.interact),
            Statement::Opaque(_) => panic!("expected dialogue"),
        }
    }
}
