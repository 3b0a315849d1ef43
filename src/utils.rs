use thiserror::Error;
use std::path::PathBuf;

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum TlError {
    #[error("Catalog uuid mismatch: expected {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Malformed document {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TlError {
    /// 构造解析错误
    pub fn parse(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        TlError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// 转义字符串，用于 `old "..."` / `new "..."` 行
///
/// 转义反斜杠、双引号以及 `\a \b \f \n \r \t \v` 控制字符。
pub fn quote_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            _ => out.push(c),
        }
    }
    out
}

/// `quote_text` 的逆操作
///
/// 未知的转义序列按宿主语法保留为转义字符本身（`\x` -> `x`）。
pub fn unquote_text(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\x0b'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// 将对话文本编码为带引号的 Say 字符串
///
/// 连续空格中除第一个外都转义为 `\ `，否则宿主解析器会把它们折叠。
pub fn encode_say_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut prev_space = false;
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            ' ' if prev_space => out.push_str("\\ "),
            _ => out.push(c),
        }
        prev_space = c == ' ';
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_text() {
        assert_eq!(quote_text("plain"), "plain");
        assert_eq!(quote_text(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(quote_text("a\\b"), "a\\\\b");
        assert_eq!(quote_text("line1\nline2\ttab"), "line1\\nline2\\ttab");
    }

    #[test]
    fn test_quote_reparses_to_original() {
        let samples = [
            r#"He said "no""#,
            "C:\\Games\\save",
            "trailing backslash \\",
            "\"\\\"",
            "mixed \\\" and \n newline",
            "中文「引号」",
        ];
        for text in samples {
            assert_eq!(unquote_text(&quote_text(text)), text, "round trip of {:?}", text);
        }
    }

    #[test]
    fn test_encode_say_string() {
        assert_eq!(encode_say_string("Hi"), "\"Hi\"");
        assert_eq!(encode_say_string("a \"b\""), "\"a \\\"b\\\"\"");
        assert_eq!(encode_say_string("two  spaces"), "\"two \\ spaces\"");
        assert_eq!(encode_say_string("three   x"), "\"three \\ \\ x\"");
        assert_eq!(encode_say_string("nl\nx"), "\"nl\\nx\"");
    }
}
