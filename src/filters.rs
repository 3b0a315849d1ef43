//! 文本过滤器
//!
//! 在没有真实译文时代替翻译，用来验证提取/生成流程是否能完整往返。
//! `{...}` 文本标签与 `[...]` 插值不会被改写，`{{` 和 `[[` 视为普通文字。

use regex::Regex;
use std::sync::LazyLock;

/// 文本过滤器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFilter {
    /// 原样输出
    #[default]
    Null,
    /// ROT13（自身即为逆变换）
    Rot13,
    /// Pig Latin（不可逆）
    PigLatin,
}

/// pig latin 中作为整体移动的辅音组合
const PIGLATIN_CLUSTERS: &[&str] = &[
    "sh", "gl", "ch", "ph", "tr", "br", "fr", "bl", "gr", "st", "sl", "cl", "pl", "fl",
];

impl TextFilter {
    /// 语言名同时也可以选择过滤器（`rot13`、`piglatin`）
    pub fn from_language(tag: &str) -> Option<Self> {
        match tag {
            "rot13" => Some(TextFilter::Rot13),
            "piglatin" => Some(TextFilter::PigLatin),
            _ => None,
        }
    }

    /// 按命令行开关选择过滤器，rot13 优先
    pub fn select(language: &str, rot13: bool, piglatin: bool) -> Self {
        match Self::from_language(language) {
            Some(filter) => filter,
            None if rot13 => TextFilter::Rot13,
            None if piglatin => TextFilter::PigLatin,
            None => TextFilter::Null,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            TextFilter::Null => text.to_string(),
            TextFilter::Rot13 => map_outside_markup(text, rot13),
            TextFilter::PigLatin => map_outside_markup(text, piglatin),
        }
    }
}

/// 只对标签/插值之外的文字应用 `transform`
fn map_outside_markup(text: &str, transform: fn(&str) -> String) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '{' || c == '[' {
            if chars.get(i + 1) == Some(&c) {
                plain.push(c);
                plain.push(c);
                i += 2;
                continue;
            }

            out.push_str(&transform(&plain));
            plain.clear();

            let close = if c == '{' { '}' } else { ']' };
            let end = chars[i..]
                .iter()
                .position(|&x| x == close)
                .map(|offset| i + offset + 1)
                .unwrap_or(chars.len());
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }
        plain.push(c);
        i += 1;
    }

    out.push_str(&transform(&plain));
    out
}

fn rot13(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='m' | 'A'..='M' => ((c as u8) + 13) as char,
            'n'..='z' | 'N'..='Z' => ((c as u8) - 13) as char,
            _ => c,
        })
        .collect()
}

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static regex"));

fn piglatin(text: &str) -> String {
    WORD_REGEX
        .replace_all(text, |caps: &regex::Captures| piglatin_word(&caps[0]))
        .into_owned()
}

fn piglatin_word(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = word.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };

    let moved = if lower.starts_with(&['a', 'e', 'i', 'o', 'u'][..]) {
        format!("{}ay", word)
    } else if PIGLATIN_CLUSTERS.iter().any(|cluster| lower.starts_with(cluster)) {
        // 辅音组合都是 ASCII，前两个字节即前两个字符
        format!("{}{}ay", &word[2..], &word[..2])
    } else {
        format!("{}{}ay", chars.as_str(), first)
    };

    if first.is_uppercase() {
        capitalize(&moved)
    } else {
        moved
    }
}

/// 首字母大写，其余小写
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str().to_lowercase();
    first.to_uppercase().chain(rest.chars()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_filter_is_identity() {
        for text in ["", "Hello, world!", "{b}bold{/b} [name]", "中文 text"] {
            assert_eq!(TextFilter::Null.apply(text), text);
        }
    }

    #[test]
    fn test_rot13_basic() {
        assert_eq!(TextFilter::Rot13.apply("Hello"), "Uryyb");
        assert_eq!(TextFilter::Rot13.apply("abc XYZ 123"), "nop KLM 123");
    }

    #[test]
    fn test_rot13_is_involution() {
        for text in ["Hello, world!", "{i}Hi{/i} [player] {{literal}}", "unclosed {tag", "Ünïcödé"] {
            let once = TextFilter::Rot13.apply(text);
            assert_eq!(TextFilter::Rot13.apply(&once), text);
        }
    }

    #[test]
    fn test_rot13_keeps_markup() {
        assert_eq!(
            TextFilter::Rot13.apply("Hi {color=#f00}[name]{/color}"),
            "Uv {color=#f00}[name]{/color}"
        );
        assert_eq!(TextFilter::Rot13.apply("[[abc"), "[[nop");
    }

    #[test]
    fn test_piglatin() {
        assert_eq!(TextFilter::PigLatin.apply("apple"), "appleay");
        assert_eq!(TextFilter::PigLatin.apply("string"), "ringstay");
        assert_eq!(TextFilter::PigLatin.apply("hello"), "ellohay");
        assert_eq!(TextFilter::PigLatin.apply("Hello world"), "Ellohay orldway");
        assert_eq!(TextFilter::PigLatin.apply("Hi [name]!"), "Ihay [name]!");
    }

    #[test]
    fn test_piglatin_across_markup_segments() {
        let filter = TextFilter::PigLatin;
        assert_eq!(
            filter.apply("Stay {b}here{/b}, friend."),
            "Aystay {b}erehay{/b}, iendfray."
        );
        assert_eq!(filter.apply("here"), "erehay");
    }

    #[test]
    fn test_select() {
        assert_eq!(TextFilter::select("rot13", false, false), TextFilter::Rot13);
        assert_eq!(TextFilter::select("piglatin", false, false), TextFilter::PigLatin);
        assert_eq!(TextFilter::select("french", true, false), TextFilter::Rot13);
        assert_eq!(TextFilter::select("french", false, true), TextFilter::PigLatin);
        assert_eq!(TextFilter::select("None", false, false), TextFilter::Null);
    }
}
