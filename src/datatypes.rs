use crate::filters::TextFilter;
use std::fmt;

// 支持的编码（按优先级尝试）
const SUPPORTED_ENCODINGS: &[&str] = &["utf-8", "gbk", "shift_jis"];

#[derive(Debug, Clone)]
pub struct RawText {
    pub content: String,
    pub encoding: String,
}

impl RawText {
    /// 解码文档字节
    ///
    /// 优先按 BOM 判断（UTF-8/UTF-16），否则尝试多种编码
    pub fn decode(data: &[u8]) -> Self {
        if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(data) {
            let (decoded, had_errors) = encoding.decode_without_bom_handling(&data[bom_len..]);
            if !had_errors {
                return RawText {
                    content: decoded.into_owned(),
                    encoding: encoding.name().to_lowercase(),
                };
            }
        }

        for encoding_name in SUPPORTED_ENCODINGS {
            if let Some(encoding) = encoding_rs::Encoding::for_label(encoding_name.as_bytes()) {
                let (decoded, had_errors) = encoding.decode_without_bom_handling(data);
                if !had_errors {
                    return RawText {
                        content: decoded.into_owned(),
                        encoding: encoding_name.to_string(),
                    };
                }
            }
        }

        // 回退到UTF-8，忽略错误
        RawText {
            content: String::from_utf8_lossy(data).into_owned(),
            encoding: "utf-8".to_string(),
        }
    }
}

/// 目标语言
///
/// 命令行中的字面量 `"None"` 表示中性（公共）语言池，
/// 在目录中序列化为 `null`，在生成的文件头中仍写作 `None`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(Option<String>);

pub const NEUTRAL_LANGUAGE_TAG: &str = "None";

impl Language {
    pub fn parse(tag: &str) -> Self {
        if tag == NEUTRAL_LANGUAGE_TAG {
            Language(None)
        } else {
            Language(Some(tag.to_string()))
        }
    }

    pub fn neutral() -> Self {
        Language(None)
    }

    /// 查找用的键（中性语言为 None）
    pub fn key(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// 目录路径与文件头中使用的标签
    pub fn tag(&self) -> &str {
        self.0.as_deref().unwrap_or(NEUTRAL_LANGUAGE_TAG)
    }

    pub fn is_neutral(&self) -> bool {
        self.0.is_none()
    }

    pub fn to_record_language(&self) -> Option<String> {
        self.0.clone()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// 扫描/生成范围标志位
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScanFlags: u8 {
        const SAY_ONLY = 0x01;         // 对话只处理 Say 语句
        const TRANSLATED_ONLY = 0x02;  // 只处理已有译文的条目
        const STRINGS_ONLY = 0x04;     // 跳过对话，只处理字符串
        const COMMON_ONLY = 0x08;      // 只扫描公共代码中的字符串
    }
}

/// 提取与生成共用的参数
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub filter: TextFilter,
    pub min_priority: i32,
    pub max_priority: i32,
    pub flags: ScanFlags,
}

impl ScanOptions {
    pub fn new(filter: TextFilter, min_priority: i32, max_priority: i32) -> Self {
        Self {
            filter,
            min_priority,
            max_priority,
            flags: ScanFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: ScanFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn say_only(&self) -> bool {
        self.flags.contains(ScanFlags::SAY_ONLY)
    }

    pub fn translated_only(&self) -> bool {
        self.flags.contains(ScanFlags::TRANSLATED_ONLY)
    }

    pub fn strings_only(&self) -> bool {
        self.flags.contains(ScanFlags::STRINGS_ONLY)
    }

    pub fn common_only(&self) -> bool {
        self.flags.contains(ScanFlags::COMMON_ONLY)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(TextFilter::Null, 0, 299)
    }
}
