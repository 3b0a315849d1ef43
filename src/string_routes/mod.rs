//! 字符串路由模块
//!
//! 负责决定每条扫描出的字符串写入哪个翻译文件

mod router;

pub use router::{group_by_target, neutral_target, DefaultStringRouter, StringRouter};
