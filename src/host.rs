/// 宿主（脚本运行时）协作者
///
/// 提取/生成引擎只通过这里的 trait 访问脚本语料：
/// 翻译单元、源码中已有的译文、字符串扫描和字符串路由。
///
/// # 架构设计
///
/// - **traits**: 协作者 trait 定义
/// - **layout**: 项目目录配置（game/common/tl 目录）
/// - **snapshot**: 从 JSON 语料快照加载的默认实现
pub mod traits;
pub mod layout;
pub mod snapshot;

pub use traits::{ScriptHost, SourceTranslations, StringScanner, TranslateCorpus};
pub use layout::ProjectLayout;
pub use snapshot::ScriptSnapshot;
