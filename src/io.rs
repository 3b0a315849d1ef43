/// IO 抽象层模块
///
/// 该模块提供目录文件读写的抽象接口，生成器与提取器只依赖 trait，
/// 便于测试时替换为内存实现。
///
/// # 架构设计
///
/// - **traits**: 定义 CatalogReader/CatalogWriter trait 接口
/// - **catalog_io**: 基于文件系统的默认实现
///
/// # 使用示例
///
/// ```rust,ignore
/// use rpy_tl_extractor::io::{CatalogReader, DefaultCatalogReader};
///
/// let reader = DefaultCatalogReader;
/// let catalog = reader.read(Path::new("fr.json"), "6f1c...")?;
/// ```
pub mod traits;
pub mod catalog_io;

// === 导出 trait 定义 ===
pub use traits::{CatalogReader, CatalogWriter};

// === 导出默认实现 ===
pub use catalog_io::{DefaultCatalogReader, DefaultCatalogWriter};
