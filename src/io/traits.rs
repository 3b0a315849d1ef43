//! IO 抽象层 - trait 定义
//!
//! 该模块定义了目录文件读写的抽象接口，支持依赖注入和测试 mock。

use std::path::Path;
use crate::catalog::Catalog;
use crate::utils::TlError;

/// 目录读取 trait
///
/// # 职责
/// - 读取并解析交换目录
/// - 校验 uuid，确认目录属于本次调用
pub trait CatalogReader {
    /// 读取目录
    ///
    /// # 参数
    /// * `path` - 目录文件路径
    /// * `expected_uuid` - 调用方期望的 uuid
    ///
    /// # 错误
    /// - `TlError::NotFound`: 文件不存在
    /// - `TlError::Parse`: 文档格式错误
    /// - `TlError::Integrity`: uuid 不匹配
    fn read(&self, path: &Path, expected_uuid: &str) -> Result<Catalog, TlError>;
}

/// 目录写入 trait
///
/// # 职责
/// - 将目录完整写入文件（覆盖，不与旧内容合并）
pub trait CatalogWriter {
    fn write(&self, catalog: &Catalog, path: &Path) -> Result<(), TlError>;
}
