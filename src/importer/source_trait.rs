// ==========================================
// 钢构件清单合并系统 - 数据源读取 Trait
// ==========================================
// 职责: 定义"读取一个源文件的全部工作表"接口（不包含实现）
// ==========================================

use crate::domain::table::Table;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// TableSource Trait
// ==========================================
// 用途: 读取源文件中的所有工作表
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait TableSource: Send + Sync {
    /// 读取文件中的全部工作表
    ///
    /// # 参数
    /// - file_path: 源文件路径
    ///
    /// # 返回
    /// - Ok(Vec<(工作表名, Table)>): 按文件内顺序排列，列顺序与文件一致
    /// - Err: 文件不存在、格式不支持、解析失败
    fn read_tables(&self, file_path: &Path) -> ImportResult<Vec<(String, Table)>>;
}
