// ==========================================
// 钢构件清单合并系统 - 配置层
// ==========================================
// 职责: 列名、标记、工作表名、材料族前缀表的加载与校验
// 存储: JSON 文件（可选），缺省使用内置默认值
// ==========================================

pub mod config_manager;
pub mod merge_config;

// 重导出核心配置类型
pub use config_manager::{ConfigManager, CONFIG_ENV_VAR};
pub use merge_config::{
    default_families, ColumnNames, ConfigError, FamilyConfig, MarkerConfig, MergeConfig,
    SheetNames, TreatmentConfig,
};
