// ==========================================
// 钢构件清单合并系统 - 配置管理器
// ==========================================
// 职责: 配置加载（显式路径 → 环境变量 → 用户配置目录 → 内置默认）
// 存储: JSON 文件
// ==========================================

use crate::config::merge_config::{ConfigError, MergeConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "STEEL_MERGE_CONFIG";

/// 用户配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "steel-merge";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: MergeConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: MergeConfig::default(),
            source: None,
        }
    }

    /// 从指定 JSON 文件加载
    ///
    /// # 返回
    /// - Ok(ConfigManager): 加载并校验成功
    /// - Err(ConfigError): 读取失败 / 格式错误 / 值非法
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: MergeConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path.display(), families = config.families.len(), "已加载合并配置");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按优先级解析配置
    ///
    /// # 顺序
    /// 1. explicit（命令行 --config）
    /// 2. 环境变量 STEEL_MERGE_CONFIG
    /// 3. <用户配置目录>/steel-merge/config.json（存在时）
    /// 4. 内置默认
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(value) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Self::from_file(Path::new(trimmed));
            }
        }

        if let Some(path) = Self::default_config_path() {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        debug!("未找到配置文件，使用内置默认配置");
        Ok(Self::with_defaults())
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn into_config(self) -> MergeConfig {
        self.config
    }

    /// 配置来源（None 表示内置默认）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 当前配置的 JSON 快照
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::InvalidValue {
            key: "*".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{ "families": [ {{ "name": "扁钢", "prefixes": ["FB"], "processor": "flat_bar" }} ] }}"#
        )
        .unwrap();

        let manager = ConfigManager::from_file(temp_file.path()).unwrap();
        assert_eq!(manager.config().families.len(), 1);
        assert_eq!(manager.source(), Some(temp_file.path()));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();

        let result = ConfigManager::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{ "families": [ {{ "name": "", "prefixes": ["FB"] }} ] }}"#).unwrap();

        let result = ConfigManager::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ConfigManager::from_file(Path::new("non_existent_config.json"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_json_snapshot_round_trips() {
        let manager = ConfigManager::with_defaults();
        let json = manager.to_json_pretty().unwrap();
        let parsed: MergeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, manager.config());
    }
}
