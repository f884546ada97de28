// ==========================================
// 钢构件清单合并系统 - 合并配置
// ==========================================
// 职责: 列名 / 标记字符串 / 工作表名 / 表面处理 / 材料族前缀表
// 默认值: 与现场使用的清单模板一致
// ==========================================

use crate::domain::types::ProcessorKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Excel 工作表名最大长度（字符数）
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Excel 工作表名禁用字符
const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// ColumnNames - 列名配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// 规格
    pub spec: String,
    /// 数量
    pub quantity: String,
    /// 表面处理
    pub treatment: String,
    /// 是否带腹板
    pub has_web: String,
    /// 长度（扁钢/钢管输出）
    pub length: String,
    /// 角钢带P规格列
    pub spec_with_marker: String,
    /// 角钢带P数量列
    pub quantity_with_marker: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            spec: "规格".to_string(),
            quantity: "数量".to_string(),
            treatment: "表面处理".to_string(),
            has_web: "是否带腹板".to_string(),
            length: "长度".to_string(),
            spec_with_marker: "带P规格".to_string(),
            quantity_with_marker: "带P数量".to_string(),
        }
    }
}

// ==========================================
// MarkerConfig - 标记字符串配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// 非标底座标记（规格包含即归入非标总）
    pub non_standard: String,
    /// 是否带腹板的"是"取值
    pub web_yes_values: Vec<String>,
    /// 带腹板时需要追加标记的规格前缀
    pub web_prefixes: Vec<String>,
    /// 追加的腹板标记字母（以单个空格分隔）
    pub web_suffix: String,
    /// 钢管直径标记
    pub diameter_marker: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            non_standard: "非标底座".to_string(),
            web_yes_values: vec!["是".to_string()],
            web_prefixes: vec!["LDK".to_string(), "L4".to_string(), "L5".to_string()],
            web_suffix: "P".to_string(),
            diameter_marker: "Ф".to_string(),
        }
    }
}

// ==========================================
// SheetNames - 固定工作表名
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub total: String,
    pub non_standard_total: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            total: "总".to_string(),
            non_standard_total: "非标总".to_string(),
        }
    }
}

// ==========================================
// TreatmentConfig - 表面处理
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentConfig {
    /// 表面处理代码（Y=刷漆, G=镀锌）
    pub code: String,

    /// 该处理方式总表的工作表名
    pub total_sheet: String,

    /// 材料族工作表后缀（缺省为 code）
    #[serde(default)]
    pub sheet_suffix: Option<String>,
}

impl TreatmentConfig {
    pub fn new(code: &str, total_sheet: &str) -> Self {
        Self {
            code: code.to_string(),
            total_sheet: total_sheet.to_string(),
            sheet_suffix: None,
        }
    }

    pub fn suffix(&self) -> &str {
        self.sheet_suffix.as_deref().unwrap_or(&self.code)
    }

    /// 材料族工作表名: <材料族><后缀>
    pub fn family_sheet_name(&self, family: &str) -> String {
        format!("{}{}", family, self.suffix())
    }
}

// ==========================================
// FamilyConfig - 材料族（前缀表的一项）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyConfig {
    pub name: String,
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub processor: ProcessorKind,
}

impl FamilyConfig {
    pub fn new(name: &str, prefixes: &[&str], processor: ProcessorKind) -> Self {
        Self {
            name: name.to_string(),
            prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            processor,
        }
    }

    /// 规格是否以任一前缀开头（区分大小写）
    pub fn matches(&self, spec: &str) -> bool {
        self.prefixes.iter().any(|p| spec.starts_with(p.as_str()))
    }
}

/// 默认材料族前缀表
pub fn default_families() -> Vec<FamilyConfig> {
    vec![
        FamilyConfig::new("扁钢", &["FB"], ProcessorKind::FlatBar),
        FamilyConfig::new("角钢", &["L"], ProcessorKind::AngleSteel),
        FamilyConfig::new("钢管", &["GG", "Ф"], ProcessorKind::SteelPipe),
        FamilyConfig::new("底座", &["DZ"], ProcessorKind::Pedestal),
        FamilyConfig::new("槽钢", &["[", "C"], ProcessorKind::Generic),
    ]
}

// ==========================================
// MergeConfig - 一次合并所需的全部配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub columns: ColumnNames,
    pub markers: MarkerConfig,
    pub sheets: SheetNames,
    pub treatments: Vec<TreatmentConfig>,
    pub families: Vec<FamilyConfig>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            markers: MarkerConfig::default(),
            sheets: SheetNames::default(),
            treatments: vec![
                TreatmentConfig::new("Y", "刷漆Y总"),
                TreatmentConfig::new("G", "镀锌G总"),
            ],
            families: default_families(),
        }
    }
}

impl MergeConfig {
    /// 校验配置
    ///
    /// # 规则
    /// - 必需列名非空
    /// - 材料族名称非空且唯一，前缀集合非空且不含空白前缀
    /// - 表面处理代码非空且唯一
    /// - 由配置生成的工作表名符合 Excel 规则（非空、不超过 31 字符、无禁用字符）
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("columns.spec", &self.columns.spec),
            ("columns.quantity", &self.columns.quantity),
            ("columns.treatment", &self.columns.treatment),
            ("columns.has_web", &self.columns.has_web),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(key, "列名不能为空"));
            }
        }

        let mut family_names = HashSet::new();
        for family in &self.families {
            if family.name.trim().is_empty() {
                return Err(invalid("families.name", "材料族名称不能为空"));
            }
            if !family_names.insert(family.name.as_str()) {
                return Err(invalid(
                    "families.name",
                    &format!("材料族名称重复: {}", family.name),
                ));
            }
            if family.prefixes.is_empty() {
                return Err(invalid(
                    "families.prefixes",
                    &format!("材料族 {} 未配置前缀", family.name),
                ));
            }
            if family.prefixes.iter().any(|p| p.trim().is_empty()) {
                return Err(invalid(
                    "families.prefixes",
                    &format!("材料族 {} 含空白前缀", family.name),
                ));
            }
        }

        let mut codes = HashSet::new();
        for treatment in &self.treatments {
            if treatment.code.is_empty() {
                return Err(invalid("treatments.code", "表面处理代码不能为空"));
            }
            if !codes.insert(treatment.code.as_str()) {
                return Err(invalid(
                    "treatments.code",
                    &format!("表面处理代码重复: {}", treatment.code),
                ));
            }
        }

        check_sheet_name("sheets.total", &self.sheets.total)?;
        check_sheet_name("sheets.non_standard_total", &self.sheets.non_standard_total)?;
        for treatment in &self.treatments {
            check_sheet_name("treatments.total_sheet", &treatment.total_sheet)?;
            for family in &self.families {
                check_sheet_name(
                    "treatments.sheet_suffix",
                    &treatment.family_sheet_name(&family.name),
                )?;
            }
        }

        Ok(())
    }
}

/// 校验单个工作表名
fn check_sheet_name(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(invalid(key, "工作表名不能为空"));
    }
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return Err(invalid(
            key,
            &format!("工作表名超过 {} 个字符: {}", MAX_SHEET_NAME_CHARS, name),
        ));
    }
    if name.contains(INVALID_SHEET_NAME_CHARS) {
        return Err(invalid(key, &format!("工作表名含非法字符: {}", name)));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(invalid(key, &format!("工作表名不能以单引号开头或结尾: {}", name)));
    }
    Ok(())
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
