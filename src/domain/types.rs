// ==========================================
// 钢构件清单合并系统 - 领域类型定义
// ==========================================
// 职责: 材料族处理方式等枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 材料族处理方式 (Processor Kind)
// ==========================================
// 序列化格式: snake_case (与配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorKind {
    #[default]
    Generic,    // 通用汇总
    FlatBar,    // 扁钢（规格推算长度）
    Pedestal,   // 底座
    AngleSteel, // 角钢（带P/不带P并列）
    SteelPipe,  // 钢管（拆分直径与长度）
}

impl fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorKind::Generic => write!(f, "generic"),
            ProcessorKind::FlatBar => write!(f, "flat_bar"),
            ProcessorKind::Pedestal => write!(f, "pedestal"),
            ProcessorKind::AngleSteel => write!(f, "angle_steel"),
            ProcessorKind::SteelPipe => write!(f, "steel_pipe"),
        }
    }
}

// ==========================================
// PartRow - 分类后投影的行（规格 + 数量）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PartRow {
    pub spec: String,
    pub quantity: Option<f64>,
}

impl PartRow {
    pub fn new(spec: impl Into<String>, quantity: Option<f64>) -> Self {
        Self {
            spec: spec.into(),
            quantity,
        }
    }
}

// ==========================================
// AggregatedRow - 按规格汇总后的行
// ==========================================
// 不变量: 同一汇总结果内 spec 唯一
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub spec: String,
    pub quantity: Option<f64>,
}
