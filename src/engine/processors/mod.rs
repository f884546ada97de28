// ==========================================
// 钢构件清单合并系统 - 材料族处理器
// ==========================================
// 职责: 将某一材料族的 (规格, 数量) 行汇总为输出表
// 公共约定: 规格唯一、数量求和（跳过空值）、按规格升序
// ==========================================

pub mod angle_steel;
pub mod flat_bar;
pub mod generic;
pub mod pedestal;
pub mod steel_pipe;

use crate::config::{ColumnNames, MarkerConfig};
use crate::domain::table::Table;
use crate::domain::types::{PartRow, ProcessorKind};

pub use angle_steel::AngleSteelProcessor;
pub use flat_bar::FlatBarProcessor;
pub use generic::{aggregate, GenericAggregator};
pub use pedestal::PedestalProcessor;
pub use steel_pipe::SteelPipeProcessor;

// ==========================================
// FamilyProcessor Trait
// ==========================================
// 实现者: GenericAggregator, FlatBarProcessor, PedestalProcessor,
//         AngleSteelProcessor, SteelPipeProcessor
pub trait FamilyProcessor {
    /// 汇总一个材料族
    ///
    /// # 参数
    /// - rows: 分类器投影出的行（规格 + 数量）
    ///
    /// # 返回
    /// - 输出表；对畸形规格不报错，按约定取默认值
    fn process(&self, rows: &[PartRow]) -> Table;
}

/// 按处理方式选择处理器
pub fn processor_for<'a>(
    kind: ProcessorKind,
    columns: &'a ColumnNames,
    markers: &'a MarkerConfig,
) -> Box<dyn FamilyProcessor + 'a> {
    match kind {
        ProcessorKind::Generic => Box::new(GenericAggregator::new(columns)),
        ProcessorKind::FlatBar => Box::new(FlatBarProcessor::new(columns)),
        ProcessorKind::Pedestal => Box::new(PedestalProcessor::new(columns)),
        ProcessorKind::AngleSteel => Box::new(AngleSteelProcessor::new(columns, markers)),
        ProcessorKind::SteelPipe => Box::new(SteelPipeProcessor::new(columns, markers)),
    }
}
