//! # 数据模型模块
//!
//! 定义分子几何、计算配置与 cube 文件头的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`engine/` 和 `commands/` 使用
//! - 子模块: geometry, calculation, cube

pub mod calculation;
pub mod cube;
pub mod geometry;

pub use calculation::{CalcOptions, EnergyResult, Wavefunction, METHOD};
pub use cube::CubeHeader;
pub use geometry::{MoleculeSpec, XyzGeometry};
