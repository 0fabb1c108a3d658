//! # 量化程序接口模块
//!
//! 定义生成 ESP 所需的量化程序能力，以及 Psi4 实现。
//!
//! ## 能力
//! - 可用性检查
//! - 设置分子（电荷/多重度/几何）
//! - 设置计算选项
//! - 单点能计算，返回能量与波函数句柄
//! - 由波函数生成 cube 文件到工作目录
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `models/`, `parsers/psi4_out.rs`
//! - 子模块: psi4

pub mod psi4;

pub use psi4::Psi4Engine;

use crate::error::Result;
use crate::models::{CalcOptions, EnergyResult, MoleculeSpec, Wavefunction};
use std::path::Path;

/// 量化程序
pub trait QuantumEngine {
    /// 程序名（用于提示信息）
    fn name(&self) -> &str;

    /// 检查程序是否可用，不可用时返回 `EngineUnavailable`
    fn check_available(&self) -> Result<()>;

    fn set_molecule(&mut self, molecule: MoleculeSpec);

    fn set_options(&mut self, options: CalcOptions);

    /// 单点能计算
    fn energy(&mut self, method: &str) -> Result<EnergyResult>;

    /// 在 `workdir` 中生成 cube 文件
    fn cubeprop(&mut self, wfn: &Wavefunction, workdir: &Path) -> Result<()>;
}
