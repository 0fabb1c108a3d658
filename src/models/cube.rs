//! # Cube 文件头数据模型
//!
//! 只保存格点文件的头部信息，体数据本身不读入。
//!
//! ## 依赖关系
//! - 被 `parsers/cube.rs` 构造
//! - 被 `commands/generate.rs` 用于结果摘要

/// Cube 文件头
#[derive(Debug, Clone, PartialEq)]
pub struct CubeHeader {
    /// 原子数（轨道 cube 中为负数时取绝对值）
    pub num_atoms: usize,

    /// 格点原点 (Bohr)
    pub origin: [f64; 3],

    /// 三个方向的格点数
    pub points: [usize; 3],

    /// 三个方向的步长向量 (Bohr)
    pub axes: [[f64; 3]; 3],
}

impl CubeHeader {
    pub fn total_points(&self) -> usize {
        self.points.iter().product()
    }

    /// 格点盒子各边长 (Bohr)
    pub fn extent(&self) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, axis) in self.axes.iter().enumerate() {
            let len = (axis[0].powi(2) + axis[1].powi(2) + axis[2].powi(2)).sqrt();
            out[i] = len * self.points[i].saturating_sub(1) as f64;
        }
        out
    }
}
