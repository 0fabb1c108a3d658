//! # 分子几何数据模型
//!
//! XYZ 文件读出的几何记录，以及交给量化程序的分子描述。
//!
//! ## 依赖关系
//! - 被 `parsers/xyz.rs` 构造
//! - 被 `engine/` 和 `commands/generate.rs` 使用

/// XYZ 几何记录
///
/// 原子行按文件原样保存（仅去掉首尾空白），不校验元素或坐标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzGeometry {
    /// 第一行声明的原子数
    pub declared_atoms: usize,

    /// 第二行注释
    pub comment: String,

    /// 原子行
    pub atom_lines: Vec<String>,
}

impl XyzGeometry {
    /// 原子行以换行连接成的几何块
    pub fn geometry_block(&self) -> String {
        self.atom_lines.join("\n")
    }
}

/// 分子描述：电荷、自旋多重度与几何块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeSpec {
    pub charge: i32,
    pub multiplicity: u32,
    pub geometry: String,
}

impl MoleculeSpec {
    /// 中性单重态分子
    pub fn neutral_singlet(geometry: &XyzGeometry) -> Self {
        MoleculeSpec {
            charge: 0,
            multiplicity: 1,
            geometry: geometry.geometry_block(),
        }
    }

    /// `"<charge> <multiplicity>\n<geometry>"`
    pub fn to_spec_string(&self) -> String {
        format!("{} {}\n{}", self.charge, self.multiplicity, self.geometry)
    }
}
