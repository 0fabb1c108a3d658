//! # 量化计算配置与结果模型
//!
//! 固定的计算参数（泛函、基组、格点），以及能量计算返回的波函数句柄。
//!
//! ## 依赖关系
//! - 被 `engine/` 使用
//! - 被 `commands/generate.rs` 使用

use std::path::PathBuf;
use tabled::Tabled;

/// 单点能计算使用的方法
pub const METHOD: &str = "B3LYP";

/// 计算配置
///
/// 所有调用都使用同一组参数，不对用户开放。
#[derive(Debug, Clone, PartialEq)]
pub struct CalcOptions {
    pub basis: String,
    pub scf_type: String,
    pub cubeprop_tasks: Vec<String>,
    /// 格点间距 (Å)
    pub cubic_grid_spacing: [f64; 3],
    /// 分子外延距离 (Å)
    pub cubic_grid_overage: [f64; 3],
}

impl Default for CalcOptions {
    fn default() -> Self {
        CalcOptions {
            basis: "6-31G*".to_string(),
            scf_type: "df".to_string(),
            cubeprop_tasks: vec!["ESP".to_string()],
            cubic_grid_spacing: [0.3, 0.3, 0.3],
            cubic_grid_overage: [4.0, 4.0, 4.0],
        }
    }
}

/// 参数表的一行
#[derive(Debug, Clone, Tabled)]
pub struct OptionRow {
    #[tabled(rename = "Option")]
    pub name: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl CalcOptions {
    /// 按 (选项名, 值) 顺序列出，值为 psithon 写法
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("basis", self.basis.clone()),
            ("scf_type", self.scf_type.clone()),
            (
                "cubeprop_tasks",
                format!(
                    "[{}]",
                    self.cubeprop_tasks
                        .iter()
                        .map(|t| format!("'{}'", t.to_lowercase()))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ),
            ("cubic_grid_spacing", format_triplet(&self.cubic_grid_spacing)),
            ("cubic_grid_overage", format_triplet(&self.cubic_grid_overage)),
        ]
    }

    /// 终端表格数据
    pub fn table_rows(&self) -> Vec<OptionRow> {
        let mut rows = vec![OptionRow {
            name: "method".to_string(),
            value: METHOD.to_string(),
        }];
        rows.extend(self.entries().into_iter().map(|(name, value)| OptionRow {
            name: name.to_string(),
            value,
        }));
        rows
    }
}

fn format_triplet(v: &[f64; 3]) -> String {
    format!("[{:.1}, {:.1}, {:.1}]", v[0], v[1], v[2])
}

/// 波函数句柄
///
/// 对调用方不透明；Psi4 后端中是序列化波函数文件的路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wavefunction {
    pub(crate) path: PathBuf,
}

impl Wavefunction {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Wavefunction { path: path.into() }
    }
}

/// 单点能计算结果
#[derive(Debug, Clone)]
pub struct EnergyResult {
    /// SCF 能量 (Hartree)
    pub energy: f64,
    pub wavefunction: Wavefunction,
}
