//! # 解析器模块
//!
//! 提供 XYZ 几何、Psi4 输出和 cube 文件头的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `engine/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: xyz, psi4_out, cube

pub mod cube;
pub mod psi4_out;
pub mod xyz;
