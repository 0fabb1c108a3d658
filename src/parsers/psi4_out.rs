//! # Psi4 输出解析器
//!
//! 从 Psi4 输出文件提取 SCF 能量。
//!
//! 优先读取输入脚本自己打印的标记行，找不到时退回 Psi4 的
//! `@DF-RKS Final Energy:` 行，再退回 `Total Energy =` 行。
//! 同一种行出现多次时取最后一次。
//!
//! ## 依赖关系
//! - 被 `engine/psi4.rs` 使用

use crate::error::{EspError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// 输入脚本写出能量时使用的标记
pub const ENERGY_MARKER: &str = "ESP-GEN ENERGY";

static ENERGY_RE: OnceLock<[Regex; 3]> = OnceLock::new();

/// 从输出内容中提取能量 (Hartree)
pub fn parse_energy(content: &str) -> Result<f64> {
    let patterns = ENERGY_RE.get_or_init(|| {
        [
            Regex::new(&format!(
                r"(?m){}\s+(-?\d+\.\d+)",
                regex::escape(ENERGY_MARKER)
            ))
            .unwrap(),
            Regex::new(r"(?m)@(?:DF-)?[RU]KS Final Energy:\s+(-?\d+\.\d+)").unwrap(),
            Regex::new(r"(?m)^\s*Total Energy =\s+(-?\d+\.\d+)").unwrap(),
        ]
    });

    for re in patterns {
        if let Some(energy) = re
            .captures_iter(content)
            .last()
            .and_then(|c| c[1].parse::<f64>().ok())
        {
            return Ok(energy);
        }
    }

    Err(EspError::ParseError {
        format: "psi4 output".to_string(),
        path: "<string>".to_string(),
        reason: "No SCF energy found".to_string(),
    })
}

/// 取输出最后若干行，用于错误报告
pub fn tail(content: &str, n: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
