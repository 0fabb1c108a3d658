//! # Gaussian cube 格式解析器
//!
//! 只解析文件头，用于在生成后报告格点规模。
//!
//! ## cube 格式说明
//! ```text
//! comment 1
//! comment 2
//! natoms  ox  oy  oz
//! nx      vx1 vx2 vx3
//! ny      vy1 vy2 vy3
//! nz      vz1 vz2 vz3
//! Z  q  x  y  z          (natoms 行)
//! v v v v v v ...        (体数据)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `models/cube.rs`

use crate::error::{EspError, Result};
use crate::models::CubeHeader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 解析 cube 文件头（不读体数据）
pub fn parse_cube_header_file(path: &Path) -> Result<CubeHeader> {
    let file = File::open(path).map_err(|e| EspError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut head = String::new();
    let mut reader = BufReader::new(file);
    let mut needed = 6;
    let mut read = 0;

    while read < needed {
        let mut line = String::new();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| EspError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;
        if n == 0 {
            break;
        }
        // 第三行给出原子数后才知道头部总行数
        if read == 2 {
            if let Some(atoms) = line
                .split_whitespace()
                .next()
                .and_then(|w| w.parse::<i64>().ok())
            {
                needed += atoms.unsigned_abs() as usize;
            }
        }
        head.push_str(&line);
        read += 1;
    }

    parse_cube_header(&head).map_err(|e| e.with_path(&path.display().to_string()))
}

/// 从字符串解析 cube 文件头
pub fn parse_cube_header(content: &str) -> Result<CubeHeader> {
    let mut lines = content.lines();

    // 两行注释
    lines.next().ok_or_else(|| parse_error("Empty cube file"))?;
    lines
        .next()
        .ok_or_else(|| parse_error("Missing second comment line"))?;

    let origin_line = lines
        .next()
        .ok_or_else(|| parse_error("Missing atom count / origin line"))?;
    let (natoms, origin) = parse_count_and_vector(origin_line)?;

    let mut points = [0usize; 3];
    let mut axes = [[0.0; 3]; 3];
    for (count, axis) in points.iter_mut().zip(axes.iter_mut()) {
        let line = lines
            .next()
            .ok_or_else(|| parse_error("Missing grid axis line"))?;
        let (n, v) = parse_count_and_vector(line)?;
        if n <= 0 {
            return Err(parse_error(&format!("Invalid grid point count: {}", n)));
        }
        *count = n as usize;
        *axis = v;
    }

    let num_atoms = natoms.unsigned_abs() as usize;
    for i in 0..num_atoms {
        let line = lines.next().ok_or_else(|| {
            parse_error(&format!("Expected {} atom lines but found {}", num_atoms, i))
        })?;
        if line.split_whitespace().count() < 5 {
            return Err(parse_error(&format!("Invalid atom line: '{}'", line.trim())));
        }
    }

    Ok(CubeHeader {
        num_atoms,
        origin,
        points,
        axes,
    })
}

/// 解析 `count x y z` 形式的行
fn parse_count_and_vector(line: &str) -> Result<(i64, [f64; 3])> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(parse_error(&format!("Malformed header line: '{}'", line.trim())));
    }

    let count: i64 = parts[0]
        .parse()
        .map_err(|_| parse_error(&format!("Invalid integer: '{}'", parts[0])))?;

    let mut v = [0.0; 3];
    for (slot, word) in v.iter_mut().zip(&parts[1..4]) {
        *slot = word
            .parse()
            .map_err(|_| parse_error(&format!("Invalid number: '{}'", word)))?;
    }

    Ok((count, v))
}

fn parse_error(reason: &str) -> EspError {
    EspError::ParseError {
        format: "cube".to_string(),
        path: "<string>".to_string(),
        reason: reason.to_string(),
    }
}
