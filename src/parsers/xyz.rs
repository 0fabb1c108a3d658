//! # XYZ 格式解析器
//!
//! ## XYZ 格式说明
//! ```text
//! 3
//! water
//! O   0.000   0.000   0.117
//! H   0.000   0.757  -0.467
//! H   0.000  -0.757  -0.467
//! ```
//!
//! 原子行不解析坐标，只取声明数量的行交给量化程序。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `models/geometry.rs`

use crate::error::{EspError, Result};
use crate::models::XyzGeometry;
use std::fs;
use std::path::Path;

/// 解析 XYZ 文件
pub fn parse_xyz_file(path: &Path) -> Result<XyzGeometry> {
    let content = fs::read_to_string(path).map_err(|e| EspError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xyz_content(&content).map_err(|e| e.with_path(&path.display().to_string()))
}

/// 从字符串内容解析 XYZ 格式
///
/// 多于声明数量的原子行被忽略；少于声明数量时报错。
pub fn parse_xyz_content(content: &str) -> Result<XyzGeometry> {
    let mut lines = content.lines();

    let count_line = lines.next().ok_or_else(|| parse_error("Empty XYZ file"))?;
    let declared_atoms: usize = count_line.trim().parse().map_err(|_| {
        parse_error(&format!(
            "Invalid number of atoms in XYZ file: '{}'",
            count_line.trim()
        ))
    })?;

    let comment = lines
        .next()
        .ok_or_else(|| parse_error("Missing comment line"))?
        .trim()
        .to_string();

    let atom_lines: Vec<String> = lines
        .take(declared_atoms)
        .map(|l| l.trim().to_string())
        .collect();

    if atom_lines.len() != declared_atoms {
        return Err(parse_error(&format!(
            "Expected {} atom lines but found {}",
            declared_atoms,
            atom_lines.len()
        )));
    }

    Ok(XyzGeometry {
        declared_atoms,
        comment,
        atom_lines,
    })
}

fn parse_error(reason: &str) -> EspError {
    EspError::ParseError {
        format: "xyz".to_string(),
        path: "<string>".to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WATER: &str = "3
water molecule
O   0.000000   0.000000   0.117300
H   0.000000   0.757200  -0.469200
H   0.000000  -0.757200  -0.469200
";

    #[test]
    fn test_parse_xyz_basic() {
        let geom = parse_xyz_content(WATER).unwrap();
        assert_eq!(geom.declared_atoms, 3);
        assert_eq!(geom.comment, "water molecule");
        assert_eq!(geom.atom_lines.len(), 3);
        assert_eq!(geom.atom_lines[0], "O   0.000000   0.000000   0.117300");
        assert_eq!(geom.atom_lines[2], "H   0.000000  -0.757200  -0.469200");
    }

    #[test]
    fn test_parse_xyz_keeps_exactly_declared_lines() {
        let content = "2
truncated on purpose
C 0.0 0.0 0.0
O 0.0 0.0 1.128
H 9.0 9.0 9.0
";
        let geom = parse_xyz_content(content).unwrap();
        assert_eq!(geom.atom_lines, vec!["C 0.0 0.0 0.0", "O 0.0 0.0 1.128"]);
        assert_eq!(geom.geometry_block(), "C 0.0 0.0 0.0\nO 0.0 0.0 1.128");
    }

    #[test]
    fn test_parse_xyz_trims_atom_lines() {
        let content = " 1 \n\n   He  0.0 0.0 0.0   \r\n";
        let geom = parse_xyz_content(content).unwrap();
        assert_eq!(geom.comment, "");
        assert_eq!(geom.atom_lines, vec!["He  0.0 0.0 0.0"]);
    }

    #[test]
    fn test_parse_xyz_too_few_lines() {
        let content = "4\ncomment\nO 0 0 0\nH 0 0 1\n";
        let err = parse_xyz_content(content).unwrap_err();
        assert!(err.to_string().contains("Expected 4 atom lines but found 2"));
    }

    #[test]
    fn test_parse_xyz_bad_count() {
        assert!(parse_xyz_content("three\ncomment\nO 0 0 0\n").is_err());
        assert!(parse_xyz_content("-1\ncomment\n").is_err());
        assert!(parse_xyz_content("").is_err());
    }

    #[test]
    fn test_parse_xyz_zero_atoms() {
        let geom = parse_xyz_content("0\ncomment\n").unwrap();
        assert_eq!(geom.declared_atoms, 0);
        assert!(geom.atom_lines.is_empty());
        assert_eq!(geom.geometry_block(), "");
    }

    #[test]
    fn test_parse_xyz_missing_comment() {
        let err = parse_xyz_content("0").unwrap_err();
        assert!(err.to_string().contains("Missing comment line"));
    }

    #[test]
    fn test_parse_xyz_file_reports_path() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "2\nbroken\nO 0 0 0\n").unwrap();

        let err = parse_xyz_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains(&tmp.path().display().to_string()));
    }

    #[test]
    fn test_parse_xyz_file_missing() {
        let err = parse_xyz_file(Path::new("/nonexistent/water.xyz")).unwrap_err();
        assert!(matches!(err, EspError::FileReadError { .. }));
    }
}
