//! # ESP 生成流程
//!
//! 读取 XYZ 几何，调用量化程序做 B3LYP/6-31G* 单点能并生成 ESP 格点，
//! 最后把 `ESP.cube` 改名为 `<输入名>_esp.cube` 供 charge_optimizer 使用。
//!
//! ## 流程
//! 1. 检查输入文件存在
//! 2. 检查量化程序可用
//! 3. 解析 XYZ，构造中性单重态分子
//! 4. 设置固定计算参数
//! 5. 单点能计算，打印 SCF 能量
//! 6. 生成 cube 文件
//! 7. 改名并报告格点信息
//!
//! ## 依赖关系
//! - 使用 `cli/` 定义的参数
//! - 使用 `engine/`, `parsers/xyz.rs`, `parsers/cube.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::Cli;
use crate::engine::psi4::Psi4Settings;
use crate::engine::{Psi4Engine, QuantumEngine};
use crate::error::{EspError, Result};
use crate::models::{CalcOptions, MoleculeSpec, METHOD};
use crate::parsers::{cube, xyz};
use crate::utils::{output, progress};

use std::fs;
use std::path::{Path, PathBuf};
use tabled::Table;

/// 量化程序默认写出的 cube 文件名
pub const ENGINE_CUBE: &str = "ESP.cube";

/// 执行 generate_esp
pub fn execute(cli: Cli) -> Result<()> {
    let workdir = std::env::current_dir().map_err(|e| EspError::FileReadError {
        path: ".".to_string(),
        source: e,
    })?;

    let mut engine = Psi4Engine::new(Psi4Settings {
        executable: cli.psi4,
        nthreads: cli.nthreads as usize,
        memory: cli.memory,
    })?;

    generate(&cli.xyz_file, &mut engine, &workdir)?;
    Ok(())
}

/// `<去掉扩展名的输入路径>_esp.cube`
pub fn output_cube_path(xyz_file: &Path) -> PathBuf {
    let mut name = xyz_file.with_extension("").into_os_string();
    name.push("_esp.cube");
    PathBuf::from(name)
}

/// 在 `workdir` 中为 `xyz_file` 生成 ESP cube 文件，返回生成的文件路径
pub fn generate(
    xyz_file: &Path,
    engine: &mut dyn QuantumEngine,
    workdir: &Path,
) -> Result<PathBuf> {
    output::print_header("ESP Cube Generation");

    let xyz_path = workdir.join(xyz_file);
    if !xyz_path.exists() {
        return Err(EspError::FileNotFound {
            path: xyz_file.display().to_string(),
        });
    }

    engine.check_available()?;

    let geometry = xyz::parse_xyz_file(&xyz_path)?;
    output::print_info(&format!(
        "Loaded {} atoms from '{}'",
        geometry.declared_atoms,
        xyz_file.display()
    ));
    if !geometry.comment.is_empty() {
        output::print_info(&format!("Comment: {}", geometry.comment));
    }
    engine.set_molecule(MoleculeSpec::neutral_singlet(&geometry));

    let options = CalcOptions::default();
    println!("{}", Table::new(options.table_rows()));
    engine.set_options(options);

    output::print_info(&format!(
        "Running DFT calculation on {}...",
        xyz_file.display()
    ));
    output::print_info("This may take a few minutes...");

    let result = progress::with_spinner(
        &format!("{} single point with {}", METHOD, engine.name()),
        || engine.energy(METHOD),
    )?;
    output::print_success(&format!("SCF Energy: {:.6} Hartree", result.energy));

    progress::with_spinner("Generating ESP cube", || {
        engine.cubeprop(&result.wavefunction, workdir)
    })?;

    let produced = workdir.join(ENGINE_CUBE);
    if !produced.exists() {
        return Err(EspError::OutputMissing {
            path: ENGINE_CUBE.to_string(),
        });
    }

    let cube_file = output_cube_path(xyz_file);
    let dest = workdir.join(&cube_file);
    fs::rename(&produced, &dest).map_err(|e| EspError::FileWriteError {
        path: dest.display().to_string(),
        source: e,
    })?;

    output::print_success(&format!(
        "ESP cube file created: {}",
        cube_file.display()
    ));

    match cube::parse_cube_header_file(&dest) {
        Ok(header) => {
            let extent = header.extent();
            output::print_info(&format!(
                "Grid dimensions: {} x {} x {} ({} points, {} atoms)",
                header.points[0],
                header.points[1],
                header.points[2],
                header.total_points(),
                header.num_atoms
            ));
            output::print_info(&format!(
                "Grid origin: ({:.4}, {:.4}, {:.4}), extent: {:.2} x {:.2} x {:.2} bohr",
                header.origin[0],
                header.origin[1],
                header.origin[2],
                extent[0],
                extent[1],
                extent[2]
            ));
        }
        Err(e) => output::print_warning(&format!("Could not read cube header: {}", e)),
    }

    output::print_separator();
    println!("Now run:");
    println!(
        "  ./charge_optimizer {} {}",
        xyz_file.display(),
        cube_file.display()
    );
    output::print_done("ESP generation finished");

    Ok(dest)
}
