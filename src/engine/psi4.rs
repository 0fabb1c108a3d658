//! # Psi4 后端
//!
//! 通过 `psi4` 可执行文件完成计算：每个能力对应一次 psithon 输入，
//! 输入、输出和波函数文件都放在临时目录里。
//!
//! 能量计算结束时把波函数写成 `wfn.npy`，cube 计算再读回来，
//! 所以两次进程之间的句柄就是这个文件路径。
//!
//! ## 依赖关系
//! - 实现 `engine::QuantumEngine`
//! - 使用 `parsers/psi4_out.rs` 提取能量
//! - 使用 `tempfile` 管理临时目录

use super::QuantumEngine;
use crate::error::{EspError, Result};
use crate::models::{CalcOptions, EnergyResult, MoleculeSpec, Wavefunction};
use crate::parsers::psi4_out::{self, ENERGY_MARKER};

use std::fmt::Write;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// 安装提示
pub const INSTALL_HINT: &str = "Install with: conda install -c conda-forge psi4";

/// 错误报告中保留的输出行数
const TAIL_LINES: usize = 20;

/// Psi4 运行参数（不影响化学计算本身）
#[derive(Debug, Clone)]
pub struct Psi4Settings {
    /// 可执行文件
    pub executable: String,
    /// 线程数
    pub nthreads: usize,
    /// 内存，如 "2 GB"
    pub memory: Option<String>,
}

impl Default for Psi4Settings {
    fn default() -> Self {
        Psi4Settings {
            executable: "psi4".to_string(),
            nthreads: 1,
            memory: None,
        }
    }
}

/// Psi4 量化程序
pub struct Psi4Engine {
    settings: Psi4Settings,
    scratch: TempDir,
    molecule: Option<MoleculeSpec>,
    options: CalcOptions,
}

impl Psi4Engine {
    pub fn new(settings: Psi4Settings) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("generate_esp.")
            .tempdir()
            .map_err(|e| EspError::FileWriteError {
                path: std::env::temp_dir().display().to_string(),
                source: e,
            })?;

        Ok(Psi4Engine {
            settings,
            scratch,
            molecule: None,
            options: CalcOptions::default(),
        })
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    fn wavefunction_path(&self) -> PathBuf {
        self.scratch.path().join("wfn.npy")
    }

    /// 在 `cwd` 中运行一个 psithon 输入，返回输出文件内容
    fn run_input(&self, stem: &str, input: &str, cwd: &Path) -> Result<String> {
        let input_path = self.scratch.path().join(format!("{}.in", stem));
        let output_path = self.scratch.path().join(format!("{}.out", stem));

        fs::write(&input_path, input).map_err(|e| EspError::FileWriteError {
            path: input_path.display().to_string(),
            source: e,
        })?;

        let result = Command::new(&self.settings.executable)
            .arg("-n")
            .arg(self.settings.nthreads.to_string())
            .arg(&input_path)
            .arg(&output_path)
            .current_dir(cwd)
            .env("PSI_SCRATCH", self.scratch.path())
            .output()
            .map_err(|e| spawn_error(&self.settings.executable, e))?;

        if !result.status.success() {
            // 失败时输出文件可能不存在，尽量取尾部
            let output = fs::read_to_string(&output_path).unwrap_or_default();
            let mut report = psi4_out::tail(&output, TAIL_LINES);
            let stderr = String::from_utf8_lossy(&result.stderr);
            if !stderr.trim().is_empty() {
                if !report.is_empty() {
                    report.push('\n');
                }
                report.push_str(stderr.trim());
            }
            return Err(EspError::CommandFailed {
                command: format!("{} {}", self.settings.executable, input_path.display()),
                stderr: report,
            });
        }

        fs::read_to_string(&output_path).map_err(|e| EspError::FileReadError {
            path: output_path.display().to_string(),
            source: e,
        })
    }

    fn molecule(&self) -> Result<&MoleculeSpec> {
        self.molecule.as_ref().ok_or_else(|| {
            EspError::InvalidArgument("No molecule set before running Psi4".to_string())
        })
    }
}

impl QuantumEngine for Psi4Engine {
    fn name(&self) -> &str {
        "Psi4"
    }

    fn check_available(&self) -> Result<()> {
        match Command::new(&self.settings.executable)
            .arg("--version")
            .output()
        {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => Err(EspError::EngineUnavailable {
                command: self.name().to_string(),
                hint: format!(
                    "'{} --version' failed: {}\n{}",
                    self.settings.executable,
                    String::from_utf8_lossy(&out.stderr).trim(),
                    INSTALL_HINT
                ),
            }),
            Err(e) => Err(spawn_error(&self.settings.executable, e)),
        }
    }

    fn set_molecule(&mut self, molecule: MoleculeSpec) {
        self.molecule = Some(molecule);
    }

    fn set_options(&mut self, options: CalcOptions) {
        self.options = options;
    }

    fn energy(&mut self, method: &str) -> Result<EnergyResult> {
        let wfn_path = self.wavefunction_path();
        let input = render_energy_input(
            self.molecule()?,
            &self.options,
            method,
            self.settings.memory.as_deref(),
            &wfn_path,
        );

        let scratch = self.scratch_dir();
        let output = self.run_input("energy", &input, scratch)?;
        let energy = psi4_out::parse_energy(&output)
            .map_err(|e| e.with_path(&scratch.join("energy.out").display().to_string()))?;

        if !wfn_path.exists() {
            return Err(EspError::OutputMissing {
                path: wfn_path.display().to_string(),
            });
        }

        Ok(EnergyResult {
            energy,
            wavefunction: Wavefunction::new(wfn_path),
        })
    }

    fn cubeprop(&mut self, wfn: &Wavefunction, workdir: &Path) -> Result<()> {
        let input = render_cubeprop_input(
            self.molecule()?,
            &self.options,
            self.settings.memory.as_deref(),
            &wfn.path,
        );
        self.run_input("cubeprop", &input, workdir)?;
        Ok(())
    }
}

fn spawn_error(executable: &str, e: std::io::Error) -> EspError {
    let hint = if e.kind() == ErrorKind::NotFound {
        format!("'{}' not found in PATH\n{}", executable, INSTALL_HINT)
    } else {
        format!("Cannot run '{}': {}\n{}", executable, e, INSTALL_HINT)
    };
    EspError::EngineUnavailable {
        command: "Psi4".to_string(),
        hint,
    }
}

// ─────────────────────────────────────────────────────────────
// psithon 输入生成
// ─────────────────────────────────────────────────────────────

/// memory、molecule 和 set 三段公共头
fn render_preamble(
    molecule: &MoleculeSpec,
    options: &CalcOptions,
    memory: Option<&str>,
) -> String {
    let mut s = String::new();

    if let Some(mem) = memory {
        let _ = writeln!(s, "memory {}\n", mem);
    }

    let _ = writeln!(s, "molecule {{\n{}\n}}\n", molecule.to_spec_string());

    s.push_str("set {\n");
    for (name, value) in options.entries() {
        let _ = writeln!(s, "  {} {}", name, value);
    }
    s.push_str("}\n\n");

    s
}

/// 路径写成 Python 单引号字符串，转义 `\\` 和 `'`
fn python_path_literal(path: &Path) -> String {
    let escaped = path
        .display()
        .to_string()
        .replace('\\', "\\\\")
        .replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// 单点能输入：计算、打印能量标记、保存波函数
pub fn render_energy_input(
    molecule: &MoleculeSpec,
    options: &CalcOptions,
    method: &str,
    memory: Option<&str>,
    wfn_path: &Path,
) -> String {
    let mut s = render_preamble(molecule, options, memory);
    let _ = writeln!(s, "e_scf, wfn = energy('{}', return_wfn=True)", method);
    let _ = writeln!(s, "print_out(\"\\n{} %.12f\\n\" % e_scf)", ENERGY_MARKER);
    let _ = writeln!(s, "wfn.to_file({})", python_path_literal(wfn_path));
    s
}

/// cube 输入：读回波函数并生成 cube 文件
pub fn render_cubeprop_input(
    molecule: &MoleculeSpec,
    options: &CalcOptions,
    memory: Option<&str>,
    wfn_path: &Path,
) -> String {
    let mut s = render_preamble(molecule, options, memory);
    let _ = writeln!(
        s,
        "wfn = core.Wavefunction.from_file({})",
        python_path_literal(wfn_path)
    );
    s.push_str("cubeprop(wfn)\n");
    s
}
