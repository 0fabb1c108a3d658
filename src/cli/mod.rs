//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 命令结构
//! `generate_esp [OPTIONS] <XYZ_FILE>`
//!
//! 只接受一个位置参数；化学参数固定，选项只影响 Psi4 的运行方式。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// 参数个数不对时打印的用法
pub const USAGE: &str = "Usage: generate_esp molecule.xyz";

/// generate_esp - 用 Psi4 生成 ESP cube 文件
#[derive(Parser, Debug)]
#[command(name = "generate_esp")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Generate an ESP cube file from an XYZ geometry with Psi4 (B3LYP/6-31G*)",
    long_about = None
)]
pub struct Cli {
    /// XYZ geometry file
    #[arg(value_name = "XYZ_FILE")]
    pub xyz_file: PathBuf,

    /// Psi4 executable
    #[arg(long = "psi4", env = "PSI4_EXE", default_value = "psi4")]
    pub psi4: String,

    /// Number of threads for Psi4
    #[arg(
        short = 'n',
        long,
        env = "PSI4_NTHREADS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub nthreads: u32,

    /// Memory for Psi4 (e.g. '2 GB')
    #[arg(long, env = "PSI4_MEMORY")]
    pub memory: Option<String>,
}

/// 解析结果
#[derive(Debug)]
pub enum ParseOutcome {
    Run(Cli),
    /// 帮助或版本信息，按 clap 默认行为退出
    Exit(clap::Error),
    /// 参数错误，退出码 1
    Usage(clap::Error),
}

/// 解析命令行，区分帮助/版本与参数错误
pub fn parse_args<I, T>(args: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParseOutcome::Run(cli),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ParseOutcome::Exit(e),
            _ => ParseOutcome::Usage(e),
        },
    }
}
