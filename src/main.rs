//! # generate_esp - ESP cube 生成工具
//!
//! 读取 XYZ 几何，调用 Psi4 计算 B3LYP/6-31G* 静电势格点，
//! 输出 `<输入名>_esp.cube` 供 charge_optimizer 拟合原子电荷。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── engine/    (量化程序接口, Psi4)
//!   │     ├── parsers/   (XYZ / Psi4 输出 / cube 解析器)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod engine;
mod error;
mod models;
mod parsers;
mod utils;

use cli::ParseOutcome;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = match cli::parse_args(std::env::args_os()) {
        ParseOutcome::Run(cli) => cli,
        ParseOutcome::Exit(e) => e.exit(),
        ParseOutcome::Usage(e) => {
            println!("{}", e);
            println!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
