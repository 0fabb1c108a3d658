//! # 进度提示工具
//!
//! 封装 `indicatif`，在阻塞的量化计算期间显示 spinner。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 创建 spinner（用于不确定进度的任务）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}")
            .unwrap()
            .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// 在 spinner 下运行阻塞任务，结束后清除 spinner
pub fn with_spinner<T>(message: &str, task: impl FnOnce() -> T) -> T {
    let pb = create_spinner(message);
    let result = task();
    pb.finish_and_clear();
    result
}
