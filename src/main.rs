use std::panic;
use std::process::ExitCode;

use clap::Parser;
use dex_sim_charts::{Cli, run};

fn main() -> ExitCode {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Debug)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("dex_sim_charts"), my_code_level)
        .parse_default_env() // RUST_LOG wins
        .init();

    let args = Cli::parse();

    match run(&args) {
        Ok(report) if report.render.is_complete() => ExitCode::SUCCESS,
        Ok(report) => {
            for failure in &report.render.failed {
                log::error!("{:?} was not written: {}", failure.path, failure.error);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
