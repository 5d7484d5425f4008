use clap::Parser;
use maos::cli::{Cli, dispatcher::CommandDispatcher};
use maos_core::config::MaosConfig;
use maos_core::{ExitCode, PerformanceMetrics};
use std::process::ExitCode as ProcessExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ProcessExitCode {
    let cli = Cli::parse();

    let config = match MaosConfig::load() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            eprintln!("maos: failed to load configuration: {err}");
            return ProcessExitCode::from(ExitCode::ConfigError as u8);
        }
    };

    if let Err(err) = maos_core::logging::init_logging(&config.logging) {
        eprintln!("maos: failed to initialize logging: {err}");
        return ProcessExitCode::from(ExitCode::ConfigError as u8);
    }

    let metrics = Arc::new(PerformanceMetrics::new());

    let dispatcher = match CommandDispatcher::new(config, metrics).await {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("maos: failed to initialize: {err}");
            return ProcessExitCode::from(ExitCode::InternalError as u8);
        }
    };

    match dispatcher.dispatch(cli.command).await {
        Ok(result) => {
            if let Some(output) = result.output {
                println!("{output}");
            }
            ProcessExitCode::from(result.exit_code as u8)
        }
        Err(err) => {
            let code = ExitCode::from(&err);
            eprintln!("maos: {err}");
            ProcessExitCode::from(code as u8)
        }
    }
}
