use std::process::ExitCode;

use tracing::{error, info};

use fh2_transfer::{Config, Pipeline};

#[tokio::main]
async fn main() -> ExitCode {
    // Hold the guard so the file writer flushes on both exit paths.
    let _log_guard = fh2_transfer::logging::init();

    let outcome = run().await;
    if let Err(err) = &outcome {
        error!("{:#}", err);
    }

    // "finished" is logged in both outcomes; downstream log consumers
    // key off it. Failure is reported through the exit code instead.
    info!("finished");
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let pipeline = Pipeline::from_config(&config)?;
    pipeline.run().await?;
    Ok(())
}
