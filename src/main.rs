use clap::Parser;
use log::*;
use std::process;

use release_steward::{
    StewardError,
    cli::Cli,
    command, output,
};

fn initialize_logger(debug: bool) -> release_steward::Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_steward")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn fail(err: StewardError) -> ! {
    error!("{err}");
    output::report_failure(&err);
    process::exit(1)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => fail(StewardError::invalid_config(err.to_string())),
    };

    initialize_logger(cli.debug)?;

    let handle = tokio::spawn(async move { command::execute(&cli).await });

    match handle.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => fail(err),
        Err(join_err) => fail(StewardError::from(join_err)),
    }
}
