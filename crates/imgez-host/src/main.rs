use clap::Parser;

use imgez_host::cli::{run_with, CliArgs};
use imgez_host::SystemClipboard;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::debug!("imgez {}", imgez_host::version());
    let session = run_with(&args, SystemClipboard::new())?;
    if let Some(output) = &args.output {
        println!("{}", output.display());
    }
    log::debug!("{} snapshot(s) in history", session.engine().history_len());
    Ok(())
}
