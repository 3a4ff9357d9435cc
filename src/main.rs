use std::process::ExitCode;

use clap::Parser;
use unsplash_fetch::config::setup_logging;
use unsplash_fetch::constants::ERROR_SENTINEL;

fn main() -> ExitCode {
    let cli = unsplash_fetch::cli::CliOptions::parse();

    let _ = setup_logging(cli.debug);

    let outcome = unsplash_fetch::save_new_image(
        &cli.api_key,
        &cli.folder,
        &cli.collections,
        &cli.topics,
        &cli.username,
        &cli.query,
        &cli.orientation,
        &cli.content_filter,
    );
    println!("{outcome}");

    if outcome == ERROR_SENTINEL {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
