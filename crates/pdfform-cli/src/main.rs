mod checkboxes_cmd;
mod cli;
mod fields_cmd;
mod fill_cmd;
mod overlay_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        cli::Commands::Fields {
            ref file,
            ref format,
            widgets,
        } => fields_cmd::run(file, format, widgets),
        cli::Commands::Checkboxes {
            ref file,
            ref format,
        } => checkboxes_cmd::run(file, format),
        cli::Commands::Fill {
            ref file,
            ref data,
            ref output,
            read_only,
            delete_removed,
            ref settings,
        } => fill_cmd::run(fill_cmd::FillArgs {
            file,
            data,
            output,
            read_only,
            delete_removed,
            settings: settings.as_deref(),
        }),
        cli::Commands::Overlay {
            ref file,
            ref data,
            ref output,
            page_size,
            ref settings,
        } => overlay_cmd::run_overlay(file, data, output, page_size, settings.as_deref()),
        cli::Commands::Flatten {
            ref file,
            ref data,
            ref output,
            page_size,
            ref settings,
        } => overlay_cmd::run_flatten(file, data, output, page_size, settings.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
