use std::time::Duration;

use clap::Parser;
use form_wizard::cli::commands::{SubmitInput, cmd_processes, cmd_show, cmd_submit};
use form_wizard::cli::config::{Cli, Commands, load_config};
use form_wizard::client::http::HttpFormApi;
use form_wizard::trace::logger::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve API settings: CLI > config > defaults
    let base_url = cli.base_url.as_deref().unwrap_or(&config.api.base_url);
    let timeout = config.api.timeout_secs.map(Duration::from_secs);
    let api = HttpFormApi::new(base_url, timeout)?;

    match cli.command {
        Commands::Processes => cmd_processes(&api)?,
        Commands::Show {
            form,
            step,
            format,
            output,
        } => cmd_show(api, &form, step, &format, output.as_deref())?,
        Commands::Submit {
            form,
            step,
            fields,
            checks,
            files,
            button,
        } => {
            let input = SubmitInput {
                fields,
                checks,
                files,
                button,
            };
            let tracer = TraceLogger::from_path(config.trace.path.as_deref());
            let accepted = cmd_submit(api, &form, step, &input, tracer)?;
            if !accepted {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
