// CLI binary entry point for wavify
//
// This is the main entry point for the wavify command-line tool.

mod cli;

use clap::Parser;
use std::process;

use cli::commands::{command_batch, command_convert, command_extract, command_info};
use cli::{CliResult, Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();
    let formatter = OutputFormatter::new(config.format, config.quiet, config.verbose);

    if let Err(e) = run(&config, &formatter) {
        formatter.print_error(&e.to_string());
        process::exit(1);
    }
}

fn run(config: &Config, formatter: &OutputFormatter) -> CliResult<()> {
    match &config.command {
        Commands::Convert {
            files,
            output,
            params,
            force,
        } => command_convert(
            files,
            output.as_deref(),
            &params.to_params(),
            *force,
            formatter,
        ),
        Commands::Info { files, detailed } => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            command_info(files, *detailed, formatter, &mut writer)
        }
        Commands::Extract {
            file,
            output,
            force,
        } => command_extract(file, output, *force, formatter),
        Commands::Batch {
            directory,
            pattern,
            params,
            force,
        } => command_batch(directory, pattern, &params.to_params(), *force, formatter),
    }
}
