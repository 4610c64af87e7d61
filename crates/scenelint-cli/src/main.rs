//! scenelint CLI - Validate scene files against production rules

mod commands;
mod logging;
mod server;

use clap::{Parser, Subcommand};
use commands::{batch, serve, validate};
use logging::LogLevel;
use scenelint_rules::OutputFormat;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scenelint")]
#[command(about = "Validate scene files against production guidelines", long_about = None)]
#[command(version)]
struct Cli {
    /// Log verbosity (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single scene file
    Validate {
        /// Path to the scene file to validate
        #[arg(short, long)]
        input: String,

        /// Path to the validation configuration file
        #[arg(short, long)]
        config: String,

        /// Path to save the validation report (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format: text, json or html
        #[arg(short, long, default_value = "text", value_parser = parse_format)]
        format: OutputFormat,
    },

    /// Validate many scene files with the same rules
    Batch {
        /// Scene files to validate
        #[arg(required = true)]
        scenes: Vec<String>,

        /// Path to the validation configuration file
        #[arg(short, long)]
        config: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text", value_parser = parse_batch_format)]
        format: OutputFormat,

        /// Number of worker threads
        #[arg(short, long, default_value = "1")]
        jobs: usize,
    },

    /// Run the upload-and-validate web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Path to the validation configuration file
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

fn parse_batch_format(s: &str) -> Result<OutputFormat, String> {
    match s.parse()? {
        OutputFormat::Html => Err("batch output supports text or json".to_string()),
        format => Ok(format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let result = match cli.command {
        Commands::Validate {
            input,
            config,
            output,
            format,
        } => validate::run(validate::ValidateArgs {
            input,
            config,
            output,
            format,
        }),
        Commands::Batch {
            scenes,
            config,
            format,
            jobs,
        } => batch::run(batch::BatchArgs {
            scenes,
            config,
            format,
            jobs,
        }),
        Commands::Serve { port, host, config } => {
            serve::run(serve::ServeArgs { port, host, config })
        }
    };

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(commands::exit_status(&result))
}
