// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;

use crate::app_config::Config;
use crate::controller::Controller;

mod app_config;
mod controller;
mod errors;
mod language;
mod providers;
mod publish;
mod seo;
mod store;
mod translation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate one content item into all configured target languages
    Translate {
        /// Content identifier to translate
        #[arg(long)]
        id: u64,
    },

    /// Show the per-language translation status of a content item
    Status {
        /// Content identifier to inspect
        #[arg(long)]
        id: u64,
    },

    /// Export the exposed fields of a content item as public-named JSON
    Export {
        /// Content identifier to export
        #[arg(long)]
        id: u64,
    },

    /// Import a content document from a JSON file into the store
    Import {
        /// Path of the content JSON file
        #[arg(long)]
        file: String,
    },

    /// Apply a public-named JSON payload to a content item's fields
    Apply {
        /// Content identifier to update
        #[arg(long)]
        id: u64,

        /// Path of the JSON payload file
        #[arg(long)]
        file: String,
    },

    /// Generate shell completions for lingopress
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lingopress - AI content translation for structured editorial content
///
/// Translates titles, HTML bodies and SEO metadata into configured target
/// languages using a chat-completion API, and maintains a per-language
/// index with URL slugs.
#[derive(Parser, Debug)]
#[command(name = "lingopress")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered editorial content translation")]
#[command(long_about = "lingopress translates editorial content (title, HTML body, SEO \
metadata) into configured target languages using a chat-completion API.

EXAMPLES:
    lingopress import --file post.json          # Seed the content store
    lingopress translate --id 42                # Translate into all configured languages
    lingopress status --id 42                   # Show per-language status
    lingopress export --id 42                   # Dump public-named field JSON
    lingopress apply --id 42 --file fields.json # Write public-named fields back
    lingopress completions bash > lp.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize once with info level; updated after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lingopress", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::from_file(&cli.config_path)?;
    if let Some(cli_level) = cli.log_level {
        config.log_level = cli_level.into();
    }
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::new(config)?;

    let result = match cli.command {
        Commands::Translate { id } => match controller.run_translate(id).await {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Status { id } => controller.run_status(id),
        Commands::Export { id } => match controller.run_export(id) {
            Ok(exported) => {
                println!("{}", serde_json::to_string_pretty(&exported)?);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Import { file } => controller.run_import(&file).map(|_| ()),
        Commands::Apply { id, file } => std::fs::read_to_string(&file)
            .map_err(anyhow::Error::from)
            .and_then(|text| Ok(serde_json::from_str::<serde_json::Value>(&text)?))
            .and_then(|payload| controller.run_apply(id, &payload)),
        Commands::Completions { .. } => unreachable!(),
    };

    // Details go to the log; the caller only sees that the command failed
    if let Err(e) = result {
        error!("{}", e);
        return Err(anyhow::anyhow!("Command failed, see log output for details"));
    }
    Ok(())
}
