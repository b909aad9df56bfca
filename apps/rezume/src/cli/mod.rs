// Command-line surface: `rezume init | test | serve`.

pub mod init;
pub mod serve;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "rezume")]
#[command(version, about = "Keep your résumé as a YAML file; validate it and serve it through themes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new rezume.yml file
    Init {
        /// Target file [default: $REZUME_FILE or ./rezume.yml]
        file: Option<PathBuf>,
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Validate correctness of a rezume file
    Test {
        /// File to validate [default: $REZUME_FILE or ./rezume.yml]
        file: Option<PathBuf>,
    },

    /// Serve a rezume for local viewing, applying available themes
    Serve {
        /// File to serve [default: $REZUME_FILE or ./rezume.yml]
        file: Option<PathBuf>,
        /// Theme to apply on rezume
        #[arg(short, long)]
        theme: Option<String>,
        /// Port number to serve content on [default: $PORT or 7770]
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// How a command finished, independent of the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

impl Cli {
    /// Dispatches the parsed command. Flags win over `config`.
    pub async fn run(self, config: Config) -> Result<Outcome> {
        match self.command {
            Commands::Init { file, force } => {
                let path = file.unwrap_or(config.rezume_file);
                let mut input = io::stdin().lock();
                init::run(&path, force, &mut input, &mut io::stdout())
            }
            Commands::Test { file } => {
                let path = file.unwrap_or(config.rezume_file);
                test::run(&path, &mut io::stdout())
            }
            Commands::Serve { file, theme, port } => {
                let options = serve::ServeOptions {
                    path: file.unwrap_or(config.rezume_file),
                    theme: theme.unwrap_or(config.theme),
                    host: config.host,
                    port: port.unwrap_or(config.port),
                };
                serve::run(options, &mut io::stdout()).await
            }
        }
    }
}
