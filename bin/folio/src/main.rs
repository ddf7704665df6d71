//! folio CLI
//!
//! Builds the portfolio site from Strapi content and runs the lead-intake
//! service.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Portfolio site generator and lead-intake service"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch all content from the CMS and generate the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the lead-intake HTTP service
    Serve {
        /// Address to bind (defaults to server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Render a rich-text JSON document to HTML on stdout
    Render {
        /// JSON file holding an array of blocks
        file: PathBuf,
        /// Escape text content
        #[arg(long)]
        escape: bool,
    },
    /// Print the normalized form of a CMS response
    Normalize {
        /// JSON file holding a raw API response
        file: PathBuf,
    },
    /// Validate configuration and CMS content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output } => {
            folio::cmd::build::run(&cli.config, output.as_deref()).await?;
        }
        Commands::Serve { bind } => {
            folio::cmd::serve::run(&cli.config, bind.as_deref()).await?;
        }
        Commands::Render { file, escape } => {
            folio::cmd::render::run(&file, escape)?;
        }
        Commands::Normalize { file } => {
            folio::cmd::normalize::run(&file)?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let cli = Cli::parse_from(["folio", "build", "--output", "dist"]);

        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { output } => assert_eq!(output, Some(PathBuf::from("dist"))),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_default_output() {
        let cli = Cli::parse_from(["folio", "build"]);

        match cli.command {
            Commands::Build { output } => assert!(output.is_none()),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_serve_command_parsing() {
        let cli = Cli::parse_from(["folio", "serve", "--bind", "0.0.0.0:8080"]);

        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_render_command_parsing() {
        let cli = Cli::parse_from(["folio", "render", "doc.json", "--escape"]);

        match cli.command {
            Commands::Render { file, escape } => {
                assert_eq!(file, PathBuf::from("doc.json"));
                assert!(escape);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_normalize_command_parsing() {
        let cli = Cli::parse_from(["folio", "normalize", "response.json"]);

        match cli.command {
            Commands::Normalize { file } => assert_eq!(file, PathBuf::from("response.json")),
            _ => panic!("Expected Normalize command"),
        }
    }

    #[test]
    fn test_cli_check_strict() {
        let cli = Cli::parse_from(["folio", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::parse_from(["folio", "-c", "site.toml", "-vvv", "check"]);

        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.verbose, 3);
    }
}
