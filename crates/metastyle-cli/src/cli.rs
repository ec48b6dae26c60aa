//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "metastyle",
    version,
    about = "Resolve selection, probe and filter aware feature styles"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve every feature of a scene and print its style stack.
    Resolve {
        /// Scene file (YAML, or JSON with a .json extension).
        scene: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Parse a stylesheet and list its bundles.
    Check {
        stylesheet: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["metastyle", "-vv", "resolve", "scene.yaml", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Resolve { scene, format } => {
                assert_eq!(scene, PathBuf::from("scene.yaml"));
                assert_eq!(format, Format::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_format_defaults_to_text() {
        let cli = Cli::try_parse_from(["metastyle", "resolve", "scene.yaml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Resolve {
                format: Format::Text,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["metastyle"]).is_err());
    }
}
