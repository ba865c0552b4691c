// src/cli.rs
// =============================================================================
// Command-line interface, declared with clap's derive API.
//
//   course-index check   <ROOT> [--json]
//   course-index export  <ROOT> [--output FILE] [--compact]
//   course-index nav     <ROOT> <CHAPTER_ID> [--json]
//   course-index outline <ROOT>
//   course-index links   <ROOT> [--json]
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "course-index",
    version,
    about = "Discover, validate and export the chapters of a markdown course",
    long_about = "course-index reads a course content tree (sections with section.toml, \
                  chapters with chapter.toml + index.md), checks that every section's \
                  previous/next chapter links form a single chain, and exports the result."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report every chapter link problem in the content tree
    ///
    /// Example: course-index check ./content
    Check {
        /// Content root directory
        root: PathBuf,

        /// Output findings as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the validated course as JSON
    ///
    /// Example: course-index export ./content --output dist/course.json
    Export {
        /// Content root directory
        root: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the previous and next chapter of a chapter
    ///
    /// Example: course-index nav ./content feature-addition
    Nav {
        /// Content root directory
        root: PathBuf,

        /// Id of the chapter to look up
        chapter_id: String,

        #[arg(long)]
        json: bool,
    },

    /// Print sections in display order with chapters in reading order
    Outline {
        /// Content root directory
        root: PathBuf,
    },

    /// Check external links found in chapter content
    ///
    /// Example: course-index links ./content --json
    Links {
        /// Content root directory
        root: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nav() {
        let cli = Cli::parse_from(["course-index", "-vv", "nav", "content", "agent-setup", "--json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Nav {
                root,
                chapter_id,
                json,
            } => {
                assert_eq!(root, PathBuf::from("content"));
                assert_eq!(chapter_id, "agent-setup");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::parse_from(["course-index", "export", "content"]);
        assert!(matches!(
            cli.command,
            Commands::Export {
                output: None,
                compact: false,
                ..
            }
        ));
    }
}
