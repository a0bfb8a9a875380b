// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! InterviewAce - backend-for-frontend gateway and terminal practice client.
//!
//! This is the binary entry point.

mod practice;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use interviewace_config::model::InterviewAceConfig;
use interviewace_core::types::Difficulty;
use interviewace_core::validation::DEFAULT_QUESTION_COUNT;
use uuid::Uuid;

use crate::practice::PracticeOptions;

/// InterviewAce - AI mock interviews.
#[derive(Parser, Debug)]
#[command(name = "interviewace", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the gateway server.
    Serve,
    /// Run a mock interview in the terminal against a running gateway.
    Practice {
        /// Account email to sign in with.
        #[arg(long)]
        email: String,
        /// Number of questions (5-30).
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        question_count: u32,
        /// easy, medium, hard or mixed.
        #[arg(long, default_value_t = Difficulty::Mixed)]
        difficulty: Difficulty,
        /// Generate questions from this analyzed resume.
        #[arg(long)]
        resume_id: Option<Uuid>,
        /// Topic to emphasize; repeat for several.
        #[arg(long = "focus")]
        focus: Vec<String>,
    },
    /// Manage InterviewAce configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Load and validate the configuration, reporting any errors.
    Check,
}

fn load_config(path: Option<&std::path::Path>) -> InterviewAceConfig {
    let loaded = match path {
        Some(path) => interviewace_config::load_and_validate_path(path),
        None => interviewace_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            interviewace_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("{}: {e}", "error".red());
                std::process::exit(1);
            }
        }
        Some(Commands::Practice {
            email,
            question_count,
            difficulty,
            resume_id,
            focus,
        }) => {
            serve::init_tracing(&config.logging.level);
            let options = PracticeOptions {
                email,
                question_count,
                difficulty,
                resume_id,
                focus_areas: focus,
            };
            if let Err(e) = practice::run_practice(&config, options).await {
                eprintln!("{}: {}", "error".red(), interviewace_client::error_message(&e));
                std::process::exit(1);
            }
        }
        Some(Commands::Config {
            action: ConfigCommands::Check,
        }) => {
            println!(
                "{} gateway on {}, upstream {}",
                "config ok:".green(),
                config.server.bind_address(),
                config.upstream.base_url
            );
        }
        None => {
            println!("interviewace: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write as _;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn practice_defaults_match_interview_defaults() {
        let cli = Cli::try_parse_from(["interviewace", "practice", "--email", "a@b.co"]).unwrap();
        let Some(Commands::Practice {
            question_count,
            difficulty,
            resume_id,
            focus,
            ..
        }) = cli.command
        else {
            panic!("expected practice command");
        };
        assert_eq!(question_count, 12);
        assert_eq!(difficulty, Difficulty::Mixed);
        assert!(resume_id.is_none());
        assert!(focus.is_empty());
    }

    #[test]
    fn practice_parses_difficulty_and_repeated_focus() {
        let cli = Cli::try_parse_from([
            "interviewace",
            "practice",
            "--email",
            "a@b.co",
            "--difficulty",
            "hard",
            "--focus",
            "rust",
            "--focus",
            "sql",
        ])
        .unwrap();
        let Some(Commands::Practice {
            difficulty, focus, ..
        }) = cli.command
        else {
            panic!("expected practice command");
        };
        assert_eq!(difficulty, Difficulty::Hard);
        assert_eq!(focus, ["rust", "sql"]);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let result = Cli::try_parse_from([
            "interviewace",
            "practice",
            "--email",
            "a@b.co",
            "--difficulty",
            "brutal",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["interviewace", "config", "check", "--config", "ace.toml"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("ace.toml")));
    }

    #[test]
    #[serial_test::serial]
    fn explicit_config_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 4100\n").unwrap();
        let config = load_config(Some(file.path()));
        assert_eq!(config.server.port, 4100);
    }
}
