//! ovo CLI — project scaffolding from placeholder templates.
//!
//! `ovo new` materializes a project from a built-in template or from a
//! template directory on disk; `ovo templates` lists the built-in kinds.
//! Build-side commands (`ovo build`, `ovo run`, `ovo test`) are driven by
//! the native toolchains and live outside this binary.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ovo_core::TemplateKind;

#[derive(Parser)]
#[command(
    name = "ovo",
    about = "Project scaffolding — C and C++ starter projects from templates",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a template
    New {
        /// Project name (creates a directory with this name)
        name: String,

        /// Built-in template to use
        #[arg(long, short, value_enum, conflicts_with = "from_dir")]
        template: Option<TemplateChoice>,

        /// Scaffold from a template directory on disk instead
        #[arg(long)]
        from_dir: Option<PathBuf>,

        /// Parent directory for the new project (default: current directory)
        #[arg(long, default_value = ".")]
        dest: PathBuf,

        /// Overwrite files that already exist at the destination
        #[arg(long)]
        force: bool,
    },

    /// List the built-in templates
    Templates,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TemplateChoice {
    C,
    CppExe,
    CppLib,
}

impl TemplateChoice {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::C => TemplateKind::CProject,
            Self::CppExe => TemplateKind::CppExe,
            Self::CppLib => TemplateKind::CppLib,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::New {
            name,
            template,
            from_dir,
            dest,
            force,
        } => {
            commands::new::run(&name, template, from_dir.as_deref(), &dest, force).await?;
        }
        Commands::Templates => {
            commands::templates::run().await?;
        }
    }

    Ok(())
}
