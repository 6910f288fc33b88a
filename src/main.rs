use anyhow::Result;
use clap::{Parser, Subcommand};
use repo_layout::logging;
use std::path::PathBuf;

mod provision;

#[derive(Parser)]
#[command(name = "repo-layout")]
#[command(about = "Provision Mercurial and Git repository layouts for version manager tests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Mercurial backend parameters for an app
    #[command(alias = "p")]
    Params {
        /// App name
        app_name: String,
        /// Layout root (holds versions/ and the named repos)
        #[arg(long)]
        root: PathBuf,
        #[command(flatten)]
        options: provision::ParamsArgs,
    },
    /// Create a layout on disk and leave it there
    Provision {
        /// Layout root (holds versions/ and the named repos)
        #[arg(long)]
        root: PathBuf,
        /// Repository to create, as NAME=mercurial|git
        #[arg(long = "repo", value_parser = provision::parse_repo_spec)]
        repos: Vec<provision::RepoSpec>,
        /// File to commit, as REPO:PATH=CONTENT
        #[arg(long = "file", value_parser = provision::parse_file_spec)]
        files: Vec<provision::FileSpec>,
        /// Also report backend parameters for this app
        #[arg(long)]
        app_name: Option<String>,
        #[command(flatten)]
        options: provision::ParamsArgs,
    },
}

fn main() -> Result<()> {
    logging::init_to(logging::Target::Stderr);

    let cli = Cli::parse();

    match cli.command {
        Commands::Params {
            app_name,
            root,
            options,
        } => {
            provision::print_params(&root, &app_name, options)?;
        }
        Commands::Provision {
            root,
            repos,
            files,
            app_name,
            options,
        } => {
            provision::run(&root, &repos, &files, app_name.as_deref(), options)?;
        }
    }

    Ok(())
}
