use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use wit::areas::layout::LOG_ENV;
use wit::areas::repository::Repository;
use wit::artifacts::errors::WitError;
use wit::commands::porcelain::commit::CommitOutcome;

#[derive(Parser)]
#[command(
    name = "wit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal local version control system",
    long_about = "wit keeps full snapshots of a directory tree in a .wit metadata directory. \
    It supports staging, commits, branches, checkout and merging, all on the local filesystem.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Copy a file or directory into the staging area",
        long_about = "This command copies the given path into the staging area. \
        Adding the repository root stages the whole working tree."
    )]
    Add {
        #[arg(index = 1, help = "The path to stage")]
        path: Option<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staging area as a new commit. \
        Nothing is written when the staging area matches HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
        #[arg(trailing_var_arg = true, help = "The commit message, as free words")]
        words: Vec<String>,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit",
        long_about = "This command restores the snapshot of a branch or commit id. \
        It refuses to run while staged or unstaged changes are pending."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit id")]
        target: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: Option<String>,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into HEAD",
        long_about = "This command copies the files a branch changed since the common ancestor \
        and records a commit with two parents."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: Option<String>,
    },
    #[command(name = "graph", about = "Print the commit history as a Graphviz digraph")]
    Graph,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => pwd.join(path),
                None => pwd,
            };
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init()?
        }
        Commands::Add { path } => {
            let path = pwd.join(required(path, "path")?);
            // discover from the target so paths in nested repositories resolve there
            let start = if path.exists() { path.clone() } else { pwd };
            let mut repository = open(&start)?;

            repository.add(&path)?
        }
        Commands::Commit { message, words } => {
            let message = match message {
                Some(message) => message.clone(),
                None => words.join(" "),
            };
            let mut repository = open(&pwd)?;

            if repository.commit(&message)? == CommitOutcome::Unchanged {
                println!("nothing to commit, staging area matches HEAD");
            }
        }
        Commands::Status => {
            let repository = open(&pwd)?;

            repository.print_status()?
        }
        Commands::Checkout { target } => {
            let mut repository = open(&pwd)?;

            repository.checkout(required(target, "commit id or branch")?)?;
        }
        Commands::Branch { name } => {
            let mut repository = open(&pwd)?;

            repository.branch(required(name, "branch name")?)?
        }
        Commands::Merge { branch } => {
            let mut repository = open(&pwd)?;

            if repository.merge(required(branch, "branch")?)? == CommitOutcome::Unchanged {
                println!("already up to date");
            }
        }
        Commands::Graph => {
            let repository = open(&pwd)?;

            repository.print_graph()?
        }
    }

    Ok(())
}

fn open(start: &Path) -> Result<Repository> {
    Ok(Repository::discover(start, Box::new(std::io::stdout()))?)
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, WitError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(WitError::MissingArgument(name)),
    }
}
