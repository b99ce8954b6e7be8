use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use twig::areas::repository::Repository;
use twig::artifacts::core::{PagerWriter, pager_enabled};
use twig::artifacts::objects::commit::Signature;
use twig::artifacts::objects::object_type::ObjectType;
use twig::errors::TwigError;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TWIG_LOG";

/// Exit status for failures the store itself detected
const FATAL_EXIT_CODE: u8 = 128;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A small content-addressable version control store",
    long_about = "twig stores file contents as immutable objects keyed by their SHA-1 digest, \
    builds directory trees from a staging index and records history as a graph of commits.",
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
        long_about = "This command creates an empty repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute an object ID and optionally store the object",
        long_about = "This command hashes a file as an object of the given type. \
        With -w the object is also written to the object database."
    )]
    HashObject {
        #[arg(
            short = 't',
            long = "type",
            default_value = "blob",
            value_parser = parse_object_type,
            help = "The object type"
        )]
        object_type: ObjectType,
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints an object named by digest, short digest or ref. \
        Commits are followed to their tree when a tree is requested."
    )]
    CatFile {
        #[arg(index = 1, value_parser = parse_object_type, help = "The expected object type")]
        object_type: ObjectType,
        #[arg(index = 2, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stores the given files as blobs and records them in the index."
    )]
    Add {
        #[arg(short = 'a', long = "all", conflicts_with = "path", required_unless_present = "path", help = "Stage every file in the working tree")]
        all: bool,
        #[arg(long, help = "The file or directory to stage")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged files as a new commit",
        long_about = "This command builds trees from the index and commits them on top of HEAD. \
        Nothing is recorded when the staged tree matches HEAD."
    )]
    Commit {
        #[arg(index = 1, help = "The author's name")]
        author: String,
        #[arg(index = 2, help = "The committer's name")]
        committer: String,
        #[arg(index = 3, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "checkout",
        about = "Write the tree of a commit into an empty directory",
        long_about = "This command expands a commit or tree into a directory that must not exist or be empty."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit or tree to check out")]
        commit: String,
        #[arg(index = 2, help = "The empty directory to write to")]
        path: PathBuf,
    },
    #[command(
        name = "log",
        about = "Print commit ancestry",
        long_about = "This command prints the ancestry of a commit as a graphviz digraph."
    )]
    Log {
        #[arg(index = 1, default_value = "HEAD", help = "The commit to start at")]
        commit: String,
    },
}

fn parse_object_type(value: &str) -> Result<ObjectType, String> {
    ObjectType::try_from(value).map_err(|e| e.to_string())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_repository(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd, writer)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(path))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => absolute(&path)?,
                None => std::env::current_dir()?,
            };
            let repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init()?
        }
        Commands::HashObject {
            object_type,
            write,
            file,
        } => {
            let repository = if write {
                open_repository(Box::new(std::io::stdout()))?
            } else {
                Repository::new(&std::env::current_dir()?, Box::new(std::io::stdout()))?
            };

            repository.hash_object(&file, object_type, write)?;
        }
        Commands::CatFile {
            object_type,
            object,
        } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.cat_file(object_type, &object)?
        }
        Commands::Add { all, path } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;
            let path = match (all, path) {
                (true, _) | (false, None) => None,
                (false, Some(path)) => Some(absolute(&path)?),
            };

            repository.add(path.as_deref())?
        }
        Commands::Commit {
            author,
            committer,
            message,
        } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;
            let author = Signature::load_from_env(author)?.display();
            let committer = Signature::load_from_env(committer)?.display();
            let message = format!("{}\n", message.trim_end());

            repository.commit(&author, &committer, &message)?;
        }
        Commands::Checkout { commit, path } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.checkout(&commit, &absolute(&path)?)?
        }
        Commands::Log { commit } => {
            if pager_enabled() {
                let pager = minus::Pager::new();
                let repository =
                    open_repository(Box::new(PagerWriter::new(pager.clone())))?;
                repository.log(&commit)?;
                drop(repository);

                minus::page_all(pager)?;
            } else {
                let repository = open_repository(Box::new(std::io::stdout()))?;

                repository.log(&commit)?
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {:#}", "fatal:".red().bold(), error);
            match TwigError::kind_of(&error) {
                Some(_) => ExitCode::from(FATAL_EXIT_CODE),
                None => ExitCode::FAILURE,
            }
        }
    }
}
