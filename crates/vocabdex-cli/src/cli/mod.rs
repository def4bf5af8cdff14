use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod name;
mod term;


pub use args::{ImportArgs, ReindexArgs, SearchArgs, TermIdArg};
pub use name::{NameArgs, NameCommand};
pub use term::{TermArgs, TermCommand};

#[derive(Debug, Parser)]
#[command(name = "vocabdex")]
#[command(about = "Weighted terminology search index", version)]
pub struct Cli {
    #[arg(long, default_value = ".vocabdex")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Init,
    Import(ImportArgs),
    Show(TermIdArg),
    Words(TermIdArg),
    Term(TermArgs),
    Name(NameArgs),
    Search(SearchArgs),
    Reindex(ReindexArgs),
}

impl Commands {
    /// Operation name reported in error payloads.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Import(_) => "import",
            Self::Show(_) => "show",
            Self::Words(_) => "words",
            Self::Term(args) => args.command.operation(),
            Self::Name(args) => args.command.operation(),
            Self::Search(_) => "search",
            Self::Reindex(args) if args.term.is_some() => "reindex_term",
            Self::Reindex(_) => "reindex_all",
        }
    }

    pub fn target(&self) -> Option<String> {
        match self {
            Self::Init | Self::Search(_) => None,
            Self::Import(args) => Some(args.file.display().to_string()),
            Self::Show(arg) | Self::Words(arg) => Some(arg.id.to_string()),
            Self::Term(args) => Some(args.command.term_id().to_string()),
            Self::Name(args) => Some(args.command.target_id().to_string()),
            Self::Reindex(args) => args.term.map(|id| id.to_string()),
        }
    }
}
