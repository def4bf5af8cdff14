use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct NameArgs {
    #[command(subcommand)]
    pub command: NameCommand,
}

#[derive(Debug, Subcommand)]
pub enum NameCommand {
    Add {
        term: i64,
        text: String,
        #[arg(long)]
        locale: String,
        /// fully_specified | short | synonym | index_term | untyped
        #[arg(long = "type", default_value = "synonym")]
        name_type: String,
        #[arg(long, default_value_t = false)]
        preferred: bool,
    },
    /// Rewrites a name in full; the term's index is rebuilt.
    Update {
        id: i64,
        #[arg(long)]
        text: String,
        #[arg(long)]
        locale: String,
        #[arg(long = "type")]
        name_type: String,
        #[arg(long, default_value_t = false)]
        preferred: bool,
    },
    Void {
        id: i64,
        #[arg(long)]
        reason: String,
    },
    Unvoid {
        id: i64,
    },
}

impl NameCommand {
    /// Term id for `add`, name id otherwise.
    pub fn target_id(&self) -> i64 {
        match self {
            Self::Add { term, .. } => *term,
            Self::Update { id, .. } | Self::Void { id, .. } | Self::Unvoid { id } => *id,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add_name",
            Self::Update { .. } => "update_name",
            Self::Void { .. } => "void_name",
            Self::Unvoid { .. } => "unvoid_name",
        }
    }
}
