use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TermArgs {
    #[command(subcommand)]
    pub command: TermCommand,
}

#[derive(Debug, Subcommand)]
pub enum TermCommand {
    Void {
        id: i64,
        #[arg(long)]
        reason: String,
    },
    Unvoid {
        id: i64,
    },
    Purge {
        id: i64,
    },
    /// Lists coded answers, or replaces them when `--set` is given.
    Answers {
        id: i64,
        #[arg(long, num_args = 0.., value_delimiter = ',')]
        set: Option<Vec<i64>>,
    },
    Questions {
        id: i64,
    },
    /// Lists set members, or replaces them when `--set` is given.
    Members {
        id: i64,
        #[arg(long, num_args = 0.., value_delimiter = ',')]
        set: Option<Vec<i64>>,
    },
}

impl TermCommand {
    pub fn term_id(&self) -> i64 {
        match self {
            Self::Void { id, .. }
            | Self::Unvoid { id }
            | Self::Purge { id }
            | Self::Answers { id, .. }
            | Self::Questions { id }
            | Self::Members { id, .. } => *id,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::Void { .. } => "void_term",
            Self::Unvoid { .. } => "unvoid_term",
            Self::Purge { .. } => "purge_term",
            Self::Answers { set: Some(_), .. } => "set_answers",
            Self::Answers { set: None, .. } => "answers_for",
            Self::Questions { .. } => "questions_for_answer",
            Self::Members { set: Some(_), .. } => "set_members",
            Self::Members { set: None, .. } => "set_members_of",
        }
    }
}
