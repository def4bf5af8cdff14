use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct TermIdArg {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding one term draft or an array of them; `-` reads stdin.
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub phrase: String,
    #[arg(long = "locale")]
    pub locales: Vec<String>,
    #[arg(long, default_value_t = false)]
    pub include_voided: bool,
    #[arg(long)]
    pub class: Vec<i64>,
    #[arg(long)]
    pub exclude_class: Vec<i64>,
    #[arg(long)]
    pub datatype: Vec<i64>,
    #[arg(long)]
    pub exclude_datatype: Vec<i64>,
    #[arg(long)]
    pub answer_to: Option<i64>,
    /// start | anywhere | exact
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long, default_value_t = false)]
    pub wildcards: bool,
    #[arg(long)]
    pub offset: Option<usize>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ReindexArgs {
    /// Rebuild a single term instead of the whole index.
    #[arg(long, conflicts_with = "start_after")]
    pub term: Option<i64>,
    /// Resume a batch rebuild after this term id.
    #[arg(long)]
    pub start_after: Option<i64>,
}
