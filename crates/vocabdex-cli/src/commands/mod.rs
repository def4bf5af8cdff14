use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use vocabdex_core::models::{NameDraft, NameId, ReindexOptions, TermId};
use vocabdex_core::{Locale, VocabError, Vocabulary};

use crate::cli::{Commands, NameCommand, ReindexArgs, TermCommand};

mod support;


pub(crate) use self::support::report_failure;
use self::support::{
    build_search_request, parse_name_type, print_json, read_term_drafts, term_ids,
};

pub(crate) fn run_from_root(root: &Path, command: Commands) -> Result<()> {
    let app = Vocabulary::new(root).context("failed to open vocabulary")?;
    run_validated(&app, root, command)
}

fn run_validated(app: &Vocabulary, root: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {
            println!("initialized at {}", root.display());
        }
        Commands::Import(args) => {
            let drafts = read_term_drafts(&args.file)?;
            let mut created = Vec::with_capacity(drafts.len());
            for draft in drafts {
                created.push(app.create_term(draft)?);
            }
            print_json(&created)?;
        }
        Commands::Show(arg) => {
            let term = app
                .get_term(TermId(arg.id))?
                .ok_or_else(|| VocabError::NotFound(format!("term {}", arg.id)))?;
            print_json(&term)?;
        }
        Commands::Words(arg) => {
            print_json(&app.words_for(TermId(arg.id))?)?;
        }
        Commands::Term(args) => handle_term(app, args.command)?,
        Commands::Name(args) => handle_name(app, args.command)?,
        Commands::Search(args) => {
            let request = build_search_request(args, app.config().search.default_limit)?;
            print_json(&app.search(&request)?)?;
        }
        Commands::Reindex(args) => handle_reindex(app, &args)?,
    }
    Ok(())
}

fn handle_term(app: &Vocabulary, command: TermCommand) -> Result<()> {
    match command {
        TermCommand::Void { id, reason } => {
            app.void_term(TermId(id), &reason)?;
            print_json(&json!({ "term_id": id, "voided": true }))?;
        }
        TermCommand::Unvoid { id } => {
            app.unvoid_term(TermId(id))?;
            print_json(&json!({ "term_id": id, "voided": false }))?;
        }
        TermCommand::Purge { id } => {
            app.purge_term(TermId(id))?;
            print_json(&json!({ "term_id": id, "purged": true }))?;
        }
        TermCommand::Answers { id, set } => {
            if let Some(answers) = set {
                app.set_answers(TermId(id), &term_ids(&answers))?;
            }
            print_json(&app.answers_for(TermId(id))?)?;
        }
        TermCommand::Questions { id } => {
            print_json(&app.questions_for_answer(TermId(id))?)?;
        }
        TermCommand::Members { id, set } => {
            if let Some(members) = set {
                app.set_members(TermId(id), &term_ids(&members))?;
            }
            print_json(&app.set_members_of(TermId(id))?)?;
        }
    }
    Ok(())
}

fn handle_name(app: &Vocabulary, command: NameCommand) -> Result<()> {
    match command {
        NameCommand::Add {
            term,
            text,
            locale,
            name_type,
            preferred,
        } => {
            let locale = Locale::parse(&locale)?;
            let mut draft = NameDraft::new(text, locale, parse_name_type(&name_type)?);
            draft.locale_preferred = preferred;
            let name_id = app.add_name(TermId(term), draft)?;
            print_json(&json!({ "term_id": term, "name_id": name_id }))?;
        }
        NameCommand::Update {
            id,
            text,
            locale,
            name_type,
            preferred,
        } => {
            let locale = Locale::parse(&locale)?;
            let mut draft = NameDraft::new(text, locale, parse_name_type(&name_type)?);
            draft.locale_preferred = preferred;
            print_json(&app.update_name(NameId(id), draft)?)?;
        }
        NameCommand::Void { id, reason } => {
            app.void_name(NameId(id), &reason)?;
            print_json(&json!({ "name_id": id, "voided": true }))?;
        }
        NameCommand::Unvoid { id } => {
            app.unvoid_name(NameId(id))?;
            print_json(&json!({ "name_id": id, "voided": false }))?;
        }
    }
    Ok(())
}

fn handle_reindex(app: &Vocabulary, args: &ReindexArgs) -> Result<()> {
    if let Some(id) = args.term {
        let words = app.reindex_term(TermId(id))?;
        return print_json(&json!({ "term_id": id, "words_written": words }));
    }
    let options = ReindexOptions {
        start_after: args.start_after.map(TermId),
        cancel: None,
    };
    print_json(&app.reindex_all(&options)?)
}
