use std::io::{Read, Write};
use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result};
use serde::Deserialize;
use vocabdex_core::models::{
    ClassId, DatatypeId, MatchMode, NameType, PageRequest, SearchRequest, TermDraft, TermId,
};
use vocabdex_core::{ErrorPayload, VocabError};

use crate::cli::SearchArgs;

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Writes the failure as an `ErrorPayload` on stderr so stdout stays parseable.
pub(crate) fn report_failure(operation: &str, target: Option<String>, err: &anyhow::Error) {
    let payload = error_payload(operation, target, err);
    let mut stderr = io::stderr().lock();
    if serde_json::to_writer_pretty(&mut stderr, &payload).is_err() {
        let _ = writeln!(stderr, "{err:#}");
        return;
    }
    let _ = writeln!(stderr);
}

pub(super) fn error_payload(
    operation: &str,
    target: Option<String>,
    err: &anyhow::Error,
) -> ErrorPayload {
    match err.downcast_ref::<VocabError>() {
        Some(vocab) => vocab.to_payload(operation, target),
        None => VocabError::Internal(format!("{err:#}")).to_payload(operation, target),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<TermDraft>),
    One(TermDraft),
}

pub(super) fn read_term_drafts(path: &Path) -> Result<Vec<TermDraft>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read term drafts from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    let parsed = serde_json::from_str::<ImportFile>(&raw).map_err(VocabError::from)?;
    Ok(match parsed {
        ImportFile::Many(drafts) => drafts,
        ImportFile::One(draft) => vec![draft],
    })
}

pub(super) fn parse_name_type(raw: &str) -> Result<NameType> {
    Ok(raw.parse::<NameType>()?)
}

pub(super) fn term_ids(raw: &[i64]) -> Vec<TermId> {
    raw.iter().copied().map(TermId).collect()
}

pub(super) fn build_search_request(args: SearchArgs, default_limit: usize) -> Result<SearchRequest> {
    let mut request = SearchRequest::new(args.phrase).with_locale_tags(&args.locales)?;
    request.include_voided = args.include_voided;
    request.class_filters = args.class.into_iter().map(ClassId).collect();
    request.exclude_classes = args.exclude_class.into_iter().map(ClassId).collect();
    request.datatype_filters = args.datatype.into_iter().map(DatatypeId).collect();
    request.exclude_datatypes = args.exclude_datatype.into_iter().map(DatatypeId).collect();
    request.answer_to = args.answer_to.map(TermId);
    request.match_mode = args
        .mode
        .as_deref()
        .map(str::parse::<MatchMode>)
        .transpose()?;
    request.wildcards = args.wildcards;
    request.page = match (args.offset, args.limit) {
        (None, None) => None,
        (offset, limit) => Some(PageRequest {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(default_limit),
        }),
    };
    Ok(request)
}
