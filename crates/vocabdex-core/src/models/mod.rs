mod reindex;
mod search;
mod term;

pub use reindex::{ReindexFailure, ReindexOptions, ReindexReport};
pub use search::{MatchMode, PageRequest, SearchHit, SearchPage, SearchRequest};
pub use term::{
    ClassId, DatatypeId, NameDraft, NameId, NameType, Term, TermDraft, TermId, TermName, Word,
};
