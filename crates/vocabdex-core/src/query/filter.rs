use std::collections::HashSet;

use crate::models::{ClassId, DatatypeId, SearchRequest, TermId};
use crate::store::WordCandidate;

/// Conjunctive structural filter applied to every candidate before ranking.
#[derive(Debug, Default)]
pub(super) struct StructuralFilter {
    require_classes: HashSet<ClassId>,
    exclude_classes: HashSet<ClassId>,
    require_datatypes: HashSet<DatatypeId>,
    exclude_datatypes: HashSet<DatatypeId>,
    /// `Some` restricts results to the answers of the requested question, even when empty.
    answers: Option<HashSet<TermId>>,
}

impl StructuralFilter {
    pub(super) fn new(request: &SearchRequest, answers: Option<Vec<TermId>>) -> Self {
        Self {
            require_classes: request.class_filters.iter().copied().collect(),
            exclude_classes: request.exclude_classes.iter().copied().collect(),
            require_datatypes: request.datatype_filters.iter().copied().collect(),
            exclude_datatypes: request.exclude_datatypes.iter().copied().collect(),
            answers: answers.map(|ids| ids.into_iter().collect()),
        }
    }

    pub(super) fn accepts(&self, candidate: &WordCandidate) -> bool {
        if !self.require_classes.is_empty() && !self.require_classes.contains(&candidate.class_id)
        {
            return false;
        }
        if self.exclude_classes.contains(&candidate.class_id) {
            return false;
        }
        if !self.require_datatypes.is_empty()
            && !self.require_datatypes.contains(&candidate.datatype_id)
        {
            return false;
        }
        if self.exclude_datatypes.contains(&candidate.datatype_id) {
            return false;
        }
        self.answers
            .as_ref()
            .is_none_or(|answers| answers.contains(&candidate.term_id))
    }
}
