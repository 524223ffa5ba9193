//! Survey answer collection.
//!
//! `SurveyResponse` stores one optional option index per catalog slot, so an
//! answer can only ever be one of the question's allowed options. A
//! `Submission` is the frozen, complete form that goes over the wire.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{self, CATALOG};
use crate::error::SurveyError;

/// Answers recorded so far, indexed by catalog position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
    selections: Vec<Option<usize>>,
}

impl Default for SurveyResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyResponse {
    /// Creates an empty response with no question answered.
    pub fn new() -> Self {
        Self { selections: vec![None; CATALOG.len()] }
    }

    /// Records `value` as the answer to `key`, replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// `UnknownQuestion` if `key` is not in the catalog, `InvalidOption` if
    /// `value` is not one of that question's options.
    pub fn record_answer(&mut self, key: &str, value: &str) -> Result<(), SurveyError> {
        let index = catalog::position(key)
            .ok_or_else(|| SurveyError::UnknownQuestion(key.to_owned()))?;
        let option = CATALOG[index].option_index(value).ok_or_else(|| {
            SurveyError::InvalidOption { key: key.to_owned(), value: value.to_owned() }
        })?;
        self.selections[index] = Some(option);
        Ok(())
    }

    /// Index-based form of [`record_answer`](Self::record_answer) used by the UI.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn select_option(&mut self, question: usize, option: usize) -> bool {
        match CATALOG.get(question) {
            Some(q) if option < q.options.len() => {
                self.selections[question] = Some(option);
                true
            }
            _ => false,
        }
    }

    /// Selected option index for the question at `question`.
    pub fn selected(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.selections.iter().all(Option::is_some)
    }

    /// Keys still lacking an answer, in catalog order.
    pub fn missing(&self) -> Vec<&'static str> {
        CATALOG
            .iter()
            .zip(&self.selections)
            .filter(|(_, s)| s.is_none())
            .map(|(q, _)| q.key)
            .collect()
    }

    /// Catalog position of the first unanswered question.
    pub fn first_missing(&self) -> Option<usize> {
        self.selections.iter().position(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.selections.iter_mut().for_each(|s| *s = None);
    }

    /// Freezes the answers into a request body.
    ///
    /// # Errors
    ///
    /// `SurveyError::Incomplete` unless every catalog question is answered.
    pub fn submission(&self) -> Result<Submission, SurveyError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(SurveyError::Incomplete { missing });
        }
        let answers = CATALOG
            .iter()
            .zip(&self.selections)
            .filter_map(|(q, sel)| sel.map(|o| (q.key, q.options[o])))
            .collect();
        Ok(Submission { answers })
    }
}

/// A complete set of answers, one per catalog key.
///
/// Serializes as the flat `{ key: option }` object `/predict_mood` expects.
/// Only [`SurveyResponse::submission`] constructs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    answers: BTreeMap<&'static str, &'static str>,
}

impl Submission {
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.answers.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
