//! Template: one generalized message shape.
//!
//! A template is a sequence of literal tokens and wildcard slots. It answers
//! two questions for the store:
//! - how well does a new token sequence match it ([`Template::score`])
//! - how does it change once that sequence is merged in ([`Template::absorb`])
//!
//! Both use the same greedy forward scan: each literal looks for its first
//! equal token at or after the position of the previous hit. This is not a
//! longest-common-subsequence computation and must not become one, since it
//! decides which records end up in which template.

use std::fmt;

use serde::Serialize;

use super::symbol::{RecordId, Symbol};

/// A wildcard slot paired with the token a concrete record carried there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter<T> {
    /// 1-based position of the wildcard in the template
    pub position: usize,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<T> {
    sequence: Vec<Symbol<T>>,
    /// 1-based positions of every wildcard in `sequence`, ascending
    wildcard_positions: Vec<usize>,
    record_ids: Vec<RecordId>,
}

impl<T> Template<T> {
    /// Number of symbols (literals and wildcards)
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of records absorbed, including the one that created it
    pub fn count(&self) -> usize {
        self.record_ids.len()
    }

    pub fn symbols(&self) -> &[Symbol<T>] {
        &self.sequence
    }

    pub fn wildcard_positions(&self) -> &[usize] {
        &self.wildcard_positions
    }

    pub fn record_ids(&self) -> &[RecordId] {
        &self.record_ids
    }

    fn refresh_wildcard_positions(&mut self) {
        self.wildcard_positions = self
            .sequence
            .iter()
            .enumerate()
            .filter(|(_, symbol)| symbol.is_wildcard())
            .map(|(index, _)| index + 1)
            .collect();
    }
}

impl<T: PartialEq + Clone> Template<T> {
    /// Create a template that is exactly `tokens`, with no wildcards.
    pub fn new(tokens: &[T], record_id: Option<RecordId>) -> Self {
        Self {
            sequence: tokens.iter().cloned().map(Symbol::Literal).collect(),
            wildcard_positions: Vec::new(),
            record_ids: record_id.into_iter().collect(),
        }
    }

    /// Greedy ordered match count between this template's literals and `tokens`.
    ///
    /// A literal with no equal token after the previous hit is skipped and
    /// leaves the cursor where it was.
    pub fn score(&self, tokens: &[T]) -> usize {
        let mut cursor = 0;
        let mut hits = 0;
        for token in self.sequence.iter().filter_map(Symbol::as_literal) {
            if let Some(hit) = find_from(tokens, cursor, token) {
                cursor = hit + 1;
                hits += 1;
            }
        }
        hits
    }

    /// Merge `tokens` into the template, turning unmatched literals into
    /// wildcards. The first symbol always stays literal.
    pub fn absorb(&mut self, tokens: &[T], record_id: Option<RecordId>) {
        self.merge(tokens, record_id, true);
    }

    /// [`Template::absorb`] with the leading-symbol guard made optional.
    pub(crate) fn merge(&mut self, tokens: &[T], record_id: Option<RecordId>, preserve_leading: bool) {
        let mut merged: Vec<Symbol<T>> = Vec::with_capacity(self.sequence.len());
        let mut cursor = 0;

        for (index, symbol) in self.sequence.drain(..).enumerate() {
            match symbol {
                Symbol::Wildcard => push_wildcard(&mut merged),
                Symbol::Literal(token) => match find_from(tokens, cursor, &token) {
                    Some(hit) => {
                        cursor = hit + 1;
                        merged.push(Symbol::Literal(token));
                    }
                    None if index == 0 && preserve_leading => merged.push(Symbol::Literal(token)),
                    None => push_wildcard(&mut merged),
                },
            }
        }

        self.sequence = merged;
        self.refresh_wildcard_positions();
        if let Some(id) = record_id {
            self.record_ids.push(id);
        }
    }

    /// Values `tokens` carries at this template's wildcard slots.
    ///
    /// Positions past the end of `tokens` are left out.
    pub fn parameters(&self, tokens: &[T]) -> Vec<Parameter<T>> {
        self.wildcard_positions
            .iter()
            .filter_map(|&position| {
                tokens.get(position - 1).map(|value| Parameter {
                    position,
                    value: value.clone(),
                })
            })
            .collect()
    }
}

/// Index of the first token equal to `token` at or after `cursor`.
fn find_from<T: PartialEq>(tokens: &[T], cursor: usize, token: &T) -> Option<usize> {
    tokens
        .get(cursor..)?
        .iter()
        .position(|candidate| candidate == token)
        .map(|offset| cursor + offset)
}

/// Push a wildcard unless the previous symbol already is one.
fn push_wildcard<T>(merged: &mut Vec<Symbol<T>>) {
    if !merged.last().is_some_and(Symbol::is_wildcard) {
        merged.push(Symbol::Wildcard);
    }
}

impl<T: fmt::Display> fmt::Display for Template<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, symbol) in self.sequence.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
