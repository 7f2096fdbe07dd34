//! TemplateStore: the flat template list for one partition.
//!
//! Every lookup scans all templates in insertion order. Templates whose
//! length is too far from the record's are skipped before scoring; the rest
//! must reach the match threshold, and the highest score wins. Ties keep the
//! earlier template.

use std::fmt;

use serde::Serialize;

use super::dump::{StoreDump, TemplateDump};
use super::symbol::RecordId;
use super::template::{Parameter, Template};
use crate::conf::MinerConfig;

/// What an insert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    pub record_id: RecordId,
    /// Index of the template that received the record
    pub template_index: usize,
    /// True when the record started a new template
    pub created: bool,
}

/// A matched template with the values found at its wildcard slots.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch<'a, T> {
    pub template: &'a Template<T>,
    pub parameters: Vec<Parameter<T>>,
}

#[derive(Debug, Clone)]
pub struct TemplateStore<T> {
    templates: Vec<Template<T>>,
    last_record_id: Option<RecordId>,
    config: MinerConfig,
}

impl<T> TemplateStore<T> {
    pub fn new() -> Self {
        Self::with_config(MinerConfig::default())
    }

    pub fn with_config(config: MinerConfig) -> Self {
        Self {
            templates: Vec::new(),
            last_record_id: None,
            config,
        }
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn template_at(&self, index: usize) -> Option<&Template<T>> {
        self.templates.get(index)
    }

    pub fn templates(&self) -> &[Template<T>] {
        &self.templates
    }

    /// Id handed to the most recent insert, 0 before the first one
    pub fn last_record_id(&self) -> u64 {
        self.last_record_id.map_or(0, RecordId::get)
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    fn next_record_id(&mut self) -> RecordId {
        let next = self.last_record_id.map_or(RecordId::FIRST, RecordId::successor);
        self.last_record_id = Some(next);
        next
    }
}

impl<T: PartialEq + Clone> TemplateStore<T> {
    /// Add a record: absorb it into the best matching template, or start a
    /// new template when nothing qualifies. Always consumes one record id.
    pub fn insert(&mut self, tokens: &[T]) -> InsertOutcome {
        let record_id = self.next_record_id();
        let preserve_leading = self.config.preserve_leading_token;

        match self.best_match(tokens) {
            Some((index, score)) => {
                let template = &mut self.templates[index];
                template.merge(tokens, Some(record_id), preserve_leading);
                tracing::trace!(
                    record_id = record_id.get(),
                    template_index = index,
                    score,
                    wildcards = template.wildcard_positions().len(),
                    "store: record absorbed"
                );
                InsertOutcome {
                    record_id,
                    template_index: index,
                    created: false,
                }
            }
            None => {
                self.templates.push(Template::new(tokens, Some(record_id)));
                let index = self.templates.len() - 1;
                tracing::debug!(
                    record_id = record_id.get(),
                    template_index = index,
                    tokens = tokens.len(),
                    "store: new template"
                );
                InsertOutcome {
                    record_id,
                    template_index: index,
                    created: true,
                }
            }
        }
    }

    /// Best qualifying template for `tokens`, if any.
    pub fn find_match(&self, tokens: &[T]) -> Option<&Template<T>> {
        self.best_match(tokens).map(|(index, _)| &self.templates[index])
    }

    /// [`TemplateStore::find_match`] plus the values at the wildcard slots.
    pub fn find_match_with_parameters(&self, tokens: &[T]) -> Option<TemplateMatch<'_, T>> {
        self.find_match(tokens).map(|template| TemplateMatch {
            template,
            parameters: template.parameters(tokens),
        })
    }

    /// `(index, score)` of the winning template.
    ///
    /// The running best starts at zero, so a zero score never qualifies even
    /// when the threshold itself would allow it (empty records).
    fn best_match(&self, tokens: &[T]) -> Option<(usize, usize)> {
        let mut best = None;
        let mut best_score = 0;

        for (index, template) in self.templates.iter().enumerate() {
            if !self.config.length_compatible(template.len(), tokens.len()) {
                continue;
            }
            let score = template.score(tokens);
            if self.config.meets_threshold(score, tokens.len()) && score > best_score {
                best_score = score;
                best = Some((index, score));
            }
        }

        tracing::trace!(
            candidates = self.templates.len(),
            matched = best.map(|(index, _)| index),
            score = best_score,
            "store: lookup"
        );
        best
    }
}

impl<T: fmt::Display> TemplateStore<T> {
    pub fn dump(&self) -> StoreDump {
        StoreDump {
            last_record_id: self.last_record_id(),
            templates: self.templates.iter().map(TemplateDump::from).collect(),
        }
    }
}

impl<T> Default for TemplateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for TemplateStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "templates={} last_record_id={}",
            self.templates.len(),
            self.last_record_id()
        )?;
        for template in &self.templates {
            writeln!(
                f,
                "  [{} records] {} wildcards={:?}",
                template.count(),
                template,
                template.wildcard_positions()
            )?;
        }
        Ok(())
    }
}
