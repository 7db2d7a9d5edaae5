use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};
use crate::record::Record;

use super::{Combinator, Condition, UnknownOperatorPolicy};

/// The operator token placed between two conditions, `{ "value": "AND" }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorToken {
    pub value: Combinator,
}

impl OperatorToken {
    pub fn new(value: Combinator) -> Self {
        OperatorToken { value }
    }
}

/// One element of a [FilterSequence].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterToken {
    Condition(Condition),
    Operator(OperatorToken),
}

impl FilterToken {
    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            FilterToken::Condition(c) => Some(c),
            FilterToken::Operator(_) => None,
        }
    }

    pub fn as_combinator(&self) -> Option<Combinator> {
        match self {
            FilterToken::Operator(op) => Some(op.value),
            FilterToken::Condition(_) => None,
        }
    }
}

impl Display for FilterToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterToken::Condition(c) => write!(f, "{}", c),
            FilterToken::Operator(op) => write!(f, "{}", op.value),
        }
    }
}

/// An ordered chain of conditions joined by `AND`/`OR`.
///
/// A well formed sequence alternates condition, operator, condition and so on,
/// so it has odd length with conditions at even indices. Sequences built with
/// [`FilterSequence::add_condition`] and the fluent helpers keep that shape;
/// [`FilterSequence::from_tokens`] accepts any shape, for saved sequences.
///
/// # Evaluation
///
/// Evaluation is strictly left to right with no precedence between `AND` and
/// `OR`: `a OR b AND c` means `(a OR b) AND c`.
///
/// - An empty sequence matches every record.
/// - A trailing operator with no condition after it is ignored.
/// - An operator found where a condition belongs evaluates to `false`.
/// - A condition found where an operator belongs leaves the running result
///   unchanged for that step.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::filter::field;
///
/// let filter = field("quantity").gt(5)
///     .or(field("model.stackable").eq("true"))
///     .and(field("model.type").eq("weapon"));
/// let matching: Vec<_> = records.iter().filter(|r| filter.evaluate(r)).collect();
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSequence {
    tokens: Vec<FilterToken>,
}

impl FilterSequence {
    pub fn new() -> Self {
        FilterSequence { tokens: Vec::new() }
    }

    /// Builds a sequence from raw tokens without checking their arrangement.
    pub fn from_tokens(tokens: Vec<FilterToken>) -> Self {
        FilterSequence { tokens }
    }

    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    /// Number of tokens, conditions and operators together.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.tokens.iter().filter_map(FilterToken::as_condition)
    }

    pub fn condition_count(&self) -> usize {
        self.conditions().count()
    }

    pub fn combinators(&self) -> impl Iterator<Item = Combinator> + '_ {
        self.tokens.iter().filter_map(FilterToken::as_combinator)
    }

    /// Checks the alternating condition/operator shape.
    pub fn is_well_formed(&self) -> bool {
        self.tokens.is_empty()
            || (self.tokens.len() % 2 == 1
                && self.tokens.iter().enumerate().all(|(i, token)| {
                    matches!(
                        (i % 2, token),
                        (0, FilterToken::Condition(_)) | (1, FilterToken::Operator(_))
                    )
                }))
    }

    /// Appends `condition`. On a non-empty sequence `combinator` joins it to the
    /// previous condition; the first condition ignores it.
    pub fn add_condition(&mut self, condition: Condition, combinator: Combinator) {
        if !self.tokens.is_empty() {
            self.tokens
                .push(FilterToken::Operator(OperatorToken::new(combinator)));
        }
        self.tokens.push(FilterToken::Condition(condition));
    }

    /// Appends `condition` joined with `AND`.
    pub fn and(mut self, condition: Condition) -> Self {
        self.add_condition(condition, Combinator::And);
        self
    }

    /// Appends `condition` joined with `OR`.
    pub fn or(mut self, condition: Condition) -> Self {
        self.add_condition(condition, Combinator::Or);
        self
    }

    /// Returns the `index`-th condition, counting conditions only.
    pub fn condition(&self, index: usize) -> Option<&Condition> {
        self.conditions().nth(index)
    }

    /// Replaces the `index`-th condition, counting conditions only.
    pub fn update_condition(&mut self, index: usize, condition: Condition) -> QuartermasterResult<()> {
        let position = self.condition_position(index)?;
        self.tokens[position] = FilterToken::Condition(condition);
        Ok(())
    }

    /// Replaces the combinator joining condition `index` to condition `index + 1`.
    pub fn set_combinator(&mut self, index: usize, combinator: Combinator) -> QuartermasterResult<()> {
        let position = self.condition_position(index)?;
        let next = self.condition_position(index + 1)?;

        let token = FilterToken::Operator(OperatorToken::new(combinator));
        match self.tokens[position + 1..next]
            .iter()
            .position(|t| matches!(t, FilterToken::Operator(_)))
        {
            Some(offset) => self.tokens[position + 1 + offset] = token,
            None => self.tokens.insert(position + 1, token),
        }
        Ok(())
    }

    /// Removes the `index`-th condition together with the operator joining it to
    /// its predecessor, or to its successor when it is the first condition.
    pub fn remove_condition(&mut self, index: usize) -> QuartermasterResult<Condition> {
        let position = self.condition_position(index)?;

        let removed = if position > 0 && matches!(self.tokens[position - 1], FilterToken::Operator(_)) {
            self.tokens.drain(position - 1..=position).last()
        } else {
            let removed = self.tokens.remove(position);
            if matches!(self.tokens.get(position), Some(FilterToken::Operator(_))) {
                self.tokens.remove(position);
            }
            Some(removed)
        };

        match removed {
            Some(FilterToken::Condition(condition)) => Ok(condition),
            _ => {
                log::error!("Token at condition position {} is not a condition", position);
                Err(QuartermasterError::new(
                    "Removed token is not a condition",
                    ErrorKind::InternalError,
                ))
            }
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Evaluates the sequence against `record` with the default
    /// [`UnknownOperatorPolicy::Pass`].
    pub fn evaluate(&self, record: &Record) -> bool {
        self.evaluate_with(record, UnknownOperatorPolicy::default())
    }

    /// Evaluates the sequence against `record`, left to right.
    pub fn evaluate_with(&self, record: &Record, policy: UnknownOperatorPolicy) -> bool {
        let Some(first) = self.tokens.first() else {
            return true;
        };

        let mut result = Self::evaluate_token(first, record, policy);
        for index in (1..self.tokens.len() - 1).step_by(2) {
            let Some(next) = self.tokens.get(index + 1) else {
                break;
            };
            if let FilterToken::Operator(op) = &self.tokens[index] {
                let matched = Self::evaluate_token(next, record, policy);
                result = op.value.apply(result, matched);
            }
        }

        log::trace!("Sequence {} evaluated to {}", self, result);
        result
    }

    fn evaluate_token(token: &FilterToken, record: &Record, policy: UnknownOperatorPolicy) -> bool {
        match token {
            FilterToken::Condition(condition) => condition.evaluate_with(record, policy),
            FilterToken::Operator(_) => false,
        }
    }

    fn condition_position(&self, index: usize) -> QuartermasterResult<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| matches!(token, FilterToken::Condition(_)))
            .nth(index)
            .map(|(position, _)| position)
            .ok_or_else(|| {
                log::error!(
                    "Condition {} not found, sequence has {} conditions",
                    index,
                    self.condition_count()
                );
                QuartermasterError::new(
                    &format!("Condition {} not found", index),
                    ErrorKind::NotFound,
                )
            })
    }
}

impl From<Condition> for FilterSequence {
    fn from(condition: Condition) -> Self {
        FilterSequence {
            tokens: vec![FilterToken::Condition(condition)],
        }
    }
}

impl Display for FilterSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.tokens.is_empty() {
            return write!(f, "(all)");
        }
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}
