// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative predicates over raw payload fields.
//!
//! A [`Predicate`] is a boolean expression evaluated against the raw object a
//! family must be resolved from. Evaluation is pure and total: a missing
//! field compares as `Null`, an ordering comparison against a non-numeric
//! runtime value is simply false. Structural problems (an ordering operator
//! with a non-numeric comparand, an empty clause list) are rejected when the
//! registry is built, so malformed trees never reach resolution.

use crate::value::WireValue;
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator for [`Predicate::FieldCompare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// True for the four operators that need an ordered comparison.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean rule over raw payload fields, used to pick a family variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// True iff the field exists and equals the expected value exactly
    /// (tag + value; a numeric `5` does not equal a string `"5"`).
    FieldIs(String, WireValue),
    /// Compare the field (missing compares as `Null`) against a literal.
    FieldCompare(String, WireValue, CompareOp),
    /// Short-circuit conjunction.
    All(Vec<Predicate>),
    /// Short-circuit disjunction.
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Exact equality check against an expected literal.
    pub fn field_is(field: impl Into<String>, expected: impl Into<WireValue>) -> Self {
        Self::FieldIs(field.into(), expected.into())
    }

    /// Operator comparison against a literal.
    pub fn field_compare(
        field: impl Into<String>,
        value: impl Into<WireValue>,
        op: CompareOp,
    ) -> Self {
        Self::FieldCompare(field.into(), value.into(), op)
    }

    /// Conjunction of nested predicates.
    pub fn all(clauses: Vec<Predicate>) -> Self {
        Self::All(clauses)
    }

    /// Disjunction of nested predicates.
    pub fn any(clauses: Vec<Predicate>) -> Self {
        Self::Any(clauses)
    }

    /// Evaluate against a raw object. Pure; no side effects.
    ///
    /// Non-object inputs have no fields, so every lookup sees `Null`.
    pub fn evaluate(&self, object: &WireValue) -> bool {
        match self {
            Self::FieldIs(field, expected) => match object.get(field) {
                Some(actual) => actual == expected,
                None => false,
            },
            Self::FieldCompare(field, literal, op) => {
                let actual = object.get(field).unwrap_or(&WireValue::Null);
                compare(actual, literal, *op)
            }
            Self::All(clauses) => clauses.iter().all(|c| c.evaluate(object)),
            Self::Any(clauses) => clauses.iter().any(|c| c.evaluate(object)),
        }
    }

    /// Structural validation, run once at registry build time.
    ///
    /// Rejects ordering operators whose comparand is not numeric, and empty
    /// `All`/`Any` clause lists.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::FieldIs(_, _) => Ok(()),
            Self::FieldCompare(field, literal, op) => {
                if op.is_ordering() && !is_numeric(literal) {
                    return Err(format!(
                        "ordering comparison {} {} {} requires a numeric comparand",
                        field,
                        op,
                        literal.kind_name()
                    ));
                }
                Ok(())
            }
            Self::All(clauses) => validate_clauses("conjunction", clauses),
            Self::Any(clauses) => validate_clauses("disjunction", clauses),
        }
    }
}

fn validate_clauses(label: &str, clauses: &[Predicate]) -> Result<(), String> {
    if clauses.is_empty() {
        return Err(format!("empty {} clause list", label));
    }
    for clause in clauses {
        clause.validate()?;
    }
    Ok(())
}

fn is_numeric(value: &WireValue) -> bool {
    matches!(value, WireValue::Int(_) | WireValue::Float(_))
}

fn compare(actual: &WireValue, literal: &WireValue, op: CompareOp) -> bool {
    match op {
        // Equality stays exact, same rule as FieldIs.
        CompareOp::Eq => actual == literal,
        CompareOp::Neq => actual != literal,
        // Ordering compares numerically; Int/Float cross-comparison is
        // permitted here and only here.
        CompareOp::Lt | CompareOp::Lte | CompareOp::Gt | CompareOp::Gte => {
            let (Some(lhs), Some(rhs)) = (as_number(actual), as_number(literal)) else {
                return false;
            };
            let Some(ord) = lhs.partial_cmp(&rhs) else {
                return false;
            };
            matches!(
                (op, ord),
                (CompareOp::Lt, Ordering::Less)
                    | (CompareOp::Lte, Ordering::Less | Ordering::Equal)
                    | (CompareOp::Gt, Ordering::Greater)
                    | (CompareOp::Gte, Ordering::Greater | Ordering::Equal)
            )
        }
    }
}

fn as_number(value: &WireValue) -> Option<f64> {
    match value {
        WireValue::Int(v) => Some(*v as f64),
        WireValue::Float(v) => Some(*v),
        _ => None,
    }
}
