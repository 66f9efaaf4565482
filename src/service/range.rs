//! Range expression evaluator.
//!
//! Compiles expressions like `"1-10, ~5-8, >=7:odd"` into a sorted set of
//! integers. Terms are comma separated; everything after the first `:` is a
//! list of modifiers separated by `:` or `,`.
//!
//! | Term    | Meaning                                  |
//! |---------|------------------------------------------|
//! | `A-B`   | every integer in `[A, B]`                |
//! | `N`     | the single integer `N`                   |
//! | `~A-B`  | remove `[A, B]`                          |
//! | `~N`    | remove `N`                               |
//! | `<=N`   | `[1, N]`                                 |
//! | `<N`    | `[1, N - 1]`                             |
//! | `>=N`   | `[N, ceiling)`                           |
//! | `>N`    | `[N + 1, ceiling)`                       |
//!
//! Terms apply in written order: spans and comparisons add to the set,
//! exclusions remove from what has accumulated so far.
//!
//! An open bound starting at or below the highest literal range end stops one
//! past that end. Any other open bound stops at the configured upper bound.
//! No single term may cover more values than the upper bound.
//!
//! Modifiers run in written order: `odd`, `even`, `prime`, `step=K` (keep
//! every K-th element, default 1), `div=K` (keep multiples of K, default 7).

use std::collections::BTreeSet;

use crate::domain::RangeSet;
use crate::error::{AppError, Result};

/// Default exclusive ceiling of `>`/`>=` bounds.
pub const UPPER_BOUND: i64 = 10_000;

/// Divisor used by a bare `div` modifier.
const DEFAULT_DIVISOR: u64 = 7;

/// Parsed inclusion or exclusion term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Inclusive literal range `A-B`. A single `N` is `Span(N, N)`.
    Span(i64, i64),
    /// Exclusion `~A-B` or `~N`.
    Exclude(i64, i64),
    /// `<=N`.
    AtMost(i64),
    /// `<N`.
    Below(i64),
    /// `>=N`.
    AtLeast(i64),
    /// `>N`.
    Above(i64),
}

impl Term {
    const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::AtMost(_) | Self::Below(_) | Self::AtLeast(_) | Self::Above(_)
        )
    }
}

/// Parsed post-filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Keep odd values.
    Odd,
    /// Keep even values.
    Even,
    /// Keep primes.
    Prime,
    /// Keep sorted positions `0, K, 2K, ...`.
    Step(usize),
    /// Keep multiples of `K`.
    Div(u64),
}

impl Modifier {
    fn apply(self, values: Vec<i64>) -> Vec<i64> {
        match self {
            Self::Odd => values.into_iter().filter(|v| v % 2 != 0).collect(),
            Self::Even => values.into_iter().filter(|v| v % 2 == 0).collect(),
            Self::Prime => values.into_iter().filter(|v| is_prime(*v)).collect(),
            Self::Step(step) => values.into_iter().step_by(step).collect(),
            Self::Div(divisor) => values
                .into_iter()
                .filter(|v| v.unsigned_abs() % divisor == 0)
                .collect(),
        }
    }
}

/// Parsed range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpression {
    terms: Vec<Term>,
    modifiers: Vec<Modifier>,
    upper_bound: i64,
}

impl RangeExpression {
    /// Parse an expression.
    ///
    /// `upper_bound` is the exclusive ceiling of open `>`/`>=` bounds that
    /// start above every literal range, and the most values one term may cover.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExpression` for an unreadable term or modifier or for a
    /// term covering more than `upper_bound` values, and `MixedSyntax` when a
    /// literal range meets a comparison bound without any exclusion term.
    pub fn parse(text: &str, upper_bound: i64) -> Result<Self> {
        let (terms_text, modifiers_text) = text.split_once(':').unwrap_or((text, ""));

        let terms = terms_text
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(parse_term)
            .collect::<Result<Vec<_>>>()?;

        let modifiers = modifiers_text
            .split([':', ','])
            .map(str::trim)
            .filter(|modifier| !modifier.is_empty())
            .map(parse_modifier)
            .collect::<Result<Vec<_>>>()?;

        let has_range = terms
            .iter()
            .any(|term| matches!(term, Term::Span(low, high) if low != high));
        let has_comparison = terms.iter().any(|term| term.is_comparison());
        let has_exclusion = terms.iter().any(|term| matches!(term, Term::Exclude(..)));
        if has_range && has_comparison && !has_exclusion {
            return Err(AppError::MixedSyntax);
        }

        let expression = Self {
            terms,
            modifiers,
            upper_bound,
        };
        expression.check_sizes()?;
        Ok(expression)
    }

    /// Parsed terms, in written order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Parsed modifiers, in written order.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Evaluate the expression.
    #[must_use]
    pub fn evaluate(&self) -> RangeSet {
        let mut set = BTreeSet::new();

        for &term in &self.terms {
            match term {
                Term::Exclude(low, high) => set.retain(|v| !(low..=high).contains(v)),
                _ => {
                    if let Some((start, end)) = self.interval(term) {
                        set.extend((start..end).filter_map(|v| i64::try_from(v).ok()));
                    }
                }
            }
        }

        let values: Vec<i64> = set.into_iter().collect();
        self.modifiers
            .iter()
            .fold(values, |values, modifier| modifier.apply(values))
            .into_iter()
            .collect()
    }

    /// Half-open interval an inclusion term adds, `None` for exclusions.
    fn interval(&self, term: Term) -> Option<(i128, i128)> {
        let open = |start: i128| (start, self.ceiling(start));
        match term {
            Term::Span(low, high) => Some((i128::from(low), i128::from(high) + 1)),
            Term::AtMost(n) => Some((1, i128::from(n) + 1)),
            Term::Below(n) => Some((1, i128::from(n))),
            Term::AtLeast(n) => Some(open(i128::from(n))),
            Term::Above(n) => Some(open(i128::from(n) + 1)),
            Term::Exclude(..) => None,
        }
    }

    /// Exclusive end of an open bound starting at `start`.
    fn ceiling(&self, start: i128) -> i128 {
        let highest = self
            .terms
            .iter()
            .filter_map(|term| match *term {
                Term::Span(low, high) if low != high => Some(i128::from(high)),
                _ => None,
            })
            .max();

        match highest {
            Some(high) if start <= high => high + 1,
            _ => i128::from(self.upper_bound),
        }
    }

    fn check_sizes(&self) -> Result<()> {
        let limit = i128::from(self.upper_bound.max(1));
        for &term in &self.terms {
            if let Some((start, end)) = self.interval(term)
                && end - start > limit
            {
                return Err(AppError::InvalidExpression(format!(
                    "term {term:?} covers more than {limit} values"
                )));
            }
        }
        Ok(())
    }
}

/// Parse and evaluate `text` with the default [`UPPER_BOUND`].
///
/// # Errors
///
/// See [`RangeExpression::parse`].
pub fn evaluate(text: &str) -> Result<RangeSet> {
    Ok(RangeExpression::parse(text, UPPER_BOUND)?.evaluate())
}

/// Trial-division primality test.
#[must_use]
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5i64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

fn parse_term(term: &str) -> Result<Term> {
    if let Some(rest) = term.strip_prefix('~') {
        let (low, high) = parse_span(rest.trim(), term)?;
        return Ok(Term::Exclude(low, high));
    }

    // Two-character operators first
    let comparisons: [(&str, fn(i64) -> Term); 4] = [
        ("<=", Term::AtMost),
        (">=", Term::AtLeast),
        ("<", Term::Below),
        (">", Term::Above),
    ];
    for (operator, build) in comparisons {
        if let Some(rest) = term.strip_prefix(operator) {
            return Ok(build(parse_number(rest.trim(), term)?));
        }
    }

    let (low, high) = parse_span(term, term)?;
    Ok(Term::Span(low, high))
}

/// Parse `A-B` or `N`. A leading `-` is a sign, not a separator.
fn parse_span(text: &str, term: &str) -> Result<(i64, i64)> {
    let separator = text
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(idx, _)| idx);

    match separator {
        Some(idx) => Ok((
            parse_number(text[..idx].trim(), term)?,
            parse_number(text[idx + 1..].trim(), term)?,
        )),
        None => {
            let n = parse_number(text, term)?;
            Ok((n, n))
        }
    }
}

fn parse_number(text: &str, term: &str) -> Result<i64> {
    text.parse()
        .map_err(|_| AppError::InvalidExpression(format!("invalid term: {term:?}")))
}

fn parse_modifier(modifier: &str) -> Result<Modifier> {
    let (name, value) = match modifier.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (modifier, None),
    };

    let invalid = || AppError::InvalidExpression(format!("invalid modifier: {modifier:?}"));

    match (name, value) {
        ("odd", None) => Ok(Modifier::Odd),
        ("even", None) => Ok(Modifier::Even),
        ("prime", None) => Ok(Modifier::Prime),
        ("step", None) => Ok(Modifier::Step(1)),
        ("step", Some(value)) => match value.parse::<usize>() {
            Ok(step) if step > 0 => Ok(Modifier::Step(step)),
            _ => Err(invalid()),
        },
        ("div", None) => Ok(Modifier::Div(DEFAULT_DIVISOR)),
        ("div", Some(value)) => match value.parse::<i64>() {
            Ok(divisor) if divisor != 0 => Ok(Modifier::Div(divisor.unsigned_abs())),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}
