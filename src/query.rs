//! Grouping, deterministic assembly order, and scope resolution for a
//! compiled clause list.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::compiler::{Clause, FilterValue, Operator, QueryKind};
use crate::datetime::format_instant;
use crate::error::QueryError;
use crate::search::BoolQueryBuilder;

/// Result-visibility mode the compiled query targets, resolved once per
/// whole query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Related,
    Public,
}

/// The terminal artifact of a compile: six disjoint clause groups keyed by
/// each clause's effective operator, plus the resolved scope.
///
/// Built exactly once from the full clause list by a stable partition and
/// never mutated afterwards. Source order is preserved within each
/// group because group order affects the downstream boolean-query shape even
/// though members inside a group commute at the search-engine level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    should: Vec<Clause>,
    must: Vec<Clause>,
    must_not: Vec<Clause>,
    filter: Vec<Clause>,
    range: Vec<Clause>,
    scope_clauses: Vec<Clause>,
    scope: SearchScope,
}

impl CompiledQuery {
    /// Partitions `clauses` and resolves the scope eagerly, so an invalid
    /// scope value fails the compile rather than a later accessor.
    pub fn from_clauses(clauses: Vec<Clause>) -> Result<Self, QueryError> {
        let mut should = Vec::new();
        let mut must = Vec::new();
        let mut must_not = Vec::new();
        let mut filter = Vec::new();
        let mut range = Vec::new();
        let mut scope_clauses = Vec::new();

        for clause in clauses {
            match clause.operator() {
                Operator::Should => should.push(clause),
                Operator::Must => must.push(clause),
                Operator::MustNot => must_not.push(clause),
                Operator::Filter => filter.push(clause),
                Operator::Range => range.push(clause),
                Operator::Scope => scope_clauses.push(clause),
            }
        }

        let scope = resolve_scope(&scope_clauses)?;
        debug!(
            should = should.len(),
            must = must.len(),
            must_not = must_not.len(),
            filter = filter.len(),
            range = range.len(),
            ?scope,
            "grouped search query"
        );

        Ok(Self {
            should,
            must,
            must_not,
            filter,
            range,
            scope_clauses,
            scope,
        })
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn should_clauses(&self) -> &[Clause] {
        &self.should
    }

    pub fn must_clauses(&self) -> &[Clause] {
        &self.must
    }

    pub fn must_not_clauses(&self) -> &[Clause] {
        &self.must_not
    }

    pub fn filter_clauses(&self) -> &[Clause] {
        &self.filter
    }

    pub fn range_clauses(&self) -> &[Clause] {
        &self.range
    }

    pub fn scope_clauses(&self) -> &[Clause] {
        &self.scope_clauses
    }

    pub fn is_empty(&self) -> bool {
        self.should.is_empty()
            && self.must.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
            && self.range.is_empty()
            && self.scope_clauses.is_empty()
    }

    /// Feeds every group into `builder` in the fixed order should, must,
    /// must_not, filter, range, original clause order within each group.
    /// Scope clauses are consumed separately and never reach the builder.
    ///
    /// Mixed optional/required queries still need the optional clauses to
    /// narrow results, so a minimum-should-match of 1 is requested whenever
    /// any `should` clause exists.
    pub fn apply(&self, mut builder: BoolQueryBuilder) -> BoolQueryBuilder {
        for clause in &self.should {
            builder = builder.should(clause_to_query(clause));
        }
        for clause in &self.must {
            builder = builder.must(clause_to_query(clause));
        }
        for clause in &self.must_not {
            builder = builder.must_not(clause_to_query(clause));
        }
        for clause in &self.filter {
            builder = builder.filter(clause_to_filter(clause));
        }
        for clause in &self.range {
            builder = builder.range(clause_to_range(clause));
        }
        if !self.should.is_empty() {
            builder = builder.minimum_should_match(1);
        }
        builder
    }
}

// Last one wins: a correction typed at the end of the input supersedes
// anything earlier.
fn resolve_scope(clauses: &[Clause]) -> Result<SearchScope, QueryError> {
    match clauses.last() {
        None => Ok(SearchScope::Related),
        Some(Clause::Prefix(last)) => match &last.value {
            FilterValue::Text(term) => match term.as_str() {
                "related" | "" => Ok(SearchScope::Related),
                "public" => Ok(SearchScope::Public),
                other => Err(QueryError::UnknownScope(other.to_string())),
            },
            _ => unreachable!("scope clauses carry text values"),
        },
        Some(_) => unreachable!("scope group only holds prefix clauses"),
    }
}

fn clause_to_query(clause: &Clause) -> Value {
    match clause {
        Clause::Term(term) => json!({
            "multi_match": {
                "type": "most_fields",
                "query": term.term,
                "fields": ["text", "text.stemmed"],
            }
        }),
        Clause::Phrase(phrase) => json!({
            "match_phrase": { "text": { "query": phrase.phrase } }
        }),
        Clause::Prefix(prefix) => match prefix.query_kind {
            QueryKind::Term => json!({ "term": { (prefix.filter.name()): value_to_json(&prefix.value) } }),
        },
    }
}

fn clause_to_filter(clause: &Clause) -> Value {
    match clause {
        Clause::Prefix(prefix) => {
            json!({ "term": { (prefix.filter.name()): value_to_json(&prefix.value) } })
        }
        _ => unreachable!("filter group only holds prefix clauses"),
    }
}

fn clause_to_range(clause: &Clause) -> Value {
    match clause {
        Clause::Prefix(prefix) => {
            json!({ "range": { (prefix.filter.name()): value_to_json(&prefix.value) } })
        }
        _ => unreachable!("range group only holds prefix clauses"),
    }
}

fn value_to_json(value: &FilterValue) -> Value {
    match value {
        FilterValue::Text(text) => json!(text),
        FilterValue::Account(id) => json!(id),
        FilterValue::Range { gte, lte } => {
            let mut bounds = serde_json::Map::new();
            if let Some(instant) = gte {
                bounds.insert("gte".into(), json!(format_instant(*instant)));
            }
            if let Some(instant) = lte {
                bounds.insert("lte".into(), json!(format_instant(*instant)));
            }
            Value::Object(bounds)
        }
    }
}
