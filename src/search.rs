//! Incremental assembly of the boolean search request. This is the whole
//! surface the compiler needs from the search backend: it accepts query and
//! filter fragments plus a minimum-should-match directive and renders the
//! request body. Executing the request is someone else's job.

use serde_json::{Map, Value, json};

/// Accumulates bool-query fragments in insertion order. Consuming builder so
/// call sites read as a chain, one fragment per clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQueryBuilder {
    should: Vec<Value>,
    must: Vec<Value>,
    must_not: Vec<Value>,
    filter: Vec<Value>,
    minimum_should_match: Option<u64>,
}

impl BoolQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should(mut self, fragment: Value) -> Self {
        self.should.push(fragment);
        self
    }

    pub fn must(mut self, fragment: Value) -> Self {
        self.must.push(fragment);
        self
    }

    pub fn must_not(mut self, fragment: Value) -> Self {
        self.must_not.push(fragment);
        self
    }

    pub fn filter(mut self, fragment: Value) -> Self {
        self.filter.push(fragment);
        self
    }

    /// Range fragments are filters in the backend DSL; this is a separate
    /// entry point only so call sites mirror the clause taxonomy.
    pub fn range(self, fragment: Value) -> Self {
        self.filter(fragment)
    }

    pub fn minimum_should_match(mut self, count: u64) -> Self {
        self.minimum_should_match = Some(count);
        self
    }

    /// Renders the final request body. Empty groups are omitted entirely, so
    /// an empty builder yields `{"query": {"bool": {}}}`.
    pub fn into_request(self) -> Value {
        let mut bool_query = Map::new();
        if !self.should.is_empty() {
            bool_query.insert("should".into(), Value::Array(self.should));
        }
        if !self.must.is_empty() {
            bool_query.insert("must".into(), Value::Array(self.must));
        }
        if !self.must_not.is_empty() {
            bool_query.insert("must_not".into(), Value::Array(self.must_not));
        }
        if !self.filter.is_empty() {
            bool_query.insert("filter".into(), Value::Array(self.filter));
        }
        if let Some(count) = self.minimum_should_match {
            bool_query.insert("minimum_should_match".into(), json!(count));
        }
        json!({ "query": { "bool": bool_query } })
    }
}
