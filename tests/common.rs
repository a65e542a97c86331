#![allow(dead_code)]
//! Shared helpers for `finch-search` integration tests.

use std::cell::Cell;

use finch_search::*;

/// Stand-in for the deployment's account directory. Knows a local `alice`
/// and a remote `bob@remote.example`, and counts lookups so tests can assert
/// the resolver is invoked exactly once per `from:` clause.
pub struct StubDirectory {
    pub lookups: Cell<usize>,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self {
            lookups: Cell::new(0),
        }
    }
}

impl AccountResolver for StubDirectory {
    fn is_local_domain(&self, domain: &str) -> bool {
        domain == "finch.example"
    }

    fn find_account(&self, username: &str, domain: Option<&str>) -> Option<AccountId> {
        self.lookups.set(self.lookups.get() + 1);
        match (username, domain) {
            ("alice", None) => Some(AccountId(1)),
            ("bob", Some("remote.example")) => Some(AccountId(2)),
            _ => None,
        }
    }
}

pub fn compile_ok(input: &str) -> CompiledQuery {
    compile_query(input, &StubDirectory::new()).unwrap()
}

pub fn compile_err(input: &str) -> QueryError {
    compile_query(input, &StubDirectory::new()).unwrap_err()
}

pub fn request_for(input: &str) -> serde_json::Value {
    compile_ok(input).apply(BoolQueryBuilder::new()).into_request()
}

pub fn as_term(clause: &Clause) -> &TermClause {
    match clause {
        Clause::Term(term) => term,
        other => panic!("expected TermClause, got: {other:?}"),
    }
}

pub fn as_phrase(clause: &Clause) -> &PhraseClause {
    match clause {
        Clause::Phrase(phrase) => phrase,
        other => panic!("expected PhraseClause, got: {other:?}"),
    }
}

pub fn as_prefix(clause: &Clause) -> &PrefixClause {
    match clause {
        Clause::Prefix(prefix) => prefix,
        other => panic!("expected PrefixClause, got: {other:?}"),
    }
}
