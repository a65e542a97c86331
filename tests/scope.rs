mod common;
use common::*;
use finch_search::{QueryError, SearchScope};

#[test]
fn scope_defaults_to_related() {
    assert_eq!(compile_ok("hello").scope(), SearchScope::Related);
    assert_eq!(compile_ok("").scope(), SearchScope::Related);
}

#[test]
fn explicit_scope_values() {
    assert_eq!(compile_ok("scope:public").scope(), SearchScope::Public);
    assert_eq!(compile_ok("scope:related").scope(), SearchScope::Related);
}

#[test]
fn last_scope_clause_wins() {
    assert_eq!(
        compile_ok("scope:public scope:related").scope(),
        SearchScope::Related
    );
    assert_eq!(
        compile_ok("scope:related scope:public").scope(),
        SearchScope::Public
    );
}

#[test]
fn earlier_scope_clauses_cannot_change_the_outcome() {
    // A user correction at the end of input takes precedence no matter how
    // many earlier scope clauses exist.
    assert_eq!(
        compile_ok("scope:related scope:related scope:related scope:public").scope(),
        SearchScope::Public
    );
}

#[test]
fn unknown_scope_fails_the_compile() {
    assert_eq!(
        compile_err("scope:bogus"),
        QueryError::UnknownScope("bogus".to_string())
    );
}

#[test]
fn only_the_last_scope_clause_is_validated() {
    // Superseded values are silently ignored, even invalid ones.
    assert_eq!(
        compile_ok("scope:bogus scope:public").scope(),
        SearchScope::Public
    );
}

#[test]
fn scope_clauses_are_kept_for_introspection() {
    let compiled = compile_ok("scope:public scope:related");
    assert_eq!(compiled.scope_clauses().len(), 2);
}

#[test]
fn negated_scope_still_resolves() {
    // The scope bucket is forced regardless of the operator symbol.
    assert_eq!(compile_ok("-scope:public").scope(), SearchScope::Public);
}
