#![allow(dead_code)]
//! Shared helpers for `finch-syntax` integration tests.

use finch_syntax::*;

pub fn parse_ok(input: &str) -> Vec<ClauseNode> {
    parse_query(input).unwrap().clauses
}

pub fn parse_err(input: &str) -> ParseError {
    parse_query(input).unwrap_err()
}

pub fn term_is(clause: &ClauseNode, expected: &str) {
    match &clause.body {
        ClauseBody::Term(t) => assert_eq!(t, expected),
        other => panic!("expected Term, got: {other:?}"),
    }
}

pub fn shortcode_is(clause: &ClauseNode, expected: &str) {
    match &clause.body {
        ClauseBody::Shortcode(name) => assert_eq!(name, expected),
        other => panic!("expected Shortcode, got: {other:?}"),
    }
}

pub fn phrase_is(clause: &ClauseNode, expected: &[&str]) {
    match &clause.body {
        ClauseBody::Phrase(words) => assert_eq!(words, expected),
        other => panic!("expected Phrase, got: {other:?}"),
    }
}
