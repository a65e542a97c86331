//! # Finch status search compiler
//!
//! `finch-search` compiles a human-typed search string into a structured
//! boolean request for the full-text backend, in two strictly sequential
//! steps: [`finch_syntax::parse_query`] produces the raw clause sequence,
//! then [`compile_query`] attaches semantics (operator roles, account
//! resolution for `from:`, date parsing for `since:` and `until:`) and groups
//! the result into the six request buckets plus a resolved visibility scope.
//!
//! Compilation is synchronous and a pure function of its input apart from
//! the injected [`AccountResolver`] lookups; every invocation is independent
//! and every failure is fatal to the whole compile.
//!
//! ## Example
//! ```
//! use finch_search::{
//!     AccountId, AccountResolver, BoolQueryBuilder, SearchScope, compile_query,
//! };
//!
//! struct Directory;
//!
//! impl AccountResolver for Directory {
//!     fn is_local_domain(&self, domain: &str) -> bool {
//!         domain == "finch.example"
//!     }
//!     fn find_account(&self, username: &str, _domain: Option<&str>) -> Option<AccountId> {
//!         (username == "alice").then_some(AccountId(7))
//!     }
//! }
//!
//! let compiled = compile_query("+from:@alice \"good morning\"", &Directory).unwrap();
//! assert_eq!(compiled.scope(), SearchScope::Related);
//!
//! let request = compiled.apply(BoolQueryBuilder::new()).into_request();
//! assert_eq!(
//!     request["query"]["bool"]["filter"][0]["term"]["account_id"],
//!     serde_json::json!(7)
//! );
//! ```

pub mod compiler;
pub mod datetime;
pub mod directory;
pub mod error;
pub mod query;
pub mod search;

pub use compiler::{
    Clause, FilterField, FilterValue, Operator, PhraseClause, PrefixClause, QueryKind, TermClause,
    compile,
};
pub use directory::{AccountId, AccountResolver};
pub use error::QueryError;
pub use finch_syntax::{ParseError, ParsedQuery, parse_query};
pub use query::{CompiledQuery, SearchScope};
pub use search::BoolQueryBuilder;

/// Parses and compiles `input` in one call. The common entry point: callers
/// that want the intermediate clause list can run [`parse_query`] and
/// [`compile`] themselves.
pub fn compile_query(
    input: &str,
    directory: &dyn AccountResolver,
) -> Result<CompiledQuery, QueryError> {
    let tree = finch_syntax::parse_query(input)?;
    let clauses = compiler::compile(&tree, directory)?;
    CompiledQuery::from_clauses(clauses)
}
