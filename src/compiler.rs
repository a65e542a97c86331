//! Turns the raw clause nodes from `finch-syntax` into typed, fully resolved
//! clauses. This is where all semantic side effects happen: account handles
//! are resolved through the injected directory and date values are parsed.
//! Any failure aborts the whole compile.

use finch_syntax::{ClauseBody, ClauseNode, ParsedQuery};
use jiff::Timestamp;
use tracing::debug;

use crate::datetime::parse_datetime;
use crate::directory::{AccountId, AccountResolver};
use crate::error::QueryError;

/// Boolean role a clause plays in the compiled request. Doubles as the
/// grouping key for [`crate::query::CompiledQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Should,
    Must,
    MustNot,
    Filter,
    Range,
    Scope,
}

impl Operator {
    /// `+`/`-` mapping for free-text clauses; no symbol means optional.
    fn text_context(symbol: Option<char>) -> Result<Self, QueryError> {
        match symbol {
            None => Ok(Operator::Should),
            Some('+') => Ok(Operator::Must),
            Some('-') => Ok(Operator::MustNot),
            Some(other) => Err(QueryError::UnknownOperator(other)),
        }
    }

    /// `+`/`-` mapping for structured clauses. There is no optional variant:
    /// an unmarked filter is implicitly required.
    fn filter_context(symbol: Option<char>) -> Result<Self, QueryError> {
        match symbol {
            None | Some('+') => Ok(Operator::Filter),
            Some('-') => Ok(Operator::MustNot),
            Some(other) => Err(QueryError::UnknownOperator(other)),
        }
    }
}

/// Attribute a structured clause filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    AccountId,
    CreatedAt,
    Is,
    Has,
    Scope,
}

impl FilterField {
    pub(crate) fn name(self) -> &'static str {
        match self {
            FilterField::AccountId => "account_id",
            FilterField::CreatedAt => "created_at",
            FilterField::Is => "is",
            FilterField::Has => "has",
            FilterField::Scope => "scope",
        }
    }
}

/// How a structured clause is expressed when it lands in one of the boolean
/// groups. Currently always term-level equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Term,
}

/// Resolved value of a structured clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Account(AccountId),
    Range {
        gte: Option<Timestamp>,
        lte: Option<Timestamp>,
    },
}

/// One atomic unit of the search query with its boolean role attached.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Term(TermClause),
    Phrase(PhraseClause),
    Prefix(PrefixClause),
}

impl Clause {
    pub fn operator(&self) -> Operator {
        match self {
            Clause::Term(clause) => clause.operator,
            Clause::Phrase(clause) => clause.operator,
            Clause::Prefix(clause) => clause.operator,
        }
    }
}

/// A bare word or colon-wrapped shortcode, matched against the text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermClause {
    pub prefix: Option<String>,
    pub operator: Operator,
    pub term: String,
}

/// A quoted string, matched as an exact phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseClause {
    pub prefix: Option<String>,
    pub operator: Operator,
    pub phrase: String,
}

/// A structured filter produced by a recognized prefix keyword. Construction
/// performs the semantic resolution and is the only failable clause kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixClause {
    pub filter: FilterField,
    pub operator: Operator,
    pub value: FilterValue,
    pub query_kind: QueryKind,
}

impl PrefixClause {
    fn resolve(
        prefix: &str,
        symbol: Option<char>,
        value: &str,
        directory: &dyn AccountResolver,
    ) -> Result<Self, QueryError> {
        match prefix {
            "from" => {
                let account = resolve_account(value, directory)?;
                Ok(Self {
                    filter: FilterField::AccountId,
                    operator: Operator::filter_context(symbol)?,
                    value: FilterValue::Account(account),
                    query_kind: QueryKind::Term,
                })
            }
            "since" => {
                Operator::filter_context(symbol)?;
                Ok(Self {
                    filter: FilterField::CreatedAt,
                    operator: Operator::Range,
                    value: FilterValue::Range {
                        gte: Some(parse_datetime(value)?),
                        lte: None,
                    },
                    query_kind: QueryKind::Term,
                })
            }
            "until" => {
                Operator::filter_context(symbol)?;
                Ok(Self {
                    filter: FilterField::CreatedAt,
                    operator: Operator::Range,
                    value: FilterValue::Range {
                        gte: None,
                        lte: Some(parse_datetime(value)?),
                    },
                    query_kind: QueryKind::Term,
                })
            }
            "is" => Ok(Self {
                filter: FilterField::Is,
                operator: Operator::filter_context(symbol)?,
                value: FilterValue::Text(value.to_string()),
                query_kind: QueryKind::Term,
            }),
            "has" => Ok(Self {
                filter: FilterField::Has,
                operator: Operator::filter_context(symbol)?,
                value: FilterValue::Text(value.to_string()),
                query_kind: QueryKind::Term,
            }),
            "scope" => {
                Operator::filter_context(symbol)?;
                Ok(Self {
                    filter: FilterField::Scope,
                    operator: Operator::Scope,
                    value: FilterValue::Text(value.to_string()),
                    query_kind: QueryKind::Term,
                })
            }
            other => Err(QueryError::UnknownPrefix(other.to_string())),
        }
    }
}

/// Resolves a `from:` handle. A leading `@` is cosmetic, a domain equal to
/// the deployment's own is the same as no domain at all.
fn resolve_account(
    handle: &str,
    directory: &dyn AccountResolver,
) -> Result<AccountId, QueryError> {
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    let (username, domain) = match handle.split_once('@') {
        Some((username, domain)) => (username, Some(domain)),
        None => (handle, None),
    };
    let domain = domain.filter(|domain| !directory.is_local_domain(domain));
    directory
        .find_account(username, domain)
        .ok_or_else(|| QueryError::AccountNotFound {
            username: username.to_string(),
            domain: domain.map(str::to_string),
        })
}

/// Walks the parse tree once and materializes every clause, in source order.
pub fn compile(
    tree: &ParsedQuery,
    directory: &dyn AccountResolver,
) -> Result<Vec<Clause>, QueryError> {
    let mut clauses = Vec::with_capacity(tree.clauses.len());
    for node in &tree.clauses {
        clauses.push(compile_clause(node, directory)?);
    }
    debug!(clauses = clauses.len(), "compiled search clauses");
    Ok(clauses)
}

fn compile_clause(
    node: &ClauseNode,
    directory: &dyn AccountResolver,
) -> Result<Clause, QueryError> {
    if let Some(prefix) = &node.prefix {
        let value = body_text(&node.body);
        let clause = PrefixClause::resolve(prefix, node.operator, &value, directory)?;
        return Ok(Clause::Prefix(clause));
    }

    match &node.body {
        ClauseBody::Term(term) => Ok(Clause::Term(TermClause {
            prefix: None,
            operator: Operator::text_context(node.operator)?,
            term: term.clone(),
        })),
        // Shortcodes round-trip with their colons so the text index sees the
        // same token users type.
        ClauseBody::Shortcode(name) => Ok(Clause::Term(TermClause {
            prefix: None,
            operator: Operator::text_context(node.operator)?,
            term: format!(":{name}:"),
        })),
        ClauseBody::Phrase(words) => Ok(Clause::Phrase(PhraseClause {
            prefix: None,
            operator: Operator::text_context(node.operator)?,
            phrase: words.join(" "),
        })),
    }
}

fn body_text(body: &ClauseBody) -> String {
    match body {
        ClauseBody::Term(term) => term.clone(),
        ClauseBody::Shortcode(name) => format!(":{name}:"),
        ClauseBody::Phrase(words) => words.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_context_maps_the_three_symbols() {
        assert_eq!(Operator::text_context(None).unwrap(), Operator::Should);
        assert_eq!(Operator::text_context(Some('+')).unwrap(), Operator::Must);
        assert_eq!(
            Operator::text_context(Some('-')).unwrap(),
            Operator::MustNot
        );
        assert_eq!(
            Operator::text_context(Some('~')),
            Err(QueryError::UnknownOperator('~'))
        );
    }

    #[test]
    fn filter_context_has_no_optional_variant() {
        assert_eq!(Operator::filter_context(None).unwrap(), Operator::Filter);
        assert_eq!(
            Operator::filter_context(Some('+')).unwrap(),
            Operator::Filter
        );
        assert_eq!(
            Operator::filter_context(Some('-')).unwrap(),
            Operator::MustNot
        );
        assert_eq!(
            Operator::filter_context(Some('~')),
            Err(QueryError::UnknownOperator('~'))
        );
    }

    #[test]
    fn unknown_prefix_is_an_explicit_error() {
        struct NoDirectory;
        impl AccountResolver for NoDirectory {
            fn is_local_domain(&self, _domain: &str) -> bool {
                false
            }
            fn find_account(&self, _username: &str, _domain: Option<&str>) -> Option<AccountId> {
                None
            }
        }
        let err = PrefixClause::resolve("near", None, "paris", &NoDirectory).unwrap_err();
        assert_eq!(err, QueryError::UnknownPrefix("near".to_string()));
    }
}
