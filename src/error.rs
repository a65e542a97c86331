use std::error::Error;
use std::fmt;

use finch_syntax::ParseError;

/// Everything that can abort a compile. All variants are fatal: there is no
/// partial-result mode and no per-clause recovery, the caller decides how to
/// surface the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The grammar could not consume the full input.
    Syntax(ParseError),
    /// A prefix keyword outside the recognized set. Unreachable while the
    /// grammar only admits the known keywords.
    UnknownPrefix(String),
    /// An operator symbol outside `+`/`-`. Unreachable while the grammar
    /// only admits those two.
    UnknownOperator(char),
    /// A `scope:` value other than `related`/`public`.
    UnknownScope(String),
    /// A `from:` handle that did not resolve to a known account.
    AccountNotFound {
        username: String,
        domain: Option<String>,
    },
    /// A `since:`/`until:` value that is not a recognizable date or time.
    InvalidDate(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Syntax(err) => write!(f, "invalid search syntax: {err}"),
            QueryError::UnknownPrefix(prefix) => write!(f, "unknown prefix: {prefix}"),
            QueryError::UnknownOperator(symbol) => write!(f, "unknown operator: {symbol}"),
            QueryError::UnknownScope(scope) => write!(f, "unknown scope: {scope}"),
            QueryError::AccountNotFound { username, domain } => match domain {
                Some(domain) => write!(f, "account @{username}@{domain} not found"),
                None => write!(f, "account @{username} not found"),
            },
            QueryError::InvalidDate(raw) => write!(f, "unparseable date: {raw}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(err: ParseError) -> Self {
        QueryError::Syntax(err)
    }
}
