use serde::Serialize;

/// Internal identifier of an account known to the deployment. The backend
/// indexes statuses under this id, never under the textual handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccountId(pub u64);

/// Injected view of the deployment's account directory.
///
/// The compiler stays independently testable because it never talks to a
/// live account store; callers hand in whatever implements this. Both
/// methods are read-only lookups with no retry semantics here. A failed
/// lookup aborts the whole compile.
pub trait AccountResolver {
    /// Whether `domain` is the deployment's own. Handles on the local domain
    /// are the same account as the bare local handle, so the domain part is
    /// dropped before lookup.
    fn is_local_domain(&self, domain: &str) -> bool;

    /// Resolves `username` (optionally on a remote `domain`) to an account
    /// id. `None` means no such account exists.
    fn find_account(&self, username: &str, domain: Option<&str>) -> Option<AccountId>;
}
