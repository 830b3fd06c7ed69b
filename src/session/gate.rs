use std::collections::BTreeSet;

use crate::session::store::Session;
use crate::types::Role;

/// Role requirement a view declares for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Only reachable while logged out (login and signup pages).
    PublicOnly,
    /// Any authenticated session qualifies.
    AnyAuthenticated,
    /// Only sessions whose role is in the set qualify. An empty set is
    /// equivalent to `AnyAuthenticated`.
    Roles(BTreeSet<Role>),
}

impl RouteRequirement {
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        RouteRequirement::Roles(roles.into_iter().collect())
    }
}

/// Outcome of evaluating a requirement against the current session.
///
/// These are control-flow results, not errors; acting on a redirect is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectLogin,
    RedirectDefault,
}

/// Decide whether the session may enter a view with the given requirement.
///
/// Pure function of its two inputs: no storage reads, no network, no side
/// effects. Evaluated once per navigation.
pub fn decide(requirement: &RouteRequirement, session: Option<&Session>) -> GateDecision {
    let authenticated = session.map(Session::is_authenticated).unwrap_or(false);

    match requirement {
        RouteRequirement::PublicOnly => {
            // Send an already-logged-in user away from login/signup.
            if authenticated {
                GateDecision::RedirectDefault
            } else {
                GateDecision::Allow
            }
        }
        RouteRequirement::AnyAuthenticated => {
            if authenticated {
                GateDecision::Allow
            } else {
                GateDecision::RedirectLogin
            }
        }
        RouteRequirement::Roles(required) => {
            if !authenticated {
                return GateDecision::RedirectLogin;
            }
            // An authenticated session always has a role; the session type
            // cannot hold a partially-populated record.
            let role = session.map(|s| s.role);
            let qualifies = required.is_empty() || role.is_some_and(|r| required.contains(&r));
            if qualifies {
                GateDecision::Allow
            } else {
                GateDecision::RedirectDefault
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_session() -> Session {
        Session::new("tok", Role::Student, "u1")
    }

    #[test]
    fn public_only_allows_anonymous() {
        assert_eq!(
            decide(&RouteRequirement::PublicOnly, None),
            GateDecision::Allow
        );
    }

    #[test]
    fn public_only_bounces_logged_in_users() {
        let s = student_session();
        assert_eq!(
            decide(&RouteRequirement::PublicOnly, Some(&s)),
            GateDecision::RedirectDefault
        );
    }

    #[test]
    fn empty_role_set_behaves_as_any_authenticated() {
        let s = student_session();
        let req = RouteRequirement::roles([]);
        assert_eq!(decide(&req, Some(&s)), GateDecision::Allow);
        assert_eq!(decide(&req, None), GateDecision::RedirectLogin);
    }

    #[test]
    fn empty_token_counts_as_unauthenticated() {
        let s = Session::new("", Role::Student, "u1");
        assert_eq!(
            decide(&RouteRequirement::AnyAuthenticated, Some(&s)),
            GateDecision::RedirectLogin
        );
    }
}
