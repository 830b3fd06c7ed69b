use jobbox::session::gate::{decide, GateDecision, RouteRequirement};
use jobbox::session::routes::{requirement_for, route_table};
use jobbox::session::Session;
use jobbox::types::Role;

fn student() -> Session {
    Session::new("t1", Role::Student, "u1")
}

fn company() -> Session {
    Session::new("t1", Role::Company, "u1")
}

#[test]
fn public_only_allows_exactly_the_unauthenticated() {
    let req = RouteRequirement::PublicOnly;

    assert_eq!(decide(&req, None), GateDecision::Allow);
    assert_eq!(decide(&req, Some(&student())), GateDecision::RedirectDefault);
    assert_eq!(decide(&req, Some(&company())), GateDecision::RedirectDefault);
}

#[test]
fn any_authenticated_redirects_anonymous_to_login() {
    let req = RouteRequirement::AnyAuthenticated;

    assert_eq!(decide(&req, None), GateDecision::RedirectLogin);
    assert_eq!(decide(&req, Some(&student())), GateDecision::Allow);
    assert_eq!(decide(&req, Some(&company())), GateDecision::Allow);
}

#[test]
fn role_scoped_allows_iff_authenticated_with_matching_role() {
    // Company session against a student-only view: wrong role, safe default.
    let student_only = RouteRequirement::roles([Role::Student]);
    assert_eq!(
        decide(&student_only, Some(&company())),
        GateDecision::RedirectDefault
    );
    assert_eq!(decide(&student_only, Some(&student())), GateDecision::Allow);

    // Anonymous against the same view: login, not default.
    assert_eq!(decide(&student_only, None), GateDecision::RedirectLogin);
}

#[test]
fn role_scoped_exhaustive_matrix() {
    let requirements = [
        RouteRequirement::roles([Role::Student]),
        RouteRequirement::roles([Role::Company]),
        RouteRequirement::roles([Role::Student, Role::Company]),
    ];
    let sessions = [student(), company()];

    for req in &requirements {
        for session in &sessions {
            let expected = match req {
                RouteRequirement::Roles(set) => {
                    if set.contains(&session.role) {
                        GateDecision::Allow
                    } else {
                        GateDecision::RedirectDefault
                    }
                }
                _ => unreachable!(),
            };
            assert_eq!(decide(req, Some(session)), expected);
        }
        assert_eq!(decide(req, None), GateDecision::RedirectLogin);
    }
}

#[test]
fn decisions_are_stable_across_repeated_evaluation() {
    // Pure function: same inputs, same answer, no hidden state.
    let req = RouteRequirement::roles([Role::Company]);
    let session = company();
    for _ in 0..3 {
        assert_eq!(decide(&req, Some(&session)), GateDecision::Allow);
    }
}

#[test]
fn route_table_guards_the_expected_paths() {
    assert_eq!(requirement_for("/login"), Some(RouteRequirement::PublicOnly));
    assert_eq!(
        requirement_for("/signup"),
        Some(RouteRequirement::PublicOnly)
    );
    assert_eq!(
        requirement_for("/post-job"),
        Some(RouteRequirement::roles([Role::Company]))
    );
    assert_eq!(
        requirement_for("/view-jobs"),
        Some(RouteRequirement::roles([Role::Student]))
    );
    assert_eq!(
        requirement_for("/update-profile"),
        Some(RouteRequirement::AnyAuthenticated)
    );

    // Ungated views are absent rather than mapped to a permissive rule.
    assert_eq!(requirement_for("/"), None);
    assert_eq!(requirement_for("/no-such-page"), None);
}

#[test]
fn route_table_has_no_duplicate_paths() {
    let table = route_table();
    let mut paths: Vec<_> = table.iter().map(|d| d.path).collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), table.len());
}
