use crate::session::gate::RouteRequirement;
use crate::types::Role;

/// A view path paired with the role requirement it declares.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub requirement: RouteRequirement,
}

/// The gated views of the application. Views missing from this table (home,
/// not-found) carry no requirement and are never consulted against the gate.
pub fn route_table() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor {
            path: "/login",
            requirement: RouteRequirement::PublicOnly,
        },
        RouteDescriptor {
            path: "/signup",
            requirement: RouteRequirement::PublicOnly,
        },
        RouteDescriptor {
            path: "/dashboard",
            requirement: RouteRequirement::AnyAuthenticated,
        },
        RouteDescriptor {
            path: "/update-profile",
            requirement: RouteRequirement::AnyAuthenticated,
        },
        RouteDescriptor {
            path: "/view-jobs",
            requirement: RouteRequirement::roles([Role::Student]),
        },
        RouteDescriptor {
            path: "/post-job",
            requirement: RouteRequirement::roles([Role::Company]),
        },
        RouteDescriptor {
            path: "/my-jobs",
            requirement: RouteRequirement::roles([Role::Company]),
        },
        RouteDescriptor {
            path: "/applicants",
            requirement: RouteRequirement::roles([Role::Company]),
        },
    ]
}

/// Look up the requirement a path declares, if it declares one.
pub fn requirement_for(path: &str) -> Option<RouteRequirement> {
    route_table()
        .into_iter()
        .find(|d| d.path == path)
        .map(|d| d.requirement)
}
