//! Fixed role catalogue used by the team-structure step.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

/// Utilization defaults and caps for one standard role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleProfile {
    pub name: &'static str,
    pub default_utilization: i32,
    pub max_utilization: i32,
}

/// Profile applied to role names not in [`ROLE_CATALOGUE`].
pub const CUSTOM_ROLE: RoleProfile = RoleProfile { name: "Custom", default_utilization: 100, max_utilization: 100 };

pub const ROLE_CATALOGUE: &[RoleProfile] = &[
    RoleProfile { name: "Project Manager", default_utilization: 50, max_utilization: 100 },
    RoleProfile { name: "Tech Lead", default_utilization: 100, max_utilization: 100 },
    RoleProfile { name: "Architect", default_utilization: 50, max_utilization: 100 },
    RoleProfile { name: "Senior Developer", default_utilization: 100, max_utilization: 100 },
    RoleProfile { name: "Developer", default_utilization: 100, max_utilization: 100 },
    RoleProfile { name: "QA Engineer", default_utilization: 100, max_utilization: 100 },
    RoleProfile { name: "Business Analyst", default_utilization: 75, max_utilization: 100 },
    RoleProfile { name: "UI/UX Designer", default_utilization: 50, max_utilization: 100 },
    RoleProfile { name: "DevOps Engineer", default_utilization: 50, max_utilization: 100 },
    RoleProfile { name: "Scrum Master", default_utilization: 25, max_utilization: 50 },
    RoleProfile { name: "Data Engineer", default_utilization: 100, max_utilization: 100 },
];

/// Look up a catalogue role by name (case-insensitive, trimmed).
#[must_use]
pub fn find_role(name: &str) -> Option<&'static RoleProfile> {
    let name = name.trim();
    ROLE_CATALOGUE.iter().find(|role| role.name.eq_ignore_ascii_case(name))
}

/// Catalogue profile for `name`, or [`CUSTOM_ROLE`] limits for anything else.
#[must_use]
pub fn profile_for(name: &str) -> RoleProfile {
    find_role(name).copied().unwrap_or(CUSTOM_ROLE)
}
