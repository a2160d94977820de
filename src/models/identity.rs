//! Caller identity and the role hierarchy.
//!
//! The engine trusts the host service to authenticate callers; what arrives
//! here is the already-extracted identity: user id, tenant id, and role.
//! Roles form a closed hierarchy used to gate review operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A role in the fixed hierarchy, ordered from least to most privileged.
///
/// # Example
///
/// ```
/// use closing_engine::models::Role;
///
/// assert_eq!(Role::from_name("supervisor"), Some(Role::Supervisor));
/// assert!(Role::Manager.at_least(Role::Supervisor));
/// assert!(!Role::Employee.at_least(Role::Supervisor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff; may record entries and submit closings.
    Employee,
    /// May review closings and adjustment requests for their units.
    Supervisor,
    /// Unit management; everything a supervisor can do.
    Manager,
    /// Tenant-wide administration.
    Administrator,
}

impl Role {
    /// The role's position in the hierarchy (higher outranks lower).
    pub fn rank(&self) -> u8 {
        match self {
            Role::Employee => 1,
            Role::Supervisor => 2,
            Role::Manager => 3,
            Role::Administrator => 4,
        }
    }

    /// Returns true when this role ranks at or above `other`.
    pub fn at_least(&self, other: Role) -> bool {
        self.rank() >= other.rank()
    }

    /// The canonical lowercase name of the role.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Supervisor => "supervisor",
            Role::Manager => "manager",
            Role::Administrator => "administrator",
        }
    }

    /// Looks up a role by its canonical name.
    pub fn from_name(name: &str) -> Option<Role> {
        match name {
            "employee" => Some(Role::Employee),
            "supervisor" => Some(Role::Supervisor),
            "manager" => Some(Role::Manager),
            "administrator" => Some(Role::Administrator),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The identity of the caller, as supplied per call by the host service.
///
/// The tenant id is mandatory on every engine operation and is threaded into
/// every repository query; it is never inferred or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The authenticated user.
    pub user_id: Uuid,
    /// The tenant the call is scoped to.
    pub tenant_id: Uuid,
    /// The caller's role in the hierarchy.
    pub role: Role,
}

impl Caller {
    /// Creates a caller identity.
    pub fn new(user_id: Uuid, tenant_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            tenant_id,
            role,
        }
    }
}
