//! Actor identity consumed by the core
//!
//! The core never authenticates; it receives an already-resolved identity
//! from the caller and uses it for attribution (`completed_by`,
//! `approved_by`) and for role-scoped visibility.

use serde::{Deserialize, Serialize};

/// Role of the acting identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "role")]
pub enum ActorRole {
    Admin,
    Staff,
    /// A resident-role caller linked to their own resident record
    Resident { resident_id: i64 },
}

/// A resolved identity: display name plus role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Admins and staff see every record
    pub fn is_staff_level(&self) -> bool {
        matches!(self.role, ActorRole::Admin | ActorRole::Staff)
    }

    /// The resident record this actor is linked to, if any
    pub fn linked_resident_id(&self) -> Option<i64> {
        match self.role {
            ActorRole::Resident { resident_id } => Some(resident_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_level_roles() {
        assert!(Actor::new("admin", ActorRole::Admin).is_staff_level());
        assert!(Actor::new("staff1", ActorRole::Staff).is_staff_level());
        assert!(!Actor::new("john", ActorRole::Resident { resident_id: 7 }).is_staff_level());
    }

    #[test]
    fn test_linked_resident() {
        let actor = Actor::new("john", ActorRole::Resident { resident_id: 7 });
        assert_eq!(actor.linked_resident_id(), Some(7));
        assert_eq!(Actor::new("staff1", ActorRole::Staff).linked_resident_id(), None);
    }
}
