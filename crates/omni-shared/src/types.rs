//! Common types

use uuid::Uuid;

/// Opaque identifier used for menus, roles and users.
pub type EntityId = String;

pub fn new_id() -> EntityId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
