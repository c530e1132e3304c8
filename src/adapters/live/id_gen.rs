//! Random UUIDs for new redirects.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Hands out v4 UUIDs.
#[derive(Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_uuids() {
        let first = UuidGenerator.generate_id();
        let second = UuidGenerator.generate_id();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
