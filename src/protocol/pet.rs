//! Pet wire shape and payload validation
//!
//! Wire format: `{ "id": string, "name": string, "species": string, "breed": string }`

use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Path segment taken by the bulk delete route
pub const RESERVED_ID: &str = "all";

/// A stored pet record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
}

impl Pet {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        species: impl Into<String>,
        breed: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            species: species.into(),
            breed: breed.into(),
        }
    }
}

/// Incoming create/modify body
///
/// Every field is optional at the serde level so that presence can be
/// checked explicitly and reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
}

impl PetPayload {
    /// Client-supplied id, if any. Empty ids count as absent.
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Id to create the record under: the body id if given, otherwise a
    /// fresh one. [`RESERVED_ID`] is refused since `/pets/all` could never
    /// address it.
    pub fn creation_id(&self) -> Result<String, ValidationError> {
        match self.requested_id() {
            Some(RESERVED_ID) => Err(ValidationError::ReservedId(RESERVED_ID.to_string())),
            Some(id) => Ok(id.to_string()),
            None => Ok(generate_id()),
        }
    }

    /// Check required fields and build the record to store under `id`,
    /// discarding any id in the body
    pub fn into_pet(self, id: String) -> Result<Pet, ValidationError> {
        Ok(Pet {
            id,
            name: self.name.ok_or(ValidationError::MissingField("name"))?,
            species: self.species.ok_or(ValidationError::MissingField("species"))?,
            breed: self.breed.ok_or(ValidationError::MissingField("breed"))?,
        })
    }
}

/// Generate a fresh pet id (UUID v4, hyphenless)
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> PetPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_complete_payload() {
        let p = payload(r#"{"name":"Rex","species":"dog","breed":"lab"}"#);
        assert_eq!(p.requested_id(), None);

        let pet = p.into_pet("abc".to_string()).unwrap();
        assert_eq!(pet, Pet::new("abc", "Rex", "dog", "lab"));
    }

    #[test]
    fn test_missing_fields_reported_by_name() {
        let p = payload(r#"{"species":"dog","breed":"lab"}"#);
        assert_eq!(
            p.into_pet("x".to_string()),
            Err(ValidationError::MissingField("name"))
        );

        let p = payload(r#"{"name":"Rex","breed":"lab"}"#);
        assert_eq!(
            p.into_pet("x".to_string()),
            Err(ValidationError::MissingField("species"))
        );

        let p = payload(r#"{"name":"Rex","species":"dog","breed":null}"#);
        assert_eq!(
            p.into_pet("x".to_string()),
            Err(ValidationError::MissingField("breed"))
        );
    }

    #[test]
    fn test_body_id_is_replaced() {
        let p = payload(r#"{"id":"Y","name":"Rex","species":"dog","breed":"lab"}"#);
        assert_eq!(p.requested_id(), Some("Y"));

        let pet = p.into_pet("X".to_string()).unwrap();
        assert_eq!(pet.id, "X");
    }

    #[test]
    fn test_empty_id_counts_as_absent() {
        let p = payload(r#"{"id":"","name":"Rex","species":"dog","breed":"lab"}"#);
        assert_eq!(p.requested_id(), None);
        assert_eq!(p.creation_id().unwrap().len(), 32);
    }

    #[test]
    fn test_creation_id() {
        let p = payload(r#"{"id":"rex-1","name":"Rex","species":"dog","breed":"lab"}"#);
        assert_eq!(p.creation_id(), Ok("rex-1".to_string()));

        let p = payload(r#"{"id":"all","name":"Rex","species":"dog","breed":"lab"}"#);
        assert_eq!(
            p.creation_id(),
            Err(ValidationError::ReservedId("all".to_string()))
        );
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result: Result<PetPayload, _> = serde_json::from_str(r#"{"name":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Pet::new("1", "Rex", "dog", "lab")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id":"1","name":"Rex","species":"dog","breed":"lab"})
        );
    }
}
