//! Pet document encoding for the store
//!
//! Documents are stored as UTF-8 JSON objects keyed by the pet id.

use crate::StorageError;
use crate::protocol::Pet;

/// Encode a pet to bytes for storage
pub fn encode_pet(pet: &Pet) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(pet).map_err(|e| StorageError::Encoding(e.to_string()))
}

/// Decode a stored pet document
pub fn decode_pet(bytes: &[u8]) -> Result<Pet, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Decoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_layout() {
        let pet = Pet::new("42", "Rex", "dog", "lab");
        let bytes = encode_pet(&pet).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"id":"42","name":"Rex","species":"dog","breed":"lab"}"#
        );
        assert_eq!(decode_pet(&bytes).unwrap(), pet);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_pet(b"\x00\x01not json");
        assert!(matches!(result, Err(StorageError::Decoding(_))));
    }

    #[test]
    fn test_decode_missing_field() {
        let result = decode_pet(br#"{"id":"1","name":"Rex"}"#);
        assert!(matches!(result, Err(StorageError::Decoding(_))));
    }
}
