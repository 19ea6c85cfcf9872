//! Pets HTTP wire protocol: payload shapes and status mapping

pub mod pet;
pub mod response;

pub use pet::{Pet, PetPayload, RESERVED_ID, generate_id};
pub use response::{ApiError, DELETE_FAILED, PET_DELETED, PETS_DELETED, STORE_UNAVAILABLE};
