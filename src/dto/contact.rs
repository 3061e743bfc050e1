//! DTOs exposed by the contacts API endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::contact::{Contact, NewContact, UpdateContact};

/// Public representation of a contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub rating: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            company: contact.company,
            rating: contact.rating,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Payload for creating a contact.
pub struct CreateContactRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub rating: i64,
}

impl From<CreateContactRequest> for NewContact {
    fn from(payload: CreateContactRequest) -> Self {
        NewContact::new(
            payload.name,
            payload.email,
            payload.phone,
            payload.company,
            payload.rating,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Payload for updating an existing contact.
pub struct UpdateContactRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub rating: i64,
}

impl From<UpdateContactRequest> for UpdateContact {
    fn from(payload: UpdateContactRequest) -> Self {
        UpdateContact::new(
            payload.name,
            payload.email,
            payload.phone,
            payload.company,
            payload.rating,
        )
    }
}
