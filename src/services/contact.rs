//! Contact listing and CRUD services.
//!
//! `list_contacts` is the read-path pipeline: parse the pagination spec,
//! build the filter criteria against the contact field registry, then hand
//! both to the repository. An empty page is a successful result here; only
//! single-resource lookups translate absence into `NotFound`.

use std::collections::HashMap;

use crate::domain::contact::{self, Contact, NewContact, UpdateContact};
use crate::filter::build_filter;
use crate::pagination::{PageRequest, PageResult};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult};

/// Runs one paged, filtered, sorted collection query from raw request
/// parameters.
pub fn list_contacts<R>(
    repo: &R,
    params: &HashMap<String, String>,
) -> ServiceResult<PageResult<Contact>>
where
    R: ContactReader + ?Sized,
{
    let page = PageRequest::parse(params)?;
    let filter = build_filter(params, &contact::FILTER_FIELDS)?;

    let query = ContactListQuery::new(page).filter(filter);
    repo.list_contacts(query).map_err(ServiceError::from)
}

/// Fetches a contact by its identifier.
pub fn get_contact<R>(repo: &R, contact_id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    repo.get_contact_by_id(contact_id)?
        .ok_or(ServiceError::NotFound)
}

/// Persists a new contact and returns the stored representation.
pub fn create_contact<R>(repo: &R, new_contact: NewContact) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    repo.create_contact(&new_contact).map_err(ServiceError::from)
}

/// Applies the provided updates to the contact entity.
pub fn update_contact<R>(
    repo: &R,
    contact_id: i32,
    updates: UpdateContact,
) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    repo.update_contact(contact_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes the contact, reporting `NotFound` when nothing was deleted.
pub fn delete_contact<R>(repo: &R, contact_id: i32) -> ServiceResult<()>
where
    R: ContactWriter + ?Sized,
{
    repo.delete_contact(contact_id).map_err(ServiceError::from)
}
