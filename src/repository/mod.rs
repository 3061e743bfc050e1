//! Repository traits and their Diesel implementation.

use crate::db::DbPool;
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::filter::FilterCriteria;
use crate::pagination::{PageRequest, PageResult};
use crate::repository::errors::RepositoryResult;

pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Everything the executor needs to produce one page of contacts.
#[derive(Debug, Clone)]
pub struct ContactListQuery {
    pub page: PageRequest,
    pub filter: FilterCriteria,
}

impl ContactListQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            filter: FilterCriteria::default(),
        }
    }

    pub fn filter(mut self, filter: FilterCriteria) -> Self {
        self.filter = filter;
        self
    }
}

pub trait ContactReader {
    fn get_contact_by_id(&self, id: i32) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<PageResult<Contact>>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn update_contact(
        &self,
        contact_id: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    fn delete_contact(&self, contact_id: i32) -> RepositoryResult<()>;
}

/// Diesel-backed repository shared across handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
