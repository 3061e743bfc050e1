//! Diesel implementation of the contact repository.
//!
//! `list_contacts` is the paged query executor: it translates the typed
//! [`FilterCriteria`] and sort spec into predicates over the static column
//! set of `contacts`, then loads one bounded slice and the total matching
//! count inside a single transaction so both observe the same snapshot.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::filter::{FilterCriteria, FilterValue, MatchMode};
use crate::pagination::{PageResult, SortDirection, SortField};
use crate::repository::{
    ContactListQuery, ContactReader, ContactWriter, DieselRepository,
    errors::{RepositoryError, RepositoryResult},
};

type BoxedContacts<'a> = crate::schema::contacts::BoxedQuery<'a, Sqlite>;

fn type_mismatch(field: &str) -> RepositoryError {
    RepositoryError::Unexpected(format!(
        "filter value kind does not match column `{field}`"
    ))
}

/// Applies one text matcher to the boxed query. SQLite `LIKE` is
/// case-insensitive for ASCII, which gives `Contains` its semantics.
macro_rules! text_predicate {
    ($query:expr, $column:expr, $matcher:expr, $name:expr) => {
        match (&$matcher.value, $matcher.mode) {
            (FilterValue::Text(value), MatchMode::Contains) => {
                $query.filter($column.like(format!("%{value}%")))
            }
            (FilterValue::Text(value), MatchMode::Exact) => $query.filter($column.eq(value.clone())),
            (FilterValue::Integer(_), _) => return Err(type_mismatch($name)),
        }
    };
}

fn apply_filter<'a>(
    query: BoxedContacts<'a>,
    filter: &FilterCriteria,
) -> RepositoryResult<BoxedContacts<'a>> {
    use crate::schema::contacts;

    let mut query = query;
    for (name, matcher) in filter.matchers() {
        query = match name {
            "name" => text_predicate!(query, contacts::name, matcher, name),
            "email" => text_predicate!(query, contacts::email, matcher, name),
            "phone" => text_predicate!(query, contacts::phone, matcher, name),
            "company" => text_predicate!(query, contacts::company, matcher, name),
            "rating" => match &matcher.value {
                FilterValue::Integer(value) => query.filter(contacts::rating.eq(*value)),
                FilterValue::Text(_) => return Err(type_mismatch(name)),
            },
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "unknown filter field: {other}"
                )));
            }
        };
    }
    Ok(query)
}

fn apply_sort<'a>(
    query: BoxedContacts<'a>,
    sort: &[SortField],
) -> RepositoryResult<BoxedContacts<'a>> {
    use crate::schema::contacts;

    let mut query = query;
    for (position, field) in sort.iter().enumerate() {
        macro_rules! order_by {
            ($column:expr) => {
                match (position == 0, field.direction) {
                    (true, SortDirection::Asc) => query.order($column.asc()),
                    (true, SortDirection::Desc) => query.order($column.desc()),
                    (false, SortDirection::Asc) => query.then_order_by($column.asc()),
                    (false, SortDirection::Desc) => query.then_order_by($column.desc()),
                }
            };
        }

        query = match field.field.as_str() {
            "id" => order_by!(contacts::id),
            "name" => order_by!(contacts::name),
            "email" => order_by!(contacts::email),
            "phone" => order_by!(contacts::phone),
            "company" => order_by!(contacts::company),
            "rating" => order_by!(contacts::rating),
            "created_at" => order_by!(contacts::created_at),
            "updated_at" => order_by!(contacts::updated_at),
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "unknown sort field: {other}"
                )));
            }
        };
    }
    Ok(query)
}

impl ContactReader for DieselRepository {
    fn get_contact_by_id(&self, id: i32) -> RepositoryResult<Option<Contact>> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let contact = contacts::table
            .find(id)
            .first::<DbContact>(&mut conn)
            .optional()?;

        Ok(contact.map(Into::into))
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<PageResult<Contact>> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let page = &query.page;
        let limit = i64::from(page.page_size());
        let offset = page.offset();

        // Slice and count must observe the same snapshot.
        let (total, items) = conn.transaction::<_, RepositoryError, _>(|conn| {
            let total: i64 = apply_filter(contacts::table.into_boxed(), &query.filter)?
                .count()
                .get_result(conn)?;

            let mut slice = apply_filter(contacts::table.into_boxed(), &query.filter)?;
            slice = if page.sort().is_empty() {
                slice.order(contacts::id.asc())
            } else {
                apply_sort(slice, page.sort())?
            };
            let items = slice.limit(limit).offset(offset).load::<DbContact>(conn)?;

            Ok((total, items))
        })?;

        Ok(PageResult::new(
            items.into_iter().map(Into::into).collect(),
            page.page_number(),
            page.page_size(),
            total as u64,
        ))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::models::contact::{Contact as DbContact, NewContact as DbNewContact};
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let insertable: DbNewContact = new_contact.into();
        let created = diesel::insert_into(contacts::table)
            .values(&insertable)
            .get_result::<DbContact>(&mut conn)?;

        Ok(created.into())
    }

    fn update_contact(
        &self,
        contact_id: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::models::contact::{Contact as DbContact, UpdateContact as DbUpdateContact};
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let db_updates: DbUpdateContact = updates.into();

        let updated = diesel::update(contacts::table.find(contact_id))
            .set(&db_updates)
            .get_result::<DbContact>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_contact(&self, contact_id: i32) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let affected = diesel::delete(contacts::table.find(contact_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
