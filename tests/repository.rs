use std::collections::HashMap;

use rolodex::domain::contact::{self, NewContact, UpdateContact};
use rolodex::filter::build_filter;
use rolodex::pagination::{PageRequest, SortDirection, SortField};
use rolodex::repository::errors::RepositoryError;
use rolodex::repository::{ContactListQuery, ContactReader, ContactWriter, DieselRepository};

mod common;

fn seed(repo: &DieselRepository, entries: &[(&str, &str, &str, &str, i64)]) {
    for (name, email, phone, company, rating) in entries {
        repo.create_contact(&NewContact::new(
            name.to_string(),
            email.to_string(),
            phone.to_string(),
            company.to_string(),
            *rating,
        ))
        .unwrap();
    }
}

fn filter_params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn list_query(pairs: &[(&str, &str)], page: PageRequest) -> ContactListQuery {
    let filter = build_filter(&filter_params(pairs), &contact::FILTER_FIELDS).unwrap();
    ContactListQuery::new(page).filter(filter)
}

#[test]
fn test_contact_repository_crud() {
    let test_db = common::TestDb::new("test_contact_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let alice = repo
        .create_contact(&NewContact::new(
            "Alice".into(),
            "alice@example.com".into(),
            "111".into(),
            "Acme".into(),
            1,
        ))
        .unwrap();
    let bob = repo
        .create_contact(&NewContact::new(
            "Bob".into(),
            "bob@example.com".into(),
            "222".into(),
            "Initech".into(),
            2,
        ))
        .unwrap();

    let page = repo
        .list_contacts(list_query(&[], PageRequest::default()))
        .unwrap();
    assert_eq!(page.total_elements(), 2);
    assert_eq!(page.content().len(), 2);

    let updates = UpdateContact::new(
        "Bobby".into(),
        bob.email.clone(),
        bob.phone.clone(),
        bob.company.clone(),
        bob.rating,
    );
    let updated = repo.update_contact(bob.id, &updates).unwrap();
    assert_eq!(updated.name, "Bobby");

    repo.delete_contact(alice.id).unwrap();
    assert!(repo.get_contact_by_id(alice.id).unwrap().is_none());

    let page_after = repo
        .list_contacts(list_query(&[], PageRequest::default()))
        .unwrap();
    assert_eq!(page_after.total_elements(), 1);
    assert_eq!(page_after.content()[0].name, "Bobby");
}

#[test]
fn test_delete_missing_contact_is_not_found() {
    let test_db = common::TestDb::new("test_delete_missing_contact.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let err = repo.delete_contact(12345).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_descending_sort_orders_the_slice() {
    let test_db = common::TestDb::new("test_descending_sort.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("A", "a@example.com", "1", "Spec", 0),
            ("B", "b@example.com", "2", "Certify", 0),
            ("C", "c@example.com", "3", "Neubus", 0),
        ],
    );

    let page = PageRequest::default().with_sort(vec![SortField::new("company", SortDirection::Desc)]);
    let result = repo.list_contacts(list_query(&[], page)).unwrap();

    let companies: Vec<&str> = result.content().iter().map(|c| c.company.as_str()).collect();
    assert_eq!(companies, ["Spec", "Neubus", "Certify"]);
}

#[test]
fn test_second_page_of_size_one_holds_the_second_contact() {
    let test_db = common::TestDb::new("test_second_page_of_size_one.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("Alice", "alice@example.com", "1", "Acme", 0),
            ("Bob", "bob@example.com", "2", "Acme", 0),
            ("Carol", "carol@example.com", "3", "Acme", 0),
        ],
    );

    let page = PageRequest::new(1, 1).unwrap();
    let result = repo.list_contacts(list_query(&[], page)).unwrap();

    assert_eq!(result.content().len(), 1);
    assert_eq!(result.content()[0].name, "Bob");
    assert_eq!(result.total_elements(), 3);
    assert_eq!(result.total_pages(), 3);
    assert!(!result.is_first());
    assert!(!result.is_last());
}

#[test]
fn test_name_filter_is_case_insensitive_containment() {
    let test_db = common::TestDb::new("test_name_filter_containment.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("Sally", "sally@example.com", "1", "Acme", 0),
            ("Max", "max@example.com", "2", "Acme", 0),
            ("Ally", "ally@example.com", "3", "Acme", 0),
        ],
    );

    let result = repo
        .list_contacts(list_query(&[("name", "ally")], PageRequest::default()))
        .unwrap();

    let names: Vec<&str> = result.content().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Sally", "Ally"]);
}

#[test]
fn test_email_filter_is_an_exact_lookup() {
    let test_db = common::TestDb::new("test_email_filter_exact.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("Sally", "sally@example.com", "1", "Acme", 0),
            ("Ally", "ally@example.com", "2", "Acme", 0),
        ],
    );

    let partial = repo
        .list_contacts(list_query(&[("email", "ally@")], PageRequest::default()))
        .unwrap();
    assert!(partial.content().is_empty());

    let exact = repo
        .list_contacts(list_query(
            &[("email", "ally@example.com")],
            PageRequest::default(),
        ))
        .unwrap();
    assert_eq!(exact.content().len(), 1);
    assert_eq!(exact.content()[0].name, "Ally");
}

#[test]
fn test_numeric_filter_matches_exactly() {
    let test_db = common::TestDb::new("test_numeric_filter_exact.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("Alice", "alice@example.com", "1", "Acme", 3),
            ("Bob", "bob@example.com", "2", "Acme", 5),
            ("Carol", "carol@example.com", "3", "Acme", 3),
        ],
    );

    let result = repo
        .list_contacts(list_query(&[("rating", "3")], PageRequest::default()))
        .unwrap();
    assert_eq!(result.total_elements(), 2);
    assert!(result.content().iter().all(|c| c.rating == 3));
}

#[test]
fn test_excluded_id_field_does_not_constrain_the_query() {
    let test_db = common::TestDb::new("test_excluded_id_field.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("Alice", "alice@example.com", "1", "Acme", 0),
            ("Bob", "bob@example.com", "2", "Acme", 0),
        ],
    );

    let result = repo
        .list_contacts(list_query(&[("id", "999")], PageRequest::default()))
        .unwrap();
    assert_eq!(result.total_elements(), 2);
}

#[test]
fn test_filters_combine_conjunctively() {
    let test_db = common::TestDb::new("test_filters_combine.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(
        &repo,
        &[
            ("Sally", "sally@example.com", "1", "Acme", 3),
            ("Ally", "ally@example.com", "2", "Acme", 5),
            ("Allison", "allison@example.com", "3", "Initech", 3),
        ],
    );

    let result = repo
        .list_contacts(list_query(
            &[("name", "ally"), ("rating", "3")],
            PageRequest::default(),
        ))
        .unwrap();

    assert_eq!(result.content().len(), 1);
    assert_eq!(result.content()[0].name, "Sally");
}

#[test]
fn test_empty_match_returns_an_empty_page() {
    let test_db = common::TestDb::new("test_empty_match.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(&repo, &[("Alice", "alice@example.com", "1", "Acme", 0)]);

    let result = repo
        .list_contacts(list_query(&[("name", "zzz")], PageRequest::default()))
        .unwrap();
    assert!(result.content().is_empty());
    assert_eq!(result.total_elements(), 0);
    assert_eq!(result.total_pages(), 0);
    assert!(result.is_last());
}

#[test]
fn test_unknown_sort_field_is_rejected() {
    let test_db = common::TestDb::new("test_unknown_sort_field.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(&repo, &[("Alice", "alice@example.com", "1", "Acme", 0)]);

    let page = PageRequest::default().with_sort(vec![SortField::new("shoe_size", SortDirection::Asc)]);
    let err = repo.list_contacts(list_query(&[], page)).unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn test_slice_never_exceeds_the_page_size() {
    let test_db = common::TestDb::new("test_slice_bound.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    for i in 0..7 {
        repo.create_contact(&NewContact::new(
            format!("Contact {i}"),
            format!("contact{i}@example.com"),
            format!("{i}"),
            "Acme".into(),
            0,
        ))
        .unwrap();
    }

    let page = PageRequest::new(0, 3).unwrap();
    let result = repo.list_contacts(list_query(&[], page)).unwrap();
    assert_eq!(result.content().len(), 3);
    assert_eq!(result.total_elements(), 7);
    assert_eq!(result.total_pages(), 3);
}
