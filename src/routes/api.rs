//! REST endpoints for the contact collection.
//!
//! The list handler returns a [`PageResult`], so the pagination metadata
//! header and the bare-array body come from the type itself rather than
//! from per-endpoint shaping code.

use std::collections::HashMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::dto::contact::{ContactDto, CreateContactRequest, UpdateContactRequest};
use crate::pagination::PageResult;
use crate::repository::DieselRepository;
use crate::services::{self, ServiceError};

#[get("/v1/contacts")]
pub async fn list_contacts(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
) -> Result<PageResult<ContactDto>, ServiceError> {
    let page = services::contact::list_contacts(repo.get_ref(), &params)?;
    Ok(page.map(ContactDto::from))
}

#[get("/v1/contacts/{contact_id}")]
pub async fn get_contact(
    contact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<web::Json<ContactDto>, ServiceError> {
    let contact = services::contact::get_contact(repo.get_ref(), contact_id.into_inner())?;
    Ok(web::Json(ContactDto::from(contact)))
}

#[post("/v1/contacts")]
pub async fn create_contact(
    payload: web::Json<CreateContactRequest>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let contact = services::contact::create_contact(repo.get_ref(), payload.into())?;
    Ok(HttpResponse::Created().json(ContactDto::from(contact)))
}

#[put("/v1/contacts/{contact_id}")]
pub async fn update_contact(
    contact_id: web::Path<i32>,
    payload: web::Json<UpdateContactRequest>,
    repo: web::Data<DieselRepository>,
) -> Result<web::Json<ContactDto>, ServiceError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let contact =
        services::contact::update_contact(repo.get_ref(), contact_id.into_inner(), payload.into())?;
    Ok(web::Json(ContactDto::from(contact)))
}

#[delete("/v1/contacts/{contact_id}")]
pub async fn delete_contact(
    contact_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    services::contact::delete_contact(repo.get_ref(), contact_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
