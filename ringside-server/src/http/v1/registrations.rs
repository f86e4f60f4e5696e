use hyper::Method;
use ringside_api::id::RegistrationId;
use ringside_api::registrations::{Registration, RegistrationStatus, RegistrationType};

use crate::http::{Request, RequestUri, Response, Result};
use crate::matchmaker;
use crate::method;
use crate::StatusCodeError;

pub async fn route(req: Request, mut uri: RequestUri<'_>) -> Result {
    match uri.take() {
        None => method!(req, {
            Method::GET => list(req).await,
            Method::POST => create(req).await,
        }),
        Some(part) => {
            let id = part.parse()?;

            method!(req, {
                Method::GET => get(req, id).await,
            })
        }
    }
}

async fn list(req: Request) -> Result {
    let event = match req.query_param("event") {
        Some(value) => match value.parse() {
            Ok(id) => Some(id),
            Err(_) => return Err(StatusCodeError::bad_request().message("invalid event id").into()),
        },
        None => None,
    };

    let registrations = req.state().store.registrations().list(event).await?;

    Ok(Response::ok().json(&registrations))
}

async fn get(req: Request, id: RegistrationId) -> Result {
    let registration = req.state().store.registrations().get(id).await?;

    match registration {
        Some(registration) => Ok(Response::ok().json(&registration)),
        None => Err(StatusCodeError::not_found().into()),
    }
}

/// Creates a new registration. For fighters, bracket placement runs as
/// a detached task after the registration is persisted; its outcome
/// never affects this response.
async fn create(mut req: Request) -> Result {
    let mut registration: Registration = req.json().await?;

    if let Err(err) = registration.validate() {
        return Err(StatusCodeError::bad_request().message(err).into());
    }

    if req
        .state()
        .store
        .events()
        .get(registration.event)
        .await?
        .is_none()
    {
        return Err(StatusCodeError::bad_request()
            .message("invalid event id")
            .into());
    }

    if req
        .state()
        .store
        .registrations()
        .exists(registration.event, &registration.email)
        .await?
    {
        return Err(StatusCodeError::conflict()
            .message("already registered for this event")
            .into());
    }

    registration.status = RegistrationStatus::Pending;

    let id = req
        .state()
        .store
        .registrations()
        .insert(&registration)
        .await?;
    registration.id = id;

    if registration.registration_type == RegistrationType::Fighter {
        matchmaker::spawn(req.state().clone(), registration.clone());
    }

    Ok(Response::created().json(&registration))
}
