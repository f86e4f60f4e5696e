use hyper::Method;
use ringside_api::id::SuspensionId;
use ringside_api::suspensions::{PartialSuspension, Suspension, SuspensionStatus};

use crate::http::{Request, RequestUri, Response, Result};
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
                Method::PUT => update(req, id).await,
            })
        }
    }
}

async fn list(req: Request) -> Result {
    let status = match req.query_param("status") {
        Some("Active") => Some(SuspensionStatus::Active),
        Some("Closed") => Some(SuspensionStatus::Closed),
        Some(_) => {
            return Err(StatusCodeError::bad_request()
                .message("invalid status filter")
                .into())
        }
        None => None,
    };

    let suspensions = req.state().store.suspensions().list(status).await?;

    Ok(Response::ok().json(&suspensions))
}

async fn get(req: Request, id: SuspensionId) -> Result {
    let suspension = req.state().store.suspensions().get(id).await?;

    match suspension {
        Some(suspension) => Ok(Response::ok().json(&suspension)),
        None => Err(StatusCodeError::not_found().into()),
    }
}

async fn create(mut req: Request) -> Result {
    req.require_admin()?;

    let mut suspension: Suspension = req.json().await?;

    if req
        .state()
        .store
        .registrations()
        .get(suspension.person)
        .await?
        .is_none()
    {
        return Err(StatusCodeError::bad_request()
            .message("invalid person id")
            .into());
    }

    suspension.status = SuspensionStatus::Active;

    let id = req.state().store.suspensions().insert(&suspension).await?;
    suspension.id = id;

    Ok(Response::created().json(&suspension))
}

async fn update(mut req: Request, id: SuspensionId) -> Result {
    req.require_admin()?;

    let mut suspension = match req.state().store.suspensions().get(id).await? {
        Some(suspension) => suspension,
        None => return Err(StatusCodeError::not_found().into()),
    };

    let partial: PartialSuspension = req.json().await?;

    suspension.update(partial);
    req.state()
        .store
        .suspensions()
        .update(id, &suspension)
        .await?;

    Ok(Response::ok().json(&suspension))
}
