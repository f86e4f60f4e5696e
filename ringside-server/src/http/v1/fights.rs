use hyper::Method;
use ringside_api::fights::{Fight, PartialFight};
use ringside_api::id::FightId;

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
                Method::DELETE => delete(req, id).await,
            })
        }
    }
}

async fn list(req: Request) -> Result {
    let bracket = match req.query_param("bracket") {
        Some(value) => match value.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                return Err(StatusCodeError::bad_request()
                    .message("invalid bracket id")
                    .into())
            }
        },
        None => None,
    };

    let bout = match req.query_param("bout") {
        Some(value) => match value.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                return Err(StatusCodeError::bad_request()
                    .message("invalid bout id")
                    .into())
            }
        },
        None => None,
    };

    let fights = req.state().store.fights().list(bracket, bout).await?;

    Ok(Response::ok().json(&fights))
}

async fn get(req: Request, id: FightId) -> Result {
    let fight = req.state().store.fights().get(id).await?;

    match fight {
        Some(fight) => Ok(Response::ok().json(&fight)),
        None => Err(StatusCodeError::not_found().into()),
    }
}

/// Records the fight for a bout and links it back. A bout carries at
/// most one fight; a second create for the same bout is refused.
async fn create(mut req: Request) -> Result {
    req.require_admin()?;

    let mut fight: Fight = req.json().await?;

    let mut bout = match req.state().store.bouts().get(fight.bout).await? {
        Some(bout) => bout,
        None => {
            return Err(StatusCodeError::bad_request()
                .message("invalid bout id")
                .into())
        }
    };

    if bout.fight.is_some() {
        return Err(StatusCodeError::conflict()
            .message("bout already has a recorded fight")
            .into());
    }

    if fight.bracket != bout.bracket {
        return Err(StatusCodeError::bad_request()
            .message("fight bracket does not match the bout")
            .into());
    }

    let id = req.state().store.fights().insert(&fight).await?;
    fight.id = id;

    bout.fight = Some(id);
    req.state().store.bouts().update(bout.id, &bout).await?;

    Ok(Response::created().json(&fight))
}

async fn update(mut req: Request, id: FightId) -> Result {
    req.require_admin()?;

    let mut fight = match req.state().store.fights().get(id).await? {
        Some(fight) => fight,
        None => return Err(StatusCodeError::not_found().into()),
    };

    let partial: PartialFight = req.json().await?;

    fight.update(partial);
    req.state().store.fights().update(id, &fight).await?;

    Ok(Response::ok().json(&fight))
}

/// Deletes the fight and unlinks it from its bout. A bout that is
/// already gone is not an error.
async fn delete(req: Request, id: FightId) -> Result {
    req.require_admin()?;

    let fight = match req.state().store.fights().get(id).await? {
        Some(fight) => fight,
        None => return Err(StatusCodeError::not_found().into()),
    };

    req.state().store.fights().delete(id).await?;

    if let Some(mut bout) = req.state().store.bouts().get(fight.bout).await? {
        bout.fight = None;
        req.state().store.bouts().update(bout.id, &bout).await?;
    }

    Ok(Response::ok())
}
