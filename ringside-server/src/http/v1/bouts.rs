use hyper::Method;
use ringside_api::bouts::{Bout, PartialBout};
use ringside_api::brackets::Bracket;
use ringside_api::id::BoutId;

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

    let bouts = req.state().store.bouts().list(bracket).await?;

    Ok(Response::ok().json(&bouts))
}

async fn get(req: Request, id: BoutId) -> Result {
    let bout = req.state().store.bouts().get(id).await?;

    match bout {
        Some(bout) => Ok(Response::ok().json(&bout)),
        None => Err(StatusCodeError::not_found().into()),
    }
}

async fn create(mut req: Request) -> Result {
    req.require_admin()?;

    let mut bout: Bout = req.json().await?;

    let mut bracket = match req.state().store.brackets().get(bout.bracket).await? {
        Some(bracket) => bracket,
        None => {
            return Err(StatusCodeError::bad_request()
                .message("invalid bracket id")
                .into())
        }
    };

    if req
        .state()
        .store
        .bouts()
        .number_taken(bout.bracket, bout.bout_number, None)
        .await?
    {
        return Err(StatusCodeError::bad_request()
            .message(format!(
                "bout number {} already exists in this bracket",
                bout.bout_number
            ))
            .into());
    }

    validate_corners(&bout, &bracket)?;

    bout.fight = None;

    let id = req.state().store.bouts().insert(&bout).await?;
    bout.id = id;

    // Attach the bout to its bracket.
    bracket.bouts.push(id);
    req.state()
        .store
        .brackets()
        .update(bracket.id, &bracket)
        .await?;

    Ok(Response::created().json(&bout))
}

async fn update(mut req: Request, id: BoutId) -> Result {
    req.require_admin()?;

    let mut bout = match req.state().store.bouts().get(id).await? {
        Some(bout) => bout,
        None => return Err(StatusCodeError::not_found().into()),
    };

    let partial: PartialBout = req.json().await?;

    if let Some(number) = partial.bout_number {
        if number != bout.bout_number
            && req
                .state()
                .store
                .bouts()
                .number_taken(bout.bracket, number, Some(id))
                .await?
        {
            return Err(StatusCodeError::bad_request()
                .message(format!("bout number {} already exists in this bracket", number))
                .into());
        }
    }

    bout.update(partial);

    if let Some(bracket) = req.state().store.brackets().get(bout.bracket).await? {
        validate_corners(&bout, &bracket)?;
    }

    req.state().store.bouts().update(id, &bout).await?;

    Ok(Response::ok().json(&bout))
}

/// Deletes the bout, its fight if one was recorded, and detaches the
/// bout from its bracket. A bracket that is already gone is not an
/// error.
async fn delete(req: Request, id: BoutId) -> Result {
    req.require_admin()?;

    let bout = match req.state().store.bouts().get(id).await? {
        Some(bout) => bout,
        None => return Err(StatusCodeError::not_found().into()),
    };

    req.state().store.fights().delete_by_bout(id).await?;

    if let Some(mut bracket) = req.state().store.brackets().get(bout.bracket).await? {
        bracket.bouts.retain(|bout_id| *bout_id != id);
        req.state()
            .store
            .brackets()
            .update(bracket.id, &bracket)
            .await?;
    }

    req.state().store.bouts().delete(id).await?;

    Ok(Response::ok())
}

/// Both corners of a bout must be seeded fighters of the bout's
/// bracket.
fn validate_corners(bout: &Bout, bracket: &Bracket) -> std::result::Result<(), crate::Error> {
    for corner in [bout.red_corner, bout.blue_corner].into_iter().flatten() {
        if !bracket.contains_fighter(corner) {
            return Err(StatusCodeError::bad_request()
                .message(format!("registration {} is not seeded in this bracket", corner))
                .into());
        }
    }

    Ok(())
}
