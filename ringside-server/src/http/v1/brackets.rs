use hyper::Method;
use ringside_api::brackets::{Bracket, BracketStatus, PartialBracket};
use ringside_api::id::BracketId;
use ringside_core::seeds_contiguous;

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

            match uri.take_str() {
                None => method!(req, {
                    Method::GET => get(req, id).await,
                    Method::PUT => update(req, id).await,
                    Method::DELETE => delete(req, id).await,
                }),
                Some("reset") => method!(req, {
                    Method::PATCH => reset(req, id).await,
                }),
                Some(_) => Err(StatusCodeError::not_found().into()),
            }
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

    let brackets = req.state().store.brackets().list(event).await?;

    Ok(Response::ok().json(&brackets))
}

async fn get(req: Request, id: BracketId) -> Result {
    let bracket = req.state().store.brackets().get(id).await?;

    match bracket {
        Some(bracket) => Ok(Response::ok().json(&bracket)),
        None => Err(StatusCodeError::not_found().into()),
    }
}

async fn create(mut req: Request) -> Result {
    req.require_admin()?;

    let mut bracket: Bracket = req.json().await?;

    if req
        .state()
        .store
        .events()
        .get(bracket.event)
        .await?
        .is_none()
    {
        return Err(StatusCodeError::bad_request()
            .message("invalid event id")
            .into());
    }

    // The requested capacity must stay within the event's tournament
    // settings; it is never clamped silently.
    if let Some(settings) = req.state().store.events().settings(bracket.event).await? {
        let limit = settings.bracket_settings.max_fighters_per_bracket;

        if bracket.max_competitors > limit {
            return Err(StatusCodeError::bad_request()
                .message(format!(
                    "max_competitors exceeds the event limit of {}",
                    limit
                ))
                .into());
        }
    }

    if req
        .state()
        .store
        .brackets()
        .number_taken(bracket.event, bracket.bracket_number, None)
        .await?
    {
        return Err(StatusCodeError::bad_request()
            .message("bracket number already in use for this event")
            .into());
    }

    validate_roster(&bracket)?;

    let id = req.state().store.brackets().insert(&bracket).await?;
    bracket.id = id;

    Ok(Response::created().json(&bracket))
}

async fn update(mut req: Request, id: BracketId) -> Result {
    req.require_admin()?;

    let mut bracket = match req.state().store.brackets().get(id).await? {
        Some(bracket) => bracket,
        None => return Err(StatusCodeError::not_found().into()),
    };

    let partial: PartialBracket = req.json().await?;

    if let Some(number) = partial.bracket_number {
        if number != bracket.bracket_number
            && req
                .state()
                .store
                .brackets()
                .number_taken(bracket.event, number, Some(id))
                .await?
        {
            return Err(StatusCodeError::bad_request()
                .message("bracket number already in use for this event")
                .into());
        }
    }

    bracket.update(partial);
    validate_roster(&bracket)?;

    req.state().store.brackets().update(id, &bracket).await?;

    Ok(Response::ok().json(&bracket))
}

/// Deletes the bracket together with its bouts and their fights, leaf
/// first.
async fn delete(req: Request, id: BracketId) -> Result {
    req.require_admin()?;

    if req.state().store.brackets().get(id).await?.is_none() {
        return Err(StatusCodeError::not_found().into());
    }

    req.state().store.fights().delete_by_bracket(id).await?;
    req.state().store.bouts().delete_by_bracket(id).await?;
    req.state().store.brackets().delete(id).await?;

    Ok(Response::ok())
}

/// Empties the bracket while preserving its identity: all fights and
/// bouts are deleted, the roster is cleared and the status returns to
/// `Open`. Bracket number and division title stay untouched.
async fn reset(req: Request, id: BracketId) -> Result {
    req.require_admin()?;

    let mut bracket = match req.state().store.brackets().get(id).await? {
        Some(bracket) => bracket,
        None => return Err(StatusCodeError::not_found().into()),
    };

    req.state().store.fights().delete_by_bracket(id).await?;
    req.state().store.bouts().delete_by_bracket(id).await?;

    bracket.fighters.clear();
    bracket.bouts.clear();
    bracket.status = BracketStatus::Open;

    req.state().store.brackets().update(id, &bracket).await?;

    Ok(Response::ok().json(&bracket))
}

/// A stored roster never exceeds its capacity and always carries
/// contiguous seeds, including when an administrator replaces the
/// fighters list wholesale.
fn validate_roster(bracket: &Bracket) -> std::result::Result<(), crate::Error> {
    if bracket.fighters.len() > bracket.max_competitors as usize {
        return Err(StatusCodeError::bad_request()
            .message("fighters exceed max_competitors")
            .into());
    }

    if !seeds_contiguous(bracket.fighters.iter().map(|entry| entry.seed)) {
        return Err(StatusCodeError::bad_request()
            .message("fighter seeds must be contiguous starting at 1")
            .into());
    }

    Ok(())
}
