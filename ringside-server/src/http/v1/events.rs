use hyper::Method;
use ringside_api::events::{Event, PartialEvent, TournamentSettings};
use ringside_api::id::EventId;

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
                    Method::PATCH => patch(req, id).await,
                    Method::DELETE => delete(req, id).await,
                }),
                Some("settings") => method!(req, {
                    Method::GET => get_settings(req, id).await,
                    Method::PUT => put_settings(req, id).await,
                }),
                Some(_) => Err(StatusCodeError::not_found().into()),
            }
        }
    }
}

async fn list(req: Request) -> Result {
    let events = req.state().store.events().list().await?;

    Ok(Response::ok().json(&events))
}

async fn get(req: Request, id: EventId) -> Result {
    let event = req.state().store.events().get(id).await?;

    match event {
        Some(event) => Ok(Response::ok().json(&event)),
        None => Err(StatusCodeError::not_found().into()),
    }
}

async fn create(mut req: Request) -> Result {
    req.require_admin()?;

    let mut event: Event = req.json().await?;

    if event.name.trim().is_empty() {
        return Err(StatusCodeError::bad_request()
            .message("event name must not be empty")
            .into());
    }

    if req.state().store.events().name_taken(&event.name).await? {
        return Err(StatusCodeError::bad_request()
            .message("an event with this name already exists")
            .into());
    }

    let id = req.state().store.events().insert(&event).await?;
    event.id = id;

    Ok(Response::created().json(&event))
}

async fn patch(mut req: Request, id: EventId) -> Result {
    req.require_admin()?;

    let mut event = match req.state().store.events().get(id).await? {
        Some(event) => event,
        None => return Err(StatusCodeError::not_found().into()),
    };

    let partial: PartialEvent = req.json().await?;

    if let Some(name) = &partial.name {
        if *name != event.name && req.state().store.events().name_taken(name).await? {
            return Err(StatusCodeError::bad_request()
                .message("an event with this name already exists")
                .into());
        }
    }

    event.update(partial);
    req.state().store.events().update(id, &event).await?;

    Ok(Response::ok().json(&event))
}

/// Deletes the event and everything beneath it: all fights and bouts
/// of every bracket, the brackets, the tournament settings, then the
/// event itself. Ordered leaf first so a mid-cascade failure leaves no
/// dangling parents.
async fn delete(req: Request, id: EventId) -> Result {
    req.require_admin()?;

    if req.state().store.events().get(id).await?.is_none() {
        return Err(StatusCodeError::not_found().into());
    }

    let brackets = req.state().store.brackets().list(Some(id)).await?;

    for bracket in brackets {
        req.state()
            .store
            .fights()
            .delete_by_bracket(bracket.id)
            .await?;
        req.state()
            .store
            .bouts()
            .delete_by_bracket(bracket.id)
            .await?;
        req.state().store.brackets().delete(bracket.id).await?;
    }

    req.state().store.events().delete_settings(id).await?;
    req.state().store.events().delete(id).await?;

    Ok(Response::ok())
}

async fn get_settings(req: Request, id: EventId) -> Result {
    let settings = req.state().store.events().settings(id).await?;

    match settings {
        Some(settings) => Ok(Response::ok().json(&settings)),
        None => Err(StatusCodeError::not_found()
            .message("no tournament settings for this event")
            .into()),
    }
}

async fn put_settings(mut req: Request, id: EventId) -> Result {
    req.require_admin()?;

    if req.state().store.events().get(id).await?.is_none() {
        return Err(StatusCodeError::not_found().into());
    }

    let mut settings: TournamentSettings = req.json().await?;
    settings.event_id = id;

    if settings.bracket_settings.max_fighters_per_bracket == 0 {
        return Err(StatusCodeError::bad_request()
            .message("max_fighters_per_bracket must be at least 1")
            .into());
    }

    req.state().store.events().put_settings(&settings).await?;

    Ok(Response::ok().json(&settings))
}
