mod auth;
mod bouts;
mod brackets;
mod events;
mod fights;
mod registrations;
mod suspensions;
mod users;

use crate::http::{Request, RequestUri, Result};
use crate::StatusCodeError;

pub async fn route(req: Request, mut uri: RequestUri<'_>) -> Result {
    match uri.take_str() {
        Some("auth") => auth::route(req, uri).await,
        Some("events") => events::route(req, uri).await,
        Some("registrations") => registrations::route(req, uri).await,
        Some("brackets") => brackets::route(req, uri).await,
        Some("bouts") => bouts::route(req, uri).await,
        Some("fights") => fights::route(req, uri).await,
        Some("suspensions") => suspensions::route(req, uri).await,
        Some("users") => users::route(req, uri).await,
        _ => Err(StatusCodeError::not_found().into()),
    }
}
