use hyper::Method;
use ringside_api::users::User;

use crate::auth::password_hash;
use crate::http::{Request, RequestUri, Response, Result};
use crate::method;
use crate::store::id;
use crate::StatusCodeError;

pub async fn route(req: Request, mut uri: RequestUri<'_>) -> Result {
    match uri.take() {
        None => method!(req, {
            Method::POST => create(req).await,
        }),
        Some(_) => Err(StatusCodeError::not_found().into()),
    }
}

async fn create(mut req: Request) -> Result {
    req.require_admin()?;

    let mut user: User = req.json().await?;

    if req.state().store.users().get(&user.username).await?.is_some() {
        return Err(StatusCodeError::conflict()
            .message("username already taken")
            .into());
    }

    user.id.0 = id::USER.generate();
    user.password = password_hash(&user.password, user.id.0.to_le_bytes());

    req.state().store.users().insert(&user).await?;

    Ok(Response::created())
}
