use hyper::Method;
use ringside_api::auth::{Claims, LoginRequest, RefreshToken};

use crate::auth::password_hash;
use crate::http::{Request, RequestUri, Response, Result};
use crate::method;
use crate::StatusCodeError;

pub async fn route(req: Request, mut uri: RequestUri<'_>) -> Result {
    match uri.take_str() {
        Some("login") => method!(req, {
            Method::POST => login(req).await,
        }),
        Some("refresh") => method!(req, {
            Method::POST => refresh(req).await,
        }),
        _ => Err(StatusCodeError::not_found().into()),
    }
}

async fn login(mut req: Request) -> Result {
    let body: LoginRequest = req.json().await?;

    // The same response for unknown users and wrong passwords.
    let user = match req.state().store.users().get(&body.username).await? {
        Some(user) => user,
        None => return Err(StatusCodeError::unauthorized().into()),
    };

    if password_hash(&body.password, user.id.0.to_le_bytes()) != user.password {
        return Err(StatusCodeError::unauthorized().into());
    }

    let tokens = req
        .state()
        .auth
        .create_tokens(Claims::new(user.id.0, user.role))?;

    Ok(Response::ok().json(&tokens))
}

async fn refresh(mut req: Request) -> Result {
    let body: RefreshToken = req.json().await?;

    match req.state().auth.validate_refresh_token(&body.refresh_token) {
        Ok(claims) => {
            let tokens = req.state().auth.create_tokens(claims)?;
            Ok(Response::ok().json(&tokens))
        }
        Err(_) => Err(StatusCodeError::unauthorized().into()),
    }
}
