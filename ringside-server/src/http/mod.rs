mod v1;

use crate::state::State;
use crate::{Error, StatusCodeError};

use std::convert::Infallible;
use std::net::SocketAddr;
use std::pin::Pin;
use std::str::FromStr;
use std::time::Duration;

use hyper::header::{
    HeaderValue, IntoHeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use hyper::http::request::Parts;
use hyper::server::conn::Http;
use hyper::service::service_fn;
use hyper::{Body, HeaderMap, Method, StatusCode, Uri};
use ringside_api::auth::Claims;
use ringside_api::users::Role;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpSocket;
use tokio::time::Instant;

pub type Result = std::result::Result<Response, Error>;

/// Maximum accepted body size for mutating requests.
const MAX_BODY_BYTES: u64 = 16384;

pub async fn bind(addr: SocketAddr, state: State) -> std::result::Result<(), Error> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };

    if let Err(err) = socket.set_reuseaddr(true) {
        log::warn!("Failed to set SO_REUSEADDR flag: {}", err);
    }

    socket.bind(addr)?;
    let listener = socket.listen(1024)?;

    log::info!("Listening on {}", addr);

    loop {
        tokio::select! {
            res = listener.accept() => {
                let (stream, addr) = match res {
                    Ok((stream, addr)) => (stream, addr),
                    Err(err) => {
                        log::warn!("Failed to accept connection: {}", err);
                        continue;
                    }
                };
                log::debug!("Accepting new connection from {}", addr);

                let state = state.clone();
                tokio::task::spawn(async move {
                    let shutdown = state.shutdown.clone();

                    let service = service_fn(|req| {
                        let state = state.clone();
                        async move {
                            std::result::Result::<_, Infallible>::Ok(serve(req, state).await)
                        }
                    });

                    let mut conn = Http::new()
                        .http1_keep_alive(true)
                        .serve_connection(stream, service);

                    let mut conn = Pin::new(&mut conn);

                    tokio::select! {
                        res = &mut conn => {
                            if let Err(err) = res {
                                log::warn!("Http error: {}", err);
                            }
                        }
                        _ = shutdown.listen() => {
                            log::debug!("Shutting down connection");
                            conn.graceful_shutdown();
                        }
                    }
                });
            }
            _ = state.shutdown.listen() => {
                log::debug!("Shutting down http server");
                return Ok(());
            }
        }
    }
}

async fn serve(req: hyper::Request<Body>, state: State) -> hyper::Response<Body> {
    log::trace!("Head: {} {}", req.method(), req.uri());
    log::trace!("Headers: {:?}", req.headers());

    let req = Request::new(req, state);

    // Reject oversized bodies before reading them.
    if req.method() == Method::POST {
        match req.content_length() {
            Ok(length) if length > MAX_BODY_BYTES => {
                return Response::ok()
                    .status(StatusCode::PAYLOAD_TOO_LARGE)
                    .body("Payload Too Large")
                    .build();
            }
            Ok(_) => (),
            Err(_) => {
                return Response::ok()
                    .status(StatusCode::LENGTH_REQUIRED)
                    .body("Length Required")
                    .build();
            }
        }
    }

    let path = String::from(req.uri().path());
    let mut uri = RequestUri::new(&path);

    let origin = req.headers().get("Origin").cloned();

    let res = match uri.take_str() {
        Some("v1") => v1::route(req, uri).await,
        _ => Err(Error::NotFound),
    };

    match res {
        Ok(mut resp) => {
            if let Some(origin) = origin {
                resp = resp.header(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }

            resp = resp.header(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("content-type,authorization"),
            );

            resp.build()
        }
        Err(err) => {
            let resp = match err {
                Error::NotFound => Response::ok().status(StatusCode::NOT_FOUND).body("Not Found"),
                Error::BadRequest => Response::ok()
                    .status(StatusCode::BAD_REQUEST)
                    .body("Bad Request"),
                Error::MethodNotAllowed => Response::ok()
                    .status(StatusCode::METHOD_NOT_ALLOWED)
                    .body("Method Not Allowed"),
                Error::StatusCodeError(err) => Response::ok().status(err.code).json(&ErrorResponse {
                    code: err.code.as_u16(),
                    message: err.message,
                }),
                err => {
                    log::error!("{}", err);

                    Response::ok()
                        .status(StatusCode::INTERNAL_SERVER_ERROR)
                        .body("Internal Server Error")
                }
            };

            resp.build()
        }
    }
}

#[derive(Debug)]
pub struct Request {
    pub parts: Parts,
    pub body: Option<Body>,
    state: State,
}

impl Request {
    #[inline]
    fn new(req: hyper::Request<Body>, state: State) -> Self {
        let (parts, body) = req.into_parts();

        Self {
            parts,
            body: Some(body),
            state,
        }
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.parts.headers
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Reads and deserializes the request body. The client gets 30
    /// seconds to transmit it.
    pub async fn json<T>(&mut self) -> std::result::Result<T, Error>
    where
        T: DeserializeOwned,
    {
        const DUR: Duration = Duration::new(30, 0);

        let deadline = Instant::now() + DUR;

        let bytes = tokio::select! {
            res = hyper::body::to_bytes(self.body.take().unwrap()) => {
                res?
            }
            _ = tokio::time::sleep_until(deadline) => {
                log::info!("Client failed to transmit body in {}s, dropping connection", DUR.as_secs());
                return Err(StatusCodeError::request_timeout().into());
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => Err(StatusCodeError::new(StatusCode::BAD_REQUEST, err).into()),
        }
    }

    /// Returns the value of the "Content-Length" header. If the header
    /// is not present or has an invalid value an error is returned.
    pub fn content_length(&self) -> std::result::Result<u64, Error> {
        match self.headers().get("Content-Length") {
            Some(value) => match value.to_str() {
                Ok(value) => match value.parse() {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        log::debug!("Failed to parse \"Content-Length\" header: {}", err);

                        Err(StatusCodeError::bad_request().into())
                    }
                },
                Err(err) => {
                    log::debug!("Failed to parse \"Content-Length\" header: {}", err);

                    Err(StatusCodeError::bad_request().into())
                }
            },
            None => Err(StatusCodeError::length_required().into()),
        }
    }

    /// Returns the raw value of a query string parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.uri().query()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then_some(v)
        })
    }

    /// Validates the bearer token of the request and returns its
    /// claims.
    ///
    /// # Errors
    ///
    /// Returns an unauthorized [`StatusCodeError`] if the header is
    /// missing or the token does not validate.
    pub fn require_authentication(&self) -> std::result::Result<Claims, Error> {
        let header = match self.headers().get("Authorization") {
            Some(header) => header,
            None => return Err(StatusCodeError::unauthorized().into()),
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "));

        let token = match token {
            Some(token) => token,
            None => return Err(StatusCodeError::unauthorized().into()),
        };

        match self.state.auth.validate_auth_token(token) {
            Ok(claims) => Ok(claims),
            Err(_) => Err(StatusCodeError::unauthorized().into()),
        }
    }

    /// Like [`require_authentication`], but additionally requires the
    /// admin role.
    ///
    /// [`require_authentication`]: Self::require_authentication
    pub fn require_admin(&self) -> std::result::Result<Claims, Error> {
        let claims = self.require_authentication()?;

        if claims.role != Role::Admin {
            return Err(StatusCodeError::forbidden()
                .message("administrator access required")
                .into());
        }

        Ok(claims)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct RequestUri<'a> {
    path: &'a str,
}

impl<'a> RequestUri<'a> {
    pub fn new(mut path: &'a str) -> Self {
        if let Some(stripped) = path.strip_prefix('/') {
            path = stripped;
        }

        Self { path }
    }

    pub fn take(&mut self) -> Option<UriPart<'a>> {
        let part = self.take_str()?;

        Some(UriPart { part })
    }

    pub fn take_str(&mut self) -> Option<&'a str> {
        if self.path.is_empty() {
            None
        } else {
            Some(match self.path.split_once('/') {
                Some((part, rem)) => {
                    self.path = rem;
                    part
                }
                None => {
                    let path = self.path;
                    self.path = "";
                    path
                }
            })
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct UriPart<'a> {
    part: &'a str,
}

impl<'a> UriPart<'a> {
    pub fn parse<T>(&self) -> std::result::Result<T, Error>
    where
        T: FromStr,
    {
        match self.part.parse() {
            Ok(v) => Ok(v),
            Err(_) => Err(Error::BadRequest),
        }
    }
}

impl<'a> AsRef<str> for UriPart<'a> {
    fn as_ref(&self) -> &str {
        self.part
    }
}

impl<'a> PartialEq<str> for UriPart<'a> {
    fn eq(&self, other: &str) -> bool {
        self.part == other
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Body,
}

impl Response {
    /// 200 OK
    pub fn ok() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }

    /// 201 Created
    pub fn created() -> Self {
        Self {
            status: StatusCode::CREATED,
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }

    /// 204 No Content
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn body<T>(mut self, body: T) -> Self
    where
        T: Into<Body>,
    {
        self.body = body.into();
        self
    }

    pub fn json<T>(mut self, body: &T) -> Self
    where
        T: Serialize,
    {
        self.body = Body::from(serde_json::to_vec(body).unwrap());
        self.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    pub fn header<K>(mut self, key: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.append(key, value);
        self
    }

    fn build(self) -> hyper::Response<Body> {
        let mut resp = hyper::Response::new(self.body);
        *resp.status_mut() = self.status;
        *resp.headers_mut() = self.headers;
        resp
    }
}

/// Checks the request method and runs the matching branch. If no
/// branch matches, a method_not_allowed error is returned. OPTIONS
/// requests are answered with the allowed methods.
#[macro_export]
macro_rules! method {
    ($req:expr, {$($method:expr => $branch:expr),* $(,)?}) => {
        match $req.method() {
            $(
                method if method == $method => $branch,
            )*
            method if method == hyper::Method::OPTIONS => {
                use hyper::header::{HeaderValue, ALLOW, ACCESS_CONTROL_ALLOW_METHODS};

                let allow = vec![$($method.as_str()),*];
                let allow = HeaderValue::from_bytes(allow.join(",").as_bytes()).unwrap();

                Ok($crate::http::Response::no_content()
                    .header(ALLOW, allow.clone())
                    .header(ACCESS_CONTROL_ALLOW_METHODS, allow))
            }
            _ => Err($crate::StatusCodeError::method_not_allowed().into()),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::RequestUri;

    #[test]
    fn test_request_uri() {
        let mut uri = RequestUri::new("/v1/brackets/3/reset");

        assert_eq!(uri.take_str(), Some("v1"));
        assert_eq!(uri.take_str(), Some("brackets"));

        let part = uri.take().unwrap();
        assert_eq!(part.parse::<u64>().unwrap(), 3);

        assert_eq!(uri.take_str(), Some("reset"));
        assert_eq!(uri.take_str(), None);
    }

    #[test]
    fn test_uri_part_parse_invalid() {
        let mut uri = RequestUri::new("/abc");

        let part = uri.take().unwrap();
        assert!(part.parse::<u64>().is_err());
    }
}
