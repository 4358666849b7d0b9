use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};

use crate::stats::StatsSessionId;

pub const SESSION_COOKIE: &str = "northwind_session";

/// The browser session a request belongs to.
///
/// Requests without a valid `northwind_session` cookie get a new id, which
/// is sent back as a cookie when the session is part of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: StatsSessionId,
    pub fresh: bool,
}

impl Session {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let existing = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| value.parse::<StatsSessionId>().ok());

        match existing {
            Some(id) => Self { id, fresh: false },
            None => Self {
                id: StatsSessionId::new(),
                fresh: true,
            },
        }
    }

    fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.fresh {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.set_cookie() {
            res.headers_mut().append(SET_COOKIE, cookie);
        }
        Ok(res)
    }
}
