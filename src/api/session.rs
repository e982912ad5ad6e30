use crate::{
    api::{
        models::{ApiError, CurrentUser},
        state::SharedState,
    },
    constants::{MSG_UNAUTHORIZED, SESSION_COOKIE},
    core::{
        errors::ClinicError,
        models::{
            session::{Notice, SessionData},
            user::User,
        },
    },
    infrastructure::sessions::SessionStore,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::header;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

struct SessionInner {
    id: Uuid,
    data: SessionData,
    notice_changed: bool,
    rotated: bool,
}

/// What the session middleware must write back after the handler ran.
#[derive(Debug, PartialEq, Eq)]
enum SessionChange {
    Unchanged,
    /// Only the pending notice of a stored session changed.
    Notice { id: Uuid, notice: Option<Notice> },
    /// Store `data` under `id` and drop the `previous` entry, if any.
    Replace {
        previous: Option<Uuid>,
        id: Uuid,
        data: SessionData,
    },
}

/// Per-request session context, installed by [`session_middleware`].
#[derive(Clone)]
pub struct Session {
    /// Id the session was loaded under; `None` for a session started by this request.
    stored_id: Option<Uuid>,
    inner: Arc<RwLock<SessionInner>>,
}

impl Session {
    fn new(stored_id: Option<Uuid>, data: SessionData) -> Self {
        Session {
            stored_id,
            inner: Arc::new(RwLock::new(SessionInner {
                id: stored_id.unwrap_or_else(Uuid::new_v4),
                data,
                notice_changed: false,
                rotated: false,
            })),
        }
    }

    pub async fn is_logged_in(&self) -> bool {
        self.inner.read().await.data.logged_in
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        let inner = self.inner.read().await;
        if !inner.data.logged_in {
            return None;
        }
        Some(CurrentUser {
            username: inner.data.username.clone().unwrap_or_default(),
            name: inner.data.name.clone().unwrap_or_default(),
        })
    }

    /// Marks the session authenticated under a fresh id.
    pub async fn log_in(&self, user: &User) {
        let mut inner = self.inner.write().await;
        inner.data.logged_in = true;
        inner.data.username = Some(user.username.clone());
        inner.data.name = Some(user.name.clone());
        inner.id = Uuid::new_v4();
        inner.rotated = true;
    }

    /// Drops all session state; the old id stops being valid.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.data = SessionData::default();
        inner.id = Uuid::new_v4();
        inner.rotated = true;
    }

    /// Queues a notice for the next rendered page.
    pub async fn flash(&self, notice: Notice) {
        let mut inner = self.inner.write().await;
        inner.data.notice = Some(notice);
        inner.notice_changed = true;
    }

    pub async fn take_notice(&self) -> Option<Notice> {
        let mut inner = self.inner.write().await;
        let notice = inner.data.notice.take();
        if notice.is_some() {
            inner.notice_changed = true;
        }
        notice
    }

    async fn change(&self) -> SessionChange {
        let inner = self.inner.read().await;
        match self.stored_id {
            Some(stored_id) if !inner.rotated => {
                if inner.notice_changed {
                    SessionChange::Notice {
                        id: stored_id,
                        notice: inner.data.notice.clone(),
                    }
                } else {
                    SessionChange::Unchanged
                }
            }
            _ if inner.rotated || inner.notice_changed => SessionChange::Replace {
                previous: self.stored_id,
                id: inner.id,
                data: inner.data.clone(),
            },
            _ => SessionChange::Unchanged,
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| ClinicError::SessionError("session layer is not installed".to_string()).into())
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Loads the session named by the signed cookie (or starts an empty one),
/// runs the handler, then persists the session and refreshes the cookie if
/// the handler changed it.
pub async fn session_middleware(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = cookie_value(req.headers(), SESSION_COOKIE).and_then(|token| match state.jwt.validate_token(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!("Ignoring session cookie: {}", e);
            None
        }
    });

    let loaded = match claims {
        Some(claims) => state.sessions.load(claims.sid).await?.map(|data| (claims.sid, data)),
        None => None,
    };
    let session = match loaded {
        Some((id, data)) => Session::new(Some(id), data),
        None => Session::new(None, SessionData::default()),
    };

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;

    let cookie_id = match session.change().await {
        SessionChange::Unchanged => None,
        SessionChange::Notice { id, notice } => state
            .sessions
            .update_notice(id, notice, state.session_ttl)
            .await?
            .then_some(id),
        SessionChange::Replace { previous, id, data } => {
            if let Some(previous) = previous {
                state.sessions.destroy(previous).await?;
            }
            state.sessions.save(id, data, state.session_ttl).await?;
            Some(id)
        }
    };

    if let Some(id) = cookie_id {
        let token = state.jwt.generate_token(id)?;
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            state.session_ttl.as_secs()
        );
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| ClinicError::SessionError(format!("Invalid cookie value: {}", e)))?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// Guard for protected routes: anonymous callers are sent to `/login`.
pub async fn require_login(session: Session, req: Request, next: Next) -> Response {
    if session.is_logged_in().await {
        return next.run(req).await;
    }
    warn!("Unauthenticated request to {} redirected to login", req.uri().path());
    session.flash(Notice::danger(MSG_UNAUTHORIZED)).await;
    Redirect::to("/login").into_response()
}
