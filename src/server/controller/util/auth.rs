//! Authenticated request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::server::{
    controller::util::extract::{extract_init_data, extract_session_token},
    error::{auth::AuthError, Error},
    model::{app::AppState, session::Session},
    service::auth::{init_data::InitDataVerifier, session::SessionService},
};

/// Session of the calling user.
///
/// A valid session token is used as is; otherwise valid init data opens a new
/// session. Rejects with 401 `session_expired` when a token was sent but is unknown,
/// `initdata_validation_failed` when init data fails verification and `no_auth_data`
/// when neither was sent.
pub struct AuthSession(pub Session);

/// Session of the configured administrator, rejects everyone else with 403.
pub struct AdminSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let sessions = SessionService::new(
            &state.store,
            &state.auth.admin,
            state.auth.session_ttl,
        );

        let token = extract_session_token(&parts.headers);
        if let Some(token) = &token {
            if let Some(session) = sessions.validate(token).await? {
                return Ok(AuthSession(session));
            }
        }

        let Some(init_data) = extract_init_data(&parts.headers, parts.uri.query()) else {
            return Err(match token {
                Some(_) => AuthError::SessionExpired,
                None => AuthError::NoAuthData,
            }
            .into());
        };

        let identity = InitDataVerifier::new(&state.auth.bot_token, state.auth.init_data_max_age)
            .verify(&init_data)
            .map_err(|e| AuthError::InitDataValidationFailed(e.to_string()))?;

        let session = sessions.create(&identity).await?;

        Ok(AuthSession(session))
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthSession(session) = AuthSession::from_request_parts(parts, state).await?;

        // Checked against current configuration, not the role stored at login
        if !state.auth.admin.is_admin(session.telegram_id) {
            tracing::warn!(telegram_id = session.telegram_id, "Rejected admin request");
            return Err(AuthError::Forbidden.into());
        }

        Ok(AdminSession(session))
    }
}
