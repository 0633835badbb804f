use crate::auth::models::Player;
use crate::auth::passcode;
use crate::auth::responses::{PasscodeExtractionError, PasscodeExtractionReason};
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Json;

pub type PasscodeRejection = (StatusCode, Json<PasscodeExtractionError>);

fn rejection(reason: PasscodeExtractionReason) -> PasscodeRejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(PasscodeExtractionError {
            error: true,
            reason,
        }),
    )
}

fn player_from_parts(parts: &Parts) -> Result<Option<Player>, PasscodeRejection> {
    let Some(passcode) = parts.headers.get("Passcode") else {
        return Ok(None);
    };
    let passcode = passcode
        .to_str()
        .map_err(|_| rejection(PasscodeExtractionReason::InvalidPasscode))?;
    match passcode::decode(passcode) {
        Ok(jwt_payload) => Ok(Some(Player::from(jwt_payload))),
        Err(err) => {
            tracing::debug!("Rejecting a passcode: {err}");
            Err(rejection(PasscodeExtractionReason::InvalidPasscode))
        }
    }
}

pub struct SignedInPlayer(pub Player);

#[async_trait]
impl<S> FromRequestParts<S> for SignedInPlayer
where
    S: Send + Sync,
{
    type Rejection = PasscodeRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        player_from_parts(parts)?
            .map(SignedInPlayer)
            .ok_or_else(|| rejection(PasscodeExtractionReason::NoPasscodeHeaderProvided))
    }
}

pub struct MaybePlayer(pub Option<Player>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybePlayer
where
    S: Send + Sync,
{
    type Rejection = PasscodeRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        player_from_parts(parts).map(MaybePlayer)
    }
}
