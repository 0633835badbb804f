use crate::auth::models::Player;
use crate::auth::JWT_SIGNING_KEY;
use jwt::VerifyWithKey;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct JwtPayload {
    pub player_id: String,
    pub display_name: String,
}

#[derive(Debug, Error)]
pub enum PasscodeError {
    #[error("the signing key wasn't initialized")]
    NoSigningKey,
    #[error("invalid passcode: {0}")]
    Invalid(String),
}

pub fn decode(passcode: &str) -> Result<JwtPayload, PasscodeError> {
    let key = JWT_SIGNING_KEY.get().ok_or(PasscodeError::NoSigningKey)?;
    passcode
        .verify_with_key(key)
        .map_err(|err: jwt::Error| PasscodeError::Invalid(err.to_string()))
}

impl From<JwtPayload> for Player {
    fn from(payload: JwtPayload) -> Self {
        Player {
            id: payload.player_id,
            display_name: payload.display_name,
        }
    }
}
