use crate::auth::extractors::SignedInPlayer;
use crate::auth::responses::DecodePasscodeResponse;
use axum::response::Json;

pub async fn decode_passcode(SignedInPlayer(player): SignedInPlayer) -> Json<DecodePasscodeResponse> {
    Json(DecodePasscodeResponse {
        error: false,
        player_id: player.id,
        display_name: player.display_name,
    })
}
