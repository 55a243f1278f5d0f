use axum::Json;

use super::model::OptionsResponse;

pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse::current())
}
