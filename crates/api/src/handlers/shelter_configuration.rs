//! Handlers for the `/shelter-configuration` singleton.

use axum::extract::State;
use axum::Json;
use shelter_db::models::shelter_configuration::{
    ShelterConfiguration, UpdateShelterConfiguration,
};
use shelter_db::repositories::ShelterConfigurationRepo;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// GET /api/v1/shelter-configuration
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<ShelterConfiguration>> {
    Ok(Json(ShelterConfigurationRepo::get(&state.pool).await?))
}

/// PUT /api/v1/shelter-configuration
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<UpdateShelterConfiguration>,
) -> AppResult<Json<ShelterConfiguration>> {
    let config = ShelterConfigurationRepo::update(&state.pool, &input).await?;
    tracing::info!(user_id = admin.user_id, "Shelter configuration updated");
    Ok(Json(config))
}
