//! Repository for the `shelter_configuration` singleton.

use sqlx::PgPool;

use crate::models::shelter_configuration::{ShelterConfiguration, UpdateShelterConfiguration};

const COLUMNS: &str = "name, address, phone, email, website, updated_at";

/// Reads and updates the single shelter configuration row.
pub struct ShelterConfigurationRepo;

impl ShelterConfigurationRepo {
    /// Fetch the configuration row. It is seeded by migration.
    pub async fn get(pool: &PgPool) -> Result<ShelterConfiguration, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shelter_configuration WHERE id = 1");
        sqlx::query_as::<_, ShelterConfiguration>(&query)
            .fetch_one(pool)
            .await
    }

    /// Apply the non-`None` fields of `input`.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateShelterConfiguration,
    ) -> Result<ShelterConfiguration, sqlx::Error> {
        let query = format!(
            "UPDATE shelter_configuration SET
                name = COALESCE($1, name),
                address = COALESCE($2, address),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                website = COALESCE($5, website)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShelterConfiguration>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.website)
            .fetch_one(pool)
            .await
    }
}
