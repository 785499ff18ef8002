//! Elf roster management backing the `/api/elves` and `/api/elf` routes.

use std::sync::Arc;

use chrono::{Local, Utc};
use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::info;

use crate::{
    domain::models::{ElfProfileWithStats, ElfSummary, OrderStatus},
    infrastructure::{
        state::AppState,
        store::{self, ElfChanges, NewElf, StoreError},
    },
    validation::rules,
};

use super::errors::ServiceError;

#[derive(Debug, Default, Deserialize)]
pub struct CreateElfRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub service_start_date: Option<String>,
}

/// Partial profile update; omitted or `null` fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateElfRequest {
    pub specialty: Option<String>,
    pub service_start_date: Option<String>,
    pub profile_image: Option<String>,
}

pub struct ElfService {
    state: Arc<AppState>,
}

impl ElfService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Every elf's name and picture, sorted by name.
    pub async fn list_elves(&self) -> Result<Vec<ElfSummary>, ServiceError> {
        let mut conn = self.state.pool.acquire().await?;
        Ok(store::list_elf_summaries(&mut conn).await?)
    }

    pub async fn get_elf(&self, name: &str) -> Result<ElfProfileWithStats, ServiceError> {
        let mut tx = self.state.pool.begin().await?;
        let profile = load_profile(&mut tx, name).await?;
        tx.commit().await?;
        Ok(profile)
    }

    /// Registers a new elf.
    ///
    /// Specialty falls back to the configured default and the service start
    /// date to today. Fails with [`ServiceError::DuplicateName`] when the name
    /// is taken; the roster is left untouched in that case.
    pub async fn create_elf(
        &self,
        payload: CreateElfRequest,
    ) -> Result<ElfProfileWithStats, ServiceError> {
        let name = rules::require_name(payload.name.as_deref())?.to_string();
        let specialty = payload
            .specialty
            .filter(|specialty| !specialty.is_empty())
            .unwrap_or_else(|| self.state.config.workshop.default_specialty.clone());
        let service_start_date = match payload.service_start_date.as_deref() {
            Some(date) if !date.is_empty() => rules::parse_service_start_date(date)?,
            _ => Local::now().date_naive(),
        };

        let mut tx = self.state.pool.begin().await?;
        store::insert_elf(
            &mut tx,
            &NewElf {
                name: name.clone(),
                specialty,
                service_start_date,
                profile_image: None,
                created_at: Utc::now(),
            },
        )
        .await?;
        let profile = load_profile(&mut tx, &name).await?;
        tx.commit().await?;

        info!(elf = %name, specialty = %profile.profile.specialty, "elf registered");
        Ok(profile)
    }

    pub async fn update_elf(
        &self,
        name: &str,
        payload: UpdateElfRequest,
    ) -> Result<ElfProfileWithStats, ServiceError> {
        let changes = ElfChanges {
            specialty: payload.specialty,
            service_start_date: payload
                .service_start_date
                .as_deref()
                .map(rules::parse_service_start_date)
                .transpose()?,
            profile_image: payload.profile_image,
        };
        if changes.is_empty() {
            return Err(ServiceError::Validation("No fields to update".into()));
        }

        let mut tx = self.state.pool.begin().await?;
        store::update_elf(&mut tx, name, &changes)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => ServiceError::elf_not_found(),
                other => other.into(),
            })?;
        let profile = load_profile(&mut tx, name).await?;
        tx.commit().await?;

        info!(elf = %name, "elf profile updated");
        Ok(profile)
    }
}

async fn load_profile(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<ElfProfileWithStats, ServiceError> {
    let profile = store::find_elf(conn, name)
        .await?
        .ok_or_else(ServiceError::elf_not_found)?;
    let toys_completed = store::count_orders_for_elf(conn, name, OrderStatus::COMPLETED).await?;
    Ok(ElfProfileWithStats {
        profile,
        toys_completed,
    })
}
