//! Toy order workflow backing the GraphQL surface.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    domain::{
        assignment::resolve_assignee,
        models::{OrderStatus, ToyOrder},
    },
    infrastructure::{
        state::AppState,
        store::{self, OrderFilter, StoreError},
    },
    validation::rules,
};

use super::errors::ServiceError;

/// Fields a caller may supply for a new order. Status and due date are
/// always chosen by the workshop.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddToyOrderRequest {
    #[validate(length(min = 1))]
    pub child_name: String,
    #[validate(range(min = 1, max = 18))]
    pub age: i32,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub toy: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub notes: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub nice_list_score: i32,
    pub assigned_elf: Option<String>,
}

pub struct ToyService {
    state: Arc<AppState>,
}

impl ToyService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list_toy_orders(&self, filter: OrderFilter) -> Result<Vec<ToyOrder>, ServiceError> {
        let mut conn = self.state.pool.acquire().await?;
        Ok(store::select_orders(&mut conn, &filter).await?)
    }

    pub async fn get_toy_order(&self, id: &str) -> Result<Option<ToyOrder>, ServiceError> {
        let mut conn = self.state.pool.acquire().await?;
        Ok(store::find_order(&mut conn, id).await?)
    }

    /// Creates an order in the initial stage with the workshop due date.
    ///
    /// The roster scan and the insert share one transaction so the chosen elf
    /// reflects the roster at insert time.
    pub async fn add_toy_order(&self, payload: AddToyOrderRequest) -> Result<ToyOrder, ServiceError> {
        rules::check(&payload)?;

        let mut tx = self.state.pool.begin().await?;
        let roster = store::list_elf_specialties(&mut tx).await?;
        let assigned_elf =
            resolve_assignee(&roster, &payload.category, payload.assigned_elf.as_deref());

        let order = ToyOrder {
            id: self.state.order_ids.next_id(),
            child_name: payload.child_name,
            age: payload.age,
            location: payload.location,
            toy: payload.toy,
            category: payload.category,
            assigned_elf,
            status: OrderStatus::INITIAL,
            due_date: self.state.config.workshop.default_due_date.clone(),
            notes: Some(payload.notes.unwrap_or_default()),
            nice_list_score: payload.nice_list_score,
            created_at: Utc::now(),
        };
        store::insert_order(&mut tx, &order).await?;
        tx.commit().await?;

        info!(order_id = %order.id, elf = %order.assigned_elf, category = %order.category, "toy order created");
        Ok(order)
    }

    /// Moves an order to another workflow stage.
    ///
    /// With `workshop.persist_status_updates` disabled the status is only
    /// validated and the stored order is returned unchanged.
    pub async fn update_toy_order_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<ToyOrder, ServiceError> {
        let status = rules::parse_status(status)?;
        let mut conn = self.state.pool.acquire().await?;

        if !self.state.config.workshop.persist_status_updates {
            return store::find_order(&mut conn, id)
                .await?
                .ok_or_else(ServiceError::order_not_found);
        }

        let order = store::update_order_status(&mut conn, id, status)
            .await
            .map_err(order_error)?;
        info!(order_id = %id, status = %status, "toy order status updated");
        Ok(order)
    }

    /// Reassigns an order. The elf name is not checked against the roster.
    pub async fn update_toy_order_elf(
        &self,
        id: &str,
        assigned_elf: &str,
    ) -> Result<ToyOrder, ServiceError> {
        let mut conn = self.state.pool.acquire().await?;
        let order = store::update_order_elf(&mut conn, id, assigned_elf)
            .await
            .map_err(order_error)?;
        info!(order_id = %id, elf = %assigned_elf, "toy order reassigned");
        Ok(order)
    }
}

fn order_error(err: StoreError) -> ServiceError {
    match err {
        StoreError::NotFound => ServiceError::order_not_found(),
        other => other.into(),
    }
}
