use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, InputObject, Object, SimpleObject, ID};

use crate::{
    domain::models::ToyOrder,
    infrastructure::{state::AppState, store::OrderFilter},
    services::{
        errors::ServiceError,
        toys::{AddToyOrderRequest, ToyService},
    },
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "ToyOrder", rename_fields = "snake_case")]
pub struct ToyOrderObject {
    pub id: ID,
    pub child_name: String,
    pub age: i32,
    pub location: String,
    pub toy: String,
    pub category: String,
    pub assigned_elf: String,
    pub status: String,
    pub due_date: String,
    pub notes: Option<String>,
    pub nice_list_score: i32,
}

impl From<ToyOrder> for ToyOrderObject {
    fn from(order: ToyOrder) -> Self {
        Self {
            id: ID(order.id),
            child_name: order.child_name,
            age: order.age,
            location: order.location,
            toy: order.toy,
            category: order.category,
            assigned_elf: order.assigned_elf,
            status: order.status.as_str().to_string(),
            due_date: order.due_date,
            notes: order.notes,
            nice_list_score: order.nice_list_score,
        }
    }
}

#[derive(Debug, Default, InputObject)]
#[graphql(name = "ToyOrderFilter", rename_fields = "snake_case")]
pub struct ToyOrderFilterInput {
    pub status: Option<String>,
    pub assigned_elf: Option<String>,
}

impl From<ToyOrderFilterInput> for OrderFilter {
    fn from(input: ToyOrderFilterInput) -> Self {
        Self {
            status: input.status,
            assigned_elf: input.assigned_elf,
        }
    }
}

#[derive(Debug, InputObject)]
#[graphql(name = "ToyOrderInput", rename_fields = "snake_case")]
pub struct ToyOrderInput {
    pub child_name: String,
    pub age: i32,
    pub location: String,
    pub toy: String,
    pub category: String,
    /// Elf name, `"auto"`, or omitted to match the category to a specialty.
    pub assigned_elf: Option<String>,
    pub notes: Option<String>,
    pub nice_list_score: i32,
}

impl From<ToyOrderInput> for AddToyOrderRequest {
    fn from(input: ToyOrderInput) -> Self {
        Self {
            child_name: input.child_name,
            age: input.age,
            location: input.location,
            toy: input.toy,
            category: input.category,
            notes: input.notes,
            nice_list_score: input.nice_list_score,
            assigned_elf: input.assigned_elf,
        }
    }
}

pub struct QueryRoot;

#[Object(rename_args = "snake_case")]
impl QueryRoot {
    #[graphql(name = "toyOrders")]
    async fn toy_orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<ToyOrderFilterInput>,
    ) -> async_graphql::Result<Vec<ToyOrderObject>> {
        let filter = filter.map(OrderFilter::from).unwrap_or_default();
        let orders = toy_service(ctx)?
            .list_toy_orders(filter)
            .await
            .map_err(into_graphql_error)?;
        Ok(orders.into_iter().map(ToyOrderObject::from).collect())
    }

    /// Null when no order has this id.
    #[graphql(name = "toyOrder")]
    async fn toy_order(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<ToyOrderObject>> {
        let order = toy_service(ctx)?
            .get_toy_order(&id)
            .await
            .map_err(into_graphql_error)?;
        Ok(order.map(ToyOrderObject::from))
    }
}

pub struct MutationRoot;

#[Object(rename_args = "snake_case")]
impl MutationRoot {
    #[graphql(name = "addToyOrder")]
    async fn add_toy_order(
        &self,
        ctx: &Context<'_>,
        input: ToyOrderInput,
    ) -> async_graphql::Result<ToyOrderObject> {
        let order = toy_service(ctx)?
            .add_toy_order(input.into())
            .await
            .map_err(into_graphql_error)?;
        Ok(order.into())
    }

    #[graphql(name = "updateToyOrderStatus")]
    async fn update_toy_order_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: String,
    ) -> async_graphql::Result<ToyOrderObject> {
        let order = toy_service(ctx)?
            .update_toy_order_status(&id, &status)
            .await
            .map_err(into_graphql_error)?;
        Ok(order.into())
    }

    #[graphql(name = "updateToyOrderElf")]
    async fn update_toy_order_elf(
        &self,
        ctx: &Context<'_>,
        id: ID,
        assigned_elf: String,
    ) -> async_graphql::Result<ToyOrderObject> {
        let order = toy_service(ctx)?
            .update_toy_order_elf(&id, &assigned_elf)
            .await
            .map_err(into_graphql_error)?;
        Ok(order.into())
    }
}

fn toy_service(ctx: &Context<'_>) -> async_graphql::Result<ToyService> {
    let state = ctx.data::<Arc<AppState>>()?;
    Ok(ToyService::new(Arc::clone(state)))
}

fn into_graphql_error(err: ServiceError) -> async_graphql::Error {
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}
