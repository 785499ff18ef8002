//! Row-level access to the `elf_profiles` and `toy_orders` tables.
//!
//! Every function borrows a single connection so callers can run several of
//! them inside one transaction.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use thiserror::Error;

use crate::domain::models::{ElfProfile, ElfSpecialty, ElfSummary, OrderStatus, ToyOrder};

const ELF_COLUMNS: &str = "id, name, specialty, service_start_date, profile_image, created_at";
const ORDER_COLUMNS: &str = "id, child_name, age, location, toy, category, assigned_elf, status, \
                             due_date, notes, nice_list_score, created_at";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(db_err.message().to_string());
            }
            if db_err.is_check_violation() {
                return StoreError::Constraint(db_err.message().to_string());
            }
        }
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewElf {
    pub name: String,
    pub specialty: String,
    pub service_start_date: NaiveDate,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Column set for a partial elf update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ElfChanges {
    pub specialty: Option<String>,
    pub service_start_date: Option<NaiveDate>,
    pub profile_image: Option<String>,
}

impl ElfChanges {
    pub fn is_empty(&self) -> bool {
        self.specialty.is_none() && self.service_start_date.is_none() && self.profile_image.is_none()
    }
}

/// Exact-match filters for toy orders; empty values are ignored.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub assigned_elf: Option<String>,
}

pub async fn insert_elf(conn: &mut SqliteConnection, elf: &NewElf) -> Result<i64, StoreError> {
    let result = sqlx::query(
        "INSERT INTO elf_profiles (name, specialty, service_start_date, profile_image, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&elf.name)
    .bind(&elf.specialty)
    .bind(elf.service_start_date)
    .bind(&elf.profile_image)
    .bind(elf.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_elf(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<ElfProfile>, StoreError> {
    let elf = sqlx::query_as::<_, ElfProfile>(&format!(
        "SELECT {ELF_COLUMNS} FROM elf_profiles WHERE name = ?"
    ))
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(elf)
}

pub async fn list_elf_summaries(
    conn: &mut SqliteConnection,
) -> Result<Vec<ElfSummary>, StoreError> {
    let elves = sqlx::query_as::<_, ElfSummary>(
        "SELECT name, profile_image FROM elf_profiles ORDER BY name",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(elves)
}

/// Roster in insertion order, which is the order auto-assignment scans.
pub async fn list_elf_specialties(
    conn: &mut SqliteConnection,
) -> Result<Vec<ElfSpecialty>, StoreError> {
    let elves = sqlx::query_as::<_, ElfSpecialty>(
        "SELECT name, specialty FROM elf_profiles ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(elves)
}

pub async fn update_elf(
    conn: &mut SqliteConnection,
    name: &str,
    changes: &ElfChanges,
) -> Result<(), StoreError> {
    if changes.is_empty() {
        return Err(StoreError::Constraint("no columns to update".into()));
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE elf_profiles SET ");
    let mut assignments = builder.separated(", ");
    if let Some(specialty) = &changes.specialty {
        assignments
            .push("specialty = ")
            .push_bind_unseparated(specialty.clone());
    }
    if let Some(start) = changes.service_start_date {
        assignments
            .push("service_start_date = ")
            .push_bind_unseparated(start);
    }
    if let Some(image) = &changes.profile_image {
        assignments
            .push("profile_image = ")
            .push_bind_unseparated(image.clone());
    }
    builder.push(" WHERE name = ").push_bind(name.to_string());

    let result = builder.build().execute(&mut *conn).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

pub async fn count_orders_for_elf(
    conn: &mut SqliteConnection,
    elf: &str,
    status: OrderStatus,
) -> Result<i64, StoreError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(1) FROM toy_orders WHERE assigned_elf = ? AND status = ?",
    )
    .bind(elf)
    .bind(status)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count)
}

pub async fn insert_order(conn: &mut SqliteConnection, order: &ToyOrder) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO toy_orders (id, child_name, age, location, toy, category, assigned_elf, status,
                                 due_date, notes, nice_list_score, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.id)
    .bind(&order.child_name)
    .bind(order.age)
    .bind(&order.location)
    .bind(&order.toy)
    .bind(&order.category)
    .bind(&order.assigned_elf)
    .bind(order.status)
    .bind(&order.due_date)
    .bind(&order.notes)
    .bind(order.nice_list_score)
    .bind(order.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Orders matching every supplied filter, in insertion order.
pub async fn select_orders(
    conn: &mut SqliteConnection,
    filter: &OrderFilter,
) -> Result<Vec<ToyOrder>, StoreError> {
    let mut builder =
        QueryBuilder::<Sqlite>::new(format!("SELECT {ORDER_COLUMNS} FROM toy_orders"));

    let conditions = [
        ("status", filter.status.as_deref()),
        ("assigned_elf", filter.assigned_elf.as_deref()),
    ];
    let mut first = true;
    for (column, value) in conditions {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            continue;
        };
        builder.push(if first { " WHERE " } else { " AND " });
        builder.push(column).push(" = ").push_bind(value.to_string());
        first = false;
    }
    builder.push(" ORDER BY rowid");

    let orders = builder
        .build_query_as::<ToyOrder>()
        .fetch_all(&mut *conn)
        .await?;
    Ok(orders)
}

pub async fn find_order(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<ToyOrder>, StoreError> {
    let order = sqlx::query_as::<_, ToyOrder>(&format!(
        "SELECT {ORDER_COLUMNS} FROM toy_orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(order)
}

pub async fn update_order_status(
    conn: &mut SqliteConnection,
    id: &str,
    status: OrderStatus,
) -> Result<ToyOrder, StoreError> {
    let order = sqlx::query_as::<_, ToyOrder>(&format!(
        "UPDATE toy_orders SET status = ? WHERE id = ? RETURNING {ORDER_COLUMNS}"
    ))
    .bind(status)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    order.ok_or(StoreError::NotFound)
}

pub async fn update_order_elf(
    conn: &mut SqliteConnection,
    id: &str,
    assigned_elf: &str,
) -> Result<ToyOrder, StoreError> {
    let order = sqlx::query_as::<_, ToyOrder>(&format!(
        "UPDATE toy_orders SET assigned_elf = ? WHERE id = ? RETURNING {ORDER_COLUMNS}"
    ))
    .bind(assigned_elf)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    order.ok_or(StoreError::NotFound)
}
