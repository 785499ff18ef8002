use std::{convert::TryFrom, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    decode::Decode,
    encode::{Encode, IsNull},
    error::BoxDynError,
    sqlite::SqliteTypeInfo,
    Database, FromRow, Sqlite, Type,
};

/// Stage of a toy order on the workshop board, in workflow order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Quality Check")]
    QualityCheck,
    #[serde(rename = "Ready to Deliver")]
    ReadyToDeliver,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::ToDo,
        OrderStatus::InProgress,
        OrderStatus::QualityCheck,
        OrderStatus::ReadyToDeliver,
    ];

    /// Every new order enters the board here.
    pub const INITIAL: OrderStatus = OrderStatus::ToDo;

    /// Orders in this stage count towards an elf's completed toys.
    pub const COMPLETED: OrderStatus = OrderStatus::ReadyToDeliver;

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::ToDo => "To Do",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::QualityCheck => "Quality Check",
            OrderStatus::ReadyToDeliver => "Ready to Deliver",
        }
    }

    /// Comma separated list of every stage label, used in validation messages.
    pub fn valid_labels() -> String {
        OrderStatus::ALL
            .iter()
            .map(OrderStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = StatusParseError;

    // Labels are matched exactly; the board never normalizes case or spacing.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| StatusParseError::new(value))
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::try_from(s)
    }
}

impl Type<Sqlite> for OrderStatus {
    fn type_info() -> SqliteTypeInfo {
        <str as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <str as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <&str as Encode<'q, Sqlite>>::encode(self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for OrderStatus {
    fn decode(value: <Sqlite as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as Decode<Sqlite>>::decode(value)?;
        OrderStatus::try_from(raw).map_err(|err| Box::new(err) as BoxDynError)
    }
}

#[derive(Debug, Clone)]
pub struct StatusParseError {
    value: String,
}

impl StatusParseError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported order status: {}", self.value)
    }
}

impl std::error::Error for StatusParseError {}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ElfProfile {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub service_start_date: NaiveDate,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Projection returned by the elf roster listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ElfSummary {
    pub name: String,
    pub profile_image: Option<String>,
}

/// Elf profile together with its completed-toy count.
#[derive(Debug, Clone, Serialize)]
pub struct ElfProfileWithStats {
    #[serde(flatten)]
    pub profile: ElfProfile,
    pub toys_completed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ElfSpecialty {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ToyOrder {
    pub id: String,
    pub child_name: String,
    pub age: i32,
    pub location: String,
    pub toy: String,
    pub category: String,
    pub assigned_elf: String,
    pub status: OrderStatus,
    pub due_date: String,
    pub notes: Option<String>,
    pub nice_list_score: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stage_label_exactly() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::try_from(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn rejects_near_miss_labels() {
        for value in ["to do", "Done", "Delivered", "Ready To Deliver", ""] {
            let err = OrderStatus::try_from(value).expect_err("label should be rejected");
            assert_eq!(err.value(), value);
        }
    }

    #[test]
    fn valid_labels_lists_stages_in_workflow_order() {
        assert_eq!(
            OrderStatus::valid_labels(),
            "To Do, In Progress, Quality Check, Ready to Deliver"
        );
    }

    #[test]
    fn serializes_with_board_labels() {
        let json = serde_json::to_value(OrderStatus::QualityCheck).unwrap();
        assert_eq!(json, serde_json::json!("Quality Check"));
    }
}
