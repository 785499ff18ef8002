use chrono::NaiveDate;
use validator::Validate;

use crate::{domain::models::OrderStatus, services::errors::ServiceError};

pub fn parse_status(value: &str) -> Result<OrderStatus, ServiceError> {
    OrderStatus::try_from(value).map_err(|_| {
        ServiceError::Validation(format!(
            "Invalid status. Must be one of: {}",
            OrderStatus::valid_labels()
        ))
    })
}

pub fn require_name(name: Option<&str>) -> Result<&str, ServiceError> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ServiceError::Validation("Name is required".into())),
    }
}

/// Service start dates are calendar dates written as `YYYY-MM-DD`.
pub fn parse_service_start_date(value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ServiceError::Validation(format!(
            "Invalid service_start_date '{value}'. Expected YYYY-MM-DD"
        ))
    })
}

pub fn check<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|errors| ServiceError::Validation(errors.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_status_lists_the_closed_set() {
        let err = parse_status("Delivered").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status. Must be one of: To Do, In Progress, Quality Check, Ready to Deliver"
        );
    }

    #[test]
    fn missing_or_empty_names_are_rejected() {
        assert!(require_name(None).is_err());
        assert!(require_name(Some("")).is_err());
        assert_eq!(require_name(Some(" ")).unwrap(), " ");
        assert_eq!(require_name(Some("Holly")).unwrap(), "Holly");
    }

    #[test]
    fn service_start_date_must_be_iso_calendar_date() {
        assert_eq!(
            parse_service_start_date("1897-12-01").unwrap(),
            NaiveDate::from_ymd_opt(1897, 12, 1).unwrap()
        );
        assert!(parse_service_start_date("12/01/1897").is_err());
        assert!(parse_service_start_date("2024-02-30").is_err());
    }
}
