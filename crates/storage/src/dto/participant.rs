use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::ranking::QualificationInfo;
use crate::models::Participant;
use crate::services::scoring::{final_top, intermediate_top, preliminary_top};

/// Participant as returned by the API, including the derived stage top times
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: i32,
    pub active: bool,
    pub start_nr: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub times: RecordTimesRequest,
    pub preliminary_top: Option<Decimal>,
    pub intermediate_top: Option<Decimal>,
    pub final_top: Option<Decimal>,
    pub qualification: QualificationInfo,
    pub created_at: NaiveDateTime,
}

/// Request payload for registering a new participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(range(min = 1, message = "Start number must be positive"))]
    pub start_nr: Option<i32>,

    #[validate(length(
        min = 1,
        max = 64,
        message = "First name must be between 1 and 64 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 64,
        message = "Last name must be between 1 and 64 characters"
    ))]
    pub last_name: String,

    #[validate(length(min = 1, max = 128, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, max = 10, message = "Postal code is required"))]
    pub postal_code: String,

    #[validate(length(min = 1, max = 64, message = "City is required"))]
    pub city: String,

    #[validate(email)]
    #[validate(length(max = 120))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,
}

/// Request payload for editing a participant's registration data.
///
/// Times and qualification flags are not editable here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipantRequest {
    #[validate(range(min = 1))]
    pub start_nr: Option<i32>,

    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub city: Option<String>,

    #[validate(email)]
    #[validate(length(max = 120))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,
}

/// The six ride times of one participant, in seconds.
///
/// Recording replaces all six slots; a missing slot clears that time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordTimesRequest {
    #[validate(custom(function = "validate_ride_time"))]
    pub time1: Option<Decimal>,
    #[validate(custom(function = "validate_ride_time"))]
    pub time2: Option<Decimal>,
    #[validate(custom(function = "validate_ride_time"))]
    pub time3: Option<Decimal>,
    #[validate(custom(function = "validate_ride_time"))]
    pub time4: Option<Decimal>,
    #[validate(custom(function = "validate_ride_time"))]
    pub time5: Option<Decimal>,
    #[validate(custom(function = "validate_ride_time"))]
    pub time6: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParticipantTimes {
    pub participant_id: i32,
    #[serde(flatten)]
    #[validate(nested)]
    pub times: RecordTimesRequest,
}

/// Times for several participants at once
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkTimesRequest {
    #[validate(nested)]
    pub entries: Vec<ParticipantTimes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveParticipantId {
    pub id: Option<i32>,
}

/// Largest value the `NUMERIC(8, 3)` time columns hold
const MAX_RIDE_TIME: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 3);

/// Fractional digits the time columns keep; finer values would be rounded by the database
const RIDE_TIME_SCALE: u32 = 3;

fn validate_ride_time(time: &Decimal) -> Result<(), validator::ValidationError> {
    let (code, message) = if *time < Decimal::ZERO {
        ("negative_time", "Ride time cannot be negative")
    } else if *time > MAX_RIDE_TIME {
        ("time_too_large", "Ride time cannot exceed 99999.999 seconds")
    } else if time.normalize().scale() > RIDE_TIME_SCALE {
        ("time_too_precise", "Ride time allows at most 3 decimal places")
    } else {
        return Ok(());
    };

    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.into());
    Err(error)
}

impl From<[Option<Decimal>; 6]> for RecordTimesRequest {
    fn from(times: [Option<Decimal>; 6]) -> Self {
        let [time1, time2, time3, time4, time5, time6] = times;
        Self {
            time1,
            time2,
            time3,
            time4,
            time5,
            time6,
        }
    }
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            times: RecordTimesRequest::from(participant.times()),
            preliminary_top: preliminary_top(&participant),
            intermediate_top: intermediate_top(&participant),
            final_top: final_top(&participant),
            qualification: QualificationInfo::from(&participant),
            participant_id: participant.participant_id,
            active: participant.active,
            start_nr: participant.start_nr,
            first_name: participant.first_name,
            last_name: participant.last_name,
            address: participant.address,
            postal_code: participant.postal_code,
            city: participant.city,
            email: participant.email,
            phone: participant.phone,
            photo_url: participant.photo_url,
            created_at: participant.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_time_is_rejected() {
        let request = RecordTimesRequest {
            time2: Some(Decimal::new(-5, 1)),
            ..Default::default()
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("time2"));
    }

    #[test]
    fn test_zero_and_missing_times_are_valid() {
        let request = RecordTimesRequest {
            time1: Some(Decimal::ZERO),
            time6: Some(Decimal::new(1234, 2)),
            ..Default::default()
        };

        assert!(request.validate().is_ok());
        assert!(RecordTimesRequest::default().validate().is_ok());
    }

    #[test]
    fn test_sub_millisecond_time_is_rejected() {
        let request = RecordTimesRequest {
            time1: Some(Decimal::new(989_996, 4)),
            ..Default::default()
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["time1"][0].code, "time_too_precise");
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let request = RecordTimesRequest {
            time1: Some(Decimal::new(98_999_000, 6)),
            ..Default::default()
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_time_beyond_column_range_is_rejected() {
        let too_long = RecordTimesRequest {
            time3: Some(Decimal::from(1_000_000)),
            ..Default::default()
        };
        let longest = RecordTimesRequest {
            time3: Some(MAX_RIDE_TIME),
            ..Default::default()
        };

        let errors = too_long.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["time3"][0].code, "time_too_large");
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn test_bulk_request_validates_each_entry() {
        let request = BulkTimesRequest {
            entries: vec![
                ParticipantTimes {
                    participant_id: 1,
                    times: RecordTimesRequest::default(),
                },
                ParticipantTimes {
                    participant_id: 2,
                    times: RecordTimesRequest {
                        time4: Some(Decimal::from(-1)),
                        ..Default::default()
                    },
                },
            ],
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_requires_names() {
        let request = CreateParticipantRequest {
            start_nr: Some(7),
            first_name: String::new(),
            last_name: "Huber".to_string(),
            address: "Dorfstrasse 1".to_string(),
            postal_code: "6300".to_string(),
            city: "Zug".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
            photo_url: None,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_response_carries_stage_tops() {
        let participant = Participant {
            participant_id: 4,
            time1: Some(Decimal::from(20)),
            time3: Some(Decimal::from(35)),
            time5: Some(Decimal::from(12)),
            round1_qualified: true,
            ..Default::default()
        };

        let response = ParticipantResponse::from(participant);

        assert_eq!(response.preliminary_top, Some(Decimal::from(35)));
        assert_eq!(response.intermediate_top, Some(Decimal::from(12)));
        assert_eq!(response.final_top, None);
        assert_eq!(response.times.time3, Some(Decimal::from(35)));
        assert!(response.qualification.round1);
        assert!(!response.qualification.round2);
    }
}
