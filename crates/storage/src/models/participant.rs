use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A registered rider with their ride times and qualification state.
///
/// `time1`..`time3` are the preliminary rounds, `time4`/`time5` the
/// intermediate round and `time6` the final. Times are seconds on the bull.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
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
    pub time1: Option<Decimal>,
    pub time2: Option<Decimal>,
    pub time3: Option<Decimal>,
    pub time4: Option<Decimal>,
    pub time5: Option<Decimal>,
    pub time6: Option<Decimal>,
    pub round1_qualified: bool,
    pub round2_qualified: bool,
    pub round3_qualified: bool,
    pub intermediate_qualified: bool,
    pub final_qualified: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl Participant {
    pub fn times(&self) -> [Option<Decimal>; 6] {
        [
            self.time1, self.time2, self.time3, self.time4, self.time5, self.time6,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_follow_slot_order() {
        let rider = Participant {
            time1: Some(Decimal::from(10)),
            time3: Some(Decimal::from(30)),
            time6: Some(Decimal::new(995, 1)),
            ..Default::default()
        };

        assert_eq!(
            rider.times(),
            [
                Some(Decimal::from(10)),
                None,
                Some(Decimal::from(30)),
                None,
                None,
                Some(Decimal::new(995, 1)),
            ]
        );
    }
}
