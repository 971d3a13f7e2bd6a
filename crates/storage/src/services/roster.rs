use crate::models::Participant;

/// Returns a copy of the set where only `target_id` carries the active marker.
///
/// When no participant has that id, every marker ends up cleared.
pub fn set_active(participants: &[Participant], target_id: i32) -> Vec<Participant> {
    participants
        .iter()
        .cloned()
        .map(|mut p| {
            p.active = p.participant_id == target_id;
            p
        })
        .collect()
}

/// Clears all ride times, qualification flags and the active marker.
///
/// Registration data is kept.
pub fn reset_results(participants: &[Participant]) -> Vec<Participant> {
    participants
        .iter()
        .map(|p| Participant {
            active: false,
            time1: None,
            time2: None,
            time3: None,
            time4: None,
            time5: None,
            time6: None,
            round1_qualified: false,
            round2_qualified: false,
            round3_qualified: false,
            intermediate_qualified: false,
            final_qualified: false,
            ..p.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn roster(count: i32) -> Vec<Participant> {
        (1..=count)
            .map(|id| Participant {
                participant_id: id,
                ..Default::default()
            })
            .collect()
    }

    fn active_ids(participants: &[Participant]) -> Vec<i32> {
        participants
            .iter()
            .filter(|p| p.active)
            .map(|p| p.participant_id)
            .collect()
    }

    #[test]
    fn test_set_active_twice_leaves_one_active() {
        let riders = roster(4);

        let first = set_active(&riders, 2);
        let second = set_active(&first, 4);

        assert_eq!(active_ids(&first), vec![2]);
        assert_eq!(active_ids(&second), vec![4]);
    }

    #[test]
    fn test_set_active_unknown_id_clears_everyone() {
        let riders = set_active(&roster(3), 1);

        let result = set_active(&riders, 99);

        assert!(active_ids(&result).is_empty());
    }

    #[test]
    fn test_set_active_leaves_input_untouched() {
        let riders = roster(2);

        let _ = set_active(&riders, 1);

        assert!(active_ids(&riders).is_empty());
    }

    #[test]
    fn test_reset_results_clears_times_and_flags() {
        let rider = Participant {
            participant_id: 3,
            active: true,
            start_nr: Some(12),
            first_name: "Anna".to_string(),
            time1: Some(Decimal::from(101)),
            time4: Some(Decimal::from(40)),
            time6: Some(Decimal::from(55)),
            round1_qualified: true,
            round2_qualified: true,
            round3_qualified: true,
            intermediate_qualified: true,
            final_qualified: true,
            ..Default::default()
        };

        let reset = reset_results(std::slice::from_ref(&rider));

        let expected = Participant {
            participant_id: 3,
            start_nr: Some(12),
            first_name: "Anna".to_string(),
            ..Default::default()
        };
        assert_eq!(reset, vec![expected]);
    }

    #[test]
    fn test_reset_results_on_empty_set() {
        assert!(reset_results(&[]).is_empty());
    }
}
