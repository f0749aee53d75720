#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::goals::{apply_deposit, GoalProgressUpdate, GoalStatus, GoalWithProgress, NewGoal};
    use crate::test_fixtures::goal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deposit_sequence_reaches_and_keeps_completion() {
        let start = goal("g1", "u1", dec!(100000), dec!(0));

        let first = apply_deposit(&start, dec!(60000)).unwrap();
        assert_eq!(first.current_amount, dec!(60000));
        assert!(!first.completed);
        assert_eq!(first.progress_percentage(), dec!(60));

        let second = apply_deposit(&first, dec!(40000)).unwrap();
        assert_eq!(second.current_amount, dec!(100000));
        assert!(second.completed);
        assert_eq!(second.progress_percentage(), dec!(100));

        let third = apply_deposit(&second, dec!(5000)).unwrap();
        assert_eq!(third.current_amount, dec!(105000));
        assert!(third.completed);
        assert_eq!(third.progress_percentage(), dec!(100));
        assert_eq!(third.remaining(), dec!(0));
        assert_eq!(third.signed_remaining(), dec!(-5000));
    }

    #[test]
    fn test_negative_and_zero_deposits_are_rejected() {
        let start = goal("g1", "u1", dec!(1000), dec!(400));
        for amount in [dec!(-100), dec!(0)] {
            let result = apply_deposit(&start, amount);
            assert!(matches!(
                result,
                Err(Error::Validation(ValidationError::NonPositiveAmount { .. }))
            ));
        }
    }

    #[test]
    fn test_completed_goal_stays_completed() {
        let mut done = goal("g1", "u1", dec!(1000), dec!(1000));
        done.completed = true;
        // target raised out of band
        done.target_amount = dec!(5000);

        let after = apply_deposit(&done, dec!(10)).unwrap();
        assert!(after.completed);
        assert_eq!(after.status(), GoalStatus::Completed);
    }

    #[test]
    fn test_progress_for_non_positive_target() {
        let odd = goal("g1", "u1", dec!(0), dec!(0));
        assert_eq!(odd.progress_percentage(), dec!(100));
    }

    #[test]
    fn test_progress_update_carries_expected_amount() {
        let observed = goal("g1", "u1", dec!(1000), dec!(250));
        let updated = apply_deposit(&observed, dec!(750)).unwrap();
        let update = GoalProgressUpdate::between(&observed, &updated);

        assert_eq!(update.goal_id, "g1");
        assert_eq!(update.expected_current_amount, dec!(250));
        assert_eq!(update.current_amount, dec!(1000));
        assert!(update.completed);
    }

    #[test]
    fn test_goal_with_progress_rounds_percentage() {
        let third = goal("g1", "u1", dec!(3), dec!(1));
        let view = GoalWithProgress::from(third);
        assert_eq!(view.progress_percentage, dec!(33.33));
        assert_eq!(view.remaining, dec!(2));
        assert_eq!(view.status, GoalStatus::Active);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["targetAmount"], serde_json::json!(3.0));
        assert!(json.get("goal").is_none());
    }

    #[test]
    fn test_new_goal_validation() {
        let blank = NewGoal {
            title: "  ".to_string(),
            target_amount: dec!(100),
        };
        assert!(blank.validate().is_err());

        let zero = NewGoal {
            title: "Laptop".to_string(),
            target_amount: dec!(0),
        };
        assert!(zero.validate().is_err());

        let ok = NewGoal {
            title: "Laptop".to_string(),
            target_amount: dec!(350000),
        };
        assert!(ok.validate().is_ok());
    }
}
