#[cfg(test)]
mod tests {
    use crate::dashboard::{daily_tip, most_recent_expenses, DashboardService, DashboardServiceTrait};
    use crate::test_fixtures::{at, date, expense, income, student, InMemoryStore};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(store: Arc<InMemoryStore>) -> DashboardService {
        DashboardService::new(store.clone(), store, chrono_tz::UTC)
    }

    #[tokio::test]
    async fn test_empty_month_shows_income_as_balance() {
        let store = InMemoryStore::new().with_incomes(vec![
            income("i1", "u1", dec!(50000), "monthly"),
            income("i2", "u1", dec!(10000), "weekly"),
        ]);

        let summary = service(store)
            .get_dashboard(&student("u1"), at(2025, 3, 15, 12))
            .await
            .unwrap();

        assert_eq!(summary.monthly_income, dec!(93300));
        assert_eq!(summary.monthly_expenses, dec!(0));
        assert_eq!(summary.balance, dec!(93300));
        assert!(summary.recent_expenses.is_empty());
        assert!(!summary.partial);
        assert_eq!(summary.period_start, date(2025, 3, 1));
        assert_eq!(summary.period_end, date(2025, 3, 15));
        assert_eq!(summary.daily_tip, daily_tip(15));
    }

    #[tokio::test]
    async fn test_totals_cover_whole_month_not_just_recent() {
        let rows = (1..=8)
            .map(|day| {
                expense(
                    &format!("e{}", day),
                    "u1",
                    dec!(100),
                    "Food",
                    date(2025, 3, day),
                    at(2025, 3, day, 10),
                )
            })
            .chain(std::iter::once(expense(
                "old",
                "u1",
                dec!(9999),
                "Food",
                date(2025, 2, 27),
                at(2025, 2, 27, 10),
            )))
            .collect();
        let store = InMemoryStore::new()
            .with_expenses(rows)
            .with_incomes(vec![income("i1", "u1", dec!(5000), "monthly")]);

        let summary = service(store)
            .get_dashboard(&student("u1"), at(2025, 3, 20, 12))
            .await
            .unwrap();

        assert_eq!(summary.monthly_expenses, dec!(800));
        assert_eq!(summary.balance, dec!(4200));
        let recent: Vec<&str> = summary.recent_expenses.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(recent, vec!["e8", "e7", "e6", "e5", "e4"]);
    }

    #[tokio::test]
    async fn test_balance_may_go_negative() {
        let store = InMemoryStore::new()
            .with_expenses(vec![expense(
                "e1",
                "u1",
                dec!(7000),
                "Books",
                date(2025, 3, 2),
                at(2025, 3, 2, 9),
            )])
            .with_incomes(vec![income("i1", "u1", dec!(5000), "monthly")]);

        let summary = service(store)
            .get_dashboard(&student("u1"), at(2025, 3, 5, 9))
            .await
            .unwrap();

        assert_eq!(summary.balance, dec!(-2000));
    }

    #[tokio::test]
    async fn test_failed_fetch_marks_summary_partial() {
        let store = InMemoryStore::new().with_incomes(vec![income("i1", "u1", dec!(5000), "monthly")]);
        *store.fail_expenses.lock().unwrap() = true;

        let summary = service(store)
            .get_dashboard(&student("u1"), at(2025, 3, 5, 9))
            .await
            .unwrap();

        assert!(summary.partial);
        assert_eq!(summary.monthly_income, dec!(5000));
        assert_eq!(summary.monthly_expenses, dec!(0));
    }

    #[tokio::test]
    async fn test_month_boundary_follows_configured_timezone() {
        let store = InMemoryStore::new().with_expenses(vec![expense(
            "e1",
            "u1",
            dec!(300),
            "Transport",
            date(2025, 3, 31),
            at(2025, 3, 31, 20),
        )]);
        let service = DashboardService::new(store.clone(), store, chrono_tz::Asia::Tokyo);

        // 2025-03-31 20:00 UTC is already April 1st in Tokyo
        let summary = service
            .get_dashboard(&student("u1"), at(2025, 3, 31, 20))
            .await
            .unwrap();

        assert_eq!(summary.period_start, date(2025, 4, 1));
        assert_eq!(summary.monthly_expenses, dec!(0));
    }

    #[test]
    fn test_most_recent_expenses_orders_by_creation() {
        let rows = vec![
            expense("a", "u1", dec!(1), "Food", date(2025, 3, 1), at(2025, 3, 1, 8)),
            expense("b", "u1", dec!(1), "Food", date(2025, 3, 1), at(2025, 3, 3, 8)),
            expense("c", "u1", dec!(1), "Food", date(2025, 3, 1), at(2025, 3, 2, 8)),
        ];
        let recent = most_recent_expenses(&rows, 2);
        let ids: Vec<&str> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
