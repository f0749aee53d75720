use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Average number of weeks per month used to normalize weekly income.
///
/// This is a fixed approximation, not a calendar-accurate conversion.
pub const WEEKS_PER_MONTH: Decimal = dec!(4.33);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of expenses listed on the dashboard
pub const RECENT_EXPENSES_LIMIT: usize = 5;

/// Trailing window (in days) for counting a user as active
pub const ACTIVE_USER_WINDOW_DAYS: i64 = 30;

/// Number of users listed in the admin "recent users" panel
pub const RECENT_USERS_LIMIT: usize = 5;

/// Number of months shown in the report trend (including the report month)
pub const REPORT_TREND_MONTHS: u32 = 6;

/// Title printed at the top of exported reports
pub const REPORT_TITLE: &str = "BudgetPal Student Report";

/// Maximum number of goal deposit attempts before giving up on a contended goal
pub const GOAL_DEPOSIT_MAX_ATTEMPTS: usize = 3;

/// Minimum password length accepted by the auth backend on sign up
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Message returned by the account deletion stub
pub const ACCOUNT_DELETION_UNAVAILABLE: &str =
    "Account deletion will be implemented in a future update";
