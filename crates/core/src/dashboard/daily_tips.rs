/// Budgeting tips rotated by calendar day.
pub const DAILY_TIPS: [&str; 8] = [
    "Track every expense, no matter how small - they add up!",
    "Set a weekly spending limit and stick to it.",
    "Use apps wisely - cancel subscriptions you don't use.",
    "Cook at home more often to save on food costs.",
    "Buy used textbooks or borrow from the library.",
    "Use public transport or walk when possible.",
    "Look for student discounts everywhere you shop.",
    "Set aside fun money so you don't feel deprived.",
];

/// Tip for the given day of the month (1-31). Deterministic, not randomized.
pub fn daily_tip(day_of_month: u32) -> &'static str {
    DAILY_TIPS[day_of_month as usize % DAILY_TIPS.len()]
}
