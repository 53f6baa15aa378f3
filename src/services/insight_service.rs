//! Pure derivations over a daily summary: macro deviations, calorie balance,
//! day-completion status, calories progress and the enriched daily insight.
//! Everything here is side-effect-free and works on canonicalized summaries.

use crate::models::insight::{
    BalanceStatus, CaloriesProgress, DailyInsight, DayStatus, DeviationStatus, MacroDeviation,
    MacroDeviations, MetabolicContext,
};
use crate::models::summary::DailySummary;

/// Deviation of a consumed value against its goal, as a rounded percentage.
/// A zero target cannot be judged, so the sentinel keeps the consumed value
/// and flags a warning.
pub fn calculate_deviation(consumed: f64, target: f64) -> MacroDeviation {
    if target == 0.0 {
        return MacroDeviation {
            value: consumed,
            percentage: 0,
            status: DeviationStatus::Warning,
        };
    }

    let percentage = ((consumed - target) / target) * 100.0;
    let abs = percentage.abs();

    let status = if abs > 25.0 {
        DeviationStatus::Danger
    } else if abs > 10.0 {
        DeviationStatus::Warning
    } else {
        DeviationStatus::Good
    };

    MacroDeviation {
        value: consumed,
        percentage: percentage.round() as i64,
        status,
    }
}

/// Deficit below −100 kcal, surplus above +100 kcal, balanced in between
/// (both boundaries count as balanced).
pub fn balance_status(balance: f64) -> BalanceStatus {
    if balance < -100.0 {
        BalanceStatus::Deficit
    } else if balance > 100.0 {
        BalanceStatus::Surplus
    } else {
        BalanceStatus::Balanced
    }
}

fn is_missing(value: Option<f64>) -> bool {
    // A stored 0 means nothing was logged, same as an absent field. The
    // backend materializes every computed column, so an absent consumed
    // value only occurs on rows that were never written.
    value.map_or(true, |v| v == 0.0)
}

/// Calendar-cell status for one day, on a ±20% tolerance band across all
/// four macros.
pub fn day_status(summary: &DailySummary) -> DayStatus {
    if is_missing(summary.calories_consumed) {
        return DayStatus::NoData;
    }

    let goals = [
        summary.calories_target(),
        summary.proteins_target(),
        summary.carbs_target(),
        summary.fats_target(),
    ];
    if goals.iter().any(|goal| is_missing(*goal)) {
        return DayStatus::NoData;
    }

    let consumed = [
        summary.calories_consumed,
        summary.proteins_consumed,
        summary.carbs_consumed,
        summary.fats_consumed,
    ];
    if consumed.iter().any(|value| is_missing(*value)) {
        return DayStatus::Partial;
    }

    let all_in_range = consumed.iter().zip(goals.iter()).all(|(value, goal)| {
        // Both sides checked above; missing values cannot reach here.
        let value = value.unwrap_or(0.0);
        let goal = goal.unwrap_or(0.0);
        value >= goal * 0.8 && value <= goal * 1.2
    });

    if all_in_range {
        DayStatus::Excellent
    } else {
        DayStatus::Partial
    }
}

/// Dashboard calories card. The true percentage keeps going past 100 for
/// the label; only the bar fill is capped.
pub fn calories_progress(summary: &DailySummary) -> CaloriesProgress {
    let consumed = summary.calories_consumed.unwrap_or(0.0).round().max(0.0) as i64;
    let target = summary.calories_target().unwrap_or(0.0).round() as i64;

    if target <= 0 {
        return CaloriesProgress {
            consumed,
            target,
            percentage: 0,
            display_percentage: 0,
            status: DeviationStatus::Good,
        };
    }

    let percentage = ((consumed as f64 / target as f64) * 100.0).round() as i64;
    let status = if percentage > 110 {
        DeviationStatus::Danger
    } else if percentage >= 100 {
        DeviationStatus::Warning
    } else {
        DeviationStatus::Good
    };

    CaloriesProgress {
        consumed,
        target,
        percentage,
        display_percentage: percentage.min(100),
        status,
    }
}

/// Remaining calories for the day: `target − consumed + burned`. Note this
/// is not `−calorie_balance`; the server computes
/// `balance = consumed − target + burned`, so the two figures differ by
/// exactly twice the calories burned. Both are displayed as-is.
pub fn remaining_calories(summary: &DailySummary) -> f64 {
    let target = summary.calories_target().unwrap_or(0.0);
    let consumed = summary.calories_consumed.unwrap_or(0.0);
    let burned = summary.calories_burned.unwrap_or(0.0);
    target - consumed + burned
}

/// The enriched daily insight: balance with status, server feedback, the
/// four macro deviations and metabolic context.
pub fn daily_insight(summary: &DailySummary) -> DailyInsight {
    let calorie_balance = summary.calorie_balance.unwrap_or(0.0);

    DailyInsight {
        calorie_balance,
        balance_status: balance_status(calorie_balance),
        goal_feedback: summary.goal_feedback.clone(),
        macro_deviations: MacroDeviations {
            calories: calculate_deviation(
                summary.calories_consumed.unwrap_or(0.0),
                summary.calories_target().unwrap_or(0.0),
            ),
            proteins: calculate_deviation(
                summary.proteins_consumed.unwrap_or(0.0),
                summary.proteins_target().unwrap_or(0.0),
            ),
            carbs: calculate_deviation(
                summary.carbs_consumed.unwrap_or(0.0),
                summary.carbs_target().unwrap_or(0.0),
            ),
            fats: calculate_deviation(
                summary.fats_consumed.unwrap_or(0.0),
                summary.fats_target().unwrap_or(0.0),
            ),
        },
        metabolic_context: MetabolicContext {
            bmr: summary.bmr,
            tdee: summary.tdee,
            net_need: summary.calories_target(),
        },
    }
}
