//! Forward-looking monthly cost estimates for a daily usage pattern.

use crate::error::CostError;
use crate::pricing::PricingTable;
use serde::Serialize;

/// Days in a billing month for projections.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Monthly cost estimate and savings against a baseline speech-to-text rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub daily_minutes: f64,
    pub participants: u32,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub baseline_monthly_cost: f64,
    pub monthly_savings: f64,
    pub savings_percentage: f64,
}

/// Projects the monthly cost of `daily_minutes` of sessions per day with
/// `participants` participants each.
///
/// The baseline is the same table with its speech-to-text rate replaced by
/// `baseline_stt_rate`.
///
/// # Errors
///
/// - [`CostError::InvalidArgument`] for negative or non-finite minutes, zero
///   participants, an invalid baseline rate, or usage so large that the
///   monthly cost overflows.
/// - [`CostError::DivisionByZero`] when the baseline monthly cost is zero.
pub fn project_monthly(
    daily_minutes: f64,
    participants: u32,
    pricing: &PricingTable,
    baseline_stt_rate: f64,
) -> Result<ProjectionResult, CostError> {
    if !daily_minutes.is_finite() || daily_minutes < 0.0 {
        return Err(CostError::InvalidArgument(format!(
            "daily minutes must be a non-negative number, got {}",
            daily_minutes
        )));
    }
    if participants == 0 {
        return Err(CostError::InvalidArgument(
            "participants must be at least 1".to_string(),
        ));
    }
    let baseline = pricing.with_stt_rate(baseline_stt_rate)?;

    let daily_usage = daily_minutes * f64::from(participants);
    let daily_cost = pricing.total_per_minute() * daily_usage;
    let monthly_cost = daily_cost * DAYS_PER_MONTH;
    let baseline_monthly_cost = baseline.total_per_minute() * daily_usage * DAYS_PER_MONTH;

    if !monthly_cost.is_finite() || !baseline_monthly_cost.is_finite() {
        return Err(CostError::InvalidArgument(format!(
            "projection overflows for {} daily minutes and {} participants",
            daily_minutes, participants
        )));
    }
    if baseline_monthly_cost == 0.0 {
        return Err(CostError::DivisionByZero);
    }

    let monthly_savings = baseline_monthly_cost - monthly_cost;
    let savings_percentage = monthly_savings / baseline_monthly_cost * 100.0;
    if !savings_percentage.is_finite() {
        return Err(CostError::InvalidArgument(
            "savings percentage overflows against the baseline".to_string(),
        ));
    }

    Ok(ProjectionResult {
        daily_minutes,
        participants,
        daily_cost,
        monthly_cost,
        baseline_monthly_cost,
        monthly_savings,
        savings_percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing() -> PricingTable {
        PricingTable::new(0.00099, 0.003, 0.0005, 0.012).unwrap()
    }

    fn close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn ten_participants_for_an_hour_a_day() {
        let result = project_monthly(60.0, 10, &pricing(), 0.006).unwrap();

        close(result.daily_cost, 9.894, 1e-9);
        close(result.monthly_cost, 296.82, 1e-8);
        close(result.baseline_monthly_cost, 350.82, 1e-8);
        close(result.monthly_savings, 54.0, 1e-8);
        close(result.savings_percentage, 15.39, 0.01);
        assert_eq!(result.daily_minutes, 60.0);
        assert_eq!(result.participants, 10);
    }

    #[test]
    fn zero_minutes_is_division_by_zero() {
        let result = project_monthly(0.0, 1, &pricing(), 0.006);
        assert_eq!(result, Err(CostError::DivisionByZero));
    }

    #[test]
    fn all_zero_rates_is_division_by_zero() {
        let free = PricingTable::new(0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(
            project_monthly(30.0, 2, &free, 0.0),
            Err(CostError::DivisionByZero)
        );
    }

    #[test]
    fn invalid_inputs_are_rejected_before_computation() {
        let table = pricing();
        for minutes in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                project_monthly(minutes, 1, &table, 0.006),
                Err(CostError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            project_monthly(10.0, 0, &table, 0.006),
            Err(CostError::InvalidArgument(_))
        ));
        assert!(matches!(
            project_monthly(10.0, 1, &table, -0.006),
            Err(CostError::InvalidArgument(_))
        ));
    }

    #[test]
    fn overflowing_usage_is_rejected() {
        let result = project_monthly(1e308, 10, &PricingTable::default(), 0.006);
        assert!(
            matches!(result, Err(CostError::InvalidArgument(ref m)) if m.contains("overflows")),
            "got {:?}",
            result
        );
    }

    #[test]
    fn baseline_equal_to_current_rate_saves_nothing() {
        let result = project_monthly(45.0, 3, &pricing(), 0.003).unwrap();
        close(result.monthly_savings, 0.0, 1e-9);
        close(result.savings_percentage, 0.0, 1e-9);
    }

    #[test]
    fn cheaper_baseline_yields_negative_savings() {
        let result = project_monthly(10.0, 1, &pricing(), 0.001).unwrap();
        assert!(result.monthly_savings < 0.0);
        assert!(result.savings_percentage < 0.0);
    }
}
