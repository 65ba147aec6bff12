//! ROI metrics engine for agent time-and-motion studies.
//!
//! Converts raw time/usage/cost inputs into the four derived savings
//! figures. The same function backs both measured studies and per-agent
//! projections, so the formula cannot drift between the two paths.

use serde::{Deserialize, Serialize};

/// Derived ROI metrics for a single study or projection.
///
/// The four fields are kept separate (rather than one blended number) so
/// downstream consumers can audit any single step and render a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    /// Minutes saved per task occurrence. Negative when the agent is slower.
    pub time_saved_mins: f64,
    /// Usage count after the adoption discount.
    pub net_usage: f64,
    /// Annual hours saved across all credited occurrences.
    pub net_time_saved_hours: f64,
    /// Annual dollar value of the net time saved.
    pub potential_savings: f64,
}

/// Computes derived ROI metrics from raw study or projection inputs.
///
/// ```text
/// time_saved_mins      = time_without_ai_mins - time_with_ai_mins
/// net_usage            = usage_count * (1 - usage_discount_pct / 100)
/// net_time_saved_hours = time_saved_mins * net_usage / 60
/// potential_savings    = net_time_saved_hours * cost_per_hour
/// ```
///
/// The discount models realistic adoption: not every occurrence of the
/// task routes through the agent, so raw frequency is decoupled from
/// credited savings.
///
/// Pure and total over its documented domain: all five inputs finite,
/// times/usage/cost non-negative, discount in [0, 100]. No validation
/// happens here; callers reject out-of-domain inputs before invoking the
/// engine. No rounding either, that is a presentation concern.
///
/// A negative `time_saved_mins` (agent slower than baseline) is a
/// legitimate signal and flows through to negative savings.
///
/// # Examples
/// ```
/// use agent_roi_core::metrics::compute_metrics;
///
/// let m = compute_metrics(15.0, 5.0, 31500.0, 50.0, 50.0);
/// assert_eq!(m.time_saved_mins, 10.0);
/// assert_eq!(m.net_usage, 15750.0);
/// assert_eq!(m.net_time_saved_hours, 2625.0);
/// assert_eq!(m.potential_savings, 131250.0);
/// ```
#[must_use]
pub fn compute_metrics(
    time_without_ai_mins: f64,
    time_with_ai_mins: f64,
    usage_count: f64,
    usage_discount_pct: f64,
    cost_per_hour: f64,
) -> RoiMetrics {
    let time_saved_mins = time_without_ai_mins - time_with_ai_mins;
    let net_usage = usage_count * (1.0 - usage_discount_pct / 100.0);
    let net_time_saved_hours = time_saved_mins * net_usage / 60.0;
    let potential_savings = net_time_saved_hours * cost_per_hour;

    RoiMetrics {
        time_saved_mins,
        net_usage,
        net_time_saved_hours,
        potential_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================
    // Worked Examples
    // ============================================

    #[test]
    fn worked_example_support_tickets() {
        // 20 min -> 10 min, 20k occurrences, 50% discount, $50/h
        let m = compute_metrics(20.0, 10.0, 20000.0, 50.0, 50.0);

        assert_eq!(m.time_saved_mins, 10.0);
        assert_eq!(m.net_usage, 10000.0);
        // 10 * 10000 / 60 = 1666.666...
        assert!((m.net_time_saved_hours - 5000.0 / 3.0).abs() < 1e-9);
        // 1666.666... * 50 = 83333.333...
        assert!((m.potential_savings - 250_000.0 / 3.0).abs() < 1e-8);
    }

    #[test]
    fn worked_example_document_drafting() {
        // 15 min -> 5 min, 31.5k occurrences, 50% discount, $50/h
        let m = compute_metrics(15.0, 5.0, 31500.0, 50.0, 50.0);

        assert_eq!(m.time_saved_mins, 10.0);
        assert_eq!(m.net_usage, 15750.0);
        assert_eq!(m.net_time_saved_hours, 2625.0);
        assert_eq!(m.potential_savings, 131250.0);
    }

    // ============================================
    // Discount Boundaries
    // ============================================

    #[test]
    fn full_discount_zeroes_everything_downstream() {
        let m = compute_metrics(20.0, 10.0, 20000.0, 100.0, 50.0);

        assert_eq!(m.time_saved_mins, 10.0);
        assert_eq!(m.net_usage, 0.0);
        assert_eq!(m.net_time_saved_hours, 0.0);
        assert_eq!(m.potential_savings, 0.0);
    }

    #[test]
    fn zero_discount_passes_usage_through_exactly() {
        let m = compute_metrics(20.0, 10.0, 12345.0, 0.0, 50.0);
        assert_eq!(m.net_usage, 12345.0);
    }

    #[test]
    fn net_usage_stays_within_zero_and_usage_count() {
        for discount in [0.0, 12.5, 25.0, 50.0, 75.0, 99.9, 100.0] {
            let m = compute_metrics(20.0, 10.0, 5000.0, discount, 50.0);
            assert!(m.net_usage >= 0.0, "discount {discount}");
            assert!(m.net_usage <= 5000.0, "discount {discount}");
        }
    }

    // ============================================
    // Negative Time Saved
    // ============================================

    #[test]
    fn slower_with_ai_yields_negative_savings_not_an_error() {
        let m = compute_metrics(10.0, 25.0, 1000.0, 0.0, 40.0);

        assert_eq!(m.time_saved_mins, -15.0);
        assert!(m.net_time_saved_hours < 0.0);
        assert!(m.potential_savings < 0.0);
    }

    #[test]
    fn equal_times_yield_zero_savings() {
        let m = compute_metrics(30.0, 30.0, 1000.0, 10.0, 40.0);

        assert_eq!(m.time_saved_mins, 0.0);
        assert_eq!(m.net_time_saved_hours, 0.0);
        assert_eq!(m.potential_savings, 0.0);
    }

    // ============================================
    // Zero Inputs
    // ============================================

    #[test]
    fn zero_usage_zeroes_hours_and_savings() {
        let m = compute_metrics(20.0, 10.0, 0.0, 25.0, 50.0);

        assert_eq!(m.net_usage, 0.0);
        assert_eq!(m.net_time_saved_hours, 0.0);
        assert_eq!(m.potential_savings, 0.0);
    }

    #[test]
    fn zero_cost_per_hour_zeroes_savings_only() {
        let m = compute_metrics(20.0, 10.0, 6000.0, 50.0, 0.0);

        assert_eq!(m.potential_savings, 0.0);
        assert_eq!(m.net_time_saved_hours, 500.0);
    }

    #[test]
    fn all_zero_inputs() {
        let m = compute_metrics(0.0, 0.0, 0.0, 0.0, 0.0);

        assert_eq!(m.time_saved_mins, 0.0);
        assert_eq!(m.net_usage, 0.0);
        assert_eq!(m.net_time_saved_hours, 0.0);
        assert_eq!(m.potential_savings, 0.0);
    }

    // ============================================
    // Determinism
    // ============================================

    #[test]
    fn identical_inputs_yield_bit_identical_outputs() {
        let a = compute_metrics(17.3, 4.1, 9871.0, 33.3, 62.5);
        let b = compute_metrics(17.3, 4.1, 9871.0, 33.3, 62.5);

        assert_eq!(a.time_saved_mins.to_bits(), b.time_saved_mins.to_bits());
        assert_eq!(a.net_usage.to_bits(), b.net_usage.to_bits());
        assert_eq!(
            a.net_time_saved_hours.to_bits(),
            b.net_time_saved_hours.to_bits()
        );
        assert_eq!(
            a.potential_savings.to_bits(),
            b.potential_savings.to_bits()
        );
    }

    // ============================================
    // Formula Consistency
    // ============================================

    #[test]
    fn outputs_satisfy_the_four_formulas() {
        let cases = [
            (20.0, 10.0, 20000.0, 50.0, 50.0),
            (45.0, 12.0, 800.0, 20.0, 95.5),
            (5.0, 8.0, 120.0, 0.0, 18.0),
            (60.0, 1.0, 1.0, 99.0, 200.0),
        ];

        for (without, with, usage, discount, cost) in cases {
            let m = compute_metrics(without, with, usage, discount, cost);

            assert_eq!(m.time_saved_mins, without - with);
            assert_eq!(m.net_usage, usage * (1.0 - discount / 100.0));
            assert_eq!(
                m.net_time_saved_hours,
                m.time_saved_mins * m.net_usage / 60.0
            );
            assert_eq!(m.potential_savings, m.net_time_saved_hours * cost);
        }
    }

    #[test]
    fn metrics_serialize_with_field_names() {
        let m = compute_metrics(15.0, 5.0, 31500.0, 50.0, 50.0);
        let json = serde_json::to_value(&m).unwrap();

        assert_eq!(json["time_saved_mins"], 10.0);
        assert_eq!(json["net_usage"], 15750.0);
        assert_eq!(json["net_time_saved_hours"], 2625.0);
        assert_eq!(json["potential_savings"], 131250.0);
    }
}
