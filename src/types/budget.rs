use super::trip::TripRequest;
use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};

/// Manually entered sub-budgets for the calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub accommodation: f64,
    pub transport: f64,
    pub activities: f64,
    pub food: f64,
}

/// Values derived from a breakdown; recomputed on demand, never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetMetrics {
    pub total: f64,
    pub per_person: f64,
    pub per_day: f64,
}

impl BudgetBreakdown {
    pub fn new(accommodation: f64, transport: f64, activities: f64, food: f64) -> Result<Self> {
        let breakdown = Self {
            accommodation,
            transport,
            activities,
            food,
        };
        breakdown.validate()?;
        Ok(breakdown)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("accommodation", self.accommodation),
            ("transport", self.transport),
            ("activities", self.activities),
            ("food", self.food),
        ];
        for (name, amount) in fields {
            if !amount.is_finite() || amount < 0.0 {
                return Err(AgentError::Validation(format!(
                    "{} budget must be a non-negative amount, got {}",
                    name, amount
                )));
            }
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.accommodation + self.transport + self.activities + self.food
    }

    /// Metrics for a submitted trip. The request guarantees at least one
    /// traveler and one day.
    pub fn metrics_for(&self, trip: &TripRequest) -> BudgetMetrics {
        let total = self.total();
        BudgetMetrics {
            total,
            per_person: total / f64::from(trip.travelers()),
            per_day: total / f64::from(trip.duration_days()),
        }
    }

    /// Metrics from raw counts, for use outside a planning session
    pub fn metrics(&self, travelers: u32, days: u32) -> Result<BudgetMetrics> {
        self.validate()?;
        if travelers == 0 || days == 0 {
            return Err(AgentError::Validation(
                "travelers and days must both be at least 1".to_string(),
            ));
        }
        let total = self.total();
        Ok(BudgetMetrics {
            total,
            per_person: total / f64::from(travelers),
            per_day: total / f64::from(days),
        })
    }
}

/// Format an amount as dollars with thousands separators, e.g. `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::trip::{BudgetTier, TripForm};
    use chrono::NaiveDate;

    fn trip(travelers: u32, days: u32) -> TripRequest {
        TripRequest::try_from(TripForm {
            destination: "Kyoto".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            duration_days: days,
            budget: BudgetTier::Moderate,
            travelers,
            interests: Vec::new(),
            additional_info: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_metrics_divide_total() {
        let breakdown = BudgetBreakdown::new(900.0, 300.0, 240.0, 360.0).unwrap();
        let metrics = breakdown.metrics_for(&trip(2, 3));
        assert_eq!(metrics.total, 1800.0);
        assert_eq!(metrics.per_person, 900.0);
        assert_eq!(metrics.per_day, 600.0);
    }

    #[test]
    fn test_metrics_across_bounds() {
        let breakdown = BudgetBreakdown::new(100.0, 50.5, 25.25, 12.0).unwrap();
        for days in [1, 7, 30] {
            for travelers in [1, 2, 9] {
                let metrics = breakdown.metrics_for(&trip(travelers, days));
                assert_eq!(metrics.total, breakdown.total());
                assert_eq!(metrics.per_person, breakdown.total() / travelers as f64);
                assert_eq!(metrics.per_day, breakdown.total() / days as f64);
                assert_eq!(
                    breakdown.metrics(travelers, days).unwrap(),
                    metrics,
                );
            }
        }
    }

    #[test]
    fn test_zero_counts_rejected() {
        let breakdown = BudgetBreakdown::default();
        assert!(breakdown.metrics(0, 3).is_err());
        assert!(breakdown.metrics(2, 0).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(BudgetBreakdown::new(-1.0, 0.0, 0.0, 0.0).is_err());
        assert!(BudgetBreakdown::new(f64::NAN, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.0), "-$42.00");
    }
}
