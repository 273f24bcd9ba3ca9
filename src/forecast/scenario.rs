//! Forecast scenario parameters
//!
//! The what-if knobs of the forecaster. Values arrive from the dashboard as
//! slider percentages and enum strings and are validated here once.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategy {
    #[default]
    Normal,
    /// +20% revenue
    Premium,
    /// -20% revenue
    Discount,
}

impl PricingStrategy {
    pub fn multiplier(&self) -> f64 {
        match self {
            PricingStrategy::Normal => 1.0,
            PricingStrategy::Premium => 1.2,
            PricingStrategy::Discount => 0.8,
        }
    }
}

impl FromStr for PricingStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "premium" => Ok(Self::Premium),
            "discount" => Ok(Self::Discount),
            other => Err(DomainError::invalid_parameter(
                "pricing",
                format!("expected normal, premium or discount, got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionTier {
    /// +10% revenue
    High,
    #[default]
    Medium,
    /// -10% revenue
    Low,
}

impl RetentionTier {
    pub fn multiplier(&self) -> f64 {
        match self {
            RetentionTier::High => 1.1,
            RetentionTier::Medium => 1.0,
            RetentionTier::Low => 0.9,
        }
    }
}

impl FromStr for RetentionTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(DomainError::invalid_parameter(
                "retention",
                format!("expected high, medium or low, got '{}'", other),
            )),
        }
    }
}

/// A validated set of forecast parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    /// 0.0-2.0, 1.0 is the current spend
    marketing_spend_ratio: f64,
    /// -0.5-0.5
    annual_growth_rate: f64,
    pricing: PricingStrategy,
    retention: RetentionTier,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            marketing_spend_ratio: 1.0,
            annual_growth_rate: 0.0,
            pricing: PricingStrategy::Normal,
            retention: RetentionTier::Medium,
        }
    }
}

impl Scenario {
    /// Create a scenario from ratios.
    ///
    /// # Errors
    /// `DomainError::InvalidParameter` if the marketing ratio is outside
    /// 0.0-2.0 or the growth rate outside -0.5-0.5.
    pub fn new(
        marketing_spend_ratio: f64,
        annual_growth_rate: f64,
        pricing: PricingStrategy,
        retention: RetentionTier,
    ) -> Result<Self, DomainError> {
        if !(0.0..=2.0).contains(&marketing_spend_ratio) {
            return Err(DomainError::invalid_parameter(
                "marketing",
                format!("ratio must be within 0.0-2.0, got {}", marketing_spend_ratio),
            ));
        }
        if !(-0.5..=0.5).contains(&annual_growth_rate) {
            return Err(DomainError::invalid_parameter(
                "growth",
                format!("rate must be within -0.5-0.5, got {}", annual_growth_rate),
            ));
        }

        Ok(Self {
            marketing_spend_ratio,
            annual_growth_rate,
            pricing,
            retention,
        })
    }

    /// Create a scenario from dashboard slider values: marketing 0-200 (%),
    /// growth -50-50 (%)
    pub fn from_percentages(
        marketing_pct: f64,
        growth_pct: f64,
        pricing: PricingStrategy,
        retention: RetentionTier,
    ) -> Result<Self, DomainError> {
        Self::new(marketing_pct / 100.0, growth_pct / 100.0, pricing, retention)
    }

    pub fn marketing_spend_ratio(&self) -> f64 {
        self.marketing_spend_ratio
    }

    pub fn annual_growth_rate(&self) -> f64 {
        self.annual_growth_rate
    }

    pub fn pricing(&self) -> PricingStrategy {
        self.pricing
    }

    pub fn retention(&self) -> RetentionTier {
        self.retention
    }

    /// Diminishing-returns marketing multiplier.
    ///
    /// Underspend is penalized along `sqrt(ratio)`; overspend saturates along
    /// `1 + log2(ratio)`.
    pub fn marketing_multiplier(&self) -> f64 {
        let ratio = self.marketing_spend_ratio;
        if ratio <= 1.0 {
            ratio.sqrt()
        } else {
            1.0 + ratio.log2()
        }
    }

    /// Per-day factor that compounds to the annual growth rate over 365 days
    pub fn daily_growth_factor(&self) -> f64 {
        (1.0 + self.annual_growth_rate).powf(1.0 / 365.0)
    }

    /// Product of every scenario multiplier (everything except seasonality)
    pub fn combined_multiplier(&self) -> f64 {
        self.marketing_multiplier()
            * self.pricing.multiplier()
            * self.retention.multiplier()
            * self.daily_growth_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketing_multiplier_underspend_uses_sqrt() {
        let scenario = Scenario::new(0.25, 0.0, PricingStrategy::Normal, RetentionTier::Medium).unwrap();
        assert_eq!(scenario.marketing_multiplier(), 0.5);

        let zero = Scenario::new(0.0, 0.0, PricingStrategy::Normal, RetentionTier::Medium).unwrap();
        assert_eq!(zero.marketing_multiplier(), 0.0);
    }

    #[test]
    fn test_marketing_multiplier_overspend_uses_log2() {
        let scenario = Scenario::new(2.0, 0.0, PricingStrategy::Normal, RetentionTier::Medium).unwrap();
        assert_eq!(scenario.marketing_multiplier(), 2.0);
    }

    #[test]
    fn test_baseline_scenario_is_neutral() {
        let scenario = Scenario::default();
        assert_eq!(scenario.marketing_multiplier(), 1.0);
        assert_eq!(scenario.daily_growth_factor(), 1.0);
        assert_eq!(scenario.combined_multiplier(), 1.0);
    }

    #[test]
    fn test_daily_growth_compounds_to_annual_rate() {
        let scenario = Scenario::new(1.0, 0.2, PricingStrategy::Normal, RetentionTier::Medium).unwrap();
        let annual = scenario.daily_growth_factor().powi(365);
        assert!((annual - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_from_percentages() {
        let scenario =
            Scenario::from_percentages(150.0, -10.0, PricingStrategy::Premium, RetentionTier::High)
                .unwrap();
        assert_eq!(scenario.marketing_spend_ratio(), 1.5);
        assert_eq!(scenario.annual_growth_rate(), -0.1);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Scenario::from_percentages(210.0, 0.0, PricingStrategy::Normal, RetentionTier::Medium).is_err());
        assert!(Scenario::from_percentages(100.0, -60.0, PricingStrategy::Normal, RetentionTier::Medium).is_err());
        assert!(Scenario::new(f64::NAN, 0.0, PricingStrategy::Normal, RetentionTier::Medium).is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("premium".parse::<PricingStrategy>().unwrap().multiplier(), 1.2);
        assert_eq!("low".parse::<RetentionTier>().unwrap().multiplier(), 0.9);
        assert!("luxury".parse::<PricingStrategy>().is_err());
    }
}
