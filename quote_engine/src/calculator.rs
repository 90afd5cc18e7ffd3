//! Loan quote calculation.
//!
//! `QuoteCalculator` is a pure function over its configuration: given a
//! reference price, a share quantity and a term it produces the collateral
//! value, the loan amount and the protection cost breakdown. Nothing is
//! rounded here; formatting is the caller's concern.
//!
//! Protection cost is the sum of three components:
//! - put premium: flat share of collateral value,
//! - interest: annual rate pro-rated linearly over `term_days / days_per_year`,
//! - fees: flat share of collateral value.
//!
//! Costs are computed from the full collateral value, not from the disbursed
//! loan amount.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::result::Result;

/// Rates used by the calculator. All rates are fractions (`0.05` is 5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Put protection premium as a share of collateral value.
    pub put_premium_rate: f64,
    /// Per-annum interest rate, pro-rated over the term.
    pub annual_interest_rate: f64,
    /// Flat protocol fee as a share of collateral value.
    pub fee_rate: f64,
    /// Share of collateral value disbursed as the loan.
    pub loan_to_value: f64,
    /// Year length used for interest pro-ration.
    pub days_per_year: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            put_premium_rate: 0.05,
            annual_interest_rate: 0.08,
            fee_rate: 0.02,
            loan_to_value: 0.7,
            days_per_year: 365,
        }
    }
}

impl PricingConfig {
    /// Rejects rates the calculator cannot honor.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("put_premium_rate", self.put_premium_rate),
            ("annual_interest_rate", self.annual_interest_rate),
            ("fee_rate", self.fee_rate),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(QuoteError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, rate
                )));
            }
        }
        if !(self.loan_to_value > 0.0 && self.loan_to_value <= 1.0) {
            return Err(QuoteError::Config(format!(
                "loan_to_value must be in (0, 1], got {}",
                self.loan_to_value
            )));
        }
        if self.days_per_year == 0 {
            return Err(QuoteError::Config(
                "days_per_year must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hedging charge split into its additive components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectionCost {
    /// Embedded put option premium.
    pub put_premium: f64,
    /// Interest accrued over the term.
    pub interest: f64,
    /// Flat protocol fees.
    pub fees: f64,
}

impl ProtectionCost {
    /// Sum of all components.
    pub fn total(&self) -> f64 {
        self.put_premium + self.interest + self.fees
    }
}

/// Monetary figures derived from the current wizard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// `share_quantity * reference_price`.
    pub collateral_value: f64,
    /// `collateral_value * loan_to_value`.
    pub loan_amount: f64,
    /// Protection cost breakdown.
    pub protection: ProtectionCost,
    /// Term the quote was priced for.
    pub term_days: u32,
}

impl Quote {
    /// Total protection cost.
    pub fn protection_cost(&self) -> f64 {
        self.protection.total()
    }
}

/// Stateless quote calculator bound to a validated `PricingConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteCalculator {
    config: PricingConfig,
}

impl Default for QuoteCalculator {
    fn default() -> Self {
        QuoteCalculator {
            config: PricingConfig::default(),
        }
    }
}

impl QuoteCalculator {
    /// Creates a calculator after validating `config`.
    pub fn new(config: PricingConfig) -> Result<Self> {
        config.validate()?;
        Ok(QuoteCalculator { config })
    }

    /// Rates in use.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Computes a quote.
    ///
    /// Fails with `OutOfDomain` when the price or quantity is not a positive
    /// finite number, when `term_days` is zero, or when the result overflows
    /// or underflows to zero.
    pub fn compute_quote(
        &self,
        reference_price: f64,
        share_quantity: f64,
        term_days: u32,
    ) -> Result<Quote> {
        ensure_positive("reference price", reference_price)?;
        ensure_positive("share quantity", share_quantity)?;
        if term_days == 0 {
            return Err(QuoteError::OutOfDomain(
                "term must be at least one day".to_string(),
            ));
        }

        let collateral_value = share_quantity * reference_price;
        if !collateral_value.is_finite() {
            return Err(QuoteError::OutOfDomain(format!(
                "collateral value overflows for {} shares at {}",
                share_quantity, reference_price
            )));
        }
        if collateral_value <= 0.0 {
            return Err(QuoteError::OutOfDomain(format!(
                "collateral value underflows for {} shares at {}",
                share_quantity, reference_price
            )));
        }

        let cfg = &self.config;
        let loan_amount = collateral_value * cfg.loan_to_value;
        if loan_amount <= 0.0 {
            return Err(QuoteError::OutOfDomain(format!(
                "loan amount underflows for collateral value {}",
                collateral_value
            )));
        }
        let year_fraction = f64::from(term_days) / f64::from(cfg.days_per_year);
        let protection = ProtectionCost {
            put_premium: collateral_value * cfg.put_premium_rate,
            interest: collateral_value * cfg.annual_interest_rate * year_fraction,
            fees: collateral_value * cfg.fee_rate,
        };
        if !protection.total().is_finite() {
            return Err(QuoteError::OutOfDomain(
                "protection cost overflows".to_string(),
            ));
        }

        Ok(Quote {
            collateral_value,
            loan_amount,
            protection,
            term_days,
        })
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(QuoteError::OutOfDomain(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn aapl_fifty_shares_thirty_days() {
        let calc = QuoteCalculator::default();
        let quote = calc.compute_quote(100.0, 50.0, 30).unwrap();

        assert!(approx(quote.collateral_value, 5000.0));
        assert!(approx(quote.loan_amount, 3500.0));
        assert!(approx(quote.protection.put_premium, 250.0));
        assert!(approx(quote.protection.interest, 5000.0 * 0.08 * 30.0 / 365.0));
        assert!(approx(quote.protection.fees, 100.0));
        assert!(approx(
            quote.protection_cost(),
            250.0 + 5000.0 * 0.08 * 30.0 / 365.0 + 100.0
        ));
        assert_eq!(quote.term_days, 30);
    }

    #[test]
    fn identical_inputs_give_identical_quotes() {
        let calc = QuoteCalculator::default();
        for (price, shares, days) in [(100.0, 50.0, 30), (0.01, 3.5, 1), (4321.5, 0.2, 900)] {
            assert_eq!(
                calc.compute_quote(price, shares, days).unwrap(),
                calc.compute_quote(price, shares, days).unwrap()
            );
        }
    }

    #[test]
    fn collateral_value_strictly_increases_with_inputs() {
        let calc = QuoteCalculator::default();
        let mut previous = 0.0;
        for shares in [0.5, 1.0, 2.0, 10.0, 1000.0] {
            let value = calc.compute_quote(100.0, shares, 30).unwrap().collateral_value;
            assert!(value > previous);
            previous = value;
        }
        let mut previous = 0.0;
        for price in [0.01, 1.0, 99.0, 100.0, 5000.0] {
            let value = calc.compute_quote(price, 50.0, 30).unwrap().collateral_value;
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn protection_cost_does_not_decrease_with_term() {
        let calc = QuoteCalculator::default();
        let mut previous = 0.0;
        for days in [1, 7, 14, 30, 60, 90, 365, 3650] {
            let cost = calc.compute_quote(100.0, 50.0, days).unwrap().protection_cost();
            assert!(cost >= previous);
            previous = cost;
        }
    }

    #[test]
    fn zero_or_invalid_inputs_are_out_of_domain() {
        let calc = QuoteCalculator::default();
        let cases = [
            (0.0, 50.0, 30),
            (100.0, 0.0, 30),
            (100.0, 50.0, 0),
            (-1.0, 50.0, 30),
            (f64::NAN, 50.0, 30),
            (100.0, f64::INFINITY, 30),
            (f64::MAX, 10.0, 30),
        ];
        for (price, shares, days) in cases {
            assert!(matches!(
                calc.compute_quote(price, shares, days),
                Err(QuoteError::OutOfDomain(_))
            ));
        }
    }

    #[test]
    fn tiny_inputs_that_underflow_are_out_of_domain() {
        let calc = QuoteCalculator::default();
        for (price, shares) in [(1e-200, 1e-200), (1e-300, 1e-30)] {
            assert!(matches!(
                calc.compute_quote(price, shares, 30),
                Err(QuoteError::OutOfDomain(_))
            ));
        }
        let smallest = calc.compute_quote(1e-150, 1e-150, 30).unwrap();
        assert!(smallest.collateral_value > 0.0);
        assert!(smallest.loan_amount > 0.0);
    }

    #[test]
    fn rates_are_configurable() {
        let calc = QuoteCalculator::new(PricingConfig {
            put_premium_rate: 0.0,
            annual_interest_rate: 0.365,
            fee_rate: 0.0,
            loan_to_value: 0.5,
            days_per_year: 365,
        })
        .unwrap();
        let quote = calc.compute_quote(10.0, 100.0, 10).unwrap();
        assert!(approx(quote.loan_amount, 500.0));
        assert!(approx(quote.protection_cost(), 10.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = [
            PricingConfig { loan_to_value: 0.0, ..PricingConfig::default() },
            PricingConfig { loan_to_value: 1.2, ..PricingConfig::default() },
            PricingConfig { fee_rate: -0.01, ..PricingConfig::default() },
            PricingConfig { put_premium_rate: f64::NAN, ..PricingConfig::default() },
            PricingConfig { days_per_year: 0, ..PricingConfig::default() },
        ];
        for config in bad {
            assert!(matches!(QuoteCalculator::new(config), Err(QuoteError::Config(_))));
        }
    }
}
