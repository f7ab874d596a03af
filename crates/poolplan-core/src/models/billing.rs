//! Billing terms attached to a service plan.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// How visits are batched into invoices. Has no effect on scheduling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    #[default]
    PerVisit,
    Monthly,
    Quarterly,
    Annually,
}

impl BillingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::PerVisit => "per_visit",
            BillingType::Monthly => "monthly",
            BillingType::Quarterly => "quarterly",
            BillingType::Annually => "annually",
        }
    }

    /// Length of one invoice period in months, or `None` when every visit is
    /// invoiced on its own.
    pub fn period_months(&self) -> Option<i8> {
        match self {
            BillingType::PerVisit => None,
            BillingType::Monthly => Some(1),
            BillingType::Quarterly => Some(3),
            BillingType::Annually => Some(12),
        }
    }

    /// Phrase used in plan summaries, e.g. `per visit`.
    pub fn label(&self) -> &'static str {
        match self {
            BillingType::PerVisit => "per visit",
            BillingType::Monthly => "monthly",
            BillingType::Quarterly => "quarterly",
            BillingType::Annually => "annually",
        }
    }
}

impl FromStr for BillingType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "per_visit" => Ok(BillingType::PerVisit),
            "monthly" => Ok(BillingType::Monthly),
            "quarterly" => Ok(BillingType::Quarterly),
            "annually" => Ok(BillingType::Annually),
            _ => Err(PlanError::invalid_input("billing_type").with_reason(format!(
                "'{s}' is not one of per_visit, monthly, quarterly, annually"
            ))),
        }
    }
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price and tax terms applied to every visit of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingTerms {
    /// Price of one visit before discount and tax, in minor units
    pub price_cents: i64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Tax percentage applied after the discount
    #[serde(default)]
    pub tax_pct: f64,

    /// Discount percentage applied to the base price
    #[serde(default)]
    pub discount_pct: f64,

    #[serde(default)]
    pub billing_type: BillingType,
}

impl BillingTerms {
    /// Checks the invariants storage and invoicing rely on.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.price_cents < 0 {
            return Err(PlanError::invalid_input("price_cents").with_reason("must not be negative"));
        }
        let code_ok = self.currency.len() == 3
            && self.currency.bytes().all(|b| b.is_ascii_uppercase());
        if !code_ok {
            return Err(PlanError::invalid_input("currency")
                .with_reason(format!("'{}' is not a three-letter ISO code", self.currency)));
        }
        for (field, pct) in [("tax_pct", self.tax_pct), ("discount_pct", self.discount_pct)] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(PlanError::invalid_input(field)
                    .with_reason(format!("{pct} is outside 0..=100")));
            }
        }
        Ok(())
    }

    /// Amount charged for one visit: discount first, then tax, rounded to
    /// whole cents (half away from zero).
    pub fn visit_total_cents(&self) -> i64 {
        let hundred = Decimal::ONE_HUNDRED;
        let discounted =
            Decimal::from(self.price_cents) * (hundred - percent(self.discount_pct)) / hundred;
        let total = discounted * (hundred + percent(self.tax_pct)) / hundred;
        total
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

/// Reads a percentage through its shortest decimal form so `8.25` is
/// exactly 8.25 rather than the nearest binary fraction.
fn percent(value: f64) -> Decimal {
    Decimal::from_str(&value.to_string()).unwrap_or(Decimal::ZERO)
}

impl Default for BillingTerms {
    fn default() -> Self {
        Self {
            price_cents: 0,
            currency: "USD".to_string(),
            tax_pct: 0.0,
            discount_pct: 0.0,
            billing_type: BillingType::PerVisit,
        }
    }
}
