//! Display implementations for domain models.
//!
//! Plans render as a markdown heading followed by a metadata list; the
//! smaller value types render as single-line text so they can be embedded in
//! tables and list items.

use std::fmt;

use super::datetime::{LocalDateTime, VisitDate};
use crate::models::{
    BillingTerms, Frequency, Occurrence, PausePeriod, ServicePlan, WindowOverride,
};

/// An amount in minor units with its currency, e.g. `USD 93.50`.
pub struct Money<'a>(pub i64, pub &'a str);

impl fmt::Display for Money<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{} {sign}{}.{:02}", self.1, cents / 100, cents % 100)
    }
}

impl fmt::Display for BillingTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per visit", Money(self.price_cents, &self.currency))?;
        if self.discount_pct > 0.0 {
            write!(f, ", {}% discount", self.discount_pct)?;
        }
        if self.tax_pct > 0.0 {
            write!(f, ", {}% tax", self.tax_pct)?;
        }
        write!(
            f,
            " ({} billed {})",
            Money(self.visit_total_cents(), &self.currency),
            self.billing_type.label()
        )
    }
}

impl fmt::Display for ServicePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan {}: {}", self.id, self.pool_id)?;
        writeln!(f)?;
        writeln!(f, "- Cadence: {}", self.cadence())?;
        match &self.window {
            Some(window) => writeln!(f, "- Window: {window}")?,
            None => writeln!(f, "- Window: any time")?,
        }
        match self.starts_on {
            Some(starts_on) => writeln!(f, "- Starts: {starts_on}")?,
            None => writeln!(f, "- Starts: immediately")?,
        }
        match self.ends_on {
            Some(ends_on) => writeln!(f, "- Ends: {ends_on}")?,
            None => writeln!(f, "- Ends: open-ended")?,
        }
        if let Some(anchor) = self.cycle_anchor.filter(|_| self.frequency == Frequency::Biweekly) {
            writeln!(f, "- Cycle anchor: {anchor}")?;
        }
        writeln!(f, "- Price: {}", self.billing)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.window {
            Some(window) => write!(f, "{} {window}", VisitDate(self.date)),
            None => write!(f, "{}", VisitDate(self.date)),
        }
    }
}

impl fmt::Display for WindowOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", VisitDate(self.date), self.window)?;
        if let Some(reason) = &self.reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

impl fmt::Display for PausePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.until {
            Some(until) => write!(f, "paused {} through {until}", self.starts_on)?,
            None => write!(f, "paused indefinitely from {}", self.starts_on)?,
        }
        if let Some(reason) = &self.reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{BillingType, DayOfWeek, TimeWindow};

    fn plan() -> ServicePlan {
        ServicePlan {
            id: 4,
            pool_id: "pool-7".to_string(),
            frequency: Frequency::Biweekly,
            dow: Some(DayOfWeek::Tue),
            second_dow: None,
            dom: None,
            second_dom: None,
            window: Some(TimeWindow::parse("08:00", "10:00").unwrap()),
            starts_on: Some(date(2024, 1, 2)),
            ends_on: None,
            cycle_anchor: Some(date(2024, 1, 2)),
            billing: BillingTerms {
                price_cents: 8500,
                currency: "USD".to_string(),
                tax_pct: 10.0,
                discount_pct: 0.0,
                billing_type: BillingType::Monthly,
            },
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(Money(9350, "USD").to_string(), "USD 93.50");
        assert_eq!(Money(5, "EUR").to_string(), "EUR 0.05");
        assert_eq!(Money(-120, "USD").to_string(), "USD -1.20");
    }

    #[test]
    fn test_plan_display() {
        let output = plan().to_string();
        assert!(output.starts_with("# Plan 4: pool-7\n"));
        assert!(output.contains("- Cadence: Every two weeks (tue)"));
        assert!(output.contains("- Window: 08:00-10:00"));
        assert!(output.contains("- Ends: open-ended"));
        assert!(output.contains("- Cycle anchor: 2024-01-02"));
        assert!(output.contains("USD 85.00 per visit, 10% tax (USD 93.50 billed monthly)"));
    }

    #[test]
    fn test_occurrence_and_pause_display() {
        let visit = Occurrence::new(date(2024, 1, 8), TimeWindow::parse("13:00", "14:00").ok());
        assert_eq!(visit.to_string(), "Mon 2024-01-08 13:00-14:00");

        let pause = PausePeriod {
            starts_on: date(2024, 12, 1),
            until: None,
            reason: Some("Winter".to_string()),
        };
        assert_eq!(pause.to_string(), "paused indefinitely from 2024-12-01 (Winter)");
    }
}
