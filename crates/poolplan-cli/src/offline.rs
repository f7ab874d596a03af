//! Expansion of a plan read from a JSON file, without any database.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use jiff::{civil::Date, Timestamp, Zoned};
use poolplan_core::{
    display::Visits,
    expand,
    params::{parse_date, CreatePlan},
    Frequency, PausePeriod, PlanError, PlanSchedule, WindowOverride,
};
use serde::Deserialize;

use crate::{cli::ExpandArgs, renderer::TerminalRenderer};

/// Contents of a plan file:
///
/// ```json
/// {
///   "plan": {"pool_id": "p1", "frequency": "weekly", "dow": "mon"},
///   "overrides": [{"date": "2024-01-08", "window": {"start": "13:00", "end": "14:00"}}],
///   "pause": {"starts_on": "2024-02-01", "until": "2024-02-14"}
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    pub plan: CreatePlan,
    #[serde(default)]
    pub overrides: Vec<WindowOverride>,
    #[serde(default)]
    pub pause: Option<PausePeriod>,
}

impl PlanFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse plan file {}", path.display()))
    }

    /// Validates the plan and expands it over `[from, to]`.
    ///
    /// A biweekly plan must pin its parity with `cycle_anchor` or
    /// `starts_on`, otherwise the same file would expand differently on
    /// different days.
    pub fn expand(self, from: Date, to: Date, today: Date) -> poolplan_core::Result<PlanSchedule> {
        let draft = self.plan.validate(today)?;
        if draft.frequency == Frequency::Biweekly
            && self.plan.cycle_anchor.is_none()
            && self.plan.starts_on.is_none()
        {
            return Err(PlanError::missing_anchor("cycle_anchor"));
        }
        let plan = draft.into_plan(0, Timestamp::now());
        let occurrences = expand(&plan, &self.overrides, self.pause.as_ref(), from, to)?;
        Ok(PlanSchedule {
            plan,
            from,
            to,
            pause: self.pause,
            occurrences,
        })
    }
}

pub fn run(args: &ExpandArgs, renderer: &TerminalRenderer) -> Result<()> {
    let from = parse_date("from", &args.from)?;
    let to = parse_date("to", &args.to)?;
    let schedule = PlanFile::load(&args.file)?
        .expand(from, to, Zoned::now().date())
        .context("Failed to expand plan file")?;

    log::debug!("Expanded plan file into {} visit(s)", schedule.occurrences.len());
    if args.json {
        return renderer.render_json(&schedule.occurrences);
    }
    renderer.render(&Visits(&schedule).to_string())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    const PLAN_FILE: &str = r#"{
        "plan": {
            "pool_id": "pool-1",
            "frequency": "weekly",
            "dow": "mon",
            "window_start": "09:00",
            "window_end": "11:00",
            "starts_on": "2024-01-01"
        },
        "overrides": [
            {"date": "2024-01-08", "window": {"start": "13:00", "end": "14:00"}}
        ],
        "pause": {"starts_on": "2024-01-20", "until": "2024-01-24"}
    }"#;

    #[test]
    fn test_plan_file_expands() {
        let file: PlanFile = serde_json::from_str(PLAN_FILE).unwrap();
        let schedule = file
            .expand(date(2024, 1, 1), date(2024, 1, 31), date(2024, 1, 1))
            .unwrap();
        let dates: Vec<_> = schedule.occurrences.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 29)]
        );
        assert_eq!(
            schedule.occurrences[1].window.map(|w| w.to_string()),
            Some("13:00-14:00".to_string())
        );
    }

    #[test]
    fn test_biweekly_plan_file_ignores_today() {
        let text = r#"{"plan": {"pool_id": "p", "frequency": "biweekly", "dow": "mon", "starts_on": "2024-01-01"}}"#;
        let expand_on = |today| {
            let file: PlanFile = serde_json::from_str(text).unwrap();
            let schedule = file.expand(date(2024, 3, 1), date(2024, 3, 31), today).unwrap();
            schedule.occurrences.iter().map(|o| o.date).collect::<Vec<_>>()
        };
        let expected = vec![date(2024, 3, 11), date(2024, 3, 25)];
        assert_eq!(expand_on(date(2024, 1, 1)), expected);
        assert_eq!(expand_on(date(2024, 1, 8)), expected);
        assert_eq!(expand_on(date(2024, 3, 20)), expected);
    }

    #[test]
    fn test_biweekly_plan_file_with_cycle_anchor() {
        let text = r#"{"plan": {"pool_id": "p", "frequency": "biweekly", "dow": "mon", "cycle_anchor": "2024-01-08"}}"#;
        for today in [date(2024, 1, 1), date(2024, 1, 8)] {
            let file: PlanFile = serde_json::from_str(text).unwrap();
            let schedule = file.expand(date(2024, 3, 1), date(2024, 3, 31), today).unwrap();
            let dates: Vec<_> = schedule.occurrences.iter().map(|o| o.date).collect();
            assert_eq!(dates, vec![date(2024, 3, 4), date(2024, 3, 18)]);
        }
    }

    #[test]
    fn test_biweekly_plan_file_requires_parity() {
        let text = r#"{"plan": {"pool_id": "p", "frequency": "biweekly", "dow": "mon"}}"#;
        let file: PlanFile = serde_json::from_str(text).unwrap();
        match file.expand(date(2024, 3, 1), date(2024, 3, 31), date(2024, 1, 1)) {
            Err(PlanError::MissingAnchor { field }) => assert_eq!(field, "cycle_anchor"),
            other => panic!("expected MissingAnchor, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_file_rejects_unknown_keys() {
        let text = r#"{"plan": {"pool_id": "p", "frequency": "weekly", "dow": "mon"}, "notes": "x"}"#;
        assert!(serde_json::from_str::<PlanFile>(text).is_err());
    }

    #[test]
    fn test_plan_file_invalid_plan() {
        let text = r#"{"plan": {"pool_id": "p", "frequency": "twice_week", "dow": "mon"}}"#;
        let file: PlanFile = serde_json::from_str(text).unwrap();
        assert!(file
            .expand(date(2024, 1, 1), date(2024, 1, 31), date(2024, 1, 1))
            .is_err());
    }
}
