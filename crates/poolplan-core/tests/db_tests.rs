use jiff::{civil::date, Timestamp};
use poolplan_core::{
    params::CreatePlan, Database, DayOfMonth, Frequency, PausePeriod, PlanDraft, PlanError,
    TimeWindow, WindowOverride,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn draft(frequency: &str) -> PlanDraft {
    let request = match frequency {
        "twice_month" => CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: frequency.to_string(),
            dom: Some(1),
            second_dom: Some(-1),
            ..CreatePlan::default()
        },
        _ => CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: frequency.to_string(),
            dow: Some("wed".to_string()),
            window_start: Some("07:30".to_string()),
            window_end: Some("09:00".to_string()),
            starts_on: Some("2024-03-01".to_string()),
            ends_on: Some("2024-12-31".to_string()),
            price_cents: 12000,
            currency: "EUR".to_string(),
            tax_pct: 21.0,
            discount_pct: 5.0,
            billing_type: Some("quarterly".to_string()),
            ..CreatePlan::default()
        },
    };
    request
        .validate(date(2024, 2, 1))
        .expect("Failed to validate plan")
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert!(db.list_plans(None).expect("Failed to list plans").is_empty());
}

#[test]
fn test_insert_and_get_plan_round_trips_every_field() {
    let (_temp_file, mut db) = create_test_db();

    let created = db.insert_plan(&draft("biweekly")).expect("Failed to insert plan");
    assert!(created.id > 0);
    assert_eq!(created.cycle_anchor, Some(date(2024, 3, 6)));

    let loaded = db
        .get_plan(created.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(loaded, created);
}

#[test]
fn test_month_anchors_round_trip() {
    let (_temp_file, mut db) = create_test_db();

    let created = db.insert_plan(&draft("twice_month")).expect("Failed to insert plan");
    let loaded = db.get_plan(created.id).unwrap().unwrap();
    assert_eq!(loaded.frequency, Frequency::TwiceMonth);
    assert_eq!(loaded.dom, DayOfMonth::new(1).ok());
    assert_eq!(loaded.second_dom, Some(DayOfMonth::LAST));
    assert_eq!(loaded.window, None);
    assert_eq!(loaded.dow, None);
}

#[test]
fn test_get_missing_plan() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_plan(12).expect("Failed to query").is_none());
    assert!(!db.plan_exists(12).expect("Failed to query"));
}

#[test]
fn test_update_plan() {
    let (_temp_file, mut db) = create_test_db();
    let mut plan = db.insert_plan(&draft("weekly")).unwrap();

    plan.window = Some(TimeWindow::parse("10:00", "12:00").unwrap());
    plan.ends_on = None;
    plan.updated_at = Timestamp::from_second(1_800_000_000).unwrap();
    db.update_plan(&plan).expect("Failed to update plan");

    let loaded = db.get_plan(plan.id).unwrap().unwrap();
    assert_eq!(loaded.window, plan.window);
    assert_eq!(loaded.ends_on, None);
    assert_eq!(loaded.updated_at, plan.updated_at);
    assert_eq!(loaded.created_at, plan.created_at);

    plan.id = 999;
    assert!(matches!(
        db.update_plan(&plan),
        Err(PlanError::PlanNotFound { id: 999 })
    ));
}

#[test]
fn test_overrides_upsert_list_and_remove() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.insert_plan(&draft("weekly")).unwrap();

    let first = WindowOverride {
        date: date(2024, 3, 13),
        window: TimeWindow::parse("13:00", "14:00").unwrap(),
        reason: Some("Gate locked".to_string()),
    };
    let second = WindowOverride {
        date: date(2024, 3, 6),
        window: TimeWindow::parse("15:00", "16:00").unwrap(),
        reason: None,
    };
    assert!(!db.upsert_override(plan.id, &first).unwrap());
    assert!(!db.upsert_override(plan.id, &second).unwrap());

    let replacement = WindowOverride {
        window: TimeWindow::parse("08:00", "09:00").unwrap(),
        ..first.clone()
    };
    assert!(db.upsert_override(plan.id, &replacement).unwrap());

    let all = db.list_overrides(plan.id, None).unwrap();
    assert_eq!(all, vec![second.clone(), replacement]);

    let ranged = db
        .list_overrides(plan.id, Some((date(2024, 3, 1), date(2024, 3, 10))))
        .unwrap();
    assert_eq!(ranged, vec![second]);

    assert!(db.remove_override(plan.id, date(2024, 3, 6)).unwrap());
    assert!(!db.remove_override(plan.id, date(2024, 3, 6)).unwrap());
    assert_eq!(db.list_overrides(plan.id, None).unwrap().len(), 1);
}

#[test]
fn test_pause_set_get_clear() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.insert_plan(&draft("weekly")).unwrap();
    assert!(db.get_pause(plan.id).unwrap().is_none());

    let pause = PausePeriod {
        starts_on: date(2024, 6, 1),
        until: Some(date(2024, 6, 30)),
        reason: Some("Resurfacing".to_string()),
    };
    db.set_pause(plan.id, &pause).unwrap();
    assert_eq!(db.get_pause(plan.id).unwrap(), Some(pause));

    let indefinite = PausePeriod {
        starts_on: date(2024, 7, 1),
        until: None,
        reason: None,
    };
    db.set_pause(plan.id, &indefinite).unwrap();
    assert_eq!(db.get_pause(plan.id).unwrap(), Some(indefinite));

    assert!(db.clear_pause(plan.id).unwrap());
    assert!(!db.clear_pause(plan.id).unwrap());
}

#[test]
fn test_delete_plan_cascades() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.insert_plan(&draft("weekly")).unwrap();
    db.upsert_override(
        plan.id,
        &WindowOverride {
            date: date(2024, 3, 13),
            window: TimeWindow::parse("13:00", "14:00").unwrap(),
            reason: None,
        },
    )
    .unwrap();
    db.set_pause(
        plan.id,
        &PausePeriod {
            starts_on: date(2024, 4, 1),
            until: None,
            reason: None,
        },
    )
    .unwrap();

    assert!(db.delete_plan(plan.id).unwrap());
    assert!(db.get_plan(plan.id).unwrap().is_none());
    assert!(db.list_overrides(plan.id, None).unwrap().is_empty());
    assert!(db.get_pause(plan.id).unwrap().is_none());
    assert!(!db.delete_plan(plan.id).unwrap());
}

#[test]
fn test_list_plans_filters_by_pool() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plan(&draft("weekly")).unwrap();
    let mut other = draft("weekly");
    other.pool_id = "pool-2".to_string();
    db.insert_plan(&other).unwrap();

    assert_eq!(db.list_plans(None).unwrap().len(), 2);
    let filtered = db.list_plans(Some("pool-2")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].pool_id, "pool-2");
}

#[test]
fn test_reopening_applies_schema_idempotently() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    {
        let mut db = Database::new(temp_file.path()).unwrap();
        db.insert_plan(&draft("weekly")).unwrap();
    }
    let db = Database::new(temp_file.path()).unwrap();
    assert_eq!(db.list_plans(None).unwrap().len(), 1);
}

#[test]
fn test_in_memory_database() {
    let mut db = Database::in_memory().unwrap();
    let plan = db.insert_plan(&draft("weekly")).unwrap();
    assert!(db.plan_exists(plan.id).unwrap());
}
