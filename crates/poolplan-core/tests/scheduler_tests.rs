mod common;

use common::create_test_scheduler;
use jiff::civil::date;
use poolplan_core::{
    params::{AddOverride, CreatePlan, Id, PausePlan, Schedule},
    PlanError,
};

fn range(plan_id: u64, from: &str, to: &str) -> Schedule {
    Schedule {
        plan_id,
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[tokio::test]
async fn test_month_end_plan_through_leap_february() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: "monthly".to_string(),
            dom: Some(-1),
            starts_on: Some("2024-01-01".to_string()),
            ..CreatePlan::default()
        })
        .await
        .expect("Failed to create plan");

    let schedule = scheduler
        .schedule(&range(plan.id, "2024-01-01", "2024-03-31"))
        .await
        .expect("Failed to schedule");
    let dates: Vec<_> = schedule.occurrences.iter().map(|o| o.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)]);
}

#[tokio::test]
async fn test_twice_week_plan() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: "twice_week".to_string(),
            dow: Some("tue".to_string()),
            second_dow: Some("fri".to_string()),
            ..CreatePlan::default()
        })
        .await
        .expect("Failed to create plan");

    let schedule = scheduler
        .schedule(&range(plan.id, "2024-01-01", "2024-01-14"))
        .await
        .unwrap();
    let dates: Vec<_> = schedule.occurrences.iter().map(|o| o.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 2), date(2024, 1, 5), date(2024, 1, 9), date(2024, 1, 12)]
    );
}

#[tokio::test]
async fn test_inverted_range_is_empty() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: "weekly".to_string(),
            dow: Some("mon".to_string()),
            ..CreatePlan::default()
        })
        .await
        .unwrap();

    let schedule = scheduler
        .schedule(&range(plan.id, "2024-02-01", "2024-01-01"))
        .await
        .expect("Inverted range should not fail");
    assert!(schedule.occurrences.is_empty());
}

#[tokio::test]
async fn test_bad_dates_are_rejected() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let result = scheduler.schedule(&range(1, "yesterday", "2024-01-01")).await;
    match result {
        Err(PlanError::InvalidDate { field, .. }) => assert_eq!(field, "from"),
        other => panic!("unexpected result: {other:?}"),
    }

    let result = scheduler
        .add_override(&AddOverride {
            plan_id: 1,
            date: "2024-01-08".to_string(),
            window_start: "14:00".to_string(),
            window_end: "13:00".to_string(),
            reason: None,
        })
        .await;
    assert!(matches!(result, Err(PlanError::InvalidWindow { .. })));
}

#[tokio::test]
async fn test_pause_then_next_visit_after_pause() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: "monthly".to_string(),
            dom: Some(1),
            starts_on: Some("2024-01-01".to_string()),
            ..CreatePlan::default()
        })
        .await
        .unwrap();
    scheduler
        .pause_plan(&PausePlan {
            plan_id: plan.id,
            starts_on: Some("2024-01-01".to_string()),
            until: Some("2024-03-15".to_string()),
            reason: None,
        })
        .await
        .unwrap();

    let next = scheduler
        .next_visit_from(&Id { id: plan.id }, date(2024, 1, 1))
        .await
        .unwrap()
        .expect("plan resumes after the pause");
    assert_eq!(next.date, date(2024, 4, 1));
}

#[tokio::test]
async fn test_concurrent_schedule_calls() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let plan = scheduler
        .create_plan(&CreatePlan {
            pool_id: "pool-1".to_string(),
            frequency: "weekly".to_string(),
            dow: Some("mon".to_string()),
            starts_on: Some("2024-01-01".to_string()),
            ..CreatePlan::default()
        })
        .await
        .unwrap();

    let plan_id = plan.id;
    let mut handles = Vec::new();
    for _ in 0..8 {
        let scheduler = scheduler.clone();
        handles.push(tokio::spawn(async move {
            scheduler
                .schedule(&range(plan_id, "2024-01-01", "2024-01-31"))
                .await
                .map(|s| s.occurrences.len())
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 5);
    }
}
