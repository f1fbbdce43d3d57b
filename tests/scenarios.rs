//! End-to-end scenarios over the seed roster and schedule.

use chrono::NaiveDate;
use crq_schedule::config::EngineConfig;
use crq_schedule::models::{
    Assignment, Engineer, EngineerLevel, HourWindow, RequestorType, Schedule, ScheduleStore,
    ShiftWindow, SlaStatus, TaskDetails, TaskType, Team,
};
use crq_schedule::scheduler::kpi::{
    count_by_sla_status, crq_count_by_team, free_engineers, hours_by_domain, workload_by_level,
    workload_by_requestor,
};
use crq_schedule::scheduler::{
    ConflictResolver, DashboardStats, Draft, DraftState, Resolution, Suggestion, Workload,
};
use crq_schedule::validation::{validate_input, Candidate, ConflictKind};
use crq_schedule::SchedulingError;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 16).unwrap()
}

fn w(start: u8, end: u8) -> HourWindow {
    HourWindow::new(start, end).unwrap()
}

fn roster() -> Vec<Engineer> {
    serde_json::from_str(include_str!("data/roster.json")).unwrap()
}

fn schedule() -> Schedule {
    Schedule::from_json_str(include_str!("data/schedule.json")).unwrap()
}

#[test]
fn seed_data_is_consistent() {
    let schedule = schedule();
    assert_eq!(schedule.len(), 14);
    assert!(validate_input(&roster(), &schedule.assignments).is_ok());
}

#[test]
fn overlap_suggests_nearest_free_slot() {
    let roster = roster();
    let day = schedule().on_date(date());
    let candidate = Candidate::new("e1", w(11, 13));

    let r = ConflictResolver::default()
        .resolve(&candidate, &roster, &day, None)
        .unwrap();

    let conflict = r.conflict().unwrap();
    assert_eq!(conflict.kind, ConflictKind::SlotConflict);
    assert_eq!(conflict.entity_id, "s1");
    assert_eq!(
        conflict.message,
        "Conflict: Rajesh Kumar already has CRQ-2025-001 at 10:00–12:00"
    );
    assert_eq!(
        r.remedy(),
        Some(&Suggestion::FreeSlot {
            engineer_id: "e1".into(),
            window: w(12, 14)
        })
    );
}

#[test]
fn fully_booked_falls_back_to_alternate_engineer() {
    let roster = roster();
    let mut day = schedule().on_date(date());
    day.retain(|a| a.engineer_id != "e3");
    for (i, (s, e)) in [(9, 11), (11, 13), (13, 15), (15, 17), (17, 18)].iter().enumerate() {
        day.push(Assignment::new(
            format!("b{i}"),
            format!("CRQ-B{i}"),
            "e3",
            date(),
            w(*s, *e),
            TaskType::MopCreation,
        ));
    }
    let candidate = Candidate::new("e3", w(10, 12));

    let r = ConflictResolver::default()
        .resolve(&candidate, &roster, &day, None)
        .unwrap();
    // e1 and e2 (L4) are busy at 10–12; e4 is the first free L3 in pool order.
    assert_eq!(r.remedy_text().unwrap(), "Alternate engineer: Sneha Reddy (L3)");
    if let Some(Suggestion::AlternateEngineer { level, .. }) = r.remedy() {
        assert!(level.at_least(EngineerLevel::L3));
    } else {
        panic!("expected an alternate engineer");
    }

    // Requiring the alternate to be on shift leaves nobody: e4 works nights
    // and e5 is busy.
    let strict = ConflictResolver::new(EngineConfig::default().with_alternate_within_shift(true));
    let r = strict.resolve(&candidate, &roster, &day, None).unwrap();
    assert_eq!(r.remedy_text().unwrap(), "No alternatives available");
    assert!(matches!(
        r.into_result(&candidate),
        Err(SchedulingError::NoAlternativeFound { .. })
    ));
}

#[test]
fn early_start_is_a_shift_violation() {
    let roster = roster();
    let day = schedule().on_date(date());
    let candidate = Candidate::new("e1", w(7, 9));

    let r = ConflictResolver::default()
        .resolve(&candidate, &roster, &day, None)
        .unwrap();
    match r {
        Resolution::Invalid { conflict, remedy } => {
            assert_eq!(conflict.kind, ConflictKind::ShiftViolation);
            assert_eq!(
                conflict.message,
                "Shift violation: Rajesh Kumar's shift is 9:00–18:00"
            );
            assert_eq!(
                remedy,
                Some(Suggestion::WithinShift {
                    engineer_id: "e1".into(),
                    shift: ShiftWindow::new(9, 18)
                })
            );
        }
        Resolution::Valid => panic!("7:00 start must be rejected"),
    }
}

#[test]
fn night_shift_engineer_can_be_scheduled() {
    let roster = roster();
    let day = schedule().on_date(date());
    let resolver = ConflictResolver::default();

    assert!(resolver
        .resolve(&Candidate::new("e4", w(22, 24)), &roster, &day, None)
        .unwrap()
        .is_valid());
    assert!(resolver
        .resolve(&Candidate::new("e4", w(2, 4)), &roster, &day, None)
        .unwrap()
        .is_valid());
    assert!(!resolver
        .resolve(&Candidate::new("e4", w(12, 14)), &roster, &day, None)
        .unwrap()
        .is_valid());
}

#[test]
fn dialog_and_drag_share_one_path() {
    let roster = roster();
    let resolver = ConflictResolver::default();
    let mut store = schedule();

    // Creation dialog.
    let mut create = Draft::create(
        date(),
        TaskDetails::new("CRQ-2025-099", TaskType::MopValidation),
    );
    create.set_engineer("e3").unwrap();
    create.set_hours(10, 12).unwrap();
    assert!(!create.validate(&resolver, &roster, &store).unwrap().is_valid());
    create.set_hours(11, 13).unwrap();
    assert!(create.validate(&resolver, &roster, &store).unwrap().is_valid());
    let new_id = create.commit(&roster, &mut store).unwrap();
    assert_eq!(store.len(), 15);

    // Drag the new block onto e5, where it collides with s7.
    let placed = store.get(&new_id).unwrap().clone();
    let mut drag = Draft::reschedule(&placed);
    drag.set_engineer("e5").unwrap();
    let r = drag.validate(&resolver, &roster, &store).unwrap().clone();
    assert_eq!(r.conflict().unwrap().entity_id, "s7");
    assert_eq!(drag.state(), DraftState::Invalid);
    assert!(drag.commit(&roster, &mut store).is_err());

    // Drop it at e5's suggested free slot instead.
    let target = r
        .remedy()
        .and_then(|s| s.apply(&Candidate::new("e5", placed.window)))
        .unwrap();
    drag.set_window(target.window).unwrap();
    assert!(drag.validate(&resolver, &roster, &store).unwrap().is_valid());
    assert_eq!(drag.commit(&roster, &mut store).unwrap(), new_id);

    let moved = store.get(&new_id).unwrap();
    assert_eq!(moved.engineer_id, "e5");
    assert_eq!(moved.window, w(9, 11));
    assert_eq!(store.len(), 15);
    assert!(validate_input(&roster, &store.assignments).is_ok());
}

#[test]
fn dashboard_over_seed_day() {
    let roster = roster();
    let day = schedule().on_date(date());

    let stats = DashboardStats::calculate(&roster, &day);
    assert_eq!(stats.total_crqs, 14);
    assert_eq!(stats.total_hours, 26);
    assert_eq!(stats.active_engineers, 9);
    assert_eq!(stats.roster_size, 10);
    assert_eq!(stats.sla_at_risk, 3);

    let thresholds = EngineConfig::default().utilization;
    let free = free_engineers(&roster, &day, &thresholds);
    assert_eq!(free.len(), 10);
    assert_eq!(free[0].0.level, EngineerLevel::L4);
    assert_eq!(free.last().map(|(e, _)| e.level), Some(EngineerLevel::L1));

    let by_requestor = workload_by_requestor(&day);
    assert_eq!(
        by_requestor,
        vec![
            (RequestorType::Deployment, Workload { crq_count: 5, hours: 10 }),
            (RequestorType::Noc, Workload { crq_count: 5, hours: 8 }),
            (RequestorType::Circle, Workload { crq_count: 4, hours: 8 }),
        ]
    );

    let by_level = workload_by_level(&roster, &day);
    let summary: Vec<(EngineerLevel, usize, usize, u32)> = by_level
        .iter()
        .map(|g| (g.level, g.engineer_ids.len(), g.workload.crq_count, g.workload.hours))
        .collect();
    assert_eq!(
        summary,
        vec![
            (EngineerLevel::L4, 2, 4, 8),
            (EngineerLevel::L3, 3, 4, 7),
            (EngineerLevel::L2, 3, 4, 7),
            (EngineerLevel::L1, 2, 2, 4),
        ]
    );

    let domain_hours = hours_by_domain(&day);
    let domains: Vec<(&str, u32)> = domain_hours.iter().map(|(d, h)| (d.as_str(), *h)).collect();
    assert_eq!(domains[0], ("IP Access", 9));
    assert_eq!(domains[1], ("IP Core", 8));
    assert_eq!(domains[2], ("Network Expansion", 5));
    assert_eq!(domains.len(), 5);

    assert_eq!(crq_count_by_team(&day), vec![(Team::Ccb, 8), (Team::Se, 6)]);
    assert_eq!(
        count_by_sla_status(&day),
        vec![
            (SlaStatus::OnTrack, 11),
            (SlaStatus::AtRisk, 2),
            (SlaStatus::Breached, 1)
        ]
    );
}

#[test]
fn roster_with_out_of_range_shift_does_not_load() {
    let json = r#"[{ "id": "e11", "name": "Bad Shift", "level": "L2", "domain": "Packet",
        "subdomain": "Packet Change", "shiftStart": 30, "shiftEnd": 6 }]"#;
    assert!(serde_json::from_str::<Vec<Engineer>>(json).is_err());
}

#[test]
fn racing_drafts_cannot_double_book() {
    let roster = roster();
    let resolver = ConflictResolver::default();
    let mut store = schedule();

    let mut drafts: Vec<Draft> = ["CRQ-2025-100", "CRQ-2025-101"]
        .into_iter()
        .map(|crq| {
            let mut d = Draft::create(date(), TaskDetails::new(crq, TaskType::Rollback));
            d.set_engineer("e9").unwrap();
            d.set_hours(14, 16).unwrap();
            d
        })
        .collect();
    for d in &mut drafts {
        assert!(d.validate(&resolver, &roster, &store).unwrap().is_valid());
    }

    assert!(drafts[0].commit(&roster, &mut store).is_ok());
    assert!(matches!(
        drafts[1].commit(&roster, &mut store),
        Err(SchedulingError::SlotConflict(_))
    ));
    assert_eq!(drafts[1].state(), DraftState::Invalid);
    assert_eq!(store.len(), 15);
    assert!(validate_input(&roster, &store.assignments).is_ok());
}
