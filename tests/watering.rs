use chrono::NaiveDate;
use nutrient_rs::watering::reminders::latest_record;
use nutrient_rs::watering::{
    ReadingStatus, Trend, history_stats, next_watering, phase_interval_recommendation,
    validate_reading,
};
use nutrient_rs::{GrowingSystem, Phase, WateringRecord};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn record(date: NaiveDate, ec: f64, ph: f64, drainage: f64, volume: f64) -> WateringRecord {
    WateringRecord {
        id: format!("w-{date}"),
        date,
        ec,
        ph,
        drainage,
        observations: String::new(),
        recipe_id: None,
        recipe_name: None,
        volume_liters: volume,
        phase: Phase::Vegetative,
        system: GrowingSystem::Coco,
        zone_id: None,
        zone_name: None,
    }
}

#[test]
fn reading_inside_window_is_valid() {
    let v = validate_reading(1.5, 5.8, Phase::Vegetative, GrowingSystem::Hydro);
    assert!(v.is_valid);
    assert_eq!(v.ec_status, ReadingStatus::Optimal);
    assert!(v.ec_message.is_none() && v.ph_message.is_none());
}

#[test]
fn reading_outside_window_reports_both_sides() {
    let v = validate_reading(2.5, 5.2, Phase::Vegetative, GrowingSystem::Hydro);
    assert!(!v.is_valid);
    assert_eq!(v.ec_status, ReadingStatus::High);
    assert_eq!(v.ph_status, ReadingStatus::Low);
    assert_eq!(
        v.ec_message.as_deref(),
        Some("High EC: 2.50 mS/cm (optimal: 1.2-1.8)")
    );
    assert_eq!(v.ph_message.as_deref(), Some("Low pH: 5.2 (optimal: 5.5-6)"));
}

#[test]
fn soil_readings_are_unknown_but_accepted() {
    let v = validate_reading(9.0, 9.0, Phase::Seedling, GrowingSystem::Soil);
    assert!(v.is_valid);
    assert_eq!(v.ec_status, ReadingStatus::Unknown);
    assert_eq!(v.ph_status, ReadingStatus::Unknown);
}

#[test]
fn first_watering_is_due_today() {
    let s = next_watering(None, 2, 20.0, day(10));
    assert_eq!(s.next_watering_date, day(10));
    assert_eq!(s.days_until_next, 0);
    assert!(s.should_notify);
}

#[test]
fn drainage_shifts_the_interval() {
    let on_target = record(day(10), 1.5, 5.8, 22.0, 4.0);
    assert_eq!(next_watering(Some(&on_target), 2, 20.0, day(10)).next_watering_date, day(12));

    let dry = record(day(10), 1.5, 5.8, 5.0, 4.0);
    assert_eq!(next_watering(Some(&dry), 2, 20.0, day(10)).next_watering_date, day(11));
    // Never shorter than one day.
    assert_eq!(next_watering(Some(&dry), 1, 20.0, day(10)).next_watering_date, day(11));

    let soaked = record(day(10), 1.5, 5.8, 35.0, 4.0);
    let s = next_watering(Some(&soaked), 2, 20.0, day(10));
    assert_eq!(s.next_watering_date, day(13));
    assert_eq!(s.days_until_next, 3);
    assert!(!s.should_notify);
}

#[test]
fn huge_interval_with_high_drainage_does_not_wrap() {
    let soaked = record(day(10), 1.5, 5.8, 90.0, 4.0);
    let s = next_watering(Some(&soaked), u32::MAX, 20.0, day(10));
    assert!(s.next_watering_date > day(10));
    assert!(s.days_until_next > 0);
    assert!(!s.should_notify);
}

#[test]
fn notify_tomorrow_and_when_overdue() {
    let last = record(day(10), 1.5, 5.8, 20.0, 4.0);
    let tomorrow = next_watering(Some(&last), 2, 20.0, day(11));
    assert_eq!(tomorrow.days_until_next, 1);
    assert!(tomorrow.should_notify);

    let overdue = next_watering(Some(&last), 2, 20.0, day(15));
    assert_eq!(overdue.days_until_next, -3);
    assert!(overdue.should_notify);
    assert!(overdue.message.contains("5 days ago"));
}

#[test]
fn flush_waters_less_often() {
    assert_eq!(phase_interval_recommendation(Phase::Flush), 3);
    assert_eq!(phase_interval_recommendation(Phase::FloweringT2), 2);
}

#[test]
fn latest_record_is_by_date_not_position() {
    let records = [record(day(12), 1.0, 6.0, 20.0, 4.0), record(day(3), 1.0, 6.0, 20.0, 4.0)];
    assert_eq!(latest_record(&records).map(|r| r.date), Some(day(12)));
    assert!(latest_record(&[]).is_none());
}

#[test]
fn stats_average_and_trend() {
    // Stored out of order on purpose.
    let records = vec![
        record(day(9), 1.8, 6.0, 20.0, 5.0),
        record(day(1), 1.0, 6.0, 30.0, 5.0),
        record(day(3), 1.2, 6.0, 28.0, 5.0),
        record(day(5), 1.4, 6.0, 25.0, 5.0),
        record(day(7), 1.6, 6.0, 22.0, 5.0),
    ];
    let stats = history_stats(&records).unwrap();
    assert_eq!(stats.count, 5);
    assert!((stats.avg_ec - 1.4).abs() < 1e-12);
    assert_eq!(stats.avg_volume, 5.0);
    assert_eq!(stats.ec_trend, Trend::Up);
    assert_eq!(stats.ph_trend, Trend::Stable);
    assert_eq!(stats.drainage_trend, Trend::Down);
    assert_eq!(stats.volume_trend, Trend::Stable);
}

#[test]
fn stats_of_nothing_is_none() {
    assert!(history_stats(&[]).is_none());
}
