use chrono::{TimeZone, Utc};
use deskclock::{AlarmState, ClockEngine, ClockError, HourFormat, ManualClock, TimerState, TimezoneKey};

fn engine_at(h: u32, m: u32, s: u32) -> (ClockEngine, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 10, 14, h, m, s).unwrap());
    let mut engine = ClockEngine::new().with_clock(clock.clone());
    engine.set_timezone(TimezoneKey::Utc);
    (engine, clock)
}

#[test]
fn timer_string_echoes_every_valid_field_value() {
    let mut timer = TimerState::new();
    for h in [0, 1, 9, 10, 42, 99] {
        for m in 0..=59 {
            for s in [0, 1, 30, 59] {
                timer.set(h, m, s).unwrap();
                assert_eq!(timer.timer_string(), format!("{:02}:{:02}:{:02}", h, m, s));
            }
        }
    }
}

#[test]
fn alarm_round_trip_at_13_45() {
    let (mut engine, clock) = engine_at(13, 44, 0);
    engine.set_alarm(13, 45).unwrap();
    assert_eq!(engine.alarm().status_label(), "ALARM SET: 13:45");

    // A full minute of ticks before the alarm minute never fires.
    for _ in 0..60 {
        assert!(!engine.tick().alarm_just_triggered);
        clock.advance_secs(1);
    }

    let fired = engine.tick();
    assert_eq!(fired.time, "13:45:00");
    assert_eq!(fired.alarm_status, "ALARM TRIGGERED!");
    assert!(fired.should_alert);

    // The rest of the matching minute stays quiet.
    for _ in 0..59 {
        clock.advance_secs(1);
        let snapshot = engine.tick();
        assert!(!snapshot.should_alert);
        assert_eq!(snapshot.alarm_status, "ALARM TRIGGERED!");
    }
}

#[test]
fn one_second_timer_boundary() {
    let (mut engine, _clock) = engine_at(0, 0, 0);
    engine.set_timer(0, 0, 1).unwrap();
    engine.start_timer();

    let first = engine.tick();
    assert_eq!(engine.timer().remaining_seconds(), 0);
    assert_eq!(first.timer_status, "TIMER FINISHED!");
    assert!(first.timer_just_finished);

    let second = engine.tick();
    assert!(!second.timer_just_finished);
    assert_eq!(second.timer_status, "TIMER FINISHED!");
}

#[test]
fn invalid_alarm_keeps_previous_arm() {
    let mut alarm = AlarmState::new();
    alarm.set_alarm(6, 15).unwrap();
    assert_eq!(alarm.set_alarm(24, 0), Err(ClockError::InvalidTime { hour: 24, minute: 0 }));
    assert!(alarm.is_armed());
    assert_eq!(alarm.status_label(), "ALARM SET: 06:15");
}

#[test]
fn format_toggle_is_a_pure_flip() {
    let (mut engine, _clock) = engine_at(0, 0, 0);
    let original = engine.format();
    engine.toggle_format();
    assert_ne!(engine.format(), original);
    engine.toggle_format();
    assert_eq!(engine.format(), original);
    assert_eq!(original, HourFormat::TwentyFour);
}

#[test]
fn start_with_zero_remaining_never_runs() {
    let mut timer = TimerState::new();
    timer.start();
    assert_eq!(timer.status_label(), "OFF");

    timer.set(0, 0, 1).unwrap();
    timer.start();
    timer.tick();
    timer.start();
    assert_eq!(timer.status_label(), "TIMER FINISHED!");
    assert!(!timer.is_running());
}

#[test]
fn stop_twice_changes_nothing() {
    let mut timer = TimerState::new();
    timer.set(0, 0, 30).unwrap();
    timer.stop();
    let once = timer.clone();
    timer.stop();
    assert_eq!(timer, once);
}

#[test]
fn edge_flags_never_persist_across_ticks() {
    let (mut engine, clock) = engine_at(7, 59, 58);
    engine.set_alarm(8, 0).unwrap();
    engine.set_timer(0, 0, 3).unwrap();
    engine.start_timer();

    let mut alerts = Vec::new();
    for _ in 0..6 {
        alerts.push(engine.tick().should_alert);
        clock.advance_secs(1);
    }
    // tick 0: 07:59:58, timer 2 | tick 1: 07:59:59, timer 1
    // tick 2: 08:00:00, timer 0 (both edges) | ticks 3-5: nothing new
    assert_eq!(alerts, vec![false, false, true, false, false, false]);
}
