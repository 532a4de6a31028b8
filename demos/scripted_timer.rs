//! Simulated run: a manual clock, a fast tick interval, and user actions sent mid-run.
use chrono::{TimeZone, Utc};
use deskclock::display::MemorySink;
use deskclock::{ClockConfig, ClockEngine, ManualClock, TimezoneKey, UpdateLoop};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 10, 14, 6, 59, 57).unwrap());
    let config = ClockConfig::builder()
        .tick_interval(Duration::from_millis(50))
        .initial_timezone(TimezoneKey::Utc)
        .build()?;
    let engine = ClockEngine::with_config(&config).with_clock(clock.clone());

    let sink = MemorySink::new();
    let (update_loop, handle) = UpdateLoop::new(engine, sink.clone(), config);
    let running = tokio::spawn(update_loop.run());

    handle.set_alarm(7, 0).await?;
    handle.set_timer(0, 0, 5).await?;
    handle.start_timer().await?;

    for _ in 0..8 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        clock.advance_secs(1);
    }

    handle.shutdown().await?;
    running.await?;

    for snapshot in sink.snapshots() {
        let bell = if snapshot.should_alert { " <- alert" } else { "" };
        println!("{}{}", snapshot, bell);
    }
    println!("alerts: {}", sink.alerts());
    Ok(())
}
