//! Live terminal clock.
//!
//! Usage: `cargo run --example console_clock -- [timezone label] [alarm HH MM] [timer HH MM SS]`
//! e.g. `cargo run --example console_clock -- "JST (Tokyo)" 07 30 00 00 10`
//!
//! Runs until Ctrl-C; rings the terminal bell when the alarm or timer fires.
use deskclock::display::{ConsoleSink, LogSink, MulticastSink};
use deskclock::{parse_alarm_input, parse_timer_input, ClockConfig, ClockEngine, TimezoneKey, UpdateLoop};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let timezone = match args.first() {
        Some(label) => label.parse::<TimezoneKey>()?,
        None => TimezoneKey::Local,
    };

    let config = ClockConfig::builder().initial_timezone(timezone).build()?;
    let mut engine = ClockEngine::with_config(&config);

    if let [_, hour, minute, ..] = args.as_slice() {
        let (hour, minute) = parse_alarm_input(hour, minute)?;
        engine.set_alarm(hour, minute)?;
    }
    if let [_, _, _, hours, minutes, seconds, ..] = args.as_slice() {
        let (hours, minutes, seconds) = parse_timer_input(hours, minutes, seconds)?;
        engine.set_timer(hours, minutes, seconds)?;
        engine.start_timer();
    }

    let sink = MulticastSink::new(ConsoleSink::stdout(), LogSink);
    let (update_loop, handle) = UpdateLoop::new(engine, sink, config);
    let running = tokio::spawn(update_loop.run());

    tokio::signal::ctrl_c().await?;
    handle.shutdown().await?;
    let engine = running.await?;
    println!("{} | timer {}", engine.alarm().status_label(), engine.timer().status_label());
    Ok(())
}
