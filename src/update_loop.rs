//! Periodic driver: ticks the engine on an interval and hands snapshots to a display sink.
//!
//! The loop owns the [`ClockEngine`]. User actions arrive through an [`UpdateLoopHandle`] and
//! are applied between ticks, so a tick never observes a half-applied action.

use crate::config::ClockConfig;
use crate::display::{emit_best_effort, DisplaySink};
use crate::engine::ClockEngine;
use crate::timezone::TimezoneKey;
use crate::ClockError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// A user action that mutates the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    SetAlarm { hour: u32, minute: u32 },
    ClearAlarm,
    SetTimer { hours: u32, minutes: u32, seconds: u32 },
    StartTimer,
    StopTimer,
    /// Start/stop button semantics, see [`crate::TimerState::toggle`].
    ToggleTimer,
    ResetTimer,
    ToggleFormat,
    SetTimezone(TimezoneKey),
}

impl EngineCommand {
    /// Apply to an engine directly; validation errors leave the engine unchanged.
    pub fn apply(self, engine: &mut ClockEngine) -> Result<(), ClockError> {
        match self {
            EngineCommand::SetAlarm { hour, minute } => engine.set_alarm(hour, minute),
            EngineCommand::ClearAlarm => {
                engine.clear_alarm();
                Ok(())
            }
            EngineCommand::SetTimer { hours, minutes, seconds } => {
                engine.set_timer(hours, minutes, seconds)
            }
            EngineCommand::StartTimer => {
                engine.start_timer();
                Ok(())
            }
            EngineCommand::StopTimer => {
                engine.stop_timer();
                Ok(())
            }
            EngineCommand::ToggleTimer => {
                engine.toggle_timer();
                Ok(())
            }
            EngineCommand::ResetTimer => {
                engine.reset_timer();
                Ok(())
            }
            EngineCommand::ToggleFormat => {
                engine.toggle_format();
                Ok(())
            }
            EngineCommand::SetTimezone(key) => {
                engine.set_timezone(key);
                Ok(())
            }
        }
    }
}

type Inspector = Box<dyn FnOnce(&ClockEngine) + Send>;

enum Message {
    Command(EngineCommand, oneshot::Sender<Result<(), ClockError>>),
    Inspect(Inspector),
    Shutdown,
}

/// Owns the engine and the tick schedule.
pub struct UpdateLoop<S> {
    engine: ClockEngine,
    sink: S,
    config: ClockConfig,
    rx: mpsc::Receiver<Message>,
    ticks: u64,
}

impl<S> std::fmt::Debug for UpdateLoop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateLoop")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl<S> UpdateLoop<S>
where
    S: DisplaySink,
    S::Future: Send + 'static,
{
    /// Create the loop and the first handle. The loop ends once every handle is dropped or
    /// [`UpdateLoopHandle::shutdown`] is called.
    pub fn new(engine: ClockEngine, sink: S, config: ClockConfig) -> (Self, UpdateLoopHandle) {
        let (tx, rx) = mpsc::channel(config.command_buffer());
        (Self { engine, sink, config, rx, ticks: 0 }, UpdateLoopHandle { tx })
    }

    /// Tick until shut down, then return the engine.
    pub async fn run(mut self) -> ClockEngine {
        self.drive(None).await;
        self.engine
    }

    /// Run exactly `ticks` ticks (still serving commands), then return the engine.
    /// Dropped handles do not end the run early; an explicit shutdown does.
    pub async fn run_for(mut self, ticks: u64) -> ClockEngine {
        self.drive(Some(ticks)).await;
        self.engine
    }

    async fn drive(&mut self, max_ticks: Option<u64>) {
        let period = self.config.tick_interval();
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut commands_open = true;
        tracing::info!(interval_ms = period.as_millis() as u64, "update loop started");

        while !matches!(max_ticks, Some(max) if self.ticks >= max) {
            tokio::select! {
                _ = interval.tick() => self.tick_once().await,
                message = self.rx.recv(), if commands_open => match message {
                    Some(Message::Command(command, reply)) => {
                        let result = command.apply(&mut self.engine);
                        if let Err(e) = &result {
                            tracing::debug!(?command, error = %e, "command rejected");
                        }
                        let _ = reply.send(result);
                    }
                    Some(Message::Inspect(inspector)) => inspector(&self.engine),
                    Some(Message::Shutdown) => break,
                    None if max_ticks.is_none() => break,
                    None => commands_open = false,
                },
            }
        }

        tracing::info!(ticks = self.ticks, "update loop stopped");
    }

    async fn tick_once(&mut self) {
        let snapshot = self.engine.tick();
        self.ticks += 1;
        emit_best_effort(self.sink.clone(), snapshot).await;
    }
}

/// Cloneable handle for sending user actions to a running [`UpdateLoop`].
#[derive(Debug, Clone)]
pub struct UpdateLoopHandle {
    tx: mpsc::Sender<Message>,
}

impl UpdateLoopHandle {
    /// Send a command and wait for the loop to apply it.
    pub async fn send(&self, command: EngineCommand) -> Result<(), ClockError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Message::Command(command, reply))
            .await
            .map_err(|_| ClockError::LoopClosed)?;
        response.await.map_err(|_| ClockError::LoopClosed)?
    }

    /// Run `f` against the engine between ticks and return its result.
    pub async fn inspect<R, F>(&self, f: F) -> Result<R, ClockError>
    where
        R: Send + 'static,
        F: FnOnce(&ClockEngine) -> R + Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let inspector: Inspector = Box::new(move |engine| {
            let _ = reply.send(f(engine));
        });
        self.tx.send(Message::Inspect(inspector)).await.map_err(|_| ClockError::LoopClosed)?;
        response.await.map_err(|_| ClockError::LoopClosed)
    }

    /// Stop the loop after the command currently being processed.
    pub async fn shutdown(&self) -> Result<(), ClockError> {
        self.tx.send(Message::Shutdown).await.map_err(|_| ClockError::LoopClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub async fn set_alarm(&self, hour: u32, minute: u32) -> Result<(), ClockError> {
        self.send(EngineCommand::SetAlarm { hour, minute }).await
    }

    pub async fn clear_alarm(&self) -> Result<(), ClockError> {
        self.send(EngineCommand::ClearAlarm).await
    }

    pub async fn set_timer(&self, hours: u32, minutes: u32, seconds: u32) -> Result<(), ClockError> {
        self.send(EngineCommand::SetTimer { hours, minutes, seconds }).await
    }

    pub async fn start_timer(&self) -> Result<(), ClockError> {
        self.send(EngineCommand::StartTimer).await
    }

    pub async fn stop_timer(&self) -> Result<(), ClockError> {
        self.send(EngineCommand::StopTimer).await
    }

    pub async fn toggle_timer(&self) -> Result<(), ClockError> {
        self.send(EngineCommand::ToggleTimer).await
    }

    pub async fn reset_timer(&self) -> Result<(), ClockError> {
        self.send(EngineCommand::ResetTimer).await
    }

    pub async fn toggle_format(&self) -> Result<(), ClockError> {
        self.send(EngineCommand::ToggleFormat).await
    }

    pub async fn set_timezone(&self, key: TimezoneKey) -> Result<(), ClockError> {
        self.send(EngineCommand::SetTimezone(key)).await
    }
}
