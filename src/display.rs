//! Display collaborators.
//!
//! The display layer consumes one [`DisplaySnapshot`] per tick. It is modelled as a
//! `tower::Service<DisplaySnapshot>` so sinks compose with standard tower combinators and the
//! update loop can drive any renderer the same way.
//!
//! ```rust
//! use deskclock::display::{emit_best_effort, MemorySink};
//! use deskclock::ClockEngine;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let sink = MemorySink::new();
//! let mut engine = ClockEngine::new();
//! emit_best_effort(sink.clone(), engine.tick()).await;
//! assert_eq!(sink.len(), 1);
//! # }
//! ```

use crate::snapshot::DisplaySnapshot;
use std::convert::Infallible;
use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tower::Service;

type SinkFuture<E> = Pin<Box<dyn Future<Output = Result<(), E>> + Send>>;

/// A display sink that consumes snapshots.
pub trait DisplaySink:
    tower::Service<DisplaySnapshot, Response = (), Error = Self::SinkError> + Clone + Send + 'static
{
    /// The error type for this sink.
    type SinkError: std::error::Error + Send + 'static;
}

/// Best-effort emit helper that honors `poll_ready` and swallows errors.
///
/// A failing renderer must not stop the clock: if the sink is not ready or returns an error the
/// snapshot is dropped and the next tick tries again.
pub async fn emit_best_effort<S>(sink: S, snapshot: DisplaySnapshot)
where
    S: tower::Service<DisplaySnapshot, Response = ()> + Send + Clone + 'static,
    S::Error: std::error::Error + Send + 'static,
    S::Future: Send + 'static,
{
    use tower::ServiceExt;

    match sink.ready_oneshot().await {
        Ok(mut ready_sink) => {
            if let Err(e) = ready_sink.call(snapshot).await {
                tracing::warn!(error = %e, "display sink failed, snapshot dropped");
            }
        }
        Err(e) => tracing::warn!(error = %e, "display sink not ready, snapshot dropped"),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A no-op sink that discards all snapshots.
#[derive(Clone, Debug, Default)]
pub struct NullSink;

impl Service<DisplaySnapshot> for NullSink {
    type Response = ();
    type Error = Infallible;
    type Future = SinkFuture<Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _snapshot: DisplaySnapshot) -> Self::Future {
        Box::pin(async { Ok(()) })
    }
}

impl DisplaySink for NullSink {
    type SinkError = Infallible;
}

/// A sink that logs snapshots using the `tracing` crate.
#[derive(Clone, Debug, Default)]
pub struct LogSink;

impl Service<DisplaySnapshot> for LogSink {
    type Response = ();
    type Error = Infallible;
    type Future = SinkFuture<Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, snapshot: DisplaySnapshot) -> Self::Future {
        if snapshot.should_alert {
            tracing::warn!(
                alarm = snapshot.alarm_just_triggered,
                timer = snapshot.timer_just_finished,
                "alert"
            );
        }
        tracing::info!(display = %snapshot, "display_snapshot");
        Box::pin(async { Ok(()) })
    }
}

impl DisplaySink for LogSink {
    type SinkError = Infallible;
}

/// A sink that stores snapshots in memory.
#[derive(Clone, Debug)]
pub struct MemorySink {
    snapshots: Arc<Mutex<Vec<DisplaySnapshot>>>,
    capacity: usize,
    evicted: Arc<AtomicU64>,
    alerts: Arc<AtomicU64>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(Vec::new())),
            capacity: capacity.max(1),
            evicted: Arc::new(AtomicU64::new(0)),
            alerts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn snapshots(&self) -> Vec<DisplaySnapshot> {
        lock(&self.snapshots).clone()
    }

    pub fn last(&self) -> Option<DisplaySnapshot> {
        lock(&self.snapshots).last().cloned()
    }

    pub fn clear(&self) {
        lock(&self.snapshots).clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.snapshots).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.snapshots).is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    /// Number of snapshots received with `should_alert` set, including evicted ones.
    pub fn alerts(&self) -> u64 {
        self.alerts.load(Ordering::Relaxed)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<DisplaySnapshot> for MemorySink {
    type Response = ();
    type Error = Infallible;
    type Future = SinkFuture<Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, snapshot: DisplaySnapshot) -> Self::Future {
        if snapshot.should_alert {
            self.alerts.fetch_add(1, Ordering::Relaxed);
        }
        let mut guard = lock(&self.snapshots);
        if guard.len() >= self.capacity {
            guard.remove(0);
            self.evicted.fetch_add(1, Ordering::Relaxed);
        }
        guard.push(snapshot);
        Box::pin(async { Ok(()) })
    }
}

impl DisplaySink for MemorySink {
    type SinkError = Infallible;
}

/// Terminal renderer: one line per tick, ringing the bell (`BEL`) on each alert edge.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: Arc<Mutex<W>>,
}

impl<W> Clone for ConsoleSink<W> {
    fn clone(&self) -> Self {
        Self { out: self.out.clone() }
    }
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { out: Arc::new(Mutex::new(writer)) }
    }

    /// Borrow the underlying writer, e.g. to inspect a buffer in tests.
    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&lock(&self.out))
    }

    fn render(&self, snapshot: &DisplaySnapshot) -> io::Result<()> {
        let mut out = lock(&self.out);
        if snapshot.should_alert {
            out.write_all(b"\x07")?;
        }
        writeln!(out, "{}", snapshot)?;
        out.flush()
    }
}

impl<W: Write + Send + 'static> Service<DisplaySnapshot> for ConsoleSink<W> {
    type Response = ();
    type Error = io::Error;
    type Future = SinkFuture<Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, snapshot: DisplaySnapshot) -> Self::Future {
        let result = self.render(&snapshot);
        Box::pin(async move { result })
    }
}

impl<W: Write + Send + 'static> DisplaySink for ConsoleSink<W> {
    type SinkError = io::Error;
}

/// Writes each snapshot as one JSON object per line.
#[cfg(feature = "json")]
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    out: Arc<Mutex<W>>,
}

#[cfg(feature = "json")]
impl<W> Clone for JsonLinesSink<W> {
    fn clone(&self) -> Self {
        Self { out: self.out.clone() }
    }
}

#[cfg(feature = "json")]
impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { out: Arc::new(Mutex::new(writer)) }
    }

    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&lock(&self.out))
    }

    fn write_line(&self, snapshot: &DisplaySnapshot) -> io::Result<()> {
        let mut out = lock(&self.out);
        serde_json::to_writer(&mut *out, snapshot).map_err(io::Error::from)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

#[cfg(feature = "json")]
impl<W: Write + Send + 'static> Service<DisplaySnapshot> for JsonLinesSink<W> {
    type Response = ();
    type Error = io::Error;
    type Future = SinkFuture<Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, snapshot: DisplaySnapshot) -> Self::Future {
        let result = self.write_line(&snapshot);
        Box::pin(async move { result })
    }
}

#[cfg(feature = "json")]
impl<W: Write + Send + 'static> DisplaySink for JsonLinesSink<W> {
    type SinkError = io::Error;
}

#[derive(Debug)]
pub struct ComposedSinkError(Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for ComposedSinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "display sink error: {}", self.0)
    }
}

impl std::error::Error for ComposedSinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}

/// Sends every snapshot to two sinks, e.g. a renderer and a log.
#[derive(Clone, Debug)]
pub struct MulticastSink<A, B> {
    sink_a: A,
    sink_b: B,
}

impl<A, B> MulticastSink<A, B> {
    pub fn new(sink_a: A, sink_b: B) -> Self {
        Self { sink_a, sink_b }
    }
}

impl<A, B> Service<DisplaySnapshot> for MulticastSink<A, B>
where
    A: tower::Service<DisplaySnapshot, Response = ()> + Clone + Send + 'static,
    A::Error: std::error::Error + Send + Sync + 'static,
    A::Future: Send + 'static,
    B: tower::Service<DisplaySnapshot, Response = ()> + Clone + Send + 'static,
    B::Error: std::error::Error + Send + Sync + 'static,
    B::Future: Send + 'static,
{
    type Response = ();
    type Error = ComposedSinkError;
    type Future = SinkFuture<Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, snapshot: DisplaySnapshot) -> Self::Future {
        let mut sink_a = self.sink_a.clone();
        let mut sink_b = self.sink_b.clone();
        let snapshot_clone = snapshot.clone();

        Box::pin(async move {
            let (res_a, res_b) = tokio::join!(sink_a.call(snapshot), sink_b.call(snapshot_clone));
            res_a.map_err(|e| ComposedSinkError(Box::new(e)))?;
            res_b.map_err(|e| ComposedSinkError(Box::new(e)))?;
            Ok(())
        })
    }
}

impl<A, B> DisplaySink for MulticastSink<A, B>
where
    A: tower::Service<DisplaySnapshot, Response = ()> + Clone + Send + 'static,
    A::Error: std::error::Error + Send + Sync + 'static,
    A::Future: Send + 'static,
    B: tower::Service<DisplaySnapshot, Response = ()> + Clone + Send + 'static,
    B::Error: std::error::Error + Send + Sync + 'static,
    B::Future: Send + 'static,
{
    type SinkError = ComposedSinkError;
}
