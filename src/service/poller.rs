// src/service/poller.rs
use log::debug;
use parking_lot::Mutex;
use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{ AtomicBool, Ordering };
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{ self, Instant, MissedTickBehavior };
use crate::error::StatusError;
use crate::models::status::StatusRecord;
use crate::probes::Prober;
use super::{ validate, StatusService };

thread_local! {
    // Number of poller callbacks running on this thread.
    static DELIVERING: Cell<usize> = Cell::new(0);
}

/// Marks the current thread as inside a poller callback until dropped.
struct Delivering;

impl Delivering {
    fn enter() -> Self {
        DELIVERING.with(|depth| depth.set(depth.get() + 1));
        Delivering
    }

    fn active() -> bool {
        DELIVERING.with(|depth| depth.get() > 0)
    }
}

impl Drop for Delivering {
    fn drop(&mut self) {
        DELIVERING.with(|depth| depth.set(depth.get() - 1));
    }
}

struct PollState {
    cancelled: AtomicBool,
    // Held for the check-and-deliver step of every tick.
    delivery: Mutex<()>,
}

/// Stops a schedule started by [`StatusService::ping_server_cyclically`].
///
/// Dropping the handle leaves the schedule running.
pub struct PollHandle {
    task: JoinHandle<()>,
    state: Arc<PollState>,
}

impl PollHandle {
    /// Stops the schedule.
    ///
    /// Called from outside any poller callback, no callback of this schedule
    /// runs after it returns. Called from inside a callback (this schedule's or
    /// another's), it does not wait, so a delivery of this schedule already past
    /// its check on another thread may still finish.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
        if !Delivering::active() {
            drop(self.state.delivery.lock());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }
}

impl<P: Prober> StatusService<P> {
    /// Queries the server every `interval` and passes each record to `callback`.
    ///
    /// The first query runs one interval after the call. Each tick runs as its
    /// own task, so a probe slower than `interval` overlaps the next tick.
    /// Ticks respect the cache and apply no shaping.
    pub fn ping_server_cyclically<F>(
        self: &Arc<Self>,
        game: &str,
        ip: &str,
        port: Option<u16>,
        interval: Duration,
        callback: F
    ) -> Result<PollHandle, StatusError>
        where F: Fn(StatusRecord) + Send + Sync + 'static
    {
        let game = validate(game, ip)?;
        if interval.is_zero() {
            return Err(StatusError::InvalidArgument("interval"));
        }

        let state = Arc::new(PollState { cancelled: AtomicBool::new(false), delivery: Mutex::new(()) });
        let callback = Arc::new(callback);
        let service = Arc::clone(self);
        let ip = ip.to_string();
        let shared = Arc::clone(&state);

        debug!("Polling {} server at {} every {:?}", game, ip, interval);
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;

                let service = Arc::clone(&service);
                let callback = Arc::clone(&callback);
                let state = Arc::clone(&shared);
                let ip = ip.clone();
                tokio::spawn(async move {
                    let status = service.resolve(game, &ip, port, false).await;
                    let _delivery = state.delivery.lock();
                    if !state.cancelled.load(Ordering::SeqCst) {
                        let _scope = Delivering::enter();
                        callback(status);
                    }
                });
            }
        });

        Ok(PollHandle { task, state })
    }
}
