use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Stop request shared between the control loop, the display thread and
/// whoever wants them to end (Ctrl+C handler, keyboard monitor).
///
/// Waits on this signal return as soon as a stop is requested, so the loop
/// cadence sleeps never delay shutdown.
pub struct StopSignal {
    stopped: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }

    /// Request a stop. Idempotent.
    pub fn stop(&self) {
        // Under the mutex so a waiter between check and wait still wakes
        let _guard = self.mutex.lock().unwrap_or_else(|e| e.into_inner());
        self.stopped.store(true, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` unless a stop arrives first.
    ///
    /// Returns `true` if stopped.
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_stopped() {
            return true;
        }

        let guard = self.mutex.lock().unwrap_or_else(|e| e.into_inner());
        match self
            .condvar
            .wait_timeout_while(guard, duration, |_| !self.is_stopped())
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            // Mutex poisoned, treat as stopped
            Err(_) => true,
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_initial_state() {
        assert!(!StopSignal::new().is_stopped());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let signal = StopSignal::new();
        signal.stop();
        signal.stop();
        assert!(signal.is_stopped());
    }

    #[test]
    fn test_wait_times_out() {
        let signal = StopSignal::new();
        let start = Instant::now();
        let stopped = signal.wait(Duration::from_millis(50));
        let elapsed = start.elapsed();

        assert!(!stopped);
        assert!(elapsed >= Duration::from_millis(50));
    }

    #[test]
    fn test_wait_interrupted_by_stop() {
        let signal = Arc::new(StopSignal::new());
        let waiter = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            (waiter.wait(Duration::from_secs(10)), start.elapsed())
        });

        thread::sleep(Duration::from_millis(50));
        signal.stop();

        let (stopped, elapsed) = handle.join().unwrap();
        assert!(stopped);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_wait_after_stop_returns_immediately() {
        let signal = StopSignal::new();
        signal.stop();

        let start = Instant::now();
        assert!(signal.wait(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
