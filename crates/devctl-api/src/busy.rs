// ── Reference-counted busy signal ──
//
// Replaces the implicit loading-overlay lifecycle of a web console with
// explicit request-lifecycle events: every request holds a BusyGuard
// for its duration, and consumers observe the in-flight count through
// a watch channel.

use tokio::sync::watch;

/// Reference-counted in-flight request counter.
///
/// Cloning shares the underlying counter. The signal reads as busy
/// while at least one [`BusyGuard`] is alive, so overlapping requests
/// produce a single begin/end indication spanning all of them.
#[derive(Debug, Clone)]
pub struct BusySignal {
    count: watch::Sender<u32>,
}

impl BusySignal {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self { count }
    }

    /// Acquire a guard for the lifetime of one request.
    pub fn acquire(&self) -> BusyGuard {
        self.count.send_modify(|c| *c += 1);
        BusyGuard { count: self.count.clone() }
    }

    /// Current number of in-flight requests.
    pub fn in_flight(&self) -> u32 {
        *self.count.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// Subscribe to in-flight count changes.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.count.subscribe()
    }
}

impl Default for BusySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard representing one in-flight request.
///
/// Dropping the guard decrements the counter, including on error and
/// panic unwind paths, so the signal always returns to idle.
#[derive(Debug)]
pub struct BusyGuard {
    count: watch::Sender<u32>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.count.send_modify(|c| *c = c.saturating_sub(1));
    }
}
