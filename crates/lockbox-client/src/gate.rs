use crate::executor::CommandExecutor;
use lockbox_core::{ProxyError, ReadinessState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

const STATE_BITS: u32 = 2;
const STATE_MASK: u64 = (1 << STATE_BITS) - 1;

fn pack(generation: u64, state: ReadinessState) -> u64 {
    (generation << STATE_BITS) | state.to_bits()
}

fn unpack(cell: u64) -> (u64, ReadinessState) {
    (cell >> STATE_BITS, ReadinessState::from_bits(cell & STATE_MASK))
}

/// Cached answer to "is the encrypted database open right now".
///
/// The cached state and an invalidation generation share one atomic word.
/// A readiness answer is only cached if no invalidation happened while it
/// was in flight, so a reset can never be followed by a stale `Ready`.
#[derive(Debug)]
pub struct ReadinessGate<E: ?Sized> {
    executor: Arc<E>,
    cell: AtomicU64,
}

impl<E: CommandExecutor + ?Sized> ReadinessGate<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            cell: AtomicU64::new(pack(0, ReadinessState::Unknown)),
        }
    }

    pub fn state(&self) -> ReadinessState {
        unpack(self.cell.load(Ordering::SeqCst)).1
    }

    /// Forgets the cached state; the next check asks the executor again.
    pub fn invalidate(&self) {
        let mut current = self.cell.load(Ordering::SeqCst);
        loop {
            let (generation, _) = unpack(current);
            let next = pack(generation.wrapping_add(1), ReadinessState::Unknown);
            match self
                .cell
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    /// Fails closed: an executor that cannot be asked is reported not ready,
    /// and nothing is cached so the next check asks again.
    pub async fn check_ready(&self) -> bool {
        let observed = self.cell.load(Ordering::SeqCst);
        let (generation, state) = unpack(observed);
        if let Some(ready) = state.as_bool() {
            return ready;
        }
        let ready = match self.executor.is_ready().await {
            Ok(ready) => ready,
            Err(err) => {
                warn!("readiness query failed, treating database as locked: {err}");
                return false;
            }
        };
        let fresh = pack(generation, ReadinessState::from_ready(ready));
        if self
            .cell
            .compare_exchange(observed, fresh, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("readiness changed while querying; answer not cached");
        }
        ready
    }

    /// Opens (or creates) the database with `encryption_key`.
    ///
    /// The key goes to the executor as-is; the cache is invalidated whether
    /// or not it is accepted.
    pub async fn initialize(&self, encryption_key: &str) -> Result<(), ProxyError> {
        let result = self.executor.initialize(encryption_key).await;
        self.invalidate();
        match &result {
            Ok(()) => info!("database initialized"),
            Err(err) => warn!("database initialization failed: {err}"),
        }
        result
    }

    /// `purge_data = false` only forgets the key; `true` also asks the
    /// executor to delete the data.
    pub async fn reset(&self, purge_data: bool) -> Result<(), ProxyError> {
        let result = self.executor.reset(purge_data).await;
        self.invalidate();
        match &result {
            Ok(()) => info!(purge_data, "database session reset"),
            Err(err) => warn!(purge_data, "database reset failed: {err}"),
        }
        result
    }
}
