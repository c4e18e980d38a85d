//! Reserve tracking for the active pool
//!
//! Reserve fetches are issued with increasing sequence numbers and published
//! through a `watch` channel. A response is dropped when the active pool
//! changed while it was in flight, or when a newer fetch already published.
//! Nothing is cancelled; stale results are simply never observed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use swap_types::{Address, ReservePair};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::chain::PoolChain;
use crate::errors::Result;

/// Reserves of one pool as of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub pool: Address,
    pub reserves: ReservePair,
    pub sequence: u64,
    pub fetched_at: Instant,
}

impl ReserveSnapshot {
    /// Time since the reserves were read
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

pub struct ReserveTracker {
    chain: Arc<dyn PoolChain>,
    active_pool: RwLock<Option<Address>>,
    next_sequence: AtomicU64,
    snapshot_tx: watch::Sender<Option<ReserveSnapshot>>,
}

impl ReserveTracker {
    pub fn new(chain: Arc<dyn PoolChain>) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            chain,
            active_pool: RwLock::new(None),
            next_sequence: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// Switch the tracked pool; the previous pool's snapshot is cleared
    pub async fn select_pool(&self, pool: Option<Address>) {
        let mut active = self.active_pool.write().await;
        if *active == pool {
            return;
        }
        debug!("Tracking reserves of {:?} (was {:?})", pool, *active);
        *active = pool;
        self.snapshot_tx.send_replace(None);
    }

    pub async fn active_pool(&self) -> Option<Address> {
        *self.active_pool.read().await
    }

    /// Latest published snapshot
    pub fn latest(&self) -> Option<ReserveSnapshot> {
        *self.snapshot_tx.borrow()
    }

    /// Latest reserves, only if they belong to `pool`
    pub fn reserves_for(&self, pool: Address) -> Option<ReservePair> {
        self.latest()
            .filter(|snapshot| snapshot.pool == pool)
            .map(|snapshot| snapshot.reserves)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ReserveSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Fetch reserves of the active pool
    ///
    /// Returns the snapshot if it was published, `None` when no pool is
    /// selected or the response was superseded. Fetch errors leave the last
    /// snapshot in place.
    pub async fn refresh(&self) -> Result<Option<ReserveSnapshot>> {
        let Some(pool) = self.active_pool().await else {
            return Ok(None);
        };
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let reserves = self.chain.pool_reserves(pool).await?;
        let snapshot = ReserveSnapshot {
            pool,
            reserves,
            sequence,
            fetched_at: Instant::now(),
        };

        // Hold the pool lock so a concurrent select_pool cannot interleave
        let active = self.active_pool.read().await;
        if *active != Some(pool) {
            debug!("Dropping reserves of {:?}: pool no longer active", pool);
            return Ok(None);
        }

        let published = self.snapshot_tx.send_if_modified(|current| {
            let newer = matches!(
                current,
                Some(existing) if existing.pool == pool && existing.sequence > sequence
            );
            if newer {
                return false;
            }
            *current = Some(snapshot);
            true
        });

        if published {
            debug!(
                "Reserves of {:?} #{}: {} / {}",
                pool, sequence, reserves.reserve_a, reserves.reserve_b
            );
            Ok(Some(snapshot))
        } else {
            debug!("Dropping reserves of {:?} #{}: newer snapshot published", pool, sequence);
            Ok(None)
        }
    }

    /// Refresh only while `pool` is still the active pool
    pub async fn refresh_pool(&self, pool: Address) -> Result<Option<ReserveSnapshot>> {
        let active = self.active_pool().await;
        if active != Some(pool) {
            debug!("Skipping refresh of {:?}: tracker follows {:?}", pool, active);
            return Ok(None);
        }
        self.refresh().await
    }

    /// Refresh on a fixed interval until the handle is aborted
    pub fn spawn_polling(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    warn!("Reserve refresh failed: {}", e);
                }
            }
        })
    }
}
