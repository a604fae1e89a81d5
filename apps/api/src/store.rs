//! In-memory store of generation results.
//!
//! Export draws exactly what was previewed: results are looked up by id,
//! never regenerated. The store is bounded: inserting past
//! capacity evicts the oldest worksheet.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::worksheet::Worksheet;

#[derive(Clone)]
pub struct WorksheetStore {
    inner: Arc<RwLock<StoreInner>>,
    capacity: usize,
}

#[derive(Default)]
struct StoreInner {
    worksheets: HashMap<Uuid, Arc<Worksheet>>,
    /// Insertion order, oldest first.
    order: VecDeque<Uuid>,
}

impl WorksheetStore {
    pub fn new(capacity: usize) -> Self {
        WorksheetStore {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            capacity: capacity.max(1),
        }
    }

    /// Stores a worksheet and returns the shared handle.
    pub async fn insert(&self, worksheet: Worksheet) -> Arc<Worksheet> {
        let worksheet = Arc::new(worksheet);
        let mut inner = self.inner.write().await;

        while inner.order.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(evicted) => {
                    inner.worksheets.remove(&evicted);
                    debug!(%evicted, "evicted worksheet");
                }
                None => break,
            }
        }

        inner.order.push_back(worksheet.id);
        inner.worksheets.insert(worksheet.id, Arc::clone(&worksheet));
        worksheet
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Worksheet>> {
        self.inner.read().await.worksheets.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.worksheets.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
