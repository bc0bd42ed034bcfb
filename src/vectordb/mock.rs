use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::vectordb::{IndexHit, IndexPoint, VectorDbError, VectorIndex};

/// In-memory index with brute-force cosine search.
#[derive(Default)]
pub struct MockVectorIndex {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
    unreachable: AtomicBool,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<u64, IndexPoint>,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }

    /// Simulates the index going offline (every call fails to connect).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Stores a point with an arbitrary description, bypassing item validation.
    pub fn insert_raw(&self, collection: &str, point: IndexPoint) {
        if let Ok(mut collections) = self.collections.write() {
            collections
                .entry(collection.to_string())
                .or_default()
                .points
                .insert(point.id, point);
        }
    }

    fn check_reachable(&self) -> Result<(), VectorDbError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(VectorDbError::ConnectionFailed {
                url: "mock://qdrant".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl VectorIndex for MockVectorIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        self.check_reachable()?;

        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::CreateCollectionFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        collections
            .entry(name.to_string())
            .or_insert(MockCollection {
                vector_size,
                points: HashMap::new(),
            });

        Ok(())
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<IndexPoint>,
    ) -> Result<(), VectorDbError> {
        self.check_reachable()?;

        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(VectorDbError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(point.id, point);
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<IndexHit>, VectorDbError> {
        self.check_reachable()?;

        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let mut scored: Vec<(u64, f32, &IndexPoint)> = coll
            .points
            .iter()
            .map(|(&id, p)| (id, cosine_similarity(&query, &p.vector), p))
            .collect();

        // Point id breaks ties so results do not depend on HashMap order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(limit as usize);

        scored
            .into_iter()
            .map(|(id, score, p)| {
                IndexHit::from_payload(&id.to_string(), &p.payload(), score)
            })
            .collect()
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
