//! Candidate pools: the existing nodes a dependent stage samples from

use super::error::{GenerationError, GenerationResult};
use crate::graph::{GraphBackend, Label, NodeId, NodePattern};
use rand::seq::{index, SliceRandom};
use rand::RngCore;

/// One node a stage may reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub node: NodeId,
    /// Value of the pool's key property (e.g. the generated `id`)
    pub key: String,
}

/// Non-empty set of nodes of one label
#[derive(Debug, Clone)]
pub struct CandidatePool {
    label: Label,
    members: Vec<Candidate>,
}

impl CandidatePool {
    /// Build a pool from explicit members; an empty list is a precondition
    /// failure
    pub fn new(label: impl Into<Label>, members: Vec<Candidate>) -> GenerationResult<Self> {
        let label = label.into();
        if members.is_empty() {
            return Err(GenerationError::EmptyCandidatePool { label });
        }
        Ok(Self { label, members })
    }

    /// Load every `label` node that carries a string `key` property
    pub fn load<B>(backend: &B, label: impl Into<Label>, key: &str) -> GenerationResult<Self>
    where
        B: GraphBackend + ?Sized,
    {
        let label = label.into();
        let members = backend
            .query(&NodePattern::label(label.clone()))?
            .into_iter()
            .filter_map(|record| {
                let key = record.get(key)?.as_string()?.to_string();
                Some(Candidate {
                    node: record.node,
                    key,
                })
            })
            .collect();
        Self::new(label, members)
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// A constructed pool is never empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|c| c.key.as_str())
    }

    /// Uniformly pick one member
    pub fn choose(&self, rng: &mut dyn RngCore) -> &Candidate {
        self.members.choose(rng).unwrap_or(&self.members[0])
    }

    /// Uniformly pick `amount` distinct members (capped at the pool size)
    pub fn choose_distinct(&self, rng: &mut dyn RngCore, amount: usize) -> Vec<&Candidate> {
        let amount = amount.min(self.members.len());
        index::sample(rng, self.members.len(), amount)
            .into_iter()
            .map(|i| &self.members[i])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, PropertyMap};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn store_with(label: &str, ids: &[&str]) -> GraphStore {
        let mut store = GraphStore::new();
        for id in ids {
            let mut props = PropertyMap::new();
            props.insert("id".to_string(), (*id).into());
            store.create_node(&[Label::new(label)], props).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_pool_is_a_precondition_error() {
        let store = GraphStore::new();
        let err = CandidatePool::load(&store, "Customer", "id").unwrap_err();
        match err {
            GenerationError::EmptyCandidatePool { label } => assert_eq!(label.as_str(), "Customer"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_load_collects_keys_in_creation_order() {
        let store = store_with("Product", &["P1", "P2", "P3"]);
        let pool = CandidatePool::load(&store, "Product", "id").unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.keys().collect::<Vec<_>>(), vec!["P1", "P2", "P3"]);
        assert_eq!(pool.label().as_str(), "Product");
    }

    #[test]
    fn test_nodes_without_key_are_skipped() {
        let mut store = store_with("Product", &["P1"]);
        store
            .create_node(&[Label::new("Product")], PropertyMap::new())
            .unwrap();
        let pool = CandidatePool::load(&store, "Product", "id").unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_choose_distinct_never_repeats() {
        let store = store_with("Product", &["P1", "P2", "P3", "P4", "P5"]);
        let pool = CandidatePool::load(&store, "Product", "id").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for amount in 1..=5 {
            let picked = pool.choose_distinct(&mut rng, amount);
            let unique: HashSet<_> = picked.iter().map(|c| c.node).collect();
            assert_eq!(picked.len(), amount);
            assert_eq!(unique.len(), amount);
        }
    }

    #[test]
    fn test_choose_distinct_caps_at_pool_size() {
        let store = store_with("Product", &["P1", "P2"]);
        let pool = CandidatePool::load(&store, "Product", "id").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(pool.choose_distinct(&mut rng, 5).len(), 2);
    }

    #[test]
    fn test_choose_stays_in_pool() {
        let store = store_with("Customer", &["C1", "C2"]);
        let pool = CandidatePool::load(&store, "Customer", "id").unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            assert!(["C1", "C2"].contains(&pool.choose(&mut rng).key.as_str()));
        }
    }
}
