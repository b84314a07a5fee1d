//! Shared state threaded through every generation stage

use super::faker::FakeData;
use super::ids::prefixed_id;
use crate::graph::{GraphBackend, PropertyMap, PropertyValue};
use crate::schema::EntityKind;
use rand::RngCore;

/// Borrowed handles a stage writes and samples through.
///
/// The random source is the only source of randomness: stages never reach
/// for a thread-local generator.
pub struct GenContext<'a, B: GraphBackend + ?Sized> {
    pub backend: &'a mut B,
    pub rng: &'a mut dyn RngCore,
    pub faker: &'a dyn FakeData,
}

impl<'a, B: GraphBackend + ?Sized> GenContext<'a, B> {
    pub fn new(backend: &'a mut B, rng: &'a mut dyn RngCore, faker: &'a dyn FakeData) -> Self {
        Self {
            backend,
            rng,
            faker,
        }
    }

    /// Fresh prefixed identifier for `kind`
    pub fn next_id(&mut self, kind: EntityKind) -> String {
        prefixed_id(kind, self.rng)
    }

    /// Timestamp between the start of the year and now
    pub fn timestamp_this_year(&mut self) -> PropertyValue {
        self.faker.date_time_this_year(self.rng).into()
    }
}

/// Collect `(key, value)` pairs into a property map
pub(crate) fn props<const N: usize>(pairs: [(&str, PropertyValue); N]) -> PropertyMap {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
