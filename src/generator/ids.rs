//! Identifier and numeric helpers shared by the stages

use crate::schema::EntityKind;
use rand::{Rng, RngCore};
use uuid::Builder;

/// `<prefix><8 hex chars>`, e.g. `C1f0e9a3b`.
///
/// The hex digits are the head of a v4 UUID built from `rng`, so a seeded
/// source yields the same identifiers. Collisions are not checked.
pub fn prefixed_id(kind: EntityKind, rng: &mut dyn RngCore) -> String {
    let bytes: [u8; 16] = rng.gen();
    let uuid = Builder::from_random_bytes(bytes).into_uuid();
    let mut id = String::with_capacity(9);
    id.push(kind.prefix());
    id.push_str(&uuid.simple().to_string()[..8]);
    id
}

/// Round to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Uniform amount in `[low, high]`, rounded to cents
pub fn money(rng: &mut dyn RngCore, low: f64, high: f64) -> f64 {
    round_to(rng.gen_range(low..=high), 2)
}

/// Uniform score in `[0, 1]`, rounded to 2 decimals
pub fn risk_score(rng: &mut dyn RngCore) -> f64 {
    round_to(rng.gen_range(0.0..=1.0), 2)
}
