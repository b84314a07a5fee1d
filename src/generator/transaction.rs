//! Device, Location and Transaction stage
//!
//! Devices come from a bounded in-memory pool and are only persisted when a
//! transaction first uses them; every later use merges onto the existing
//! node. Locations are created fresh for each transaction.

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::ids::{money, prefixed_id, risk_score};
use super::pool::CandidatePool;
use super::report::{Stage, StageReport};
use crate::graph::{EdgeType, GraphBackend, Label, NodeSelector, PropertyMap};
use crate::schema::{
    labels, rels, Browser, DeviceType, EntityKind, OperatingSystem, TransactionStatus,
};
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, info};

/// A device that transactions may be made from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub id: String,
    pub device_type: DeviceType,
    pub browser: Browser,
    pub os: OperatingSystem,
}

impl DeviceProfile {
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self {
            id: prefixed_id(EntityKind::Device, rng),
            device_type: DeviceType::sample(rng),
            browser: Browser::sample(rng),
            os: OperatingSystem::sample(rng),
        }
    }

    /// Attributes written when the device node is first created
    fn on_create(&self) -> PropertyMap {
        props([
            ("type", self.device_type.as_str().into()),
            ("browser", self.browser.as_str().into()),
            ("os", self.os.as_str().into()),
        ])
    }
}

/// Fixed set of devices shared by all transactions of a run
#[derive(Debug, Clone)]
pub struct DevicePool {
    devices: Vec<DeviceProfile>,
}

impl DevicePool {
    /// `max(1, round(ratio * transactions))`, never more than one device per
    /// transaction
    pub fn size_for(transactions: usize, ratio: f64) -> usize {
        let scaled = (ratio * transactions as f64).round();
        (scaled as usize).clamp(1, transactions.max(1))
    }

    pub fn generate(size: usize, rng: &mut dyn RngCore) -> Self {
        let devices = (0..size.max(1)).map(|_| DeviceProfile::random(rng)).collect();
        Self { devices }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Always `false`: a pool holds at least one device
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> &[DeviceProfile] {
        &self.devices
    }

    pub fn contains(&self, id: &str) -> bool {
        self.devices.iter().any(|d| d.id == id)
    }

    pub fn choose(&self, rng: &mut dyn RngCore) -> &DeviceProfile {
        self.devices.choose(rng).unwrap_or(&self.devices[0])
    }
}

/// Create `count` transactions made by sampled customers.
///
/// Returns the report together with the device pool so callers can check
/// which devices were eligible.
pub fn generate_transactions<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
    customers: &CandidatePool,
    device_pool_ratio: f64,
) -> GenerationResult<(StageReport, DevicePool)> {
    let devices = DevicePool::generate(DevicePool::size_for(count, device_pool_ratio), ctx.rng);
    debug!(devices = devices.len(), transactions = count, "device pool drawn");

    let device_label = Label::new(labels::DEVICE);
    let transaction_label = [Label::new(labels::TRANSACTION)];
    let location_label = [Label::new(labels::LOCATION)];
    let made = EdgeType::new(rels::MADE);
    let uses = EdgeType::new(rels::USES);
    let from = EdgeType::new(rels::FROM);
    let mut report = StageReport::new(Stage::Transactions);
    let mut devices_created = 0;

    for _ in 0..count {
        let customer = customers.choose(ctx.rng);
        let device = devices.choose(ctx.rng);
        let merged = ctx.backend.merge_node(
            &device_label,
            "id",
            device.id.as_str().into(),
            device.on_create(),
        )?;
        if merged.created {
            devices_created += 1;
        }

        let id = ctx.next_id(EntityKind::Transaction);
        let properties = props([
            ("id", id.into()),
            ("amount", money(ctx.rng, 10.0, 1000.0).into()),
            ("date", ctx.timestamp_this_year()),
            ("status", TransactionStatus::sample(ctx.rng).as_str().into()),
            ("risk_score", risk_score(ctx.rng).into()),
        ]);
        let transaction = NodeSelector::Ref(ctx.backend.create_node(&transaction_label, properties)?);

        let location = props([
            ("city", ctx.faker.city(ctx.rng).into()),
            ("country", ctx.faker.country(ctx.rng).into()),
            ("latitude", ctx.faker.latitude(ctx.rng).into()),
            ("longitude", ctx.faker.longitude(ctx.rng).into()),
        ]);
        let location = NodeSelector::Ref(ctx.backend.create_node(&location_label, location)?);
        report.nodes_created += 2;

        ctx.backend.create_edge(
            &NodeSelector::by_key(labels::CUSTOMER, "id", customer.key.as_str()),
            &transaction,
            &made,
            PropertyMap::new(),
        )?;
        ctx.backend.create_edge(
            &transaction,
            &NodeSelector::Ref(merged.node),
            &uses,
            PropertyMap::new(),
        )?;
        ctx.backend
            .create_edge(&transaction, &location, &from, PropertyMap::new())?;
        report.edges_created += 3;
    }
    report.nodes_created += devices_created;

    info!(
        transactions = count,
        devices = devices_created,
        pool = devices.len(),
        "generated transactions"
    );
    Ok((report, devices))
}
