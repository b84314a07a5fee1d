//! Synthetic e-commerce dataset generator
//!
//! Stages run in dependency order, each sampling identifiers written by the
//! ones before it:
//!
//! 1. customers
//! 2. categories (idempotent) and products
//! 3. orders
//! 4. reviews
//! 5. devices, locations and transactions
//! 6. suppliers (probabilistic SUPPLIES links)
//! 7. campaigns (probabilistic ENGAGED_WITH links)
//!
//! All randomness flows from one seeded [`StdRng`]; the seed lands in the
//! returned [`PipelineReport`].

pub mod campaign;
pub mod config;
pub mod context;
pub mod customer;
pub mod error;
pub mod faker;
pub mod ids;
pub mod order;
pub mod pool;
pub mod product;
pub mod report;
pub mod review;
pub mod supplier;
pub mod transaction;

pub use campaign::generate_campaigns;
pub use config::{GenerationCounts, GeneratorConfig};
pub use context::GenContext;
pub use customer::generate_customers;
pub use error::{ConfigError, GenerationError, GenerationResult};
pub use faker::{EnglishFaker, FakeData};
pub use order::generate_orders;
pub use pool::{Candidate, CandidatePool};
pub use product::{ensure_categories, generate_products};
pub use report::{PipelineReport, Stage, StageReport};
pub use review::generate_reviews;
pub use supplier::generate_suppliers;
pub use transaction::{generate_transactions, DevicePool, DeviceProfile};

use crate::graph::GraphBackend;
use crate::schema::labels;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Runs the full pipeline against a [`GraphBackend`]
#[derive(Debug, Clone)]
pub struct DatasetGenerator<F: FakeData = EnglishFaker> {
    config: GeneratorConfig,
    faker: F,
    seed: u64,
}

impl DatasetGenerator<EnglishFaker> {
    /// Validate `config` and use the built-in word-list faker
    pub fn new(config: GeneratorConfig) -> GenerationResult<Self> {
        Self::with_faker(config, EnglishFaker::new())
    }
}

impl<F: FakeData> DatasetGenerator<F> {
    pub fn with_faker(config: GeneratorConfig, faker: F) -> GenerationResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            faker,
            seed,
        })
    }

    /// Seed every run of this generator starts from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Execute every stage once, in order.
    ///
    /// Stages whose target count is zero are skipped without loading their
    /// candidate pools. A failure aborts the run; nodes and edges written by
    /// earlier stages stay in the store.
    pub fn run<B: GraphBackend + ?Sized>(&self, backend: &mut B) -> GenerationResult<PipelineReport> {
        let counts = self.config.counts;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ctx = GenContext::new(backend, &mut rng, &self.faker);
        let mut report = PipelineReport::new(self.seed);

        info!(seed = self.seed, ?counts, "starting dataset generation");

        report.push(generate_customers(&mut ctx, counts.customers)?);

        let (categories, category_report) = ensure_categories(&mut ctx, &self.config.categories)?;
        report.push(category_report);

        report.push(if counts.products > 0 {
            generate_products(&mut ctx, counts.products, &categories)?
        } else {
            skipped(Stage::Products)
        });

        report.push(if counts.orders > 0 {
            let customers = CandidatePool::load(&*ctx.backend, labels::CUSTOMER, "id")?;
            let products = CandidatePool::load(&*ctx.backend, labels::PRODUCT, "id")?;
            generate_orders(
                &mut ctx,
                counts.orders,
                &customers,
                &products,
                self.config.max_products_per_order,
            )?
        } else {
            skipped(Stage::Orders)
        });

        report.push(if counts.reviews > 0 {
            let customers = CandidatePool::load(&*ctx.backend, labels::CUSTOMER, "id")?;
            let products = CandidatePool::load(&*ctx.backend, labels::PRODUCT, "id")?;
            generate_reviews(&mut ctx, counts.reviews, &customers, &products)?
        } else {
            skipped(Stage::Reviews)
        });

        report.push(if counts.transactions > 0 {
            let customers = CandidatePool::load(&*ctx.backend, labels::CUSTOMER, "id")?;
            let (stage, _) = generate_transactions(
                &mut ctx,
                counts.transactions,
                &customers,
                self.config.device_pool_ratio,
            )?;
            stage
        } else {
            skipped(Stage::Transactions)
        });

        report.push(if counts.suppliers > 0 {
            generate_suppliers(&mut ctx, counts.suppliers, self.config.supplier_link_probability)?
        } else {
            skipped(Stage::Suppliers)
        });

        report.push(if counts.campaigns > 0 {
            generate_campaigns(&mut ctx, counts.campaigns, self.config.engagement_probability)?
        } else {
            skipped(Stage::Campaigns)
        });

        info!(
            nodes = report.total_nodes(),
            edges = report.total_edges(),
            "dataset generation finished"
        );
        Ok(report)
    }
}

fn skipped(stage: Stage) -> StageReport {
    debug!(%stage, "target count is zero; skipping stage");
    StageReport::skipped(stage)
}

/// Validate `config` and run the whole pipeline into `backend`
pub fn generate_dataset<B: GraphBackend + ?Sized>(
    backend: &mut B,
    config: &GeneratorConfig,
) -> GenerationResult<PipelineReport> {
    DatasetGenerator::new(config.clone())?.run(backend)
}
