use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::batch::config::BatchConfig;
use crate::filter::policy::Verdict;
use crate::foundation::core::Seed;
use crate::foundation::error::{QqlError, QqlResult};
use crate::output::encode::RasterEncoder;
use crate::output::writer::{OutputRecord, OutputWriter};
use crate::persist::store::RenderStore;
use crate::render::backend::Renderer;
use crate::render::sketch::background_names;
use crate::seed::derive::{SeedDeriver, TwoRings};
use crate::traits::resolve::{ResolvedTraits, TraitResolver};

/// Summary of a finished batch.
#[derive(Clone, Debug)]
pub struct BatchReport {
    /// Attempts made (always the configured count on success).
    pub attempts: u32,
    /// Attempts that passed the filter and were written.
    pub accepted: u32,
    /// Attempts rejected by the filter.
    pub rejected: u32,
    /// Written outputs in attempt order.
    pub records: Vec<OutputRecord>,
    /// Wall-clock span of the render loop.
    pub elapsed: Duration,
}

/// Drives one batch: resolve traits, derive every seed, then render, filter, write and record
/// each attempt in order.
///
/// Rejected attempts are consumed, not retried. The first render, write or store error aborts
/// the run; outputs already written stay on disk.
pub struct BatchRunner<'a> {
    cfg: &'a BatchConfig,
    renderer: &'a mut dyn Renderer,
    encoder: &'a dyn RasterEncoder,
    store: Option<&'a mut dyn RenderStore>,
    deriver: SeedDeriver,
}

impl<'a> BatchRunner<'a> {
    /// Runner without a store and with an OS-seeded deriver.
    pub fn new(
        cfg: &'a BatchConfig,
        renderer: &'a mut dyn Renderer,
        encoder: &'a dyn RasterEncoder,
    ) -> Self {
        Self {
            cfg,
            renderer,
            encoder,
            store: None,
            deriver: SeedDeriver::new(),
        }
    }

    /// Attach the store used when persistence is enabled.
    pub fn with_store(mut self, store: &'a mut dyn RenderStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the seed deriver (e.g. a seeded one for reproducible random runs).
    pub fn with_deriver(mut self, deriver: SeedDeriver) -> Self {
        self.deriver = deriver;
        self
    }

    /// Derive all seeds for the run; seed `i` belongs to attempt `i`.
    pub fn plan_seeds(&mut self, resolved: &ResolvedTraits) -> QqlResult<Vec<Seed>> {
        let mut seeds = Vec::with_capacity(self.cfg.count as usize);
        for _ in 0..self.cfg.count {
            let traits = resolved.for_attempt(self.deriver.rng());
            seeds.push(
                self.deriver
                    .derive(&self.cfg.wallet, traits.as_ref(), self.cfg.two_rings)?,
            );
        }
        Ok(seeds)
    }

    /// Run the batch to completion.
    #[tracing::instrument(skip(self), fields(count = self.cfg.count, wallet = %self.cfg.wallet))]
    pub fn run(&mut self) -> QqlResult<BatchReport> {
        let cfg = self.cfg;
        cfg.validate()?;
        let host = cfg.persistence.host();
        if host.is_some() && self.store.is_none() {
            return Err(QqlError::config(
                "persistence is enabled but no store was provided",
            ));
        }

        self.log_overrides();
        let resolved = TraitResolver::new(&cfg.traits_dir)
            .resolve(&cfg.traits, cfg.palette_override.as_ref())?;
        match &resolved {
            ResolvedTraits::Random => tracing::info!("generating seeds with random traits"),
            ResolvedTraits::Fixed { base, .. } => {
                let pretty = serde_json::to_string_pretty(base).unwrap_or_default();
                tracing::info!("generating seeds with traits:\n{pretty}");
            }
        }
        if let (Some(palette), Some(bg)) = (resolved.fixed_palette(), &cfg.filter.background) {
            let offered = background_names(palette);
            if !offered.contains(&bg.as_str()) {
                tracing::warn!(
                    ?offered,
                    "background '{bg}' is not offered by palette '{palette}'; every render will be rejected"
                );
            }
        }

        let seeds = self.plan_seeds(&resolved)?;
        tracing::info!("seed generation complete");

        let mut writer = OutputWriter::new(&cfg.output_dir, self.encoder)?
            .with_overlay(cfg.overlay.clone())
            .with_keep_png(cfg.keep_png);
        let abs_dir = std::fs::canonicalize(writer.dir()).map_err(|e| {
            QqlError::write(format!(
                "resolve output dir '{}': {e}",
                writer.dir().display()
            ))
        })?;

        tracing::info!("rendering outputs...");
        let started = Instant::now();
        let mut report = BatchReport {
            attempts: 0,
            accepted: 0,
            rejected: 0,
            records: Vec::new(),
            elapsed: Duration::ZERO,
        };

        for (i, seed) in seeds.iter().enumerate() {
            report.attempts += 1;
            tracing::info!(attempt = i + 1, of = cfg.count, %seed, "rendering");
            let result = self.renderer.render(seed, cfg.render_width)?;

            if let Verdict::Rejected(_) = cfg.filter.evaluate(&result.metadata) {
                report.rejected += 1;
                continue;
            }

            let record = writer.write(seed, &result)?;
            if let (Some(host), Some(store)) = (host, self.store.as_deref_mut()) {
                store.insert(
                    host,
                    &abs_dir,
                    &record.base_name,
                    seed,
                    cfg.render_width,
                    &result.metadata,
                )?;
            }
            report.accepted += 1;
            report.records.push(record);
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            accepted = report.accepted,
            rejected = report.rejected,
            "time taken to render {} seeds: {:.3?}",
            cfg.count,
            report.elapsed
        );
        Ok(report)
    }

    fn log_overrides(&self) {
        let cfg = self.cfg;
        if let Some(p) = &cfg.palette_override {
            tracing::info!("palette override set to: {p:?}");
        }
        if let Some(bg) = &cfg.filter.background {
            tracing::info!("background color override set to {bg}");
        }
        if cfg.two_rings == TwoRings::Yes {
            tracing::info!("two ring override specified");
        }
        if cfg.filter.min_points > 0 {
            tracing::info!("minimum point count set to {}", cfg.filter.min_points);
        }
    }
}

/// Default store location: `<output>/renders.redb`.
pub fn default_db_path(cfg: &BatchConfig) -> PathBuf {
    cfg.output_dir.join("renders.redb")
}
