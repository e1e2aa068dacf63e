//! qql-bulk derives deterministic render seeds from a wallet and a trait-set, renders them in
//! batches, and keeps the outputs that pass an acceptance filter.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `TraitSource -> ResolvedTraits` (once per run; named sets are validated)
//! 2. **Derive**: `Wallet + TraitSet -> Seed` (pure for fixed traits; random otherwise)
//! 3. **Render**: `Seed -> RenderResult` through a [`Renderer`]
//! 4. **Filter**: [`FilterPolicy`] accepts or rejects on background color and point count
//! 5. **Write**: [`OutputWriter`] materializes `<ts>-<seed>.png.webp` and `<ts>-<seed>.png.txt`
//! 6. **Record** (optional): [`RenderStore`] receives one row per written output
//!
//! The seed's tail encodes the catalog traits, so [`traits_from_seed`] inverts derivation and
//! [`seed_from_filename`] recovers a seed from any output file name.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod filter;
mod foundation;
mod output;
mod persist;
mod render;
mod seed;
mod traits;

pub use batch::config::{BatchConfig, Persistence};
pub use batch::orchestrator::{BatchReport, BatchRunner, default_db_path};
pub use filter::policy::{FilterPolicy, Rejection, Verdict, background_from_arg};
pub use foundation::core::{
    DEFAULT_RENDER_WIDTH, MAX_RENDER_WIDTH, RING_VARIANT_TWO_RINGS, SEED_LEN, Seed, Wallet,
};
pub use foundation::error::{QqlError, QqlResult};
pub use output::encode::{PngEncoder, RasterEncoder, WebpEncoder};
pub use output::writer::{OVERLAY_PREFIX, OutputRecord, OutputWriter, base_name};
pub use persist::redb_store::RedbStore;
pub use persist::store::{MemoryStore, RenderRow, RenderStore};
pub use render::backend::{FrameRGBA, RenderMetadata, RenderResult, Renderer};
pub use render::sketch::{SketchRenderer, background_names};
pub use seed::derive::{SeedDeriver, TwoRings, derive_from_traits};
pub use seed::reverse::{seed_from_filename, traits_from_seed};
pub use traits::catalog::{CATALOG, COLOR_PALETTE, Category, TraitCode, TraitSet, palettes};
pub use traits::resolve::{PaletteOverride, ResolvedTraits, TraitResolver, TraitSource};
