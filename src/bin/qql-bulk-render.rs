use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "qql-bulk-render", version, about = "Bulk render QQL outputs.")]
struct Cli {
    /// The directory for the output files.
    #[arg(long, alias = "o")]
    output: PathBuf,

    /// The ethereum wallet address (0x...).
    #[arg(long, alias = "w")]
    wallet: String,

    /// The named traits to render for (without '.json'), or 'random'.
    #[arg(long, default_value = "random")]
    traits: String,

    /// Directory holding named trait-set JSON files.
    #[arg(long = "traits_dir", default_value = "traits")]
    traits_dir: PathBuf,

    /// Set to 'yes' to mutate seeds for 2-ring outputs.
    #[arg(long = "two_rings", value_enum, default_value_t = qql_bulk::TwoRings::No)]
    two_rings: qql_bulk::TwoRings,

    /// A palette name or 'random' to override the palette of the named traits.
    #[arg(long = "palette_override")]
    palette_override: Option<String>,

    /// Only keep outputs with this background color name, or 'none'.
    #[arg(long = "bg_color_override", default_value = "none")]
    bg_color_override: String,

    /// Only keep outputs with at least this many points (0 disables).
    #[arg(long = "min_points", default_value_t = 0)]
    min_points: u64,

    /// Also write a `yun_` copy with the overlay asset composited on top.
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    yunify: bool,

    /// Overlay asset used by --yunify.
    #[arg(long = "overlay_asset", default_value = "resources/overlay.png")]
    overlay_asset: PathBuf,

    /// Keep the uncompressed PNG next to the WebP.
    #[arg(long = "keep_png", default_value_t = false, action = ArgAction::Set)]
    keep_png: bool,

    /// Record every accepted output in the render database.
    #[arg(long = "use_db", default_value_t = false, action = ArgAction::Set)]
    use_db: bool,

    /// Host label stored with database rows (required with --use_db true).
    #[arg(long = "render_host")]
    render_host: Option<String>,

    /// Render database path (defaults to <output>/renders.redb).
    #[arg(long = "db_path")]
    db_path: Option<PathBuf>,

    /// Render width in pixels.
    #[arg(long = "render_width", default_value_t = qql_bulk::DEFAULT_RENDER_WIDTH)]
    render_width: u32,

    /// The number of outputs to attempt.
    count: u32,
}

fn batch_config(cli: &Cli) -> anyhow::Result<qql_bulk::BatchConfig> {
    let wallet = qql_bulk::Wallet::parse(&cli.wallet).context("parse --wallet")?;
    let mut cfg = qql_bulk::BatchConfig::new(&cli.output, wallet, cli.count);
    cfg.traits = qql_bulk::TraitSource::from_arg(&cli.traits);
    cfg.traits_dir = cli.traits_dir.clone();
    cfg.two_rings = cli.two_rings;
    cfg.palette_override = cli
        .palette_override
        .as_deref()
        .map(qql_bulk::PaletteOverride::from_arg)
        .transpose()
        .context("parse --palette_override")?;
    cfg.filter = qql_bulk::FilterPolicy {
        background: qql_bulk::background_from_arg(&cli.bg_color_override),
        min_points: cli.min_points,
    };
    cfg.overlay = cli.yunify.then(|| cli.overlay_asset.clone());
    cfg.keep_png = cli.keep_png;
    cfg.persistence =
        qql_bulk::Persistence::from_flags(cli.use_db, cli.render_host.as_deref())?;
    cfg.render_width = cli.render_width;
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = batch_config(&cli)?;

    let mut renderer = qql_bulk::SketchRenderer::new();
    let encoder = qql_bulk::WebpEncoder;

    let mut store = match cfg.persistence {
        qql_bulk::Persistence::Disabled => None,
        qql_bulk::Persistence::Enabled { .. } => {
            let path = cli
                .db_path
                .clone()
                .unwrap_or_else(|| qql_bulk::default_db_path(&cfg));
            tracing::info!("setting up DB at {}", path.display());
            Some(qql_bulk::RedbStore::open(&path).context("open render database")?)
        }
    };

    let mut runner = qql_bulk::BatchRunner::new(&cfg, &mut renderer, &encoder);
    if let Some(store) = store.as_mut() {
        runner = runner.with_store(store);
    }
    runner.run().context("bulk render")?;
    Ok(())
}
