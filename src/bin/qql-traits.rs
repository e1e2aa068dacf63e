use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "qql-traits",
    version,
    about = "Print the seed and traits encoded in an output filename."
)]
struct Cli {
    /// Output file name or path (image, sidecar or `yun_` overlay).
    filename: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let seed = qql_bulk::seed_from_filename(&cli.filename)
        .with_context(|| format!("read seed from '{}'", cli.filename))?;
    let traits = qql_bulk::traits_from_seed(&seed).context("decode traits")?;

    println!("Seed: {seed}");
    println!("Wallet: {}", seed.wallet());
    println!("Entropy: {:016x}", seed.entropy().context("decode entropy")?);
    if seed.is_two_rings() {
        println!("Two rings: yes");
    }
    println!(
        "Traits:\n{}",
        serde_json::to_string_pretty(&traits).context("serialize traits")?
    );
    Ok(())
}
