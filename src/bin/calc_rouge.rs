use anyhow::Result;
use clap::Parser;
use pointer_summary_eval::cli::RougeCli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pointer_summary_eval=info".parse()?),
        )
        .init();

    RougeCli::parse().run()
}
