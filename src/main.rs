use std::error::Error;

use graaf::{run, Paths, SpringLayout, SvgRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(
        &Paths::default(),
        &SpringLayout::default(),
        &SvgRenderer::default(),
    )?;

    Ok(())
}
