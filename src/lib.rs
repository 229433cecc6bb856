pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod layout;
pub mod parser;
pub mod render;

use std::fs;
use std::path::PathBuf;

pub use crate::config::RenderConfig;
pub use crate::error::{Error, Result};
pub use crate::filter::{filter_graph, Scene};
pub use crate::graph::LinkGraph;
pub use crate::layout::{Layout, SpringLayout};
pub use crate::render::{Renderer, SvgRenderer};

pub const INPUT_PATH: &str = "urls.txt";
pub const OUTPUT_PATH: &str = "graph.svg";

/// File locations used by one pipeline run.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            config: PathBuf::from(config::CONFIG_PATH),
            input: PathBuf::from(INPUT_PATH),
            output: PathBuf::from(OUTPUT_PATH),
        }
    }
}

/// Loads the config, builds and filters the graph, and writes the rendered image.
///
/// The image is only written once everything before it has succeeded.
pub fn run(paths: &Paths, layout: &impl Layout, renderer: &impl Renderer) -> Result<Scene> {
    let config = RenderConfig::load(&paths.config)?;
    let graph = LinkGraph::read_from(&paths.input)?;

    let scene = filter_graph(&graph, config.min_indeg, config.node_width);
    let positions = layout.layout(&scene);
    let image = renderer.render(&scene, &positions, &config);

    fs::write(&paths.output, image).map_err(|e| Error::io(&paths.output, e))?;
    tracing::info!(path = %paths.output.display(), "wrote graph image");

    Ok(scene)
}
