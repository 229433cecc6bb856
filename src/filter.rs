use std::collections::HashMap;

use crate::graph::LinkGraph;

/// A node that survived the in-degree filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub label: String,
    /// Marker area, from the unfiltered in-degree.
    pub size: f64,
}

/// Filtered subgraph handed to layout and rendering. Edges index into `nodes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<(usize, usize)>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.nodes[a].id.as_str(), self.nodes[b].id.as_str()))
    }
}

/// Keeps nodes whose in-degree is strictly above `min_indeg`, and the edges
/// between them. Sizes are `in_degree * node_width`.
pub fn filter_graph(graph: &LinkGraph, min_indeg: i64, node_width: f64) -> Scene {
    let mut position = HashMap::new();
    let mut nodes = Vec::new();

    for id in graph.nodes() {
        let indeg = graph.in_degree(id);
        if !exceeds(indeg, min_indeg) {
            continue;
        }
        position.insert(id, nodes.len());
        nodes.push(SceneNode {
            id: id.to_string(),
            label: id.to_string(),
            size: indeg as f64 * node_width,
        });
    }

    let edges = graph
        .edges()
        .filter_map(|(a, b)| Some((*position.get(a)?, *position.get(b)?)))
        .collect();

    let scene = Scene { nodes, edges };
    tracing::info!(
        min_indeg,
        nodes = scene.nodes.len(),
        edges = scene.edges.len(),
        "filtered graph"
    );
    scene
}

fn exceeds(indeg: usize, threshold: i64) -> bool {
    i64::try_from(indeg).map_or(true, |d| d > threshold)
}
