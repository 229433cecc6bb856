use std::f32::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::filter::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Assigns a 2D position to every node of a scene, in `scene.nodes` order.
pub trait Layout {
    fn layout(&self, scene: &Scene) -> Vec<Point>;
}

/// Force-directed layout: charged nodes, edges as springs.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    pub iterations: usize,
    pub step: f32,
    pub radius: f32,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            iterations: 400,
            step: 0.03,
            radius: 100.0,
        }
    }
}

impl Layout for SpringLayout {
    fn layout(&self, scene: &Scene) -> Vec<Point> {
        let count = scene.nodes.len();
        let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
            force_charge: 150.0,
            force_spring: 0.05,
            force_max: 100.0,
            node_speed: 3000.0,
            damping_factor: 0.9,
        });

        let mut handles = Vec::with_capacity(count);
        for i in 0..count {
            let angle = i as f32 * 2.0 * PI / count as f32;
            handles.push(graph.add_node(NodeData {
                x: self.radius * angle.cos(),
                y: self.radius * angle.sin(),
                mass: 10.0,
                is_anchor: false,
                user_data: i,
            }));
        }

        for &(a, b) in &scene.edges {
            if a != b {
                graph.add_edge(handles[a], handles[b], EdgeData::default());
            }
        }

        for _ in 0..self.iterations {
            graph.update(self.step);
        }

        let mut positions = vec![Point::default(); count];
        graph.visit_nodes(|node| {
            positions[node.data.user_data] = Point {
                x: node.x() as f64,
                y: node.y() as f64,
            };
        });
        positions
    }
}
