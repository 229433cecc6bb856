use std::fmt::Write;

use crate::config::RenderConfig;
use crate::filter::Scene;
use crate::layout::Point;

/// Turns a positioned scene into an image document.
pub trait Renderer {
    fn render(&self, scene: &Scene, positions: &[Point], style: &RenderConfig) -> String;
}

#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            margin: 20.0,
        }
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, scene: &Scene, positions: &[Point], style: &RenderConfig) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = String::new();

        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");

        let points = self.fit(positions);
        let radii: Vec<f64> = scene.nodes.iter().map(|n| n.size.sqrt() / 2.0).collect();

        let edge_color = svg_color(&style.edge_color);
        let _ = write!(
            svg,
            "<g class=\"edges\" stroke=\"{}\" fill=\"{}\" stroke-width=\"{}\" opacity=\"{}\">",
            escape_xml(edge_color),
            escape_xml(edge_color),
            style.width,
            style.alpha
        );
        for &(a, b) in &scene.edges {
            if a == b {
                continue;
            }
            let (Some(from), Some(to)) = (points.get(a), points.get(b)) else {
                continue;
            };
            let radius = radii.get(b).copied().unwrap_or(0.0);
            draw_edge(&mut svg, *from, *to, radius, style.arrowsize);
        }
        svg.push_str("</g>");

        let _ = write!(
            svg,
            "<g class=\"nodes\" fill=\"{}\" fill-opacity=\"{}\">",
            escape_xml(svg_color(&style.node_color)),
            style.alpha
        );
        for (p, r) in points.iter().zip(&radii) {
            let _ = write!(svg, "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>", p.x, p.y, r);
        }
        svg.push_str("</g>");

        let _ = write!(
            svg,
            "<g class=\"labels\" font-family=\"sans-serif\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">",
            style.font_size,
            escape_xml(&style.font_weight),
            escape_xml(svg_color(&style.font_color))
        );
        for (node, p) in scene.nodes.iter().zip(&points) {
            let _ = write!(
                svg,
                "<text x=\"{:.2}\" y=\"{:.2}\">{}</text>",
                p.x,
                p.y,
                escape_xml(&node.label)
            );
        }
        svg.push_str("</g></svg>\n");

        svg
    }
}

impl SvgRenderer {
    /// Scales layout coordinates into the canvas, keeping the aspect ratio.
    fn fit(&self, positions: &[Point]) -> Vec<Point> {
        let center = Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        };
        if positions.is_empty() {
            return Vec::new();
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in positions {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let span = (max_x - min_x).max(max_y - min_y);
        if !span.is_finite() || span <= f64::EPSILON {
            return vec![center; positions.len()];
        }
        let inner = (self.width.min(self.height) - 2.0 * self.margin).max(0.0);
        let scale = inner / span;
        let (mid_x, mid_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

        positions
            .iter()
            .map(|p| Point {
                x: center.x + (p.x - mid_x) * scale,
                y: center.y + (p.y - mid_y) * scale,
            })
            .collect()
    }
}

// Line from `from` to the rim of the target node, then a filled arrowhead.
// Nothing is drawn when the source sits inside the target's marker.
fn draw_edge(svg: &mut String, from: Point, to: Point, target_radius: f64, arrow: f64) {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let dist = (dx * dx + dy * dy).sqrt();
    let reach = dist - target_radius;
    if dist < 0.001 || reach <= 0.0 {
        return;
    }
    let (ux, uy) = (dx / dist, dy / dist);
    let arrow = arrow.min(reach);
    let (tip_x, tip_y) = (to.x - ux * target_radius, to.y - uy * target_radius);
    let (back_x, back_y) = (tip_x - ux * arrow, tip_y - uy * arrow);
    let (px, py) = (-uy * arrow * 0.4, ux * arrow * 0.4);

    if reach > arrow {
        let _ = write!(
            svg,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            from.x, from.y, back_x, back_y
        );
    }
    if arrow > 0.0 {
        let _ = write!(
            svg,
            "<polygon stroke=\"none\" points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\"/>",
            tip_x,
            tip_y,
            back_x + px,
            back_y + py,
            back_x - px,
            back_y - py
        );
    }
}

/// Expands single-letter plotting shorthands; anything else is passed through.
fn svg_color(spec: &str) -> &str {
    match spec {
        "b" => "blue",
        "g" => "green",
        "r" => "red",
        "c" => "cyan",
        "m" => "magenta",
        "y" => "yellow",
        "k" => "black",
        "w" => "white",
        other => other,
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
