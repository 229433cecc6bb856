use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use petgraph::Directed;
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::Graph;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::parser::{parse_line, Record};

/// Directed link graph keyed by node id.
///
/// Parallel edges collapse: adding an edge that already exists is a no-op, so
/// in-degree counts distinct predecessors.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: Graph<String, (), Directed>,
    index: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from every line of `path`, aborting on the first malformed line.
    pub fn read_from(path: impl AsRef<Path>) -> Result<LinkGraph> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = BufReader::new(file);

        let mut graph = LinkGraph::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io(path, e))?;
            graph.ingest(&parse_line(&line, i + 1)?);
        }

        tracing::info!(path = %path.display(), "{}", graph.summary());
        Ok(graph)
    }

    /// Registers the record's node and all of its edges.
    pub fn ingest(&mut self, record: &Record<'_>) {
        tracing::trace!(id = record.id, "ingest");
        self.add_node(record.id);
        for (from, to) in record.edges() {
            self.add_edge(from, to);
        }
    }

    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Adds both endpoints if needed, then the edge unless it is already present.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        if !self.graph.contains_edge(a, b) {
            self.graph.add_edge(a, b, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |n| self.graph[n].as_str())
    }

    /// Edges as `(from, to)` id pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.raw_edges().iter().map(move |e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
            )
        })
    }

    /// Number of distinct predecessors; 0 for unknown ids.
    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Incoming)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Outgoing)
    }

    fn degree(&self, id: &str, dir: petgraph::Direction) -> usize {
        self.index
            .get(id)
            .map_or(0, |&n| self.graph.neighbors_directed(n, dir).count())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            nodes: self.node_count(),
            edges: self.edge_count(),
        }
    }

    /// Fewest-hop directed path from `src` to `dst`, both ends included.
    /// A node always reaches itself with a single-node route.
    pub fn shortest_path(&self, src: &str, dst: &str) -> Result<Option<Route>> {
        let start = self.lookup(src)?;
        let goal = self.lookup(dst)?;

        let found = astar(&self.graph, start, |n| n == goal, |_| 1usize, |_| 0);
        Ok(found.map(|(_, nodes)| {
            Route(nodes.into_iter().map(|n| self.graph[n].clone()).collect())
        }))
    }

    fn lookup(&self, id: &str) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    /// Writes the graph back in the input line format, one line per node.
    pub fn write_edge_list<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for n in self.graph.node_indices() {
            let join = |dir: petgraph::Direction| {
                // neighbors_directed walks newest-first
                let mut ids: Vec<&str> = self
                    .graph
                    .neighbors_directed(n, dir)
                    .map(|m| self.graph[m].as_str())
                    .collect();
                ids.reverse();
                ids.join(",")
            };
            writeln!(out, "{};{};{}", self.graph[n], join(Incoming), join(Outgoing))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub nodes: usize,
    pub edges: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "number of nodes: {}, number of edges: {}",
            self.nodes, self.edges
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route(pub Vec<String>);

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn build(lines: &[&str]) -> LinkGraph {
        let mut graph = LinkGraph::new();
        for (i, line) in lines.iter().enumerate() {
            graph.ingest(&parse_line(line, i + 1).unwrap());
        }
        graph
    }

    fn edge_set(graph: &LinkGraph) -> BTreeSet<(String, String)> {
        graph
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_degrees_from_records() {
        let graph = build(&["A;B,C;D", "B;;", "C;;", "D;;"]);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.in_degree("A"), 2);
        assert_eq!(graph.out_degree("A"), 1);
        assert_eq!(graph.in_degree("D"), 1);
        assert_eq!(graph.in_degree("B"), 0);
    }

    #[test]
    fn test_lone_node_has_no_edges() {
        let graph = build(&["A;;"]);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_node(""));
    }

    #[test]
    fn test_parallel_edges_collapse() {
        // both records declare B -> A
        let graph = build(&["A;B,B;", "B;;A"]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.in_degree("A"), 1);
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = LinkGraph::new();
        let a = graph.add_node("A");
        assert_eq!(graph.add_node("A"), a);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_edge_endpoints_are_nodes() {
        let graph = build(&["A;X,Y;Z", "Q;;A,R", "R;Q;"]);
        for (from, to) in graph.edges() {
            assert!(graph.contains_node(from), "{from}");
            assert!(graph.contains_node(to), "{to}");
        }
        assert!(graph.contains_edge("Q", "R"));
        assert!(!graph.contains_edge("R", "Q"));
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "a.com;;b.com,c.com\nb.com;a.com;c.com\nc.com;;\n").unwrap();

        let graph = LinkGraph::read_from(&path).unwrap();
        assert_eq!(graph.summary(), Summary { nodes: 3, edges: 3 });
        assert_eq!(graph.in_degree("c.com"), 2);
    }

    #[test]
    fn test_read_aborts_on_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "A;;\nA;B\nC;;\n").unwrap();

        let err = LinkGraph::read_from(&path).unwrap_err();
        assert!(matches!(err, Error::Format { line: 2, .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinkGraph::read_from(dir.path().join("urls.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_construction_is_repeatable() {
        let lines = ["A;B,C;D", "B;;C", "C;D;", "D;;A"];
        let first = build(&lines);
        let second = build(&lines);

        let first_nodes: BTreeSet<_> = first.nodes().collect();
        let second_nodes: BTreeSet<_> = second.nodes().collect();
        assert_eq!(first_nodes, second_nodes);
        assert_eq!(edge_set(&first), edge_set(&second));
    }

    #[test]
    fn test_shortest_path() {
        let graph = build(&["a;;b,c", "b;;d", "c;;e", "e;;d", "d;;", "x;;"]);

        let path = graph.shortest_path("a", "d").unwrap().unwrap();
        assert_eq!(path.to_string(), "a -> b -> d");

        assert_eq!(graph.shortest_path("d", "a").unwrap(), None);
        assert_eq!(
            graph.shortest_path("x", "x").unwrap(),
            Some(Route(vec!["x".to_string()]))
        );
        assert!(matches!(
            graph.shortest_path("a", "nowhere"),
            Err(Error::UnknownNode(id)) if id == "nowhere"
        ));
    }

    #[test]
    fn test_edge_list_rebuilds_same_graph() {
        let graph = build(&["A;B,C;D", "B;;C", "D;;A"]);

        let mut out = Vec::new();
        graph.write_edge_list(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().any(|l| l == "A;B,C,D;D"), "{text}");

        let lines: Vec<&str> = text.lines().collect();
        let rebuilt = build(&lines);
        assert_eq!(edge_set(&rebuilt), edge_set(&graph));
        assert_eq!(rebuilt.node_count(), graph.node_count());
    }
}
