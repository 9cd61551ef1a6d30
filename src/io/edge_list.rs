//! # EdgeList
//!
//! The EdgeList-Format consists of one non-comment-line per edge
//! `u,v[,weight[,capacity]]`, where the weight defaults to `1` and the capacity is absent
//! unless given. A line with a single field `u` registers an isolated vertex.
//! Blank lines and lines starting with the comment identifier (default `#`) are skipped.
//!
//! ```text
//! # a small network
//! s,a,1,10
//! s,b,2,5
//! a,t
//! lonely
//! ```

use std::{
    fmt::Display,
    io::{BufRead, Write},
    path::Path,
    str::FromStr,
};

use tracing::debug;

use super::*;

/// Separator between the fields of a line
const SEPARATOR: char = ',';

/// A GraphReader for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Orientation of the graph that is read
    direction: Direction,
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            direction: Direction::Directed,
            comment_identifier: "#".to_string(),
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader for directed graphs
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the orientation of the graph that is read
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Updates the orientation of the graph that is read
    pub fn direction(mut self, direction: Direction) -> EdgeListReader {
        self.set_direction(direction);
        self
    }

    /// Updates the comment identifier; an empty identifier disables comments
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> EdgeListReader {
        self.comment_identifier = c.into();
        self
    }

    fn is_comment(&self, line: &str) -> bool {
        !self.comment_identifier.is_empty() && line.starts_with(self.comment_identifier.as_str())
    }

    /// Parses a single non-comment-line into the graph
    fn parse_line<V: Vertex + FromStr>(
        &self,
        graph: &mut GraphStore<V>,
        line: &str,
        line_number: usize,
    ) -> Result<()> {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if let Some(extra) = fields.get(4) {
            return Err(GraphError::Parse {
                line: line_number,
                reason: format!("unexpected trailing field {:?}", extra.trim()),
            });
        }
        let mut parts = fields.into_iter();

        let from: V = parse_next_value!(parts, "source vertex", line_number);
        if parts.len() == 0 {
            graph.add_vertex(from);
            return Ok(());
        }
        let to: V = parse_next_value!(parts, "target vertex", line_number);

        let weight: Weight = if parts.len() == 0 {
            1.0
        } else {
            parse_next_value!(parts, "weight", line_number)
        };
        let capacity: Option<Capacity> = if parts.len() == 0 {
            None
        } else {
            Some(parse_next_value!(parts, "capacity", line_number))
        };

        graph.add_edge(from, to, weight, capacity)?;
        Ok(())
    }
}

impl<V: Vertex + FromStr> GraphReader<GraphStore<V>> for EdgeListReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<GraphStore<V>> {
        let mut graph = GraphStore::new(self.direction);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let content = line.trim();
            if content.is_empty() || self.is_comment(content) {
                continue;
            }
            self.parse_line(&mut graph, content, idx + 1)?;
        }

        debug!(
            direction = %self.direction,
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            "read edge list"
        );
        Ok(graph)
    }
}

/// Trait for creating graphs from an EdgeListReader.
/// Used as shorthand for default EdgeListReader settings
pub trait EdgeListRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_edge_list(BufReader::new(File::open(path)?))
    }
}

impl<V: Vertex + FromStr> EdgeListRead for GraphStore<V> {
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_graph(reader)
    }
}

/// A writer for the EdgeList-Format.
///
/// Isolated vertices are written first, followed by all edges in insertion order.
/// Every edge line carries its weight; the capacity is written only if the edge has one.
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter {
    /// Optional comment line written before the graph
    comment: Option<String>,
}

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `# comment` as the first line
    pub fn comment<S: Into<String>>(mut self, comment: S) -> EdgeListWriter {
        self.comment = Some(comment.into());
        self
    }
}

impl<V: Vertex + Display> GraphWriter<GraphStore<V>> for EdgeListWriter {
    fn try_write_graph<W: Write>(&self, graph: &GraphStore<V>, mut writer: W) -> Result<()> {
        if let Some(comment) = &self.comment {
            writeln!(writer, "# {comment}")?;
        }

        let mut covered = graph.vertex_bitset_unset();
        for record in graph.edge_records() {
            covered.set_bit(record.edge.0);
            covered.set_bit(record.edge.1);
        }
        for u in graph.vertices_range().filter(|&u| !covered.get_bit(u)) {
            writeln!(writer, "{}", graph.label_of(u))?;
        }

        for e in graph.edges() {
            write!(writer, "{}{SEPARATOR}{}{SEPARATOR}{}", e.source, e.target, e.weight)?;
            if let Some(c) = e.capacity {
                write!(writer, "{SEPARATOR}{c}")?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

/// Trait for writing a graph to a writer in the EdgeList-Format.
/// Shorthand for default settings.
pub trait EdgeListWrite {
    /// Tries to write the graph to a writer
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl<V: Vertex + Display> EdgeListWrite for GraphStore<V> {
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        EdgeListWriter::default().try_write_graph(self, writer)
    }
}
