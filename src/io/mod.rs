/*!
# IO

Utilities for reading and writing graphs from and to plain-text files.

Currently, the only supported format is the comma-separated **EdgeList** format, see
[`edge_list`] for details. Vertex identifiers are read with [`FromStr`](std::str::FromStr) and
written with [`Display`](std::fmt::Display), weights and capacities are `f64`.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by configurable readers and writers,
- [`EdgeListRead`] and [`EdgeListWrite`] are shorthands using the default configuration.
*/

pub mod edge_list;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::prelude::*;

pub use edge_list::*;

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns [`GraphError::Parse`] if the input is not a valid representation
    /// of a graph in the expected format and [`GraphError::Io`] if reading fails.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered reader.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
///
/// This trait provides both a low-level method to write to any
/// [`Write`] instance and a convenience wrapper to write directly
/// to files.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] if writing fails.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered writer.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_graph(graph, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Tries to parse the next field of a line and returns early with a [`GraphError::Parse`]
/// naming the line if it is missing or malformed
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr, $line : expr) => {{
        let Some(field) = $iterator.next() else {
            return Err(GraphError::Parse {
                line: $line,
                reason: format!("premature end of line when parsing {}", $name),
            });
        };

        match field.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(GraphError::Parse {
                    line: $line,
                    reason: format!("cannot parse {} from {:?}", $name, field.trim()),
                });
            }
        }
    }};
}

use parse_next_value;
