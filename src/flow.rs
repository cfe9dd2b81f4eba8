//! Flow-routing collaborator interface.
//!
//! Basin extraction only needs to walk downstream: every valid cell owns a
//! linear node index and a receiver node, and junctions mark basin outlets.
//! The routing itself (D8, D-infinity, ...) is somebody else's problem; this
//! module defines the contract and one dense in-memory implementation.

use crate::error::{GeomorphError, Result};

/// Per-cell downstream links and junction membership, consumed by value and
/// index only; a basin never stores a reference into the topology.
pub trait FlowTopology {
    /// Number of valid (routed) cells.
    fn node_count(&self) -> usize;

    /// Linear node index of the cell at `(row, col)`, or `None` for a nodata
    /// cell that carries no flow.
    fn node_index(&self, row: usize, col: usize) -> Option<usize>;

    /// Grid position of a node.
    fn row_col(&self, node: usize) -> (usize, usize);

    /// The node this node drains into. Base-level nodes receive themselves;
    /// that fixpoint terminates every downstream walk.
    fn receiver(&self, node: usize) -> usize;

    /// The outlet node of a junction, or `None` for an unknown junction id.
    fn junction_node(&self, junction: usize) -> Option<usize>;

    /// Strahler stream order at a junction's outlet.
    fn stream_order(&self, junction: usize) -> Option<u32>;

    /// Follows receiver links from `node` to its terminal (base-level or
    /// outlet-crossing) node.
    fn terminal_receiver(&self, node: usize, stop_at: usize) -> usize {
        let mut current = node;
        loop {
            if current == stop_at {
                return current;
            }
            let next = self.receiver(current);
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

/// A dense receiver table: one node per valid cell in row-major order, plus a
/// junction table mapping outlet ids to nodes and stream orders.
#[derive(Debug, Clone)]
pub struct ReceiverTable {
    rows: usize,
    cols: usize,
    /// Node index per cell, `usize::MAX` marking nodata cells.
    node_of_cell: Vec<usize>,
    /// Grid position per node.
    cell_of_node: Vec<(usize, usize)>,
    /// Receiver node per node.
    receivers: Vec<usize>,
    /// (outlet node, stream order) per junction id, indexed by id.
    junctions: Vec<(usize, u32)>,
}

impl ReceiverTable {
    /// Builds a table from a per-cell receiver map given as `(row, col)`
    /// targets; `None` cells are unrouted (nodata). A cell whose receiver is
    /// itself, or whose receiver falls on an unrouted cell, becomes base
    /// level.
    pub fn from_cell_receivers(
        rows: usize,
        cols: usize,
        receivers: &[Option<(usize, usize)>],
        junctions: Vec<((usize, usize), u32)>,
    ) -> Result<Self> {
        if receivers.len() != rows * cols {
            return Err(GeomorphError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                found_rows: receivers.len() / cols.max(1),
                found_cols: cols,
            });
        }

        let mut node_of_cell = vec![usize::MAX; rows * cols];
        let mut cell_of_node = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                if receivers[row * cols + col].is_some() {
                    node_of_cell[row * cols + col] = cell_of_node.len();
                    cell_of_node.push((row, col));
                }
            }
        }

        let mut receiver_nodes = Vec::with_capacity(cell_of_node.len());
        for &(row, col) in &cell_of_node {
            let node = node_of_cell[row * cols + col];
            let (r_row, r_col) = receivers[row * cols + col].unwrap();
            let target = node_of_cell
                .get(r_row * cols + r_col)
                .copied()
                .unwrap_or(usize::MAX);
            receiver_nodes.push(if target == usize::MAX { node } else { target });
        }

        let mut junction_table = Vec::with_capacity(junctions.len());
        for ((row, col), order) in junctions {
            let node = node_of_cell[row * cols + col];
            if node == usize::MAX {
                return Err(GeomorphError::InvalidJunction(junction_table.len()));
            }
            junction_table.push((node, order));
        }

        Ok(ReceiverTable {
            rows,
            cols,
            node_of_cell,
            cell_of_node,
            receivers: receiver_nodes,
            junctions: junction_table,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl FlowTopology for ReceiverTable {
    fn node_count(&self) -> usize {
        self.cell_of_node.len()
    }

    fn node_index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        match self.node_of_cell[row * self.cols + col] {
            usize::MAX => None,
            node => Some(node),
        }
    }

    fn row_col(&self, node: usize) -> (usize, usize) {
        self.cell_of_node[node]
    }

    fn receiver(&self, node: usize) -> usize {
        self.receivers[node]
    }

    fn junction_node(&self, junction: usize) -> Option<usize> {
        self.junctions.get(junction).map(|&(node, _)| node)
    }

    fn stream_order(&self, junction: usize) -> Option<u32> {
        self.junctions.get(junction).map(|&(_, order)| order)
    }
}
