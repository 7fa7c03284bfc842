//! Header layout engine.
//!
//! Turns the column tree into a flat list of leaves plus the
//! `rowspan`/`colspan` grid of the header. Runs once per table.
//!
//! A node's subtree row count is 0 for a leaf and `1 + max(children)` for a
//! group. With header height `H`, a node starting on header row `L` whose
//! subtree uses `r` rows spans `H - L - r` rows and its children start right
//! below it. Every leaf therefore ends on the last header row, and groups
//! stretch down over rows their subtree leaves unused.

use crate::column::{Column, ColumnNode};
use crate::error::ConfigurationError;

/// A leaf column together with its position in every row.
#[derive(Debug, Clone)]
pub struct LeafMeta {
    /// Position of this leaf's value in every row.
    pub index: usize,
    /// Header row the leaf's header cell starts on.
    pub level: usize,
    /// Names of the enclosing groups, outermost first.
    pub groups: Vec<String>,
    /// Leaf configuration.
    pub column: Column,
}

/// One `<th>` of the header grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    /// Header row this cell starts on.
    pub level: usize,
    pub rowspan: usize,
    pub colspan: usize,
    /// Leaf index for leaf headers, `None` for groups.
    pub leaf: Option<usize>,
}

/// Computed header grid for a column tree.
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    width: usize,
    height: usize,
    leaves: Vec<LeafMeta>,
    rows: Vec<Vec<HeaderCell>>,
}

/// Pass 1 result, mirroring the column tree.
struct Measured {
    rows: usize,
    cols: usize,
    children: Vec<Measured>,
}

fn measure(node: &ColumnNode) -> Result<Measured, ConfigurationError> {
    match node {
        ColumnNode::Leaf(_) => Ok(Measured {
            rows: 0,
            cols: 1,
            children: Vec::new(),
        }),
        ColumnNode::Group { name, children } => {
            if children.is_empty() {
                return Err(ConfigurationError::EmptyGroup(name.clone()));
            }
            let children = children
                .iter()
                .map(measure)
                .collect::<Result<Vec<_>, _>>()?;
            let rows = 1 + children.iter().map(|c| c.rows).max().unwrap_or(0);
            let cols = children.iter().map(|c| c.cols).sum();
            Ok(Measured {
                rows,
                cols,
                children,
            })
        }
    }
}

impl HeaderLayout {
    /// Lay out `tree` (the top-level nodes, left to right).
    pub fn new(tree: &[ColumnNode]) -> Result<Self, ConfigurationError> {
        let measured = tree.iter().map(measure).collect::<Result<Vec<_>, _>>()?;

        let width: usize = measured.iter().map(|m| m.cols).sum();
        if width == 0 {
            return Err(ConfigurationError::NoColumns);
        }
        let height = 1 + measured.iter().map(|m| m.rows).max().unwrap_or(0);

        let mut layout = Self {
            width,
            height,
            leaves: Vec::with_capacity(width),
            rows: vec![Vec::new(); height],
        };
        let mut groups = Vec::new();
        for (node, m) in tree.iter().zip(&measured) {
            layout.place(node, m, 0, &mut groups);
        }

        log::debug!(
            "header layout: {} leaves, {} header rows",
            layout.width,
            layout.height
        );
        Ok(layout)
    }

    /// Pass 2: emit header cells and number leaves in pre-order.
    fn place(&mut self, node: &ColumnNode, m: &Measured, level: usize, groups: &mut Vec<String>) {
        let rowspan = self.height - level - m.rows;
        match node {
            ColumnNode::Leaf(column) => {
                let index = self.leaves.len();
                self.rows[level].push(HeaderCell {
                    label: column.name.clone(),
                    level,
                    rowspan,
                    colspan: 1,
                    leaf: Some(index),
                });
                self.leaves.push(LeafMeta {
                    index,
                    level,
                    groups: groups.clone(),
                    column: column.clone(),
                });
            }
            ColumnNode::Group { name, children } => {
                self.rows[level].push(HeaderCell {
                    label: name.clone(),
                    level,
                    rowspan,
                    colspan: m.cols,
                    leaf: None,
                });
                groups.push(name.clone());
                for (child, cm) in children.iter().zip(&m.children) {
                    self.place(child, cm, level + rowspan, groups);
                }
                groups.pop();
            }
        }
    }

    /// Number of leaf columns (header width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of header rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn leaves(&self) -> &[LeafMeta] {
        &self.leaves
    }

    pub fn leaf(&self, index: usize) -> Option<&LeafMeta> {
        self.leaves.get(index)
    }

    /// Header cells grouped by the row they start on.
    pub fn rows(&self) -> &[Vec<HeaderCell>] {
        &self.rows
    }
}
