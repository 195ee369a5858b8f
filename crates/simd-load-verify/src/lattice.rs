//! Conversion lattice: for each lane type, the ordered chain of source
//! element types a converting load must support.
//!
//! The walker advances with [`ConversionLattice::next`]; `None` is the
//! termination sentinel. Lane types without an entry have an empty chain.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::element::ElementType;
use crate::error::{Severity, Violation};

/// A directed edge: loads of `source` memory into `lane` vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ConversionEdge {
    pub lane: ElementType,
    pub source: ElementType,
}

/// Map from lane type to its ordered chain of source types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionLattice {
    chains: BTreeMap<ElementType, Vec<ElementType>>,
}

impl ConversionLattice {
    /// The lattice every reference backend is verified against.
    pub fn standard() -> Self {
        use ElementType::{F32, F64, I8, I16, I32, U8, U16, U32};
        Self::from_chains([
            (F32, vec![F64, I32, U32, I16, U16, I8, U8]),
            (I32, vec![U32, I16, U16, I8, U8]),
            (U32, vec![U16, U8]),
            (U16, vec![U8]),
            (I16, vec![U8, I8]),
        ])
    }

    pub fn from_chains(chains: impl IntoIterator<Item = (ElementType, Vec<ElementType>)>) -> Self {
        Self {
            chains: chains.into_iter().collect(),
        }
    }

    /// Source types for `lane`, in walk order. Empty if `lane` has no entry.
    pub fn chain(&self, lane: ElementType) -> &[ElementType] {
        self.chains.get(&lane).map_or(&[], Vec::as_slice)
    }

    /// The source type after `current` in the chain for `lane`, or the
    /// first one when `current` is `None`.
    ///
    /// Returns `None` at the end of the chain, for lanes without an entry,
    /// and for a `current` that is not part of the chain.
    pub fn next(&self, lane: ElementType, current: Option<ElementType>) -> Option<ElementType> {
        let chain = self.chain(lane);
        match current {
            None => chain.first().copied(),
            Some(cur) => {
                let pos = chain.iter().position(|&s| s == cur)?;
                chain.get(pos + 1).copied()
            }
        }
    }

    /// Lane types with a non-empty chain.
    pub fn lanes(&self) -> impl Iterator<Item = ElementType> + '_ {
        self.chains
            .iter()
            .filter(|(_, chain)| !chain.is_empty())
            .map(|(&lane, _)| lane)
    }

    pub fn edges(&self) -> Vec<ConversionEdge> {
        self.chains
            .iter()
            .flat_map(|(&lane, chain)| {
                chain.iter().map(move |&source| ConversionEdge { lane, source })
            })
            .collect()
    }

    /// Length of the longest chain.
    pub fn depth(&self) -> usize {
        self.chains.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Render as a Graphviz digraph, one edge per conversion, labelled by
    /// its position in the chain.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph lattice {\n    rankdir=LR;\n");
        for (lane, chain) in &self.chains {
            for (i, source) in chain.iter().enumerate() {
                let _ = writeln!(out, "    \"{lane}\" -> \"{source}\" [label=\"{}\"];", i + 1);
            }
        }
        out.push_str("}\n");
        out
    }
}

/// Check a lattice for the properties the walker relies on.
///
/// Self edges, duplicate chain entries and cycles are errors. Edges that
/// load a wider source or change signedness at equal width are reported
/// as informational; float sources feeding integer lanes are warnings.
pub fn validate_lattice(lattice: &ConversionLattice) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (&lane, chain) in &lattice.chains {
        let mut seen = BTreeSet::new();
        for &source in chain {
            let location = Some(format!("{lane} <- {source}"));
            if source == lane {
                violations.push(Violation {
                    severity: Severity::Error,
                    rule: "LAT-001".to_string(),
                    message: format!("{lane} lists itself as a conversion source"),
                    location: location.clone(),
                });
            }
            if !seen.insert(source) {
                violations.push(Violation {
                    severity: Severity::Error,
                    rule: "LAT-002".to_string(),
                    message: format!("{source} appears more than once in the chain for {lane}"),
                    location: location.clone(),
                });
            }
            if source.size() > lane.size() {
                violations.push(Violation {
                    severity: Severity::Info,
                    rule: "LAT-004".to_string(),
                    message: format!(
                        "{source} ({} bytes) is wider than lane {lane} ({} bytes)",
                        source.size(),
                        lane.size()
                    ),
                    location: location.clone(),
                });
            } else if source.size() == lane.size()
                && source != lane
                && source.is_signed() != lane.is_signed()
                && !source.is_float()
                && !lane.is_float()
            {
                violations.push(Violation {
                    severity: Severity::Info,
                    rule: "LAT-005".to_string(),
                    message: format!("{source} -> {lane} changes signedness at equal width"),
                    location: location.clone(),
                });
            }
            if source.is_float() && !lane.is_float() {
                violations.push(Violation {
                    severity: Severity::Warning,
                    rule: "LAT-006".to_string(),
                    message: format!("float source {source} loaded into integer lane {lane}"),
                    location,
                });
            }
        }
    }

    for cycle in detect_cycles(&lattice.chains) {
        let path: Vec<_> = cycle.iter().map(|t| t.name()).collect();
        violations.push(Violation {
            severity: Severity::Error,
            rule: "LAT-003".to_string(),
            message: format!("conversion cycle: {}", path.join(" -> ")),
            location: cycle.first().map(ToString::to_string),
        });
    }

    violations
}

#[derive(Clone, Copy, PartialEq)]
enum DfsColor {
    White,
    Gray,
    Black,
}

fn dfs_visit(
    node: ElementType,
    edges: &BTreeMap<ElementType, Vec<ElementType>>,
    color: &mut BTreeMap<ElementType, DfsColor>,
    path: &mut Vec<ElementType>,
    cycles: &mut Vec<Vec<ElementType>>,
) {
    color.insert(node, DfsColor::Gray);
    path.push(node);

    for &next in edges.get(&node).into_iter().flatten() {
        // Self edges are LAT-001.
        if next == node {
            continue;
        }
        match color.get(&next).copied().unwrap_or(DfsColor::White) {
            DfsColor::Gray => {
                if let Some(pos) = path.iter().position(|&n| n == next) {
                    cycles.push(path[pos..].to_vec());
                }
            }
            DfsColor::White => dfs_visit(next, edges, color, path, cycles),
            DfsColor::Black => {}
        }
    }

    path.pop();
    color.insert(node, DfsColor::Black);
}

fn detect_cycles(edges: &BTreeMap<ElementType, Vec<ElementType>>) -> Vec<Vec<ElementType>> {
    let mut color = BTreeMap::new();
    let mut cycles = Vec::new();
    let mut path = Vec::new();
    for &node in edges.keys() {
        if color.get(&node).copied().unwrap_or(DfsColor::White) == DfsColor::White {
            dfs_visit(node, edges, &mut color, &mut path, &mut cycles);
        }
    }
    cycles
}
