//! Scenario text loader.
//!
//! # Format
//!
//! Only lines starting with `#` carry data; anything else is a comment.
//!
//! ```text
//! #N 4                 number of vertices
//! #V1 D7 S             vertex 1: shelter, deadline 7
//! #V2 D5 P3            vertex 2: deadline 5, 3 people
//! #E1 1 2 W4           edge 1 joins vertices 1 and 2, weight 4
//! ```
//!
//! Vertices get `NodeId`s in declaration order.  Edge lines may reference a
//! vertex declared further down; they are resolved after the whole input has
//! been read.

use std::fs;
use std::path::Path;

use evac_core::Tick;

use crate::network::{Graph, GraphBuilder};
use crate::{GraphError, GraphResult};

/// Read and parse a scenario file.
pub fn load_scenario_file(path: &Path) -> GraphResult<Graph> {
    let text = fs::read_to_string(path)?;
    load_scenario_str(&text)
}

struct RawEdge {
    name:   String,
    u:      String,
    v:      String,
    weight: u64,
}

/// Parse a scenario from an in-memory string.
///
/// Rejects a declared vertex count that doesn't match the vertex lines,
/// edges naming unknown vertices, and duplicate edges.
pub fn load_scenario_str(text: &str) -> GraphResult<Graph> {
    let mut declared: Option<usize> = None;
    let mut builder = GraphBuilder::new();
    let mut raw_edges = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let Some(body) = raw.trim().strip_prefix('#') else {
            continue;
        };
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let Some(&head) = tokens.first() else {
            continue;
        };

        if head == "N" {
            let n = tokens
                .get(1)
                .ok_or_else(|| parse_err(line, "missing vertex count"))?;
            declared = Some(number(line, n)? as usize);
        } else if head.starts_with('V') && head.len() > 1 {
            let deadline = prefixed(line, tokens.get(1).copied(), 'D')?;
            match tokens.get(2).copied() {
                Some("S") => {
                    builder.add_shelter(head, Tick(deadline));
                }
                Some(tok) if tok.starts_with('P') => {
                    let people = prefixed(line, Some(tok), 'P')?;
                    let people = u32::try_from(people)
                        .map_err(|_| parse_err(line, "people count out of range"))?;
                    builder.add_node(head, Tick(deadline), people);
                }
                _ => return Err(parse_err(line, "vertex must end with S or P<count>")),
            }
        } else if head.starts_with('E') && head.len() > 1 {
            if tokens.len() < 4 {
                return Err(parse_err(line, "edge needs two endpoints and a weight"));
            }
            raw_edges.push(RawEdge {
                name:   head.to_string(),
                u:      format!("V{}", tokens[1]),
                v:      format!("V{}", tokens[2]),
                weight: prefixed(line, Some(tokens[3]), 'W')?,
            });
        }
    }

    if let Some(n) = declared {
        if n != builder.node_count() {
            return Err(GraphError::CountMismatch { declared: n, found: builder.node_count() });
        }
    }

    for e in raw_edges {
        let u = builder.find(&e.u).ok_or_else(|| GraphError::UnknownLabel(e.u.clone()))?;
        let v = builder.find(&e.v).ok_or_else(|| GraphError::UnknownLabel(e.v.clone()))?;
        builder.add_named_edge(e.name, u, v, e.weight)?;
    }

    Ok(builder.build())
}

fn number(line: usize, tok: &str) -> GraphResult<u64> {
    tok.parse()
        .map_err(|_| parse_err(line, &format!("expected a number, got {tok:?}")))
}

/// Parse `<prefix><digits>`, e.g. `D12`.
fn prefixed(line: usize, tok: Option<&str>, prefix: char) -> GraphResult<u64> {
    let tok = tok.ok_or_else(|| parse_err(line, &format!("missing {prefix}<n> field")))?;
    let digits = tok
        .strip_prefix(prefix)
        .ok_or_else(|| parse_err(line, &format!("expected {prefix}<n>, got {tok:?}")))?;
    number(line, digits)
}

fn parse_err(line: usize, msg: &str) -> GraphError {
    GraphError::Parse { line, msg: msg.to_string() }
}
