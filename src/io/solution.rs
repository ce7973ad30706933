//! Reader for the `.sol` files published with the CMT / Golden sets.
//!
//! Line 2 holds the number of routes. Route lines start at line 5; the
//! first seven whitespace-separated tokens of a route line are bookkeeping
//! (day, vehicle, duration, load and so on) and the node sequence,
//! depot endpoints included, follows.

use std::path::Path;

use crate::error::{AbcError, Result};

const ROUTE_COUNT_LINE: usize = 2;
const FIRST_ROUTE_LINE: usize = 5;
const NODES_FROM_TOKEN: usize = 7;

/// Parses the routes of a best-known solution.
///
/// ```
/// use abc_cvrp::io::parse_best_known_routes;
///
/// let text = "\
/// 524.61
/// 2
/// 0
/// 0
/// 1 1 120 10 a b c 0 1 3 0
/// 1 2 80 7 a b c 0 2 0
/// ";
/// let routes = parse_best_known_routes(text).unwrap();
/// assert_eq!(routes, vec![vec![0, 1, 3, 0], vec![0, 2, 0]]);
/// ```
pub fn parse_best_known_routes(text: &str) -> Result<Vec<Vec<usize>>> {
    let lines: Vec<&str> = text.lines().collect();
    let count_line = lines.get(ROUTE_COUNT_LINE - 1).ok_or_else(|| AbcError::Parse {
        line: ROUTE_COUNT_LINE,
        message: "missing route count".into(),
    })?;
    let count: usize = count_line.trim().parse().map_err(|_| AbcError::Parse {
        line: ROUTE_COUNT_LINE,
        message: format!("cannot parse route count '{}'", count_line.trim()),
    })?;

    let mut routes = Vec::new();
    for k in 0..count {
        let line_no = FIRST_ROUTE_LINE + k;
        let line = lines.get(line_no - 1).ok_or_else(|| AbcError::Parse {
            line: line_no,
            message: format!("expected {count} routes, found {k}"),
        })?;
        let route = line
            .split_whitespace()
            .skip(NODES_FROM_TOKEN)
            .map(|token| {
                token.parse().map_err(|_| AbcError::Parse {
                    line: line_no,
                    message: format!("cannot parse node '{token}'"),
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        routes.push(route);
    }
    Ok(routes)
}

/// Reads and parses a `.sol` file.
pub fn load_best_known_routes(path: impl AsRef<Path>) -> Result<Vec<Vec<usize>>> {
    let text = std::fs::read_to_string(path)?;
    parse_best_known_routes(&text)
}
