//! Reader for CMT / Golden style `.vrp` instance files.
//!
//! ```text
//! NAME : CMT1
//! COMMENT : 524.61
//! DIMENSION : 51
//! CAPACITY : 160
//! DISTANCE : 200
//! SERVICE_TIME : 10
//! VEHICLES : 5
//! NODE_COORD_SECTION
//! 1 37 52
//! ...
//! DEMAND_SECTION
//! 1 7
//! ...
//! DEPOT_SECTION
//! 30 40
//! -1
//! EOF
//! ```
//!
//! `DIMENSION` counts the depot. When the depot section holds coordinates,
//! the node and demand sections list the customers only, in order. When it
//! holds a single node id, both sections cover every node and the depot is
//! picked out by that id.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{AbcError, Result};
use crate::models::{Customer, CvrpInstance, DEFAULT_CAPACITY, DEFAULT_DURATION};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Header,
    Nodes,
    Demands,
    Depot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DepotLine {
    Coordinates(f64, f64),
    Id(i64),
}

#[derive(Default)]
struct Header {
    name: Option<String>,
    best_known: Option<f64>,
    dimension: Option<usize>,
    capacity: Option<i32>,
    duration: Option<f64>,
    service_time: Option<f64>,
    vehicles: Option<usize>,
}

/// Parses an instance from the text of a `.vrp` file.
///
/// ```
/// use abc_cvrp::io::parse_instance;
///
/// let text = "\
/// NAME : tiny
/// COMMENT : 12.5
/// DIMENSION : 3
/// CAPACITY : 10
/// VEHICLES : 2
/// NODE_COORD_SECTION
/// 1 3 4
/// 2 6 8
/// DEMAND_SECTION
/// 1 4
/// 2 5
/// DEPOT_SECTION
/// 0 0
/// -1
/// EOF
/// ";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.name(), "tiny");
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.best_known(), Some(12.5));
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-12);
/// ```
pub fn parse_instance(text: &str) -> Result<CvrpInstance> {
    let mut header = Header::default();
    let mut section = Section::Header;
    let mut nodes: Vec<(i64, f64, f64)> = Vec::new();
    let mut demands: Vec<(i64, i32)> = Vec::new();
    let mut depot: Option<DepotLine> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        match line {
            "NODE_COORD_SECTION" => {
                section = Section::Nodes;
                continue;
            }
            "DEMAND_SECTION" => {
                section = Section::Demands;
                continue;
            }
            "DEPOT_SECTION" => {
                section = Section::Depot;
                continue;
            }
            _ => {}
        }

        match section {
            Section::Header => read_header_line(&mut header, line, line_no)?,
            Section::Nodes => {
                let fields = expect_fields(line, 3, line_no, "node")?;
                nodes.push((
                    parse_id(fields[0], line_no)?,
                    parse_number(fields[1], line_no, "x coordinate")?,
                    parse_number(fields[2], line_no, "y coordinate")?,
                ));
            }
            Section::Demands => {
                let fields = expect_fields(line, 2, line_no, "demand")?;
                demands.push((parse_id(fields[0], line_no)?, parse_demand(fields[1], line_no)?));
            }
            Section::Depot => {
                if line == "-1" {
                    section = Section::Header;
                    continue;
                }
                if depot.is_none() {
                    depot = Some(parse_depot_line(line, line_no)?);
                }
            }
        }
    }

    build(header, nodes, demands, depot)
}

/// Reads and parses an instance file. The file stem names the instance when
/// the file carries no `NAME`.
pub fn load_instance(path: impl AsRef<Path>) -> Result<CvrpInstance> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let instance = parse_instance(&text)?;
    if instance.name().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            return Ok(instance.with_name(stem));
        }
    }
    Ok(instance)
}

fn read_header_line(header: &mut Header, line: &str, line_no: usize) -> Result<()> {
    let Some((key, value)) = line.split_once(':') else {
        return Err(parse_error(line_no, format!("expected `KEY : value`, got '{line}'")));
    };
    let value = value.trim();
    match key.trim() {
        "NAME" => header.name = Some(value.to_string()),
        // free text in some collections; only a number is a best-known value
        "COMMENT" => header.best_known = value.parse().ok().filter(|v: &f64| v.is_finite()),
        "DIMENSION" => header.dimension = Some(parse_count(value, line_no, "DIMENSION")?),
        "CAPACITY" => header.capacity = Some(parse_demand(value, line_no)?),
        "DISTANCE" => header.duration = Some(parse_number(value, line_no, "DISTANCE")?),
        "SERVICE_TIME" => {
            header.service_time = Some(parse_number(value, line_no, "SERVICE_TIME")?)
        }
        "VEHICLES" => header.vehicles = Some(parse_count(value, line_no, "VEHICLES")?),
        _ => {}
    }
    Ok(())
}

fn build(
    header: Header,
    nodes: Vec<(i64, f64, f64)>,
    demands: Vec<(i64, i32)>,
    depot: Option<DepotLine>,
) -> Result<CvrpInstance> {
    let dimension = header
        .dimension
        .ok_or_else(|| missing("DIMENSION"))?;
    let vehicles = header.vehicles.ok_or_else(|| missing("VEHICLES"))?;
    let depot = depot.ok_or_else(|| missing("DEPOT_SECTION"))?;
    if dimension < 2 {
        return Err(AbcError::InvalidInstance(format!(
            "DIMENSION must count the depot and at least one customer, got {dimension}"
        )));
    }

    let customers = match depot {
        DepotLine::Coordinates(x, y) => {
            check_count("NODE_COORD_SECTION", nodes.len(), dimension - 1)?;
            check_count("DEMAND_SECTION", demands.len(), dimension - 1)?;
            let mut customers = Vec::with_capacity(dimension);
            customers.push(Customer::depot(x, y));
            for (k, (&(_, x, y), &(_, demand))) in nodes.iter().zip(&demands).enumerate() {
                customers.push(Customer::new(k + 1, x, y, demand));
            }
            customers
        }
        DepotLine::Id(depot_id) => {
            check_count("NODE_COORD_SECTION", nodes.len(), dimension)?;
            check_count("DEMAND_SECTION", demands.len(), dimension)?;
            let demand_of: HashMap<i64, i32> = demands.into_iter().collect();
            let &(_, dx, dy) = nodes
                .iter()
                .find(|(id, _, _)| *id == depot_id)
                .ok_or_else(|| {
                    AbcError::InvalidInstance(format!("depot id {depot_id} has no coordinates"))
                })?;
            let mut customers = Vec::with_capacity(dimension);
            customers.push(Customer::depot(dx, dy));
            for &(id, x, y) in nodes.iter().filter(|(id, _, _)| *id != depot_id) {
                let demand = demand_of.get(&id).copied().ok_or_else(|| {
                    AbcError::InvalidInstance(format!("node {id} has no demand"))
                })?;
                customers.push(Customer::new(customers.len(), x, y, demand));
            }
            customers
        }
    };

    let mut instance = CvrpInstance::new(
        customers,
        vehicles,
        header.capacity.unwrap_or(DEFAULT_CAPACITY),
    )?
    .with_duration(header.duration.unwrap_or(DEFAULT_DURATION))?
    .with_service_time(header.service_time.unwrap_or(0.0))?;
    if let Some(name) = header.name {
        instance = instance.with_name(name);
    }
    if let Some(best) = header.best_known {
        instance = instance.with_best_known(best);
    }
    Ok(instance)
}

fn parse_depot_line(line: &str, line_no: usize) -> Result<DepotLine> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [id] => Ok(DepotLine::Id(parse_id(id, line_no)?)),
        [x, y] => Ok(DepotLine::Coordinates(
            parse_number(x, line_no, "depot x")?,
            parse_number(y, line_no, "depot y")?,
        )),
        _ => Err(parse_error(
            line_no,
            format!("expected depot `x y` or node id, got '{line}'"),
        )),
    }
}

fn expect_fields<'t>(
    line: &'t str,
    count: usize,
    line_no: usize,
    what: &str,
) -> Result<Vec<&'t str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != count {
        return Err(parse_error(
            line_no,
            format!("unexpected {what} data: '{line}'"),
        ));
    }
    Ok(fields)
}

fn parse_id(value: &str, line_no: usize) -> Result<i64> {
    value
        .parse()
        .map_err(|_| parse_error(line_no, format!("cannot parse node id '{value}'")))
}

fn parse_number(value: &str, line_no: usize, what: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(parse_error(line_no, format!("cannot parse {what} '{value}'"))),
    }
}

fn parse_count(value: &str, line_no: usize, what: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| parse_error(line_no, format!("cannot parse {what} '{value}'")))
}

/// Integer amounts, accepting integral decimals such as `7.0`.
fn parse_demand(value: &str, line_no: usize) -> Result<i32> {
    if let Ok(v) = value.parse::<i32>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() <= f64::from(i32::MAX) => Ok(v as i32),
        _ => Err(parse_error(
            line_no,
            format!("cannot parse integer amount '{value}'"),
        )),
    }
}

fn check_count(section: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(AbcError::InvalidInstance(format!(
            "{section} has {actual} entries, expected {expected}"
        )));
    }
    Ok(())
}

fn missing(what: &str) -> AbcError {
    AbcError::InvalidInstance(format!("{what} is missing"))
}

fn parse_error(line: usize, message: String) -> AbcError {
    AbcError::Parse { line, message }
}
