//! Grammar of the destination annotation.
//!
//! One upstream per line: `[<weight>% ]<host>[:<port>][ <version>]`
use tracing::warn;

use crate::model::UpstreamService;

pub fn parse_destinations(value: &str) -> Vec<UpstreamService> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let service = parse_line(line);
            if service.is_none() {
                warn!("Skipping malformed destination line: {}", line);
            }
            service
        })
        .collect()
}

fn parse_line(line: &str) -> Option<UpstreamService> {
    let mut tokens = line.split_whitespace().peekable();

    let weight = match tokens.peek() {
        Some(token) if token.ends_with('%') => {
            let weight = token.trim_end_matches('%').parse().ok()?;
            tokens.next();
            Some(weight)
        }
        _ => None,
    };

    let address = tokens.next()?;
    let (name, port) = match address.rsplit_once(':') {
        Some((host, port)) => (host, Some(port.parse().ok()?)),
        None => (address, None),
    };
    if name.is_empty() {
        return None;
    }

    let version = tokens.next().map(str::to_string);
    if tokens.next().is_some() {
        return None;
    }

    Some(UpstreamService {
        name: name.to_string(),
        port,
        version,
        weight,
    })
}

pub fn serialize_destinations(services: &[UpstreamService]) -> String {
    services
        .iter()
        .map(serialize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_line(service: &UpstreamService) -> String {
    let mut line = String::new();
    if let Some(weight) = service.weight {
        line.push_str(&format!("{}% ", weight));
    }
    line.push_str(&service.name);
    if let Some(port) = service.port {
        line.push_str(&format!(":{}", port));
    }
    if let Some(ref version) = service.version {
        line.push(' ');
        line.push_str(version);
    }
    line
}
