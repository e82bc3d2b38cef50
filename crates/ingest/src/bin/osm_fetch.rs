//! Fetch OSM buildings inside a bounding box and print them as JSON.
//!
//! Usage: osm-fetch <west> <south> <east> <north> [limit]

use std::process::ExitCode;

use ingest::{fetch_buildings, BoundingBox, DEFAULT_LIMIT};

const USAGE: &str = "usage: osm-fetch <west> <south> <east> <north> [limit]";

fn parse_args(args: &[String]) -> Result<(BoundingBox, usize), String> {
    if !(4..=5).contains(&args.len()) {
        return Err(USAGE.into());
    }
    let coord = |i: usize| {
        args[i]
            .parse::<f64>()
            .map_err(|_| format!("invalid coordinate '{}'\n{USAGE}", args[i]))
    };
    let bbox = BoundingBox::new(coord(0)?, coord(1)?, coord(2)?, coord(3)?);
    let limit = match args.get(4) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("invalid limit '{raw}'\n{USAGE}"))?,
        None => DEFAULT_LIMIT,
    };
    Ok((bbox, limit))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (bbox, limit) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    let records = match fetch_buildings(&bbox, limit) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&records) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to encode records: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_default_limit() {
        let (bbox, limit) = parse_args(&args(&["41.5", "52.59", "41.51", "52.6"])).expect("args");
        assert_eq!(bbox, BoundingBox::new(41.5, 52.59, 41.51, 52.6));
        assert_eq!(limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_parse_args_explicit_limit() {
        let (_, limit) = parse_args(&args(&["0", "0", "1", "1", "25"])).expect("args");
        assert_eq!(limit, 25);
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["0", "0", "1"])).is_err());
        assert!(parse_args(&args(&["0", "x", "1", "1"])).is_err());
        assert!(parse_args(&args(&["0", "0", "1", "1", "-3"])).is_err());
    }
}
