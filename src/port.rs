use std::collections::BTreeSet;

use crate::error::ScanError;

fn parse_one(raw: &str) -> Result<u16, ScanError> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(ScanError::InvalidPort(raw.trim().into())),
        Ok(port) => Ok(port),
    }
}

/// Parses lists like `22,80,443,1000-2000` into sorted, de-duplicated
/// ports. Ranges are inclusive and empty entries are skipped.
pub fn parse_ports(spec: &str) -> Result<Vec<u16>, ScanError> {
    let mut ports = BTreeSet::new();

    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse_one(start)?, parse_one(end)?);
                if start > end {
                    return Err(ScanError::InvalidPortRange(token.into()));
                }
                ports.extend(start..=end);
            }
            None => {
                ports.insert(parse_one(token)?);
            }
        }
    }

    if ports.is_empty() {
        return Err(ScanError::EmptyPortList);
    }

    Ok(ports.into_iter().collect())
}
