use crate::bookmarks::RegionRecord;
use crate::utils::Result;

/// Parses a 1-based closed locus (`chr1:101-200` or `chr1:101..200`) into a
/// 0-based half-open region on the given assembly.
pub fn parse_locus(encoding: &str, assembly_name: &str) -> Result<RegionRecord> {
    let error_msg = || format!("Invalid region encoding: {}", encoding);
    let (ref_name, range) = encoding.rsplit_once(':').ok_or_else(error_msg)?;
    let (start, end) = range
        .split_once("..")
        .or_else(|| range.split_once('-'))
        .ok_or_else(error_msg)?;

    let start: u64 = start.replace(',', "").parse().map_err(|_| error_msg())?;
    let end: u64 = end.replace(',', "").parse().map_err(|_| error_msg())?;

    if ref_name.is_empty() || start == 0 {
        return Err(error_msg());
    }
    if start > end {
        return Err(format!("Invalid region: start {} > end {}", start, end));
    }

    Ok(RegionRecord::new(
        assembly_name,
        ref_name,
        (start - 1) as f64,
        end as f64,
        None,
    ))
}
