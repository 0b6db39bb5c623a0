use crate::bookmarks::region::{JsNumber, RegionRecord};
use crate::utils::Result;
use itertools::Itertools;
use std::str::FromStr;

const TSV_HEADER: &str = "chrom\tstart\tend\tlabel\tassembly_name\tcoord_range";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Bed,
    Tsv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bed" => Ok(ExportFormat::Bed),
            "tsv" => Ok(ExportFormat::Tsv),
            _ => Err(format!("Unknown export format '{}', expected bed or tsv", s)),
        }
    }
}

fn bed_line(region: &RegionRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        region.ref_name,
        JsNumber(region.start),
        JsNumber(region.end),
        region.label.as_deref().unwrap_or(".")
    )
}

fn tsv_line(region: &RegionRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        region.ref_name,
        JsNumber(region.start + 1.0),
        JsNumber(region.end),
        region.label.as_deref().unwrap_or_default(),
        region.assembly_name,
        region.loc_string()
    )
}

/// Renders bookmarks as a BED or TSV document.
///
/// BED carries no assembly column, so it requires an assembly and only writes
/// bookmarks on it. TSV writes every bookmark unless an assembly is given.
pub fn format_bookmarks(
    regions: &[RegionRecord],
    format: ExportFormat,
    assembly_name: Option<&str>,
) -> Result<String> {
    let selected = regions
        .iter()
        .filter(|region| assembly_name.map_or(true, |name| region.assembly_name == name));

    let body = match format {
        ExportFormat::Bed => {
            if assembly_name.is_none() {
                return Err("BED export requires an assembly name".to_string());
            }
            selected.map(bed_line).join("\n")
        }
        ExportFormat::Tsv => std::iter::once(TSV_HEADER.to_string())
            .chain(selected.map(tsv_line))
            .join("\n"),
    };

    Ok(if body.is_empty() { body } else { body + "\n" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::bed::parse_bookmarks;

    fn regions() -> Vec<RegionRecord> {
        vec![
            RegionRecord::new("hg38", "chr1", 100.0, 200.0, Some("first".into())),
            RegionRecord::new("hg19", "chr2", 0.0, 10.0, None),
            RegionRecord::new("hg38", "chr3", f64::NAN, 30.0, None),
        ]
    }

    #[test]
    fn format_from_str() {
        assert_eq!("BED".parse::<ExportFormat>(), Ok(ExportFormat::Bed));
        assert_eq!("tsv".parse::<ExportFormat>(), Ok(ExportFormat::Tsv));
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn bed_export_filters_assembly() {
        let text = format_bookmarks(&regions(), ExportFormat::Bed, Some("hg38")).unwrap();
        assert_eq!(text, "chr1\t100\t200\tfirst\nchr3\tNaN\t30\t.\n");
    }

    #[test]
    fn bed_export_requires_assembly() {
        assert!(format_bookmarks(&regions(), ExportFormat::Bed, None).is_err());
    }

    #[test]
    fn bed_export_reimports() {
        let original: Vec<RegionRecord> = regions()
            .into_iter()
            .filter(|r| r.assembly_name == "hg38")
            .collect();
        let text = format_bookmarks(&original, ExportFormat::Bed, Some("hg38")).unwrap();
        let reimported = parse_bookmarks(&text, "hg38");
        assert_eq!(reimported.len(), original.len());
        assert!(reimported.iter().zip(&original).all(|(a, b)| a.same_as(b)));
    }

    #[test]
    fn tsv_export_has_header_and_one_based_start() {
        let text = format_bookmarks(&regions(), ExportFormat::Tsv, None).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], TSV_HEADER);
        assert_eq!(lines[1], "chr1\t101\t200\tfirst\thg38\tchr1:101..200");
        assert_eq!(lines[2], "chr2\t1\t10\t\thg19\tchr2:1..10");
    }

    #[test]
    fn empty_bed_export_is_empty() {
        let text = format_bookmarks(&regions(), ExportFormat::Bed, Some("mm10")).unwrap();
        assert_eq!(text, "");
    }
}
