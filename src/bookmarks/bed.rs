use crate::bookmarks::region::{coerce_number, RegionRecord};
use crate::utils::{read_location, Result};

const HEADER_PREFIXES: [&str; 3] = ["#", "track", "browser"];
const NO_LABEL: &str = ".";

/// Splits on LF, CRLF and lone CR. A CRLF pair counts as one boundary.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\n', '\r']) {
            Some(pos) => {
                let skip = if current[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[pos + skip..]);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn is_header(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn region_from_line(line: &str, assembly_name: &str) -> RegionRecord {
    let mut fields = line.split('\t');
    let ref_name = fields.next().unwrap_or_default();
    let start = fields.next();
    let end = fields.next();
    let name = fields.next();

    RegionRecord {
        assembly_name: assembly_name.to_string(),
        ref_name: ref_name.to_string(),
        start: coerce_number(start),
        end: coerce_number(end),
        label: name.filter(|name| *name != NO_LABEL).map(str::to_string),
    }
}

/// Converts BED/TSV text into bookmark regions on `assembly_name`.
///
/// Blank lines and `#`/`track`/`browser` header lines are skipped. Only the
/// first four tab-separated columns are used. Rows are never rejected:
/// unparseable coordinates become NaN and missing columns are left empty.
pub fn parse_bookmarks(text: &str, assembly_name: &str) -> Vec<RegionRecord> {
    split_lines(text)
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !is_header(line))
        .map(|line| region_from_line(line, assembly_name))
        .collect()
}

/// Reads a local path or URL and parses it with [`parse_bookmarks`].
pub fn read_bookmarks(location: &str, assembly_name: &str) -> Result<Vec<RegionRecord>> {
    let text = read_location(location)
        .map_err(|e| format!("Could not read bookmarks from {}", e))?;
    let regions = parse_bookmarks(&text, assembly_name);
    log::debug!("Parsed {} bookmarks from {}", regions.len(), location);
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server::serve_once;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn only_headers_and_blanks_yield_nothing() {
        let text = "#comment\ntrack name=foo\nbrowser position chr1:1-10\n\n   \n\t\n";
        assert!(parse_bookmarks(text, "hg38").is_empty());
        assert!(parse_bookmarks("", "hg38").is_empty());
    }

    #[test]
    fn four_column_line() {
        let regions = parse_bookmarks("chr1\t100\t200\tmyname", "hg38");
        assert_eq!(
            regions,
            vec![RegionRecord::new(
                "hg38",
                "chr1",
                100.0,
                200.0,
                Some("myname".to_string())
            )]
        );
    }

    #[test]
    fn dot_name_is_no_label() {
        let regions = parse_bookmarks("chr1\t1\t2\t.\nchr1\t1\t2\t..\nchr1\t1\t2\t \n", "a");
        assert_eq!(regions[0].label, None);
        assert_eq!(regions[1].label.as_deref(), Some(".."));
        assert_eq!(regions[2].label.as_deref(), Some(" "));
    }

    #[test]
    fn mixed_line_endings() {
        let text = "chr1\t1\t2\ta\nchr2\t3\t4\tb\r\nchr3\t5\t6\tc\rchr4\t7\t8\td";
        let regions = parse_bookmarks(text, "hg19");
        let names: Vec<&str> = regions.iter().map(|r| r.ref_name.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chr2", "chr3", "chr4"]);
        assert_eq!(regions[1].label.as_deref(), Some("b"));
        assert_eq!(regions[3].end, 8.0);
    }

    #[test]
    fn header_lines_never_imported() {
        let text = "#chr1\t1\t2\tx\ntrackchr1\t1\t2\tx\nbrowser\t1\t2\tx\nchr5\t1\t2\tx";
        let regions = parse_bookmarks(text, "hg38");
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].ref_name, "chr5");
    }

    #[test]
    fn indented_header_is_not_a_header() {
        let regions = parse_bookmarks(" #chr1\t1\t2", "hg38");
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].ref_name, " #chr1");
    }

    #[test]
    fn short_and_malformed_rows_are_kept() {
        let regions = parse_bookmarks("chr1\nchr2\tabc\t5\nchr3\t1", "hg38");
        assert_eq!(regions.len(), 3);

        assert!(regions[0].start.is_nan());
        assert!(regions[0].end.is_nan());
        assert_eq!(regions[0].label, None);

        assert!(regions[1].start.is_nan());
        assert_eq!(regions[1].end, 5.0);

        assert_eq!(regions[2].start, 1.0);
        assert!(regions[2].end.is_nan());
    }

    #[test]
    fn extra_columns_ignored() {
        let regions = parse_bookmarks("chr1\t10\t20\tname\t0\t+\t10\t20", "hg38");
        assert_eq!(regions[0].label.as_deref(), Some("name"));
        assert_eq!(regions[0].end, 20.0);
    }

    #[test]
    fn read_bookmarks_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "track name=test").unwrap();
        writeln!(file, "chr1\t100\t200\tfirst").unwrap();
        writeln!(file, "chr2\t300\t400\t.").unwrap();
        let regions = read_bookmarks(&file.path().to_string_lossy(), "mm10").unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|r| r.assembly_name == "mm10"));
        assert_eq!(regions[1].label, None);
    }

    #[test]
    fn read_bookmarks_missing_file_err() {
        let err = read_bookmarks("/no/such/file.bed", "hg38").unwrap_err();
        assert!(err.starts_with("Could not read bookmarks from /no/such/file.bed"));
    }

    #[test]
    fn read_bookmarks_remote_not_found_err() {
        let (origin, server) = serve_once("404 Not Found", "");
        let url = format!("{}/bookmarks.bed", origin);
        let err = read_bookmarks(&url, "hg38").unwrap_err();
        assert!(err.starts_with("Could not read bookmarks from"));
        assert!(err.contains(&format!("{}: HTTP 404", url)));
        server.join().unwrap();
    }
}
