use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

fn is_gzipped(location: &str) -> bool {
    let location = location.to_lowercase();
    location.ends_with(".gz") || location.ends_with(".gzip")
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn open_bookmarks_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(&path.to_string_lossy()) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.display()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Reads the whole payload behind a local path or an http(s) URL as text.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_location(location: &str) -> Result<String> {
    let bytes = if is_remote(location) {
        fetch_bytes(location)?
    } else {
        let mut reader = open_bookmarks_reader(Path::new(location))?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| format!("{}: {}", location, e))?;
        bytes
    };

    if is_gzipped(location) && is_remote(location) {
        let mut decoded = Vec::new();
        MultiGzDecoder::new(bytes.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| format!("Invalid gzip data at {}: {}", location, e))?;
        return Ok(String::from_utf8_lossy(&decoded).into_owned());
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    log::debug!("Fetching {}", url);
    let response = reqwest::blocking::get(url).map_err(|e| format!("{}: {}", url, e))?;
    if !response.status().is_success() {
        return Err(format!("{}: HTTP {}", url, response.status()));
    }
    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| format!("{}: {}", url, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server::serve_once;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn read_plain_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "chr1\t1\t2\tx\n").unwrap();
        let text = read_location(&file.path().to_string_lossy()).unwrap();
        assert_eq!(text, "chr1\t1\t2\tx\n");
    }

    #[test]
    fn read_gzipped_file() {
        let mut file = Builder::new().suffix(".bed.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"chr2\t10\t20\t.\n").unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        let text = read_location(&file.path().to_string_lossy()).unwrap();
        assert_eq!(text, "chr2\t10\t20\t.\n");
    }

    #[test]
    fn read_gz_suffix_without_gzip_header_err() {
        let mut file = Builder::new().suffix(".gz").tempfile().unwrap();
        write!(file, "not gzip").unwrap();
        let result = read_location(&file.path().to_string_lossy());
        assert!(result.unwrap_err().starts_with("Invalid gzip header"));
    }

    #[test]
    fn read_missing_file_err() {
        assert!(read_location("/definitely/not/here.bed").is_err());
    }

    #[test]
    fn read_remote_plain_body() {
        let (origin, server) = serve_once("200 OK", "chr1\t5\t9\tremote\n");
        let text = read_location(&format!("{}/bookmarks.bed", origin)).unwrap();
        assert_eq!(text, "chr1\t5\t9\tremote\n");
        assert!(server.join().unwrap().starts_with("GET /bookmarks.bed "));
    }

    #[test]
    fn read_remote_gzipped_body() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"chr3\t7\t8\t.\n").unwrap();
        let (origin, server) = serve_once("200 OK", encoder.finish().unwrap());
        let text = read_location(&format!("{}/data/regions.bed.gz", origin)).unwrap();
        assert_eq!(text, "chr3\t7\t8\t.\n");
        server.join().unwrap();
    }

    #[test]
    fn read_remote_not_found_err() {
        let (origin, server) = serve_once("404 Not Found", "missing");
        let url = format!("{}/absent.bed", origin);
        let err = read_location(&url).unwrap_err();
        assert_eq!(err, format!("{}: HTTP 404 Not Found", url));
        server.join().unwrap();
    }
}
