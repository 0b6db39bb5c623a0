pub mod crypto;
pub mod readers;
pub mod region;
#[cfg(test)]
pub(crate) mod test_server;
pub mod url_safe_b64;

pub use readers::{open_bookmarks_reader, read_location};
pub use region::parse_locus;

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
