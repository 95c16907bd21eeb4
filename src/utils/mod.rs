pub mod config;
pub mod file_writer;
pub mod url_list;

pub use config::Config;
pub use file_writer::{FileWriter, WrittenFile};
pub use url_list::parse_urls;
