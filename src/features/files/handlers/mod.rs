pub mod file_handler;

pub use file_handler::{__path_download_file, __path_process_file, download_file, process_file};
