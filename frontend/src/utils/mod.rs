pub mod csv;
pub mod download;
pub mod storage;
pub mod time;

pub use download::{open_pdf_in_new_tab, trigger_csv_download};
