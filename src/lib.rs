#![forbid(unsafe_code)]

pub mod cli;
pub mod columns;
pub mod courts;
pub mod extract_text;
pub mod formats;
pub mod http;
pub mod logging;
pub mod scrape;
pub mod site;
pub mod text;
