//! Batch driver around `asymptote_core`: reads pages, extracts them in
//! parallel and writes one JSON line per page.
mod batch;
mod config;
mod decode;
mod input;
mod persist;

pub use batch::{extract_all, to_json_lines, PageRecord};
pub use config::{load_config, CliConfig, ConfigError};
pub use decode::{decode_page, DecodeError, DecodedText};
pub use input::{pages_from_bytes, read_inputs, InputError, InputOptions, RawPage, STDIN_TITLE};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
