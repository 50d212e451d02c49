//! Output generation for the `scrape` command.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2026-10-19/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```

pub mod json;
