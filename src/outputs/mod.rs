//! Output generation for a finished [`Digest`](crate::models::Digest).
//!
//! # Submodules
//!
//! - [`markdown`]: Renders the digest as Markdown for stdout
//! - [`json`]: Writes the digest to a dated JSON file
//!
//! # Output Structure
//!
//! ```text
//! stdout                      # Markdown digest
//! json_output_dir/            # only with --json-output-dir
//! └── 2025-05-06/
//!     └── 081502.json
//! ```

pub mod json;
pub mod markdown;
