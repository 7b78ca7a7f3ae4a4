// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for import operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an import.
///
/// Unsupported extensions, missing files and empty models are *not* errors;
/// they are reported through [`ReadOutcome`](crate::reader::ReadOutcome) so
/// the host can try another handler. Texture failures are recovered locally
/// and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("malformed option `{option}`: {reason}")]
    MalformedOption { option: String, reason: String },

    #[error("model loader error: {0}")]
    Loader(String),
}
