// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OccultError {
    #[error("Domain error: {0}")]
    Domain(String),

    #[error(
        "Window span out of range at sample {index}: \
         needs {halfwidth} points either side, array has {size}"
    )]
    Range {
        index: usize,
        halfwidth: usize,
        size: usize,
    },

    #[error("Iteration did not converge after {iterations} steps: {message}")]
    NonConvergence { iterations: usize, message: String },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Allocation failure: {0}")]
    Allocation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OccultResult<T> = Result<T, OccultError>;
