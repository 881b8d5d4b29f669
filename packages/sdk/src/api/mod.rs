//! Endpoint functions
//!
//! One function per control-plane operation. Each returns the full
//! [`Response`](crate::Response); use `.parsed` for the typed value.

pub mod agents;
pub mod functions;
pub mod history;
pub mod models;
pub mod resource;
pub mod workspaces;

use reqwest::StatusCode;

use crate::client::{parse_record, parse_records, Outcome};
use crate::codec::Record;
use crate::error::Result;

/// `200` carries one record, anything else is undocumented
pub(crate) fn ok_record<R: Record>(status: StatusCode, content: &[u8]) -> Result<Outcome<R>> {
    if status == StatusCode::OK {
        parse_record(content).map(Outcome::Parsed)
    } else {
        Ok(Outcome::Undocumented)
    }
}

/// `200` carries a list of records, anything else is undocumented
pub(crate) fn ok_records<R: Record>(
    status: StatusCode,
    content: &[u8],
) -> Result<Outcome<Vec<R>>> {
    if status == StatusCode::OK {
        parse_records(content).map(Outcome::Parsed)
    } else {
        Ok(Outcome::Undocumented)
    }
}
