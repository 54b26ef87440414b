//! Command implementations.
//!
//! Each command reads from and writes to caller-provided streams so it can be
//! driven from tests as well as from `main`.

use std::io::{Read, Write};

use flexpolyline::{FORMAT_VERSION, Header, LatLngZ, ThirdDimension};
use serde::Serialize;

use crate::error::{Error, Result};

/// Header as printed by the `header` command.
#[derive(Debug, Serialize)]
struct HeaderReport {
    format_version: u64,
    #[serde(flatten)]
    header: Header,
}

/// Decode `encoded` and write its points as a JSON array.
pub fn decode(encoded: &str, pretty: bool, out: &mut impl Write) -> Result<()> {
    let points = flexpolyline::decode(encoded)?;
    write_json(&points, pretty, out)
}

/// Read a JSON array of points from `input` and write the encoded polyline.
pub fn encode(
    input: &mut impl Read,
    precision: u8,
    third_dimension: ThirdDimension,
    third_dimension_precision: u8,
    out: &mut impl Write,
) -> Result<()> {
    let points: Vec<LatLngZ> =
        serde_json::from_reader(input).map_err(|source| Error::Json {
            context: "input points",
            source,
        })?;

    let encoded = flexpolyline::encode(
        &points,
        precision,
        third_dimension,
        third_dimension_precision,
    )?;

    writeln!(out, "{encoded}").map_err(|source| Error::Io {
        context: "write output",
        source,
    })
}

/// Write the header of `encoded` as JSON.
pub fn header(encoded: &str, pretty: bool, out: &mut impl Write) -> Result<()> {
    let header = flexpolyline::decode_header(encoded)?;
    let report = HeaderReport {
        format_version: FORMAT_VERSION,
        header,
    };
    write_json(&report, pretty, out)
}

fn write_json<T: Serialize + ?Sized>(value: &T, pretty: bool, out: &mut impl Write) -> Result<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *out, value)
    } else {
        serde_json::to_writer(&mut *out, value)
    };
    result.map_err(|source| Error::Json {
        context: "output",
        source,
    })?;

    writeln!(out).map_err(|source| Error::Io {
        context: "write output",
        source,
    })
}
