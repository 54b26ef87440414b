//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flexpolyline::ThirdDimension;

/// Default decimal digits for latitude and longitude.
pub const DEFAULT_PRECISION: u8 = 5;

#[derive(Parser, Debug)]
#[command(about = "Decode, encode and inspect flexible polylines")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a polyline into a JSON array of points.
    Decode {
        /// The encoded polyline.
        encoded: String,
    },
    /// Encode a JSON array of points read from a file or stdin.
    Encode {
        /// Decimal digits kept for latitude and longitude (0-15).
        #[arg(long, default_value_t = DEFAULT_PRECISION, value_parser = clap::value_parser!(u8).range(0..=15))]
        precision: u8,

        /// Meaning of each point's `z` value.
        #[arg(long, value_enum, default_value_t = ThirdDimension::Absent)]
        third_dimension: ThirdDimension,

        /// Decimal digits kept for the third dimension (0-15).
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=15))]
        third_dimension_precision: u8,

        /// File holding the points; stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the header of a polyline as JSON.
    Header {
        /// The encoded polyline.
        encoded: String,
    },
}
