//! CLI Module
//!
//! Command-line interface for computing EQ curves.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::dsp::{CombineMode, FilterType};

/// eqcurve - biquad EQ design and response curves
#[derive(Parser, Debug)]
#[command(name = "eqcurve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the biquad coefficients of one filter
    #[command(name = "design")]
    Design {
        /// Filter type (peak, lowshelf, highshelf, lowpass, highpass, bandpass, notch)
        #[arg(short = 't', long = "type", default_value = "peak")]
        filter_type: FilterType,

        /// Center/corner frequency in Hz
        #[arg(short, long)]
        freq: f64,

        /// Q factor (defaults per filter type)
        #[arg(short, long)]
        q: Option<f64>,

        /// Gain in dB
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        gain: f64,

        /// Sample rate in Hz
        #[arg(short, long, default_value_t = 48000.0)]
        sample_rate: f64,

        /// Divide the coefficients by a0
        #[arg(long)]
        normalize: bool,
    },

    /// Print a log-spaced frequency sweep
    #[command(name = "sweep")]
    Sweep {
        #[arg(long, default_value_t = 20.0)]
        min: f64,

        #[arg(long, default_value_t = 20000.0)]
        max: f64,

        #[arg(long, default_value_t = 200)]
        points: usize,
    },

    /// Compute per-filter and combined responses for a JSON list of filters
    #[command(name = "response")]
    Response {
        /// JSON file with an array of filter rows
        filters: PathBuf,

        /// JSON config file (sample rate, sweep, combiner settings)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the combine mode (db_sum or complex)
        #[arg(short, long)]
        mode: Option<CombineMode>,

        /// Also output the group delay of the combined trace
        #[arg(long)]
        group_delay: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}
