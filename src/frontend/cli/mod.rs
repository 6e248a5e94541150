use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::command::types::FilterCriteria;
use crate::engine::insights::DEFAULT_LATEST_LIMIT;
use crate::engine::normalize::SchemaPreset;

pub mod handlers;

pub use handlers::run;


#[derive(Parser, Debug)]
#[command(name = "crop_series")]
#[command(about = "Aggregate agricultural price observations into calendar periods", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $CROP_SERIES_CONFIG, then `config`)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// JSON-lines dataset, overriding `source.path`
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Dataset family, overriding `schema.preset`
    #[arg(long, global = true, value_enum)]
    pub preset: Option<SchemaPreset>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregated series for the filtered observations
    Trends {
        #[command(flatten)]
        filters: FilterArgs,

        /// day, month, quarter, year or season
        #[arg(short, long)]
        granularity: Option<String>,

        /// Measurement to report; repeatable. All measurements when omitted.
        #[arg(short = 'm', long = "measure")]
        measurements: Vec<String>,
    },

    /// Distinct commodities, districts, markets and varieties
    Options {
        /// Only list the markets of this district
        #[arg(long)]
        district: Option<String>,
    },

    /// Latest observation per commodity and district
    Latest {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, default_value_t = DEFAULT_LATEST_LIMIT)]
        limit: usize,
    },

    /// One series per commodity
    Compare {
        #[arg(required = true)]
        commodities: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long)]
        granularity: Option<String>,

        #[arg(short = 'm', long = "measure")]
        measurements: Vec<String>,
    },

    /// Run the price model for one district, market and variety
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub commodity: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub market: Option<String>,
    #[arg(long)]
    pub variety: Option<String>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    #[arg(long)]
    pub start_year: Option<i32>,
    #[arg(long)]
    pub end_year: Option<i32>,
    #[arg(long)]
    pub start_month: Option<u32>,
    #[arg(long)]
    pub end_month: Option<u32>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            commodity: args.commodity,
            district: args.district,
            market: args.market,
            variety: args.variety,
            start_date: args.start_date,
            end_date: args.end_date,
            start_year: args.start_year,
            end_year: args.end_year,
            start_month: args.start_month,
            end_month: args.end_month,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long)]
    pub district: String,
    #[arg(long)]
    pub market: String,
    #[arg(long)]
    pub variety: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub month: u32,
    #[arg(long)]
    pub rainfall_minus1: Option<f64>,
    #[arg(long)]
    pub rainfall_minus2: Option<f64>,
    #[arg(long)]
    pub rainfall_minus3: Option<f64>,
    #[arg(long)]
    pub total_rainfall_3months: Option<f64>,
    #[arg(long)]
    pub area_hectare: Option<f64>,
    #[arg(long)]
    pub yield_tonne_per_hectare: Option<f64>,
}
