use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::{debug, info};

use super::{Cli, Command, PredictArgs};
use crate::command::types::{FilterCriteria, Granularity, TrendQuery};
use crate::engine::errors::QueryError;
use crate::engine::filter::Predicate;
use crate::engine::insights::{
    compare_commodities, compare_predicate, dimension_options, latest_per_group,
    markets_for_district,
};
use crate::engine::normalize::{Normalizer, RecordSchema};
use crate::engine::predict::{
    FeatureAssembler, History, PredictionRequest, PredictionService, ProcessPredictor,
    ProductionInput, RainfallInput,
};
use crate::engine::query::{TrendService, load_records};
use crate::engine::source::{JsonLinesSource, RecordSource};
use crate::logging;
use crate::shared::config::{Settings, load_settings};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = load_settings(cli.config.as_deref()).context("loading configuration")?;
    if let Some(preset) = cli.preset {
        settings.schema.preset = preset;
    }
    logging::init(&settings.logging)?;
    debug!("Loaded settings: {:?}", settings);

    match cli.command {
        Command::Trends {
            filters,
            granularity,
            measurements,
        } => {
            let service = trend_service(&settings, cli.data)?;
            let granularity = parse_granularity(granularity.as_deref(), &settings)?;
            let query = TrendQuery::new(granularity)
                .with_criteria(filters.into())
                .with_measurements(measurements);
            let response = service.run(&query).await.map_err(logged)?;
            print_json(&response, cli.pretty)
        }
        Command::Options { district } => {
            let service = trend_service(&settings, cli.data)?;
            let loaded = service
                .records(&FilterCriteria::default())
                .await
                .map_err(logged)?;
            match district {
                Some(d) => print_json(&markets_for_district(&loaded.records, &d), cli.pretty),
                None => print_json(&dimension_options(&loaded.records), cli.pretty),
            }
        }
        Command::Latest { filters, limit } => {
            let service = trend_service(&settings, cli.data)?;
            let loaded = service.records(&filters.into()).await.map_err(logged)?;
            print_json(&latest_per_group(&loaded.records, limit), cli.pretty)
        }
        Command::Compare {
            commodities,
            filters,
            granularity,
            measurements,
        } => {
            let service = trend_service(&settings, cli.data)?;
            let granularity = parse_granularity(granularity.as_deref(), &settings)?;
            let predicate =
                compare_predicate(&filters.into(), &commodities).map_err(logged)?;
            let loaded = service.records_matching(&predicate).await.map_err(logged)?;
            let series = compare_commodities(
                &loaded.records,
                &commodities,
                granularity,
                service.calendar(),
                &measurements,
            )
            .map_err(logged)?;
            print_json(&series, cli.pretty)
        }
        Command::Predict(args) => {
            let service = prediction_service(&settings).await?;
            let report = service.predict(&prediction_request(args)).await?;
            print_json(&report, cli.pretty)
        }
    }
}

fn logged(e: QueryError) -> QueryError {
    e.log_error();
    e
}

fn parse_granularity(text: Option<&str>, settings: &Settings) -> Result<Granularity, QueryError> {
    match text {
        Some(t) => Granularity::from_str(t).map_err(logged),
        None => Ok(settings.aggregation.default_granularity),
    }
}

fn dataset_path(settings: &Settings, data: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match data.or_else(|| settings.source.path.clone()) {
        Some(path) => Ok(path),
        None => bail!("no dataset given: pass --data or set source.path"),
    }
}

fn trend_service(settings: &Settings, data: Option<PathBuf>) -> anyhow::Result<TrendService> {
    let path = dataset_path(settings, data)?;
    info!("Using dataset {}", path.display());
    let calendar = settings
        .aggregation
        .calendar()
        .context("invalid season calendar")?;
    Ok(TrendService::new(
        Arc::new(JsonLinesSource::new(path)),
        Normalizer::new(settings.schema.record_schema()),
        calendar,
    ))
}

async fn load_history(path: Option<&PathBuf>, schema: RecordSchema) -> anyhow::Result<History> {
    let Some(path) = path else {
        return Ok(History::default());
    };
    let predicate = Predicate::open();
    let rows = JsonLinesSource::new(path).fetch(&predicate).await?;
    let loaded = load_records(&rows, &predicate, &Normalizer::new(schema));
    debug!(
        "Loaded {} history records from {}",
        loaded.records.len(),
        path.display()
    );
    Ok(History::new(loaded.records))
}

async fn prediction_service(settings: &Settings) -> anyhow::Result<PredictionService> {
    let cfg = &settings.prediction;
    let rainfall = load_history(cfg.rainfall_history.as_ref(), RecordSchema::rainfall()).await?;
    let production =
        load_history(cfg.production_history.as_ref(), RecordSchema::production()).await?;
    let assembler = FeatureAssembler::new(rainfall, production, cfg.defaults.clone());
    Ok(PredictionService::new(
        assembler,
        Arc::new(ProcessPredictor::from_config(cfg)),
    ))
}

pub(super) fn prediction_request(args: PredictArgs) -> PredictionRequest {
    let rainfall = RainfallInput {
        minus1: args.rainfall_minus1,
        minus2: args.rainfall_minus2,
        minus3: args.rainfall_minus3,
        total3months: args.total_rainfall_3months,
    };
    let production = ProductionInput {
        area_hectare: args.area_hectare,
        yield_tonne_per_hectare: args.yield_tonne_per_hectare,
    };
    PredictionRequest {
        district: args.district,
        market: args.market,
        variety: args.variety,
        year: args.year,
        month: args.month,
        rainfall: (rainfall != RainfallInput::default()).then_some(rainfall),
        production: (production != ProductionInput::default()).then_some(production),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
