use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use domain::geometry::{decode_feature, format_area, polygon_area};
use domain::models::{FarmId, NewFieldGroup};
use domain::services::{
    area_by_group, FeatureSummary, FieldTableQuery, SortDirection, SortKey, SortSpec,
};
use serde::Serialize;
use shared::dates::year_range;
use std::path::PathBuf;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::report::{self, ReportOptions};

#[derive(Parser, Debug)]
#[command(
    name = "farm-stats",
    version,
    about = "Field areas and harvest statistics for a farm dataset"
)]
pub struct Cli {
    /// Dataset snapshot; defaults to dataset.path from configuration
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Only include this farm's groups, fields and harvests
    #[arg(long, global = true)]
    pub farm: Option<FarmId>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Case-insensitive search on field and group names
    #[arg(short, long, default_value = "")]
    pub filter: String,

    /// Sort column: name, group-name or size
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub direction: Option<SortDirection>,

    /// Keep input order instead of sorting
    #[arg(long, conflicts_with_all = ["sort", "direction"])]
    pub unsorted: bool,

    /// Maximum number of rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Field table with group names and areas
    Fields(TableArgs),
    /// Largest fields, as on the dashboard
    Summary {
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Popup text for one field
    Field { id: i32 },
    /// Total area per group in dekar
    Areas,
    /// Harvest totals per group and per month
    Harvests {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Years offered by the harvest year selector
    Years,
    /// GeoJSON layers per group
    Layers,
    /// Area of a GeoJSON boundary file
    Area { path: PathBuf },
    /// Create payload for a new group from a picked hex color
    NewGroup {
        name: String,
        /// Color as #rrggbb
        color: String,
        #[arg(long, default_value_t = 1)]
        farm_id: FarmId,
    },
    /// Complete dashboard report
    Report {
        #[command(flatten)]
        table: TableArgs,
        #[arg(short, long)]
        year: Option<i32>,
    },
}

impl TableArgs {
    /// Table query, falling back to the configured sort.
    pub fn query(&self, default_sort: SortSpec) -> FieldTableQuery {
        let sort = if self.unsorted {
            None
        } else {
            Some(match (self.sort, self.direction) {
                (Some(key), Some(direction)) => SortSpec::new(key, direction),
                (Some(key), None) => SortSpec::new(key, SortDirection::Asc),
                (None, Some(direction)) => SortSpec::new(default_sort.key, direction),
                (None, None) => default_sort,
            })
        };
        FieldTableQuery {
            text_filter: self.filter.clone(),
            sort,
            max_items: self.limit,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

fn load_dataset(cli: &Cli, config: &Config) -> Result<Dataset> {
    let path = cli
        .dataset
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.dataset.path));
    let dataset = Dataset::load(&path)?;
    Ok(match cli.farm {
        Some(farm_id) => dataset.for_farm(farm_id),
        None => dataset,
    })
}

/// Runs one command and returns the text to print.
pub fn run(cli: &Cli, config: &Config) -> Result<String> {
    let report_config = &config.report;
    let default_sort = report_config.default_sort();

    match &cli.command {
        Command::Fields(table) => {
            let dataset = load_dataset(cli, config)?;
            to_json(&report::field_rows(&dataset, &table.query(default_sort)))
        }
        Command::Summary { rows } => {
            let dataset = load_dataset(cli, config)?;
            let rows = rows.unwrap_or(report_config.summary_rows);
            to_json(&report::summary_rows(&dataset, rows))
        }
        Command::Field { id } => {
            let dataset = load_dataset(cli, config)?;
            let rows = report::field_rows(&dataset, &FieldTableQuery::default());
            let row = rows
                .iter()
                .find(|r| r.id == *id)
                .with_context(|| format!("Field {} not found", id))?;
            Ok(FeatureSummary::from(row).to_string())
        }
        Command::Areas => {
            let dataset = load_dataset(cli, config)?;
            to_json(&area_by_group(&dataset.fields, &dataset.groups))
        }
        Command::Harvests { year } => {
            let dataset = load_dataset(cli, config)?;
            to_json(&report::harvest_report(&dataset, *year))
        }
        Command::Years => to_json(&year_range(
            report_config.first_harvest_year,
            Utc::now().year(),
        )),
        Command::Layers => {
            let dataset = load_dataset(cli, config)?;
            to_json(&report::map_layers(&dataset))
        }
        Command::Area { path } => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read boundary {}", path.display()))?;
            let decoded = decode_feature(&text)?;
            Ok(format_area(polygon_area(&decoded.polygon)))
        }
        Command::NewGroup {
            name,
            color,
            farm_id,
        } => {
            let group =
                NewFieldGroup::with_opacity(name, *farm_id, color, report_config.group_opacity)?;
            to_json(&group)
        }
        Command::Report { table, year } => {
            let dataset = load_dataset(cli, config)?;
            let options = ReportOptions {
                table: table.query(default_sort),
                summary_rows: report_config.summary_rows,
                year: *year,
                first_harvest_year: report_config.first_harvest_year,
                current_year: Utc::now().year(),
            };
            to_json(&report::build_report(&dataset, &options))
        }
    }
}
