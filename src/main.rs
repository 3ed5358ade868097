use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use invoice_dashboard::config::{config_dir, load_config, resolve_records_path, CONFIG_TEMPLATE};
use invoice_dashboard::dashboard::{
    aggregate, build_view, company_options, status_options, CompanyFilter, FilterQuery,
    StatusFilter, TableState, ViewState, YearFilter,
};
use invoice_dashboard::error::{DashboardError, Result};
use invoice_dashboard::logging;
use invoice_dashboard::record::{load_records, Record, RECORDS_TEMPLATE};
use invoice_dashboard::{Config, SortKey};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(version, about = "Terminal financial dashboard over invoice records", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.invoice-dashboard or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Records JSON file (overrides records_file from config.toml)
    #[arg(short, long, global = true)]
    records: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a config file and sample records
    Init,

    /// Show headline totals and available years
    Summary {
        /// Restrict to one year ("all" for every year)
        #[arg(short, long)]
        year: Option<String>,

        /// Print the full aggregation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show sales per month
    Monthly {
        /// Restrict to one year ("all" for every year)
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Show the top 10 clients by amount billed
    Clients {
        /// Restrict to one year ("all" for every year)
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Show how many invoices are in each status
    Statuses {
        /// Restrict to one year ("all" for every year)
        #[arg(short, long)]
        year: Option<String>,
    },

    /// List companies and statuses available as table filters
    Companies,

    /// Show one page of the invoice table
    Table {
        /// Case-insensitive text searched in client, company, concept and invoice number
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact company name ("all" for every company)
        #[arg(short, long)]
        company: Option<String>,

        /// Status filter: collected, unpaid, pending ("all" for every status)
        #[arg(long)]
        status: Option<String>,

        /// Sort column; repeat the same column to toggle the direction
        #[arg(long, value_name = "COLUMN")]
        sort: Vec<String>,

        /// Page number (1-based); out-of-range pages are clamped
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    let records_override = cli.records.as_deref();

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Summary { year, json } => {
            cmd_summary(&cfg_dir, records_override, year.as_deref(), json)
        }
        Commands::Monthly { year } => cmd_monthly(&cfg_dir, records_override, year.as_deref()),
        Commands::Clients { year } => cmd_clients(&cfg_dir, records_override, year.as_deref()),
        Commands::Statuses { year } => cmd_statuses(&cfg_dir, records_override, year.as_deref()),
        Commands::Companies => cmd_companies(&cfg_dir, records_override),
        Commands::Table {
            search,
            company,
            status,
            sort,
            page,
        } => cmd_table(
            &cfg_dir,
            records_override,
            search,
            company.as_deref(),
            status.as_deref(),
            &sort,
            page,
        ),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(DashboardError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("records.json"), RECORDS_TEMPLATE)?;

    println!("Initialized dashboard config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point records_file at your data:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Show the headline totals:         dashboard summary");

    Ok(())
}

/// Load config and records for a read-only command
fn load_context(cfg_dir: &Path, records_override: Option<&Path>) -> Result<(Config, Vec<Record>)> {
    if records_override.is_none() && !cfg_dir.exists() {
        return Err(DashboardError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let path = resolve_records_path(&config.dashboard, cfg_dir, records_override)?;
    let records = load_records(&path)?;
    Ok((config, records))
}

fn parse_year(year: Option<&str>) -> Result<YearFilter> {
    year.map_or(Ok(YearFilter::All), str::parse)
}

// Table row structs for tabled
#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "METRIC")]
    metric: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "YEAR")]
    year: i32,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "COUNT")]
    count: usize,
}

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "COMPANY")]
    company: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "COMPANY")]
    company: String,
    #[tabled(rename = "CONCEPT")]
    concept: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// Show headline totals
fn cmd_summary(
    cfg_dir: &Path,
    records_override: Option<&Path>,
    year: Option<&str>,
    json: bool,
) -> Result<()> {
    let year = parse_year(year)?;
    let (config, records) = load_context(cfg_dir, records_override)?;
    let aggregation = aggregate(&records, year);

    if json {
        println!("{}", serde_json::to_string_pretty(&aggregation)?);
        return Ok(());
    }

    let symbol = &config.dashboard.currency_symbol;
    let kpi = &aggregation.kpi;

    println!("Dashboard Summary ({})", year_caption(year));
    println!("{}", "-".repeat(50));

    let rows = vec![
        KpiRow {
            metric: "Total billed",
            value: format_money(kpi.total_billed, symbol),
        },
        KpiRow {
            metric: "Total collected",
            value: format_money(kpi.total_collected, symbol),
        },
        KpiRow {
            metric: "Total unpaid",
            value: format_money(kpi.total_unpaid, symbol),
        },
        KpiRow {
            metric: "Pending collection",
            value: format_money(kpi.outstanding(), symbol),
        },
        KpiRow {
            metric: "Invoices",
            value: format_grouped_int(kpi.invoice_count as i64),
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    if aggregation.available_years.is_empty() {
        println!("No records loaded.");
    } else {
        let years: Vec<String> = aggregation
            .available_years
            .iter()
            .map(|y| y.to_string())
            .collect();
        println!("Available years: {}", years.join(", "));
    }

    Ok(())
}

/// Show sales per month
fn cmd_monthly(cfg_dir: &Path, records_override: Option<&Path>, year: Option<&str>) -> Result<()> {
    let year = parse_year(year)?;
    let (config, records) = load_context(cfg_dir, records_override)?;
    let aggregation = aggregate(&records, year);

    if aggregation.monthly_sales.is_empty() {
        println!("No sales for {}.", year_caption(year));
        return Ok(());
    }

    let rows: Vec<MonthRow> = aggregation
        .monthly_sales
        .iter()
        .map(|point| MonthRow {
            month: point.label.clone(),
            year: point.year,
            total: format_money(point.total, &config.dashboard.currency_symbol),
        })
        .collect();

    println!("Monthly Sales ({})", year_caption(year));
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show the top clients ranking
fn cmd_clients(cfg_dir: &Path, records_override: Option<&Path>, year: Option<&str>) -> Result<()> {
    let year = parse_year(year)?;
    let (config, records) = load_context(cfg_dir, records_override)?;
    let aggregation = aggregate(&records, year);

    if aggregation.top_clients.is_empty() {
        println!("No clients for {}.", year_caption(year));
        return Ok(());
    }

    let rows: Vec<ClientRow> = aggregation
        .top_clients
        .iter()
        .enumerate()
        .map(|(idx, point)| ClientRow {
            rank: idx + 1,
            client: point.label.clone(),
            total: format_money(point.total, &config.dashboard.currency_symbol),
        })
        .collect();

    println!("Top Clients by Billing ({})", year_caption(year));
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show the status distribution
fn cmd_statuses(cfg_dir: &Path, records_override: Option<&Path>, year: Option<&str>) -> Result<()> {
    let year = parse_year(year)?;
    let (_, records) = load_context(cfg_dir, records_override)?;
    let aggregation = aggregate(&records, year);

    if aggregation.status_distribution.is_empty() {
        println!("No invoices for {}.", year_caption(year));
        return Ok(());
    }

    let rows: Vec<StatusRow> = aggregation
        .status_distribution
        .iter()
        .map(|point| StatusRow {
            status: point.label.clone(),
            count: point.count,
        })
        .collect();

    println!("Invoice Status ({})", year_caption(year));
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List table filter choices
fn cmd_companies(cfg_dir: &Path, records_override: Option<&Path>) -> Result<()> {
    let (_, records) = load_context(cfg_dir, records_override)?;
    let companies = company_options(&records);

    if companies.is_empty() {
        println!("No companies found.");
    } else {
        let rows: Vec<CompanyRow> = companies
            .iter()
            .map(|name| CompanyRow {
                company: name.to_string(),
            })
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    let statuses: Vec<&str> = status_options().iter().map(|s| s.as_str()).collect();
    println!("Status filters: {}", statuses.join(", "));

    Ok(())
}

/// Show one page of the filtered, sorted invoice table
fn cmd_table(
    cfg_dir: &Path,
    records_override: Option<&Path>,
    search: String,
    company: Option<&str>,
    status: Option<&str>,
    sort: &[String],
    page: i64,
) -> Result<()> {
    let status: StatusFilter = status.map_or(Ok(StatusFilter::All), str::parse)?;
    let sort_keys = sort
        .iter()
        .map(|s| s.parse::<SortKey>())
        .collect::<Result<Vec<_>>>()?;

    let (config, records) = load_context(cfg_dir, records_override)?;
    let page_size = config.dashboard.page_size;

    let query = FilterQuery {
        search_text: search,
        company: CompanyFilter::from_option(company),
        status,
    };

    // Sorting resets to page 1, so the requested page applies last;
    // build_view clamps it against the filtered rows
    let sorted = sort_keys
        .into_iter()
        .fold(TableState::default(), TableState::request_sort);
    let table_state = TableState {
        current_page: usize::try_from(page.max(1)).unwrap_or(usize::MAX),
        ..sorted
    };
    let state = ViewState::default()
        .with_query(query)
        .with_table(table_state);
    let view = build_view(&records, &state, page_size);

    if view.rows.is_empty() {
        println!("No invoices match the given filters.");
    } else {
        let symbol = &config.dashboard.currency_symbol;
        let rows: Vec<InvoiceRow> = view
            .rows
            .iter()
            .map(|r| InvoiceRow {
                date: r.registration_date.to_string(),
                number: r.invoice_number.clone(),
                client: r.client_name.clone(),
                company: r.company_name.clone(),
                concept: r.concept.clone(),
                total: format_money(r.subtotal_with_vat, symbol),
                status: r.status.to_string(),
            })
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    println!("Sorted by {} ({})", view.table.sort_key, view.table.direction);
    println!(
        "Showing {} to {} of {} results - Page {} of {}",
        view.page.first, view.page.last, view.page.total, view.page.page, view.page.total_pages
    );

    Ok(())
}

fn year_caption(year: YearFilter) -> String {
    match year {
        YearFilter::All => "all years".to_string(),
        YearFilter::Year(y) => y.to_string(),
    }
}

fn format_grouped_int(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Format a money amount with two decimal places and thousands separators
fn format_money(value: Decimal, currency_symbol: &str) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{currency_symbol}{}.{frac}", group_digits(whole))
}
