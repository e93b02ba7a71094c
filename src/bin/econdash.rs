use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use econdash_rs::{
    ApiClient, Category, DataQuery, Gateway, SessionStore, aggregate, insights, storage,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "econdash",
    version,
    about = "Fetch, merge & summarize economic dashboard indicators"
)]
struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    base_url: String,
    /// Session token file (defaults to a file under the user data dir).
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the issued bearer token.
    Login(LoginArgs),
    /// Clear the persisted session.
    Logout,
    /// Show the authenticated user.
    Me,
    /// Backend health check (unauthenticated).
    Health,
    /// List the available countries.
    Countries,
    /// Fetch one indicator category (and optionally save it).
    Get(GetArgs),
    /// Merge all five categories for three countries and print the comparison.
    Overview(OverviewArgs),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    Gdp,
    Population,
    Education,
    Inflation,
    Labour,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Gdp => Category::Gdp,
            CategoryArg::Population => Category::Population,
            CategoryArg::Education => Category::Education,
            CategoryArg::Inflation => Category::Inflation,
            CategoryArg::Labour => Category::Labour,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Indicator category.
    #[arg(short = 'C', long, value_enum)]
    category: CategoryArg,
    /// ISO country code (e.g., MY). Omit for all countries.
    #[arg(short, long)]
    country: Option<String>,
    /// Exact year. Cannot be combined with --from/--to.
    #[arg(short, long)]
    year: Option<i32>,
    /// Inclusive lower year bound.
    #[arg(long)]
    from: Option<i32>,
    /// Inclusive upper year bound.
    #[arg(long)]
    to: Option<i32>,
    /// Zero-based page.
    #[arg(long, default_value_t = 0)]
    page: u64,
    /// Rows per page.
    #[arg(long, default_value_t = 25)]
    page_size: u64,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct OverviewArgs {
    /// Exactly three ISO country codes separated by comma or semicolon
    /// (e.g., MY,SG,TH).
    #[arg(short, long)]
    countries: String,
    /// Up to three years, one per country in order. Defaults to the latest
    /// available year for all three.
    #[arg(short, long)]
    years: Option<String>,
    /// Directory to save each country's merged records into.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Output format for --out-dir files (default csv).
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let session_path = cli
        .session_file
        .clone()
        .unwrap_or_else(SessionStore::default_path);
    let session = Arc::new(SessionStore::open(session_path));
    let client = ApiClient::new(cli.base_url.clone(), session.clone());

    match cli.cmd {
        Command::Login(args) => {
            let resp = client.login(&args.username, &args.password)?;
            let expires = chrono::DateTime::from_timestamp(resp.expires_at, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| resp.expires_at.to_string());
            println!("logged in ({} token, expires {})", resp.token_type, expires);
        }
        Command::Logout => {
            session.logout().context("clear session")?;
            println!("logged out");
        }
        Command::Me => {
            let me = client.current_user()?;
            println!("{}", me.username);
        }
        Command::Health => {
            let health = client.health()?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Command::Countries => {
            let gateway = Gateway::new(client);
            use econdash_rs::EconomicDataApi;
            for c in gateway.list_countries()? {
                println!("{}\t{}", c.code, c.name);
            }
        }
        Command::Get(args) => cmd_get(Gateway::new(client), args)?,
        Command::Overview(args) => cmd_overview(Gateway::new(client), args)?,
    }
    Ok(())
}

fn cmd_get(gateway: Gateway, args: GetArgs) -> Result<()> {
    use econdash_rs::EconomicDataApi;
    let category: Category = args.category.into();
    let query = DataQuery {
        country: args.country.clone(),
        year: args.year,
        year_from: args.from,
        year_to: args.to,
        ..DataQuery::default()
    }
    .for_page(args.page, args.page_size);

    let paged = gateway.fetch_category(category, &query)?;
    println!(
        "{}: {} of {} rows (page {}, {} per page)",
        category,
        paged.data.len(),
        paged.total,
        args.page,
        args.page_size
    );
    for p in &paged.data {
        println!(
            "{}\t{}\t{:.2}\t{} ({})",
            p.id, p.year, p.value, p.country_name, p.iso_code
        );
    }

    if let Some(path) = args.out.as_ref() {
        match resolve_format(args.format, path)? {
            OutFormat::Csv => storage::save_csv(&paged.data, path)?,
            OutFormat::Json => storage::save_json(&paged.data, path)?,
        }
        println!("saved {} rows to {}", paged.data.len(), path.display());
    }
    Ok(())
}

fn cmd_overview(gateway: Gateway, args: OverviewArgs) -> Result<()> {
    let codes = parse_list(&args.countries);
    if codes.len() != 3 {
        bail!("--countries expects exactly three codes, got {}", codes.len());
    }
    let overview =
        aggregate::fetch_overview(&gateway, [codes[0].as_str(), codes[1].as_str(), codes[2].as_str()])?;

    let years: Vec<i32> = match &args.years {
        Some(s) => {
            let ys = parse_list(s)
                .iter()
                .map(|y| y.parse::<i32>().context("invalid --years entry"))
                .collect::<Result<Vec<_>>>()?;
            if ys.len() != 3 {
                bail!("--years expects exactly three years, got {}", ys.len());
            }
            ys
        }
        None => {
            let latest = overview
                .available_years
                .first()
                .copied()
                .context("no years available in the fetched data")?;
            vec![latest; 3]
        }
    };

    // Resolve display names, falling back to the raw code.
    let name_of = |code: &str| -> String {
        overview
            .available_countries
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| code.to_string())
    };
    let names: Vec<String> = codes.iter().map(|c| name_of(c)).collect();

    for (i, trend) in overview.countries.iter().enumerate() {
        println!("{} ({}), year {}:", names[i], trend.code, years[i]);
        for category in Category::ALL {
            let value = insights::value_for_year(&trend.records, category, years[i]);
            println!("  {:<10} {}", category, value);
        }
    }

    let selections: Vec<insights::CountrySelection> = (0..3)
        .map(|i| insights::CountrySelection {
            name: &names[i],
            records: &overview.countries[i].records,
            year: years[i],
        })
        .collect();
    println!();
    println!(
        "{}",
        insights::analysis_text(&selections[0], &selections[1], &selections[2])
    );

    if let Some(dir) = args.out_dir.as_ref() {
        std::fs::create_dir_all(dir)?;
        let format = args.format.unwrap_or(OutFormat::Csv);
        for trend in &overview.countries {
            let ext = match format {
                OutFormat::Csv => "csv",
                OutFormat::Json => "json",
            };
            let path = dir.join(format!("{}.{}", trend.code, ext));
            match format {
                OutFormat::Csv => storage::save_records_csv(&trend.records, &path)?,
                OutFormat::Json => storage::save_records_json(&trend.records, &path)?,
            }
            println!("saved {} records to {}", trend.records.len(), path.display());
        }
    }
    Ok(())
}

fn resolve_format(explicit: Option<OutFormat>, path: &std::path::Path) -> Result<OutFormat> {
    if let Some(f) = explicit {
        return Ok(f);
    }
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Ok(OutFormat::Json),
        _ => Ok(OutFormat::Csv),
    }
}
