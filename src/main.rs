use clap::Parser;
use langsearch::{
    Catalog,
    DataSource,
    cli::{Cli, Command, SearchArgs},
    error,
    mcp,
    search,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("LANGSEARCH_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Command::Completions(args) = &cli.command {
        args.generate();
        return Ok(());
    }

    let source = DataSource::resolve(cli.data.as_deref())?;
    let catalog = Catalog::open(source.path())?;

    match cli.command {
        Command::Search(args) => cmd_search(&catalog, &args)?,
        Command::Status(args) => cmd_status(&catalog, &source, args.json)?,
        Command::Mcp => mcp::run_mcp(catalog)?,
        Command::Completions(_) => {}
    }

    Ok(())
}

fn cmd_search(catalog: &Catalog, args: &SearchArgs) -> error::Result<()> {
    let query = args.query();
    let results = catalog.execute_search(Some(query.as_str()));

    if args.json {
        search::format_json(&results, &query)?;
    } else {
        search::format_human(&results);
    }
    Ok(())
}

fn cmd_status(
    catalog: &Catalog,
    source: &DataSource,
    json: bool,
) -> error::Result<()> {
    let fields = catalog.field_names();

    if json {
        let status = serde_json::json!({
            "dataFile": source.path().display().to_string(),
            "records": catalog.len(),
            "fields": fields,
        });
        println!("{status}");
    } else {
        println!("Data file: {}", source.path().display());
        println!("Records: {}", catalog.len());
        println!("Fields: {}", fields.join(", "));
    }
    Ok(())
}
