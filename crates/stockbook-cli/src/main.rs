//! stockbook - drive the book record resolver from the command line
//!
//! State is seeded from a JSON file and lives for the process only.

mod seed;

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use seed::Seed;
use std::path::PathBuf;
use std::sync::Arc;
use stockbook_catalog::{InMemoryInventory, SequentialIsbnAllocator, StaticCatalog};
use stockbook_model::DraftField;
use stockbook_resolver::{BookFormSession, ResolveStatus, Resolver, ResolverConfig, SearchScreen};
use tracing_subscriber::EnvFilter;

/// Form fields settable by name from `add`, in form order
fn add_fields() -> impl Iterator<Item = DraftField> {
    DraftField::ALL
        .into_iter()
        .filter(|field| *field != DraftField::Isbn)
}

fn cli() -> Command {
    let mut add = Command::new("add")
        .about("Create or update a book")
        .arg(
            Arg::new("isbn")
                .long("isbn")
                .help("ISBN of the book; looked up before the other fields are applied"),
        )
        .arg(
            Arg::new("generate")
                .long("generate")
                .action(ArgAction::SetTrue)
                .conflicts_with("isbn")
                .help("Assign a generated ISBN"),
        );
    for field in add_fields() {
        let name = field.label();
        add = add.arg(Arg::new(name).long(name).help(format!("Book {name}")));
    }

    Command::new("stockbook")
        .version(stockbook_resolver::VERSION)
        .about("Book inventory record resolver")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Resolver configuration (TOML)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Inventory and catalog seed (JSON)"),
        )
        .arg(
            Arg::new("isbn-prefix")
                .long("isbn-prefix")
                .global(true)
                .default_value("SB")
                .help("Prefix for generated ISBNs"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Look up an ISBN locally, then externally")
                .arg(Arg::new("isbn").required(true).help("ISBN to resolve")),
        )
        .subcommand(add)
        .subcommand(Command::new("generate").about("Issue the next unused ISBN"))
        .subcommand(
            Command::new("search")
                .about("Search books by title keyword")
                .arg(Arg::new("keyword").help("Keyword (omit to list everything)")),
        )
        .subcommand(
            Command::new("publishers")
                .about("Show publisher candidates for typed text")
                .arg(
                    Arg::new("query")
                        .required(true)
                        .help("Text typed in the publisher field"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn string_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{name}>"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ResolverConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ResolverConfig::default(),
    };

    let (inventory, catalog) = match matches.get_one::<PathBuf>("seed") {
        Some(path) => Seed::from_file(path)?.into_collaborators(),
        None => (InMemoryInventory::new(), StaticCatalog::new()),
    };
    let inventory = Arc::new(inventory);
    let prefix = string_arg(&matches, "isbn-prefix")?;
    let allocator = SequentialIsbnAllocator::new(prefix).with_inventory(Arc::clone(&inventory));
    let resolver = Arc::new(Resolver::new(
        inventory,
        Arc::new(catalog),
        Arc::new(allocator),
    ));
    tracing::debug!(?config, "resolver ready");

    match matches.subcommand() {
        Some(("resolve", args)) => {
            let mut session = BookFormSession::new(resolver, config);
            session.edit(DraftField::Isbn, string_arg(args, "isbn")?);
            let status = session.autocomplete().await;
            report_notice(&session);
            if status == ResolveStatus::Failed {
                bail!("lookup failed");
            }
            println!("Provenance: {}", session.form().provenance());
            println!("{}", serde_json::to_string_pretty(session.draft())?);
        }
        Some(("add", args)) => add(BookFormSession::new(resolver, config), args).await?,
        Some(("generate", _)) => {
            let isbn = resolver.generate().await?;
            println!("{isbn}");
        }
        Some(("search", args)) => {
            let mut screen = SearchScreen::new(resolver);
            screen.form_mut().title = args
                .get_one::<String>("keyword")
                .cloned()
                .unwrap_or_default();
            screen.search_by_title().await;
            if let Some(error) = screen.error() {
                println!("{error}");
            }
            for book in screen.results() {
                let record = &book.record;
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    record.isbn, record.title, record.author, record.stock, record.location
                );
            }
        }
        Some(("publishers", args)) => {
            let mut session = BookFormSession::new(resolver, config);
            session.refresh_publishers().await?;
            session.edit(DraftField::Publisher, string_arg(args, "query")?);
            for name in session.dropdown().candidates() {
                println!("{name}");
            }
        }
        Some((other, _)) => bail!("unknown command {other}"),
        None => bail!("no command given"),
    }

    Ok(())
}

async fn add(mut session: BookFormSession, args: &ArgMatches) -> Result<()> {
    session.start().await;

    if args.get_flag("generate") {
        session.set_generate_isbn(true).await?;
    } else if let Some(isbn) = args.get_one::<String>("isbn") {
        session.edit(DraftField::Isbn, isbn.as_str());
        session.isbn_blur().await;
        report_notice(&session);
    }

    for field in add_fields() {
        if let Some(value) = args.get_one::<String>(field.label()) {
            session.edit(field, value.as_str());
        }
    }

    let outcome = session.submit().await?;
    println!("{}", outcome.message());
    Ok(())
}

fn report_notice(session: &BookFormSession) {
    if let Some(notice) = session.notice() {
        eprintln!("{notice}");
    }
}
