use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctofind::config::{DirectoryLocation, DEFAULT_DIRECTORY_URL};
use doctofind::directory::{self, source_for};
use doctofind::search::{ConsultationMode, Listing, SearchBox, SortKey};
use doctofind::store::{FilterStore, MemoryUrl};

/// Query the practitioner directory from the command line
#[derive(Parser, Debug)]
#[command(name = "doctofind-query")]
#[command(about = "Filter, sort and search a practitioner directory", long_about = None)]
struct Args {
    /// Directory URL or JSON file path
    #[arg(short = 'S', long, env = "DIRECTORY_SOURCE", default_value = DEFAULT_DIRECTORY_URL)]
    source: String,

    /// Start from an encoded URL query, e.g. "consultation=video&sort=fees"
    #[arg(long)]
    url_query: Option<String>,

    /// Name search (committed query)
    #[arg(short, long)]
    search: Option<String>,

    #[arg(short, long, value_enum)]
    consultation: Option<ConsultationArg>,

    /// Specialty to include; repeat for several
    #[arg(long = "specialty")]
    specialties: Vec<String>,

    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Search box draft; prints its suggestions
    #[arg(short, long)]
    draft: Option<String>,

    /// Commit the N-th suggestion (1-based) as the search query
    #[arg(short, long, requires = "draft")]
    pick: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConsultationArg {
    Video,
    Clinic,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Fees,
    Experience,
}

#[derive(Serialize)]
struct Row<'a> {
    key: String,
    name: &'a str,
    specialities: Vec<&'a str>,
    experience: &'a str,
    fees: &'a str,
    video_consult: bool,
    in_clinic: bool,
}

impl<'a> From<&Listing<'a>> for Row<'a> {
    fn from(listing: &Listing<'a>) -> Self {
        let p = listing.practitioner;
        Self {
            key: listing.key(),
            name: &p.name,
            specialities: p.speciality_names().collect(),
            experience: &p.experience,
            fees: &p.fees,
            video_consult: p.video_consult,
            in_clinic: p.in_clinic,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doctofind=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let location = DirectoryLocation::parse(&args.source);
    let snapshot = directory::load(source_for(&location).as_ref()).await;
    if snapshot.is_degraded() {
        eprintln!("warning: directory unavailable from {}, showing no results", location);
    }
    let practitioners = &snapshot.practitioners;

    let mut store = FilterStore::hydrate(MemoryUrl::new(args.url_query.unwrap_or_default()));
    if let Some(search) = args.search {
        store.set_query(search);
    }
    if let Some(mode) = args.consultation {
        store.set_consultation(Some(match mode {
            ConsultationArg::Video => ConsultationMode::Video,
            ConsultationArg::Clinic => ConsultationMode::Clinic,
        }));
    }
    if !args.specialties.is_empty() {
        store.set_specialties(&args.specialties);
    }
    if let Some(sort) = args.sort {
        store.set_sort(Some(match sort {
            SortArg::Fees => SortKey::Fees,
            SortArg::Experience => SortKey::Experience,
        }));
    }

    if let Some(draft) = args.draft {
        let mut search_box = SearchBox::new(&store.state().query);
        search_box.input(&draft);
        let suggestions = search_box.suggestions(practitioners, Instant::now());

        if !args.json {
            println!("Suggestions for {:?}:", draft);
            for (i, s) in suggestions.iter().enumerate() {
                println!("  {}. {}", i + 1, s.practitioner.name);
            }
        }

        if let Some(pick) = args.pick {
            let chosen = pick
                .checked_sub(1)
                .and_then(|i| suggestions.get(i))
                .ok_or_else(|| anyhow::anyhow!("no suggestion #{} for {:?}", pick, draft))?;
            let query = search_box.select(&chosen.practitioner.name);
            store.set_query(query);
        }
    }

    let view = store.view(practitioners);
    let query = store.state().to_query();

    if args.json {
        let rows: Vec<Row<'_>> = view.iter().map(Row::from).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "query": query,
                "count": rows.len(),
                "directory_total": practitioners.len(),
                "practitioners": rows,
            }))?
        );
        return Ok(());
    }

    println!("?{}", query);
    println!("{} practitioner(s)", view.len());
    for listing in &view {
        let p = listing.practitioner;
        println!(
            "{:<6} {:<32} {:<12} {:<28} {}",
            listing.key(),
            p.name,
            p.fees,
            p.experience,
            p.speciality_names().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}
