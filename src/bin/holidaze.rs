use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use holidaze_booking::{
    all_venues, quote_days, search_all, BlockedDateSet, BoundaryPolicy, CalendarDay, ClientConfig,
    DateRange, HolidazeApi, HolidazeClient, SortOrder, Venue, VenueQuery,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "holidaze", about = "Check venue availability against the Holidaze API")]
struct Cli {
    /// Let a stay begin on the day another one ends
    #[arg(long, global = true)]
    same_day_turnover: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every blocked day of a venue
    Availability { venue_id: String },
    /// Price a stay and check it against existing bookings
    Quote {
        venue_id: String,
        from: CalendarDay,
        to: CalendarDay,
    },
    /// Stream every venue, page by page
    Venues,
    /// Search venues by name or description
    Search {
        text: String,
        /// Field to sort by, e.g. price or name
        #[arg(long)]
        sort: Option<String>,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
}

fn print_venue(venue: &Venue) {
    println!("{}\t{}\t{:.2}/night", venue.id, venue.name, venue.price);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("loading configuration")?;
    let page_limit = config.page_limit;
    let client = HolidazeClient::new(config)?;
    let policy = if cli.same_day_turnover {
        BoundaryPolicy::SameDayTurnover
    } else {
        BoundaryPolicy::Inclusive
    };

    match cli.command {
        Command::Availability { venue_id } => {
            let venue = client.fetch_venue(&venue_id).await?;
            let blocked = BlockedDateSet::with_policy(&venue.reservations(), policy);
            println!("{} ({} blocked days)", venue.name, blocked.len());
            for day in blocked.iter() {
                println!("  {}", day);
            }
        }
        Command::Quote { venue_id, from, to } => {
            if from >= to {
                bail!("check-out must be after check-in");
            }
            let venue = client.fetch_venue(&venue_id).await?;
            let blocked = BlockedDateSet::with_policy(&venue.reservations(), policy);
            let quote = quote_days(from, to, venue.price);
            println!(
                "{}: {} night{} - total {:.2}",
                venue.name,
                quote.nights,
                if quote.nights == 1 { "" } else { "s" },
                quote.total_price
            );
            match blocked.first_conflict(DateRange::new(from, to)?) {
                Some(day) => println!("Unavailable: already booked on {}", day),
                None => println!("Available"),
            }
        }
        Command::Venues => {
            let mut venues = Box::pin(all_venues(&client, page_limit));
            while let Some(venue) = venues.try_next().await? {
                print_venue(&venue);
            }
        }
        Command::Search { text, sort, asc } => {
            let mut query = VenueQuery::search(text);
            if let Some(field) = sort {
                let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
                query = query.sorted_by(field, order);
            }
            let mut venues = Box::pin(search_all(&client, &query, page_limit));
            while let Some(venue) = venues.try_next().await? {
                print_venue(&venue);
            }
        }
    }

    Ok(())
}
