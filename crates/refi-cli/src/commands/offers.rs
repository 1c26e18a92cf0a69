use clap::Subcommand;
use serde_json::Value;

use refi_core::comparison::Offer;
use refi_core::store::OfferBook;

use crate::commands::open_book;
use crate::config::CliConfig;
use crate::input;

#[derive(Subcommand)]
pub enum OffersCommand {
    /// Show the stored offers
    List,
    /// Append an offer, from JSON or seeded from the first stored offer
    Add {
        /// Path to a JSON file with one offer
        #[arg(long)]
        input: Option<String>,

        /// Name for a seeded offer
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete the offer at an index
    Remove { index: usize },
    /// Restore the default offers
    Reset,
}

pub fn run_offers(cmd: OffersCommand, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let (mut book, mut store) = open_book(config)?;

    match cmd {
        OffersCommand::List => {}
        OffersCommand::Add { input: path, name } => {
            match input::read_input::<Offer>(path.as_deref(), "offer")? {
                Some(offer) => book.push(offer),
                None => {
                    let number = book.offers().len() + 1;
                    let mut offer = Offer::new_option(number, book.offers().first());
                    if let Some(name) = name {
                        offer.name = name;
                    }
                    book.push(offer);
                }
            }
            book.save(&mut store)?;
        }
        OffersCommand::Remove { index } => {
            let removed = book.remove(index)?;
            tracing::info!(name = %removed.name, "offer removed");
            book.save(&mut store)?;
        }
        OffersCommand::Reset => {
            book = OfferBook::default();
            book.save(&mut store)?;
        }
    }

    Ok(serde_json::to_value(book.offers())?)
}
