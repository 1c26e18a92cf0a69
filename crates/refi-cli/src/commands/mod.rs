pub mod compare;
pub mod offers;
pub mod schedule;

use refi_core::store::OfferBook;

use crate::config::CliConfig;
use crate::store::FileStore;

/// Opens the offer list persisted under the configured store directory.
pub(crate) fn open_book(config: &CliConfig) -> Result<(OfferBook, FileStore), Box<dyn std::error::Error>> {
    let store = FileStore::new(&config.store_dir);
    let book = OfferBook::load(&store)?;
    Ok((book, store))
}
