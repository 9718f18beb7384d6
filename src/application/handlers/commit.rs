//! Optimistic read-modify-write on a listing.

use tracing::debug;

use crate::domain::foundation::ItemId;
use crate::domain::item::{Item, ItemError};
use crate::ports::ItemRepository;

/// Load the listing, apply `mutate`, and write it back under the version
/// check. A lost race re-reads and re-applies, up to `max_attempts` times,
/// so the mutation always sees the latest state (a listing sold in the
/// meantime fails the mutation instead of being overwritten).
pub(crate) async fn commit_with_retry<F>(
    repository: &dyn ItemRepository,
    item_id: &ItemId,
    max_attempts: u32,
    mut mutate: F,
) -> Result<Item, ItemError>
where
    F: FnMut(&mut Item) -> Result<(), ItemError> + Send,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let mut item = repository
            .find_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(*item_id))?;

        mutate(&mut item)?;

        match repository.update(&item).await {
            Ok(stored) => return Ok(stored),
            Err(err) if err.is_conflict() && attempt < max_attempts => {
                debug!(item_id = %item_id, attempt, "version conflict, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }
}
