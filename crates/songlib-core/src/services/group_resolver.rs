//! Get-or-create resolution of group names.

use tracing::{debug, warn};

use crate::domain::GroupId;
use crate::ports::{RepositoryError, SongUnitOfWork};

/// Map a group name to its ID, creating the group if it doesn't exist yet.
///
/// Runs inside the caller's unit of work. When the insert loses a race
/// against a concurrent creator of the same name, the name is looked up
/// again and the winner's ID is returned.
pub async fn resolve_or_create_group(
    uow: &mut dyn SongUnitOfWork,
    name: &str,
) -> Result<GroupId, RepositoryError> {
    if let Some(id) = uow.find_group_id(name).await? {
        return Ok(id);
    }

    match uow.insert_group(name).await {
        Ok(id) => {
            debug!(group = name, group_id = %id, "Created group");
            Ok(id)
        }
        Err(RepositoryError::AlreadyExists(_)) => {
            warn!(group = name, "Group was created concurrently, re-resolving");
            uow.find_group_id(name)
                .await?
                .ok_or_else(|| RepositoryError::NotFound(format!("group '{name}'")))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SongStore;
    use crate::services::fakes::FakeStore;

    #[tokio::test]
    async fn test_creates_unseen_group_once() {
        let store = FakeStore::default();
        let mut uow = store.begin().await.unwrap();

        let first = resolve_or_create_group(uow.as_mut(), "Muse").await.unwrap();
        let second = resolve_or_create_group(uow.as_mut(), "Muse").await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.group_count(), 1);
    }

    #[tokio::test]
    async fn test_reuses_existing_group() {
        let store = FakeStore::default();
        let existing = store.seed_group("Radiohead");

        let mut uow = store.begin().await.unwrap();
        let id = resolve_or_create_group(uow.as_mut(), "Radiohead")
            .await
            .unwrap();

        assert_eq!(id, existing);
    }

    #[tokio::test]
    async fn test_lost_race_returns_winner() {
        let store = FakeStore::default();
        store.race_on_group_insert("Blur");

        let mut uow = store.begin().await.unwrap();
        let id = resolve_or_create_group(uow.as_mut(), "Blur").await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(store.group_id("Blur"), Some(id));
        assert_eq!(store.group_count(), 1);
    }
}
