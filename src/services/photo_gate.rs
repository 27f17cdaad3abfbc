//! Photo ingest and the moderation gate.
//!
//! Ingest is best-effort: a storage relocation failure downgrades the turn
//! to text-only instead of aborting it. The gate then blocks the turn on the
//! external moderation worker by polling the asset row at a fixed interval
//! until it leaves `pending`.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::domain::models::{ModerationStatus, PhotoRole};
use crate::domain::ports::{AssetStore, PhotoRepository};

pub struct PhotoGate {
    poll_interval: Duration,
    max_poll_attempts: Option<u32>,
}

impl PhotoGate {
    pub fn new(poll_interval_ms: u64, max_poll_attempts: Option<u32>) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval_ms),
            max_poll_attempts,
        }
    }

    /// Move a staged upload to permanent storage and register it as a
    /// pending asset. Returns the permanent path, or `None` when the
    /// relocation failed; that failure is logged and swallowed so the turn
    /// can continue without the image.
    pub async fn ingest<P, S>(
        &self,
        photos: &P,
        store: &S,
        user_id: &str,
        source_url: &str,
        role: PhotoRole,
    ) -> Result<Option<String>>
    where
        P: PhotoRepository + ?Sized,
        S: AssetStore + ?Sized,
    {
        let permanent_path = match store.relocate(source_url).await {
            Ok(path) => path,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "photo relocation failed, continuing without image");
                return Ok(None);
            }
        };

        let inserted = photos
            .insert_if_absent(user_id, &permanent_path, role)
            .await?;
        debug!(
            user_id = %user_id,
            path = %permanent_path,
            inserted,
            "photo asset registered"
        );
        Ok(Some(permanent_path))
    }

    /// Current status of the user's newest asset.
    pub async fn latest_status<P>(&self, photos: &P, user_id: &str) -> Result<Option<ModerationStatus>>
    where
        P: PhotoRepository + ?Sized,
    {
        photos.latest_status(user_id).await
    }

    /// Block until the newest asset reaches a terminal status.
    ///
    /// Polls at the configured interval. With a bound on attempts, returns
    /// `None` once it is exhausted; unbounded, this waits as long as the
    /// moderation worker takes. A user with no asset row at all also yields
    /// `None` immediately.
    pub async fn await_terminal_status<P>(
        &self,
        photos: &P,
        user_id: &str,
    ) -> Result<Option<ModerationStatus>>
    where
        P: PhotoRepository + ?Sized,
    {
        let mut attempts: u32 = 0;
        loop {
            match photos.latest_status(user_id).await? {
                None => return Ok(None),
                Some(status) if status.is_terminal() => return Ok(Some(status)),
                Some(_) => {}
            }
            attempts += 1;
            if let Some(max) = self.max_poll_attempts {
                if attempts >= max {
                    warn!(user_id = %user_id, attempts, "moderation poll budget exhausted");
                    return Ok(None);
                }
            }
            debug!(user_id = %user_id, attempts, "moderation still pending");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::models::PhotoAsset;

    /// Photo repository that plays back a scripted status sequence.
    struct ScriptedPhotos {
        statuses: Mutex<Vec<Option<ModerationStatus>>>,
        polls: Mutex<u32>,
    }

    impl ScriptedPhotos {
        fn new(statuses: Vec<Option<ModerationStatus>>) -> Self {
            Self { statuses: Mutex::new(statuses), polls: Mutex::new(0) }
        }

        fn poll_count(&self) -> u32 {
            *self.polls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PhotoRepository for ScriptedPhotos {
        async fn insert_if_absent(
            &self,
            _user_id: &str,
            _storage_path: &str,
            _role: PhotoRole,
        ) -> Result<bool> {
            Ok(true)
        }

        async fn latest_status(&self, _user_id: &str) -> Result<Option<ModerationStatus>> {
            *self.polls.lock().unwrap() += 1;
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.len() > 1 {
                Ok(statuses.remove(0))
            } else {
                Ok(statuses.first().copied().flatten())
            }
        }

        async fn latest_asset(&self, _user_id: &str) -> Result<Option<PhotoAsset>> {
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn waits_through_pending_until_terminal() {
        let photos = ScriptedPhotos::new(vec![
            Some(ModerationStatus::Pending),
            Some(ModerationStatus::Pending),
            Some(ModerationStatus::Confirmed),
        ]);
        let gate = PhotoGate::new(1000, None);
        let status = gate
            .await_terminal_status(&photos, "user-1")
            .await
            .expect("poll succeeds");
        assert_eq!(status, Some(ModerationStatus::Confirmed));
        assert_eq!(photos.poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_polling_gives_up_after_max_attempts() {
        let photos = ScriptedPhotos::new(vec![Some(ModerationStatus::Pending)]);
        let gate = PhotoGate::new(1000, Some(3));
        let status = gate
            .await_terminal_status(&photos, "user-1")
            .await
            .expect("poll succeeds");
        assert_eq!(status, None);
        assert_eq!(photos.poll_count(), 3);
    }

    #[tokio::test]
    async fn missing_asset_returns_immediately() {
        let photos = ScriptedPhotos::new(vec![None]);
        let gate = PhotoGate::new(1000, None);
        let status = gate
            .await_terminal_status(&photos, "user-1")
            .await
            .expect("poll succeeds");
        assert_eq!(status, None);
        assert_eq!(photos.poll_count(), 1);
    }
}
