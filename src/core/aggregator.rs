use crate::core::UserDirectory;
use crate::domain::model::{Lookup, UserProfile};
use crate::utils::error::Result;
use std::sync::Arc;

/// Merges the profile, followers and following lookups for one username.
#[derive(Clone)]
pub struct ProfileAggregator {
    directory: Arc<dyn UserDirectory>,
}

impl ProfileAggregator {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Returns `NotFound` without touching the list endpoints when the profile is missing.
    /// A missing followers or following list becomes an empty list.
    pub async fn get_user_profile(&self, username: &str) -> Result<Lookup<UserProfile>> {
        let fields = match self.directory.fetch_user(username).await? {
            Lookup::Found(fields) => fields,
            Lookup::NotFound => {
                tracing::info!("User {} not found upstream", username);
                return Ok(Lookup::NotFound);
            }
        };

        let (followers, following) = tokio::try_join!(
            self.directory.fetch_followers(username),
            self.directory.fetch_following(username),
        )?;

        if !followers.is_found() {
            tracing::debug!("Followers of {} unavailable, using empty list", username);
        }
        if !following.is_found() {
            tracing::debug!("Following of {} unavailable, using empty list", username);
        }

        let profile = UserProfile::new(fields)
            .with_lists(followers.unwrap_or_default(), following.unwrap_or_default());

        tracing::debug!(
            "Aggregated {}: {} followers, {} following",
            username,
            profile.followers_list().len(),
            profile.following_list().len()
        );
        Ok(Lookup::Found(profile))
    }
}
