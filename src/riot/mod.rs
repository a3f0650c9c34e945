use async_trait::async_trait;

use crate::error::AppError;

mod client;
mod endpoints;
mod routing;
mod types;

pub use client::RiotClient;
pub use endpoints::MatchIdQuery;
pub use routing::{Platform, Region, RiotId};
pub use types::*;

/// The Riot endpoints the coaching pipeline reads from.
#[async_trait]
pub trait MatchDataSource: Send + Sync {
    async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError>;

    async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError>;

    async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: MatchIdQuery,
    ) -> Result<Vec<String>, AppError>;

    async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError>;

    async fn get_match_timeline(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<TimelineDto, AppError>;
}

#[async_trait]
impl MatchDataSource for RiotClient {
    async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        RiotClient::get_account_by_riot_id(self, region, game_name, tag_line).await
    }

    async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        RiotClient::get_league_entries_by_puuid(self, platform, puuid).await
    }

    async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: MatchIdQuery,
    ) -> Result<Vec<String>, AppError> {
        RiotClient::get_match_ids(self, region, puuid, query).await
    }

    async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError> {
        RiotClient::get_match(self, region, match_id).await
    }

    async fn get_match_timeline(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<TimelineDto, AppError> {
        RiotClient::get_match_timeline(self, region, match_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    fn client() -> RiotClient {
        dotenvy::dotenv().ok();
        let key = std::env::var("RIOT_API_KEY").unwrap();
        RiotClient::new(key, NonZeroU32::new(20).unwrap())
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn get_account_by_riot_id_works() {
        let account = client()
            .get_account_by_riot_id(Region::Europe, "Chalop", "3012")
            .await
            .unwrap();

        assert_eq!(account.game_name.as_deref(), Some("Chalop"));
        assert_eq!(account.tag_line.as_deref(), Some("3012"));
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn get_match_and_timeline_work() {
        let riot = client();
        let account = riot
            .get_account_by_riot_id(Region::Europe, "Chalop", "3012")
            .await
            .unwrap();

        let ids = riot
            .get_match_ids(
                Region::Europe,
                &account.puuid,
                MatchIdQuery {
                    count: 1,
                    queue: None,
                },
            )
            .await
            .unwrap();
        let match_id = ids.first().expect("should return a match id");

        let match_data = riot.get_match(Region::Europe, match_id).await.unwrap();
        let timeline = riot
            .get_match_timeline(Region::Europe, match_id)
            .await
            .unwrap();

        assert_eq!(match_data.info.participants.len(), 10);
        assert!(timeline.info.participant_id(&account.puuid).is_some());
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn unknown_player_maps_to_player_not_found() {
        let res = client()
            .get_account_by_riot_id(Region::Europe, "zz-no-such-player-zz", "0000")
            .await;

        assert!(matches!(res, Err(AppError::PlayerNotFound { .. })));
    }
}
