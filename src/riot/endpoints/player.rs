use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::routing::{Platform, Region};
use crate::riot::types::{AccountDto, LeagueEntryDto};

impl RiotClient {
    /// Resolves a Riot ID on the regional cluster. A 404 means the player does not exist.
    pub async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        let path = format!(
            "/riot/account/v1/accounts/by-riot-id/{}/{}",
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line)
        );

        match self.get(&self.url(region.base_url(), &path)).await {
            Err(e) if e.is_not_found() => Err(AppError::PlayerNotFound {
                game_name: game_name.to_string(),
                tag_line: tag_line.to_string(),
            }),
            res => res,
        }
    }

    /// Ranked entries of the player, one per queue they are placed in.
    pub async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let path = format!("/lol/league/v4/entries/by-puuid/{puuid}");

        self.get(&self.url(platform.base_url(), &path)).await
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client(server: &MockServer) -> RiotClient {
        RiotClient::new("RGAPI-TEST".into(), NonZeroU32::MIN).with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn account_lookup_by_riot_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/riot/account/v1/accounts/by-riot-id/Chalop/3012")
                    .header("X-Riot-Token", "RGAPI-TEST");
                then.status(200).json_body(json!({
                    "puuid": "puuid-1",
                    "gameName": "Chalop",
                    "tagLine": "3012"
                }));
            })
            .await;

        let account = client(&server)
            .get_account_by_riot_id(Region::Europe, "Chalop", "3012")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(account.puuid, "puuid-1");
        assert_eq!(account.game_name.as_deref(), Some("Chalop"));
    }

    #[tokio::test]
    async fn unknown_account_is_player_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/riot/account/v1/accounts/by-riot-id/");
                then.status(404).body("{\"status\":{\"status_code\":404}}");
            })
            .await;

        let res = client(&server)
            .get_account_by_riot_id(Region::Europe, "Nobody", "0000")
            .await;

        assert!(matches!(
            res,
            Err(AppError::PlayerNotFound { ref game_name, .. }) if game_name == "Nobody"
        ));
    }

    #[tokio::test]
    async fn league_errors_keep_the_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/lol/league/v4/entries/by-puuid/puuid-1");
                then.status(429).body("rate limited");
            })
            .await;

        let res = client(&server)
            .get_league_entries_by_puuid(Platform::EUW1, "puuid-1")
            .await;

        assert!(matches!(res, Err(AppError::RiotApi { status: 429, .. })));
    }
}
