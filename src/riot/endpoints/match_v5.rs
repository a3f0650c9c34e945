use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::routing::Region;
use crate::riot::types::{MatchDto, TimelineDto};

/// Filters for the match-id listing.
#[derive(Debug, Clone, Copy)]
pub struct MatchIdQuery {
    pub count: u32,
    pub queue: Option<i32>,
}

impl MatchIdQuery {
    fn to_query_string(self) -> String {
        match self.queue {
            Some(queue) => format!("?count={}&queue={}", self.count, queue),
            None => format!("?count={}", self.count),
        }
    }
}

impl RiotClient {
    /// Get list of match IDs by PUUID, most recent first
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: MatchIdQuery,
    ) -> Result<Vec<String>, AppError> {
        let path = format!(
            "/lol/match/v5/matches/by-puuid/{puuid}/ids{}",
            query.to_query_string()
        );

        self.get(&self.url(region.base_url(), &path)).await
    }

    /// Get match details by match ID
    pub async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError> {
        let path = format!("/lol/match/v5/matches/{match_id}");

        self.get(&self.url(region.base_url(), &path))
            .await
            .map_err(|e| not_found_as_match(e, match_id))
    }

    /// Get the frame-by-frame timeline of a match
    pub async fn get_match_timeline(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<TimelineDto, AppError> {
        let path = format!("/lol/match/v5/matches/{match_id}/timeline");

        self.get(&self.url(region.base_url(), &path))
            .await
            .map_err(|e| not_found_as_match(e, match_id))
    }
}

fn not_found_as_match(e: AppError, match_id: &str) -> AppError {
    if e.is_not_found() {
        AppError::MatchNotFound(match_id.to_string())
    } else {
        e
    }
}
