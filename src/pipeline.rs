//! The `coach` and `progress` use cases, from a Riot ID to advice or a trend.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use futures::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::analysis::{PlayerAnalysisParams, analyze_player};
use crate::coaching::{
    CoachingError, CoachingResponse, CoachingService, PlayerProgress, player_progress,
};
use crate::db::SessionStore;
use crate::error::AppError;
use crate::riot::{
    AccountDto, MatchDataSource, MatchDto, MatchIdQuery, Platform, QUEUE_ID_RANKED_SOLO, Region,
    RiotId, TimelineDto,
};

/// Matches and timelines fetched at once.
pub const MATCH_FETCH_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct CoachRequest {
    pub riot_id: RiotId,
    pub platform: Platform,
    pub match_count: u32,
    /// Queue filter; ranked solo when unset.
    pub queue: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageTimings {
    pub riot_api_ms: u64,
    pub analysis_ms: u64,
    pub coaching_ms: u64,
    pub total_ms: u64,
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoachOutcome {
    Coached {
        response: Box<CoachingResponse>,
        timings: StageTimings,
    },
    /// Every recent match was already covered by the previous session.
    NoNewMatches { latest_match_id: Option<String> },
}

#[instrument(skip_all, fields(riot_id = %request.riot_id, platform = %request.platform))]
pub async fn run_coach(
    source: &dyn MatchDataSource,
    service: &CoachingService,
    request: &CoachRequest,
) -> Result<CoachOutcome, AppError> {
    let started = Instant::now();
    let region = request.platform.to_region();

    let account = resolve_account(source, region, &request.riot_id).await?;
    let entries = source
        .get_league_entries_by_puuid(request.platform, &account.puuid)
        .await?;
    let solo_entry = entries.iter().find(|e| e.is_solo_queue());

    let covered: HashSet<String> = match service.store() {
        Some(store) => store
            .latest_session(&account.puuid)
            .await
            .map_err(|e| CoachingError::SessionRead(Box::new(e)))?
            .map(|session| session.match_ids.into_iter().collect())
            .unwrap_or_default(),
        None => HashSet::new(),
    };

    let query = MatchIdQuery {
        count: request.match_count,
        queue: Some(request.queue.unwrap_or(QUEUE_ID_RANKED_SOLO)),
    };
    let recent_ids = source
        .get_match_ids(region, &account.puuid, query)
        .await?;
    if recent_ids.is_empty() {
        return Err(AppError::NoMatchesFound);
    }

    let new_ids: Vec<String> = recent_ids
        .iter()
        .filter(|id| !covered.contains(*id))
        .cloned()
        .collect();
    if new_ids.is_empty() {
        info!("🛰️ No new matches since the last coaching session");
        return Ok(CoachOutcome::NoNewMatches {
            latest_match_id: recent_ids.into_iter().next(),
        });
    }
    info!(new = new_ids.len(), recent = recent_ids.len(), "🛰️ Fetching new matches");

    let (matches, timelines) = fetch_matches(source, region, &new_ids).await?;
    let riot_api = started.elapsed();

    let analysis_started = Instant::now();
    let analysis = analyze_player(PlayerAnalysisParams {
        puuid: &account.puuid,
        game_name: account
            .game_name
            .as_deref()
            .unwrap_or(&request.riot_id.game_name),
        tag_line: account
            .tag_line
            .as_deref()
            .unwrap_or(&request.riot_id.tag_line),
        matches: &matches,
        timelines: &timelines,
        league: solo_entry,
    })?;
    let analysis_time = analysis_started.elapsed();

    let coaching_started = Instant::now();
    let response = service.coach(analysis, new_ids).await?;

    Ok(CoachOutcome::Coached {
        response: Box::new(response),
        timings: StageTimings {
            riot_api_ms: millis(riot_api),
            analysis_ms: millis(analysis_time),
            coaching_ms: millis(coaching_started.elapsed()),
            total_ms: millis(started.elapsed()),
        },
    })
}

#[instrument(skip_all, fields(riot_id = %riot_id, platform = %platform))]
pub async fn run_progress(
    source: &dyn MatchDataSource,
    store: Option<&dyn SessionStore>,
    riot_id: &RiotId,
    platform: Platform,
) -> Result<PlayerProgress, AppError> {
    if store.is_none() {
        return Err(CoachingError::StoreRequired.into());
    }

    let account = resolve_account(source, platform.to_region(), riot_id).await?;
    let mut progress = player_progress(store, &account.puuid).await?;

    if progress.trend.is_empty() {
        progress.game_name = account.game_name.unwrap_or_else(|| riot_id.game_name.clone());
        progress.tag_line = account.tag_line.unwrap_or_else(|| riot_id.tag_line.clone());
    }

    Ok(progress)
}

async fn resolve_account(
    source: &dyn MatchDataSource,
    region: Region,
    riot_id: &RiotId,
) -> Result<AccountDto, AppError> {
    source
        .get_account_by_riot_id(region, &riot_id.game_name, &riot_id.tag_line)
        .await
}

/// Fetches matches in `ids` order. A missing timeline only costs the lane phase data.
async fn fetch_matches(
    source: &dyn MatchDataSource,
    region: Region,
    ids: &[String],
) -> Result<(Vec<MatchDto>, HashMap<String, TimelineDto>), AppError> {
    let fetched: Vec<(MatchDto, Option<TimelineDto>)> = stream::iter(ids)
        .map(|match_id| async move {
            let match_data = source.get_match(region, match_id).await?;
            let timeline = match source.get_match_timeline(region, match_id).await {
                Ok(timeline) => Some(timeline),
                Err(e) => {
                    warn!(match_id = %match_id, error = %e, "🛰️ Timeline unavailable");
                    None
                }
            };
            Ok::<_, AppError>((match_data, timeline))
        })
        .buffered(MATCH_FETCH_CONCURRENCY)
        .try_collect()
        .await?;

    let mut matches = Vec::with_capacity(fetched.len());
    let mut timelines = HashMap::new();
    for (match_data, timeline) in fetched {
        if let Some(timeline) = timeline {
            timelines.insert(match_data.metadata.match_id.clone(), timeline);
        }
        matches.push(match_data);
    }

    Ok((matches, timelines))
}
