use crate::riot::{
    EVENT_CHAMPION_KILL, FrameDto, InfoDto, MatchDto, ParticipantFrameDto, TimelineDto,
};

use super::AnalysisError;
use super::metrics::LanePhaseMetrics;

pub const TEN_MINUTES_MS: i64 = 600_000;
pub const FIFTEEN_MINUTES_MS: i64 = 900_000;

/// Computes early game gold, CS and XP numbers of `puuid` against their lane opponent.
pub fn analyze_lane_phase(
    timeline: &TimelineDto,
    match_data: &MatchDto,
    puuid: &str,
) -> Result<LanePhaseMetrics, AnalysisError> {
    let player_id = timeline.info.participant_id(puuid).ok_or_else(|| {
        AnalysisError::ParticipantNotFound {
            puuid: puuid.to_string(),
        }
    })?;
    let opponent_id = find_lane_opponent_id(timeline, &match_data.info, puuid);
    let frames = &timeline.info.frames;

    let mut metrics = LanePhaseMetrics::default();

    if let Some(at_10) = nearest_frame(frames, TEN_MINUTES_MS)
        .and_then(|frame| FrameComparison::at(frame, player_id, opponent_id))
    {
        metrics.gold_at_10 = at_10.player.total_gold;
        metrics.cs_at_10 = at_10.player.cs();
        metrics.xp_at_10 = at_10.player.xp;
        metrics.gold_diff_at_10 = at_10.gold_diff();
        metrics.cs_diff_at_10 = at_10.cs_diff();
    }

    if let Some(at_15) = nearest_frame(frames, FIFTEEN_MINUTES_MS)
        .and_then(|frame| FrameComparison::at(frame, player_id, opponent_id))
    {
        metrics.gold_at_15 = at_15.player.total_gold;
        metrics.cs_at_15 = at_15.player.cs();
        metrics.gold_diff_at_15 = at_15.gold_diff();
        metrics.cs_diff_at_15 = at_15.cs_diff();
    }

    metrics.deaths_before_10 = count_deaths_before(frames, player_id, TEN_MINUTES_MS);

    Ok(metrics)
}

/// Player snapshot of a frame, with the lane opponent's when they have one.
struct FrameComparison<'a> {
    player: &'a ParticipantFrameDto,
    opponent: Option<&'a ParticipantFrameDto>,
}

impl<'a> FrameComparison<'a> {
    fn at(frame: &'a FrameDto, player_id: i32, opponent_id: Option<i32>) -> Option<Self> {
        Some(Self {
            player: frame.participant_frame(player_id)?,
            opponent: opponent_id.and_then(|id| frame.participant_frame(id)),
        })
    }

    fn gold_diff(&self) -> i32 {
        self.opponent
            .map(|o| self.player.total_gold - o.total_gold)
            .unwrap_or(0)
    }

    fn cs_diff(&self) -> i32 {
        self.opponent
            .map(|o| self.player.cs() - o.cs())
            .unwrap_or(0)
    }
}

/// Timeline participant id of the enemy playing the same position as `puuid`.
fn find_lane_opponent_id(timeline: &TimelineDto, info: &InfoDto, puuid: &str) -> Option<i32> {
    let player = info.participant(puuid)?;
    if player.team_position.is_empty() {
        return None;
    }

    let (index, opponent) = info.participants.iter().enumerate().find(|(_, p)| {
        p.team_id != player.team_id && p.team_position == player.team_position
    })?;

    // Participant ids follow the match participant order when the timeline
    // does not list the opponent.
    timeline
        .info
        .participant_id(&opponent.puuid)
        .or_else(|| i32::try_from(index + 1).ok())
}

/// The frame closest to `target_ms`; the earliest frame wins a tie.
pub fn nearest_frame(frames: &[FrameDto], target_ms: i64) -> Option<&FrameDto> {
    frames.iter().fold(None, |closest: Option<&FrameDto>, frame| match closest {
        Some(best) if (best.timestamp - target_ms).abs() <= (frame.timestamp - target_ms).abs() => {
            Some(best)
        }
        _ => Some(frame),
    })
}

/// Champion kills of `participant_id` strictly before `before_ms`, across the whole timeline.
pub fn count_deaths_before(frames: &[FrameDto], participant_id: i32, before_ms: i64) -> i32 {
    let deaths = frames
        .iter()
        .flat_map(|frame| &frame.events)
        .filter(|e| e.kind == EVENT_CHAMPION_KILL)
        .filter(|e| e.victim_id == participant_id && e.timestamp < before_ms)
        .count();

    i32::try_from(deaths).unwrap_or(i32::MAX)
}
