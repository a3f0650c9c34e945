use std::collections::HashMap;

use serde::Deserialize;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// League-v4
// ============================================================================

pub const QUEUE_TYPE_RANKED_SOLO: &str = "RANKED_SOLO_5x5";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
}

impl LeagueEntryDto {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == QUEUE_TYPE_RANKED_SOLO
    }
}

// ============================================================================
// Match-v5
// ============================================================================

pub const QUEUE_ID_RANKED_SOLO: i32 = 420;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoDto {
    pub game_duration: i64,
    pub participants: Vec<ParticipantDto>,
    pub teams: Vec<TeamDto>,
}

impl InfoDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn team(&self, team_id: i32) -> Option<&TeamDto> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    /// Sum of a per-participant stat over every member of `team_id`.
    pub fn team_total(&self, team_id: i32, stat: impl Fn(&ParticipantDto) -> i64) -> i64 {
        self.participants
            .iter()
            .filter(|p| p.team_id == team_id)
            .map(stat)
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub team_position: String,
    /// 100 = blue, 200 = red
    pub team_id: i32,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub total_damage_dealt_to_champions: i64,
    pub total_damage_taken: i64,
    pub damage_dealt_to_buildings: i64,
    pub gold_earned: i64,
    pub total_minions_killed: i32,
    pub neutral_minions_killed: i32,
    pub vision_score: i32,
    pub wards_placed: i32,
    pub detector_wards_placed: i32,
    #[serde(rename = "timeCCingOthers")]
    pub time_ccing_others: i32,
    pub total_time_spent_dead: i32,
    pub challenges: Option<ChallengesDto>,
}

impl ParticipantDto {
    pub fn cs_total(&self) -> i32 {
        self.total_minions_killed + self.neutral_minions_killed
    }
}

/// Pre-computed analytical metrics Riot attaches to some participants.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengesDto {
    pub kda: f64,
    pub kill_participation: f64,
    pub damage_per_minute: f64,
    pub team_damage_percentage: f64,
    pub damage_taken_on_team_percentage: f64,
    pub gold_per_minute: f64,
    pub vision_score_per_minute: f64,
    pub effective_heal_and_shielding: f64,
    pub max_cs_advantage_on_lane_opponent: f64,
    pub solo_kills: i32,
    pub control_wards_placed: i32,
    pub lane_minions_first10_minutes: i32,
    pub early_laning_phase_gold_exp_advantage: i32,
    pub laning_phase_gold_exp_advantage: i32,
    pub dragon_takedowns: i32,
    pub baron_takedowns: i32,
    pub rift_herald_takedowns: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamDto {
    pub team_id: i32,
    pub objectives: ObjectivesDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectivesDto {
    pub baron: ObjectiveDto,
    pub dragon: ObjectiveDto,
    pub rift_herald: ObjectiveDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectiveDto {
    pub kills: i32,
}

// ============================================================================
// Match-v5 timeline
// ============================================================================

pub const EVENT_CHAMPION_KILL: &str = "CHAMPION_KILL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDto {
    pub info: TimelineInfoDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineInfoDto {
    pub participants: Vec<TimelineParticipantDto>,
    pub frames: Vec<FrameDto>,
}

impl TimelineInfoDto {
    /// Resolves the per-match participant id of a PUUID.
    pub fn participant_id(&self, puuid: &str) -> Option<i32> {
        self.participants
            .iter()
            .find(|p| p.puuid == puuid)
            .map(|p| p.participant_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineParticipantDto {
    pub participant_id: i32,
    pub puuid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameDto {
    pub timestamp: i64,
    pub events: Vec<EventDto>,
    /// Keyed by the participant id rendered as a string ("1".."10").
    pub participant_frames: HashMap<String, ParticipantFrameDto>,
}

impl FrameDto {
    pub fn participant_frame(&self, participant_id: i32) -> Option<&ParticipantFrameDto> {
        self.participant_frames.get(&participant_id.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDto {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub victim_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantFrameDto {
    pub total_gold: i32,
    pub minions_killed: i32,
    pub jungle_minions_killed: i32,
    pub xp: i32,
}

impl ParticipantFrameDto {
    pub fn cs(&self) -> i32 {
        self.minions_killed + self.jungle_minions_killed
    }
}
