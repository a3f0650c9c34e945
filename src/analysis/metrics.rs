use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::riot::{LeagueEntryDto, MatchDto, TimelineDto};

/// Metrics of one player in one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchMetrics {
    pub match_id: String,
    pub champion_name: String,
    pub role: String,
    pub win: bool,

    pub kda: f64,
    pub kill_participation: f64,
    pub damage_per_minute: f64,
    pub damage_share: f64,
    pub cs_per_minute: f64,
    pub vision_score_per_minute: f64,
    pub wards_per_minute: f64,
    pub cc_per_minute: f64,
    pub deaths_per_minute: f64,
    pub gold_per_minute: f64,
    pub objective_participation: f64,
    pub turret_damage_share: f64,
    pub damage_taken_share: f64,
    pub heal_shield_effective: f64,
    pub max_cs_advantage_on_lane_opponent: f64,

    pub game_duration: i64,
    pub solo_kills: i32,
    pub control_wards_placed: i32,
    pub lane_minions_first_10_min: i32,
    pub early_laning_gold_exp_advantage: i32,
    pub laning_gold_exp_advantage: i32,
    pub time_spent_dead: i32,
}

/// Early game numbers read from a match timeline.
///
/// Every diff stays zero when no lane opponent could be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePhaseMetrics {
    pub gold_at_10: i32,
    pub gold_at_15: i32,
    pub cs_at_10: i32,
    pub cs_at_15: i32,
    pub xp_at_10: i32,
    pub gold_diff_at_10: i32,
    pub gold_diff_at_15: i32,
    pub cs_diff_at_10: i32,
    pub cs_diff_at_15: i32,
    pub deaths_before_10: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub metrics: MatchMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_phase: Option<LanePhaseMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub kda: f64,
    pub kill_participation: f64,
    pub damage_per_minute: f64,
    pub damage_share: f64,
    pub cs_per_minute: f64,
    pub vision_score_per_minute: f64,
    pub deaths_per_minute: f64,
    pub gold_per_minute: f64,
    pub objective_participation: f64,
}

/// Population standard deviation of the key per-match metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyMetrics {
    pub kda_std_dev: f64,
    pub cs_per_min_std_dev: f64,
    pub dpm_std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionStats {
    pub champion_name: String,
    pub games_played: usize,
    pub win_rate: f64,
    pub avg_kda: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleStats {
    pub role: String,
    pub games_played: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Combat,
    Farming,
    Vision,
    Objectives,
    Deaths,
    ChampionPool,
    Consistency,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Farming => "farming",
            Self::Vision => "vision",
            Self::Objectives => "objectives",
            Self::Deaths => "deaths",
            Self::ChampionPool => "champion_pool",
            Self::Consistency => "consistency",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notable strength or weakness. `value` is always the raw, unscaled metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub description: String,
    pub value: f64,
    pub is_strength: bool,
}

/// Ranked standing captured at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSnapshot {
    pub tier: String,
    pub division: String,
    pub league_points: i32,
}

impl From<&LeagueEntryDto> for RankSnapshot {
    fn from(entry: &LeagueEntryDto) -> Self {
        Self {
            tier: entry.tier.clone(),
            division: entry.rank.clone(),
            league_points: entry.league_points,
        }
    }
}

impl fmt::Display for RankSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} LP)",
            self.tier, self.division, self.league_points
        )
    }
}

/// Everything known about a player after one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnalysis {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<RankSnapshot>,

    pub win_rate: f64,
    pub total_matches: usize,

    pub averages: AverageMetrics,
    pub consistency: ConsistencyMetrics,
    pub role_breakdown: Vec<RoleStats>,
    pub champion_pool: Vec<ChampionStats>,
    pub strengths: Vec<Insight>,
    pub weaknesses: Vec<Insight>,
    pub matches: Vec<MatchAnalysis>,
}

impl PlayerAnalysis {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Inputs of a player analysis run.
#[derive(Debug, Clone, Copy)]
pub struct PlayerAnalysisParams<'a> {
    pub puuid: &'a str,
    pub game_name: &'a str,
    pub tag_line: &'a str,
    pub matches: &'a [MatchDto],
    /// Timelines keyed by match id; matches without one get no lane phase data.
    pub timelines: &'a HashMap<String, TimelineDto>,
    pub league: Option<&'a LeagueEntryDto>,
}
