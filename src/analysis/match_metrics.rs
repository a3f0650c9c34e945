use crate::riot::{ChallengesDto, InfoDto, MatchDto, ParticipantDto, TeamDto};

use super::AnalysisError;
use super::metrics::{MatchAnalysis, MatchMetrics};
use super::stats::ratio;

/// Games shorter than this are remakes.
pub const MIN_MATCH_DURATION_SECS: i64 = 60;

/// How the combat and economy rates of a participant are obtained.
#[derive(Debug, Clone, Copy)]
pub enum Derivation<'a> {
    /// Riot pre-computed the rates.
    Challenges(&'a ChallengesDto),
    /// Rates are derived from raw end-of-game stats.
    RawStats,
}

impl<'a> Derivation<'a> {
    pub fn for_participant(participant: &'a ParticipantDto) -> Self {
        match &participant.challenges {
            Some(challenges) => Self::Challenges(challenges),
            None => Self::RawStats,
        }
    }
}

/// Path-dependent part of [`MatchMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedRates {
    pub kda: f64,
    pub kill_participation: f64,
    pub damage_per_minute: f64,
    pub damage_share: f64,
    pub gold_per_minute: f64,
    pub vision_score_per_minute: f64,
    pub damage_taken_share: f64,
    pub objective_participation: f64,
    pub heal_shield_effective: f64,
    pub max_cs_advantage_on_lane_opponent: f64,
    pub solo_kills: i32,
    pub control_wards_placed: i32,
    pub lane_minions_first_10_min: i32,
    pub early_laning_gold_exp_advantage: i32,
    pub laning_gold_exp_advantage: i32,
}

/// Computes the metrics of `puuid` in a single match.
pub fn analyze_match(match_data: &MatchDto, puuid: &str) -> Result<MatchAnalysis, AnalysisError> {
    Ok(MatchAnalysis {
        metrics: extract_match_metrics(match_data, puuid)?,
        lane_phase: None,
    })
}

pub fn extract_match_metrics(
    match_data: &MatchDto,
    puuid: &str,
) -> Result<MatchMetrics, AnalysisError> {
    let info = &match_data.info;

    if info.game_duration < MIN_MATCH_DURATION_SECS {
        return Err(AnalysisError::MatchTooShort {
            duration_secs: info.game_duration,
        });
    }

    let participant = info
        .participant(puuid)
        .ok_or_else(|| AnalysisError::ParticipantNotFound {
            puuid: puuid.to_string(),
        })?;

    let rates = match Derivation::for_participant(participant) {
        Derivation::Challenges(challenges) => {
            rates_from_challenges(challenges, info.team(participant.team_id))
        }
        Derivation::RawStats => rates_from_raw_stats(participant, info),
    };

    let minutes = info.game_duration as f64 / 60.0;
    let per_minute = |value: i32| f64::from(value) / minutes;

    Ok(MatchMetrics {
        match_id: match_data.metadata.match_id.clone(),
        champion_name: participant.champion_name.clone(),
        role: participant.team_position.clone(),
        win: participant.win,

        kda: rates.kda,
        kill_participation: rates.kill_participation,
        damage_per_minute: rates.damage_per_minute,
        damage_share: rates.damage_share,
        cs_per_minute: per_minute(participant.cs_total()),
        vision_score_per_minute: rates.vision_score_per_minute,
        wards_per_minute: per_minute(participant.wards_placed),
        cc_per_minute: per_minute(participant.time_ccing_others),
        deaths_per_minute: per_minute(participant.deaths),
        gold_per_minute: rates.gold_per_minute,
        objective_participation: rates.objective_participation,
        turret_damage_share: ratio(
            participant.damage_dealt_to_buildings,
            info.team_total(participant.team_id, |p| p.damage_dealt_to_buildings),
        ),
        damage_taken_share: rates.damage_taken_share,
        heal_shield_effective: rates.heal_shield_effective,
        max_cs_advantage_on_lane_opponent: rates.max_cs_advantage_on_lane_opponent,

        game_duration: info.game_duration,
        solo_kills: rates.solo_kills,
        control_wards_placed: rates.control_wards_placed,
        lane_minions_first_10_min: rates.lane_minions_first_10_min,
        early_laning_gold_exp_advantage: rates.early_laning_gold_exp_advantage,
        laning_gold_exp_advantage: rates.laning_gold_exp_advantage,
        time_spent_dead: participant.total_time_spent_dead,
    })
}

/// Copies Riot's pre-computed rates. Objective participation is the share of the
/// team's dragon, baron and herald kills the player took part in.
pub fn rates_from_challenges(challenges: &ChallengesDto, team: Option<&TeamDto>) -> DerivedRates {
    let team_objective_kills = team
        .map(|t| {
            t.objectives.dragon.kills + t.objectives.baron.kills + t.objectives.rift_herald.kills
        })
        .unwrap_or(0);
    let player_takedowns = challenges.dragon_takedowns
        + challenges.baron_takedowns
        + challenges.rift_herald_takedowns;

    DerivedRates {
        kda: challenges.kda,
        kill_participation: challenges.kill_participation,
        damage_per_minute: challenges.damage_per_minute,
        damage_share: challenges.team_damage_percentage,
        gold_per_minute: challenges.gold_per_minute,
        vision_score_per_minute: challenges.vision_score_per_minute,
        damage_taken_share: challenges.damage_taken_on_team_percentage,
        objective_participation: ratio(player_takedowns.into(), team_objective_kills.into()),
        heal_shield_effective: challenges.effective_heal_and_shielding,
        max_cs_advantage_on_lane_opponent: challenges.max_cs_advantage_on_lane_opponent,
        solo_kills: challenges.solo_kills,
        control_wards_placed: challenges.control_wards_placed,
        lane_minions_first_10_min: challenges.lane_minions_first10_minutes,
        early_laning_gold_exp_advantage: challenges.early_laning_phase_gold_exp_advantage,
        laning_gold_exp_advantage: challenges.laning_phase_gold_exp_advantage,
    }
}

/// Derives the rates from raw stats when no challenge bundle is available.
///
/// Kill participation is not clamped: Riot credits overlapping assists, so the
/// ratio can exceed 1.0.
pub fn rates_from_raw_stats(participant: &ParticipantDto, info: &InfoDto) -> DerivedRates {
    let minutes = info.game_duration as f64 / 60.0;
    let team_id = participant.team_id;
    let takedowns = i64::from(participant.kills + participant.assists);

    DerivedRates {
        kda: takedowns as f64 / f64::from(participant.deaths.max(1)),
        kill_participation: ratio(takedowns, info.team_total(team_id, |p| p.kills.into())),
        damage_per_minute: participant.total_damage_dealt_to_champions as f64 / minutes,
        damage_share: ratio(
            participant.total_damage_dealt_to_champions,
            info.team_total(team_id, |p| p.total_damage_dealt_to_champions),
        ),
        gold_per_minute: participant.gold_earned as f64 / minutes,
        vision_score_per_minute: f64::from(participant.vision_score) / minutes,
        damage_taken_share: ratio(
            participant.total_damage_taken,
            info.team_total(team_id, |p| p.total_damage_taken),
        ),
        control_wards_placed: participant.detector_wards_placed,
        ..DerivedRates::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::{MetadataDto, ObjectiveDto, ObjectivesDto};

    const PUUID: &str = "player-puuid";

    fn participant(puuid: &str, team_id: i32) -> ParticipantDto {
        ParticipantDto {
            puuid: puuid.into(),
            champion_name: "Ahri".into(),
            team_position: "MIDDLE".into(),
            team_id,
            ..ParticipantDto::default()
        }
    }

    fn match_with(
        duration: i64,
        participants: Vec<ParticipantDto>,
        teams: Vec<TeamDto>,
    ) -> MatchDto {
        MatchDto {
            metadata: MetadataDto {
                match_id: "EUW1_100".into(),
            },
            info: InfoDto {
                game_duration: duration,
                participants,
                teams,
                ..InfoDto::default()
            },
        }
    }

    fn team(team_id: i32, dragons: i32, barons: i32, heralds: i32) -> TeamDto {
        TeamDto {
            team_id,
            objectives: ObjectivesDto {
                dragon: ObjectiveDto { kills: dragons },
                baron: ObjectiveDto { kills: barons },
                rift_herald: ObjectiveDto { kills: heralds },
                ..ObjectivesDto::default()
            },
        }
    }

    #[test]
    fn remake_is_rejected() {
        let m = match_with(59, vec![participant(PUUID, 100)], vec![]);

        assert!(matches!(
            extract_match_metrics(&m, PUUID),
            Err(AnalysisError::MatchTooShort { duration_secs: 59 })
        ));
    }

    #[test]
    fn missing_participant_is_rejected() {
        let m = match_with(1800, vec![participant("someone-else", 100)], vec![]);

        assert!(matches!(
            extract_match_metrics(&m, PUUID),
            Err(AnalysisError::ParticipantNotFound { .. })
        ));
    }

    #[test]
    fn raw_path_clamps_zero_deaths_to_one() {
        let mut me = participant(PUUID, 100);
        me.kills = 7;
        me.assists = 5;
        me.deaths = 0;
        let m = match_with(1800, vec![me], vec![]);

        let metrics = extract_match_metrics(&m, PUUID).unwrap();

        assert_eq!(metrics.kda, 12.0);
        assert_eq!(metrics.deaths_per_minute, 0.0);
    }

    #[test]
    fn raw_path_kill_participation_is_not_clamped() {
        let mut me = participant(PUUID, 100);
        me.kills = 4;
        me.assists = 8;
        let mut ally = participant("ally", 100);
        ally.kills = 6;
        let mut enemy = participant("enemy", 200);
        enemy.kills = 30;
        let m = match_with(1800, vec![me, ally, enemy], vec![]);

        let metrics = extract_match_metrics(&m, PUUID).unwrap();

        assert!((metrics.kill_participation - 1.2).abs() < 1e-12);
    }

    #[test]
    fn raw_path_shares_and_rates_use_team_and_duration() {
        let mut me = participant(PUUID, 100);
        me.total_damage_dealt_to_champions = 30_000;
        me.total_damage_taken = 10_000;
        me.gold_earned = 12_000;
        me.vision_score = 30;
        me.deaths = 3;
        me.total_minions_killed = 200;
        me.neutral_minions_killed = 10;
        me.wards_placed = 15;
        me.time_ccing_others = 45;
        me.detector_wards_placed = 4;
        me.damage_dealt_to_buildings = 3_000;
        let mut ally = participant("ally", 100);
        ally.total_damage_dealt_to_champions = 70_000;
        ally.total_damage_taken = 30_000;
        ally.damage_dealt_to_buildings = 9_000;
        let m = match_with(1800, vec![me, ally], vec![team(100, 2, 1, 1)]);

        let metrics = extract_match_metrics(&m, PUUID).unwrap();

        assert_eq!(metrics.damage_share, 0.3);
        assert_eq!(metrics.damage_taken_share, 0.25);
        assert_eq!(metrics.turret_damage_share, 0.25);
        assert_eq!(metrics.damage_per_minute, 1000.0);
        assert_eq!(metrics.gold_per_minute, 400.0);
        assert_eq!(metrics.vision_score_per_minute, 1.0);
        assert_eq!(metrics.deaths_per_minute, 0.1);
        assert_eq!(metrics.cs_per_minute, 7.0);
        assert_eq!(metrics.wards_per_minute, 0.5);
        assert_eq!(metrics.cc_per_minute, 1.5);
        assert_eq!(metrics.control_wards_placed, 4);
        // Raw stats carry no objective takedowns.
        assert_eq!(metrics.objective_participation, 0.0);
    }

    #[test]
    fn challenge_path_copies_rates() {
        let mut me = participant(PUUID, 100);
        me.challenges = Some(ChallengesDto {
            kda: 3.5,
            kill_participation: 0.7,
            damage_per_minute: 850.0,
            team_damage_percentage: 0.31,
            gold_per_minute: 420.0,
            vision_score_per_minute: 1.1,
            solo_kills: 2,
            dragon_takedowns: 2,
            baron_takedowns: 1,
            rift_herald_takedowns: 0,
            ..ChallengesDto::default()
        });
        let m = match_with(1800, vec![me], vec![team(100, 3, 1, 2)]);

        let metrics = extract_match_metrics(&m, PUUID).unwrap();

        assert_eq!(metrics.kda, 3.5);
        assert_eq!(metrics.kill_participation, 0.7);
        assert_eq!(metrics.damage_share, 0.31);
        assert_eq!(metrics.solo_kills, 2);
        assert_eq!(metrics.objective_participation, 0.5);
    }

    #[test]
    fn objective_participation_is_zero_without_team_objectives() {
        let challenges = ChallengesDto {
            dragon_takedowns: 3,
            baron_takedowns: 1,
            ..ChallengesDto::default()
        };

        let with_empty_team = rates_from_challenges(&challenges, Some(&team(100, 0, 0, 0)));
        let without_team = rates_from_challenges(&challenges, None);

        assert_eq!(with_empty_team.objective_participation, 0.0);
        assert_eq!(without_team.objective_participation, 0.0);
    }

    #[test]
    fn derivation_follows_presence_of_challenges() {
        let mut p = participant(PUUID, 100);
        assert!(matches!(Derivation::for_participant(&p), Derivation::RawStats));

        p.challenges = Some(ChallengesDto::default());
        assert!(matches!(
            Derivation::for_participant(&p),
            Derivation::Challenges(_)
        ));
    }
}
