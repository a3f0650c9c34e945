use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use super::AnalysisError;
use super::insights::identify_insights;
use super::lane_phase::analyze_lane_phase;
use super::match_metrics::analyze_match;
use super::metrics::{
    AverageMetrics, ChampionStats, ConsistencyMetrics, MatchAnalysis, MatchMetrics,
    PlayerAnalysis, PlayerAnalysisParams, RankSnapshot, RoleStats,
};
use super::stats::{Average, population_std_dev, ratio};

pub const UNKNOWN_ROLE: &str = "UNKNOWN";

/// Analyzes every match of a player and folds them into a [`PlayerAnalysis`].
///
/// Matches that cannot be analyzed (remakes, missing participant) are skipped.
#[instrument(skip_all, fields(puuid = params.puuid, supplied = params.matches.len()))]
pub fn analyze_player(params: PlayerAnalysisParams<'_>) -> Result<PlayerAnalysis, AnalysisError> {
    if params.matches.is_empty() {
        return Err(AnalysisError::NoMatches);
    }

    let mut analyses = Vec::with_capacity(params.matches.len());
    for match_data in params.matches {
        let match_id = &match_data.metadata.match_id;
        let mut analysis = match analyze_match(match_data, params.puuid) {
            Ok(analysis) => analysis,
            Err(e) => {
                debug!(match_id = %match_id, error = %e, "🧮 Skipping match");
                continue;
            }
        };

        if let Some(timeline) = params.timelines.get(match_id) {
            match analyze_lane_phase(timeline, match_data, params.puuid) {
                Ok(lane) => analysis.lane_phase = Some(lane),
                Err(e) => warn!(match_id = %match_id, error = %e, "🧮 Lane phase unavailable"),
            }
        }

        analyses.push(analysis);
    }

    if analyses.is_empty() {
        return Err(AnalysisError::NoValidMatches);
    }

    let analysis = aggregate(params, analyses);
    info!(
        analyzed = analysis.total_matches,
        win_rate = analysis.win_rate,
        "🧮 Player analysis complete"
    );

    Ok(analysis)
}

fn aggregate(params: PlayerAnalysisParams<'_>, matches: Vec<MatchAnalysis>) -> PlayerAnalysis {
    let metrics: Vec<&MatchMetrics> = matches.iter().map(|m| &m.metrics).collect();

    let averages = compute_averages(&metrics);
    let consistency = compute_consistency(&metrics);
    let champion_pool = champion_pool(&metrics);
    let (strengths, weaknesses) = identify_insights(&averages, champion_pool.len(), &consistency);

    PlayerAnalysis {
        puuid: params.puuid.to_string(),
        game_name: params.game_name.to_string(),
        tag_line: params.tag_line.to_string(),
        rank: params.league.map(RankSnapshot::from),
        win_rate: win_rate(&metrics),
        total_matches: metrics.len(),
        averages,
        consistency,
        role_breakdown: role_breakdown(&metrics),
        champion_pool,
        strengths,
        weaknesses,
        matches,
    }
}

fn win_rate(metrics: &[&MatchMetrics]) -> f64 {
    let wins = metrics.iter().filter(|m| m.win).count();
    ratio(wins as i64, metrics.len() as i64)
}

pub fn compute_averages(metrics: &[&MatchMetrics]) -> AverageMetrics {
    let mean = |field: fn(&MatchMetrics) -> f64| -> f64 {
        metrics.iter().map(|&m| field(m)).collect::<Average>().average()
    };

    AverageMetrics {
        kda: mean(|m| m.kda),
        kill_participation: mean(|m| m.kill_participation),
        damage_per_minute: mean(|m| m.damage_per_minute),
        damage_share: mean(|m| m.damage_share),
        cs_per_minute: mean(|m| m.cs_per_minute),
        vision_score_per_minute: mean(|m| m.vision_score_per_minute),
        deaths_per_minute: mean(|m| m.deaths_per_minute),
        gold_per_minute: mean(|m| m.gold_per_minute),
        objective_participation: mean(|m| m.objective_participation),
    }
}

pub fn compute_consistency(metrics: &[&MatchMetrics]) -> ConsistencyMetrics {
    let std_dev = |field: fn(&MatchMetrics) -> f64| -> f64 {
        let values: Vec<f64> = metrics.iter().map(|&m| field(m)).collect();
        population_std_dev(&values)
    };

    ConsistencyMetrics {
        kda_std_dev: std_dev(|m| m.kda),
        cs_per_min_std_dev: std_dev(|m| m.cs_per_minute),
        dpm_std_dev: std_dev(|m| m.damage_per_minute),
    }
}

/// Matches grouped by key, keys in lexical order.
fn group_by<'a>(
    metrics: &[&'a MatchMetrics],
    key: impl Fn(&MatchMetrics) -> &str,
) -> BTreeMap<String, Vec<&'a MatchMetrics>> {
    let mut groups: BTreeMap<String, Vec<&MatchMetrics>> = BTreeMap::new();
    for &m in metrics {
        groups.entry(key(m).to_string()).or_default().push(m);
    }
    groups
}

/// Per-role games and win rate, most played first.
pub fn role_breakdown(metrics: &[&MatchMetrics]) -> Vec<RoleStats> {
    let groups = group_by(metrics, |m| {
        if m.role.is_empty() {
            UNKNOWN_ROLE
        } else {
            m.role.as_str()
        }
    });

    let mut roles: Vec<RoleStats> = groups
        .into_iter()
        .map(|(role, games)| RoleStats {
            role,
            games_played: games.len(),
            win_rate: win_rate(&games),
        })
        .collect();

    // stable: ties keep lexical order
    roles.sort_by(|a, b| b.games_played.cmp(&a.games_played));
    roles
}

/// Per-champion games, win rate and KDA, most played first.
pub fn champion_pool(metrics: &[&MatchMetrics]) -> Vec<ChampionStats> {
    let mut pool: Vec<ChampionStats> = group_by(metrics, |m| m.champion_name.as_str())
        .into_iter()
        .map(|(champion_name, games)| ChampionStats {
            champion_name,
            games_played: games.len(),
            win_rate: win_rate(&games),
            avg_kda: games.iter().map(|m| m.kda).collect::<Average>().average(),
        })
        .collect();

    pool.sort_by(|a, b| b.games_played.cmp(&a.games_played));
    pool
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::analysis::InsightCategory;
    use crate::riot::{
        ChallengesDto, InfoDto, LeagueEntryDto, MatchDto, MetadataDto, ParticipantDto, TeamDto,
        TimelineDto, TimelineInfoDto,
    };

    const PUUID: &str = "player-puuid";

    fn ranked_match(id: &str, champion: &str, role: &str, win: bool, duration: i64) -> MatchDto {
        let me = ParticipantDto {
            puuid: PUUID.into(),
            champion_name: champion.into(),
            team_position: role.into(),
            team_id: 100,
            win,
            kills: 6,
            deaths: 3,
            assists: 9,
            total_minions_killed: 180,
            neutral_minions_killed: 30,
            challenges: Some(ChallengesDto {
                kda: 5.0,
                kill_participation: 0.6,
                damage_per_minute: 700.0,
                team_damage_percentage: 0.25,
                gold_per_minute: 420.0,
                vision_score_per_minute: 1.0,
                ..ChallengesDto::default()
            }),
            ..ParticipantDto::default()
        };

        MatchDto {
            metadata: MetadataDto {
                match_id: id.into(),
            },
            info: InfoDto {
                game_duration: duration,
                participants: vec![me],
                teams: vec![TeamDto {
                    team_id: 100,
                    ..TeamDto::default()
                }],
                ..InfoDto::default()
            },
        }
    }

    fn params<'a>(
        matches: &'a [MatchDto],
        timelines: &'a HashMap<String, TimelineDto>,
    ) -> PlayerAnalysisParams<'a> {
        PlayerAnalysisParams {
            puuid: PUUID,
            game_name: "Chalop",
            tag_line: "3012",
            matches,
            timelines,
            league: None,
        }
    }

    #[test]
    fn empty_input_is_no_matches() {
        let timelines = HashMap::new();

        let res = analyze_player(params(&[], &timelines));

        assert!(matches!(res, Err(AnalysisError::NoMatches)));
    }

    #[test]
    fn only_remakes_is_no_valid_matches() {
        let matches = vec![
            ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 45),
            ranked_match("EUW1_2", "Ahri", "MIDDLE", false, 59),
        ];
        let timelines = HashMap::new();

        let res = analyze_player(params(&matches, &timelines));

        assert!(matches!(res, Err(AnalysisError::NoValidMatches)));
    }

    #[test]
    fn win_rate_is_exact() {
        let matches: Vec<_> = (0..5)
            .map(|i| ranked_match(&format!("EUW1_{i}"), "Ahri", "MIDDLE", i != 2, 1800))
            .collect();
        let timelines = HashMap::new();

        let analysis = analyze_player(params(&matches, &timelines)).unwrap();

        assert_eq!(analysis.total_matches, 5);
        assert_eq!(analysis.win_rate, 0.8);
    }

    #[test]
    fn remake_does_not_count() {
        let mut remake = ranked_match("EUW1_9", "Zed", "MIDDLE", false, 30);
        if let Some(c) = remake.info.participants[0].challenges.as_mut() {
            c.kda = 100.0;
        }
        let matches = vec![
            ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 1800),
            remake,
            ranked_match("EUW1_2", "Ahri", "MIDDLE", true, 1800),
        ];
        let timelines = HashMap::new();

        let analysis = analyze_player(params(&matches, &timelines)).unwrap();

        assert_eq!(analysis.total_matches, 2);
        assert_eq!(analysis.averages.kda, 5.0);
        assert_eq!(analysis.win_rate, 1.0);
        assert_eq!(analysis.champion_pool.len(), 1);
    }

    #[test]
    fn identical_matches_have_zero_deviation() {
        let matches: Vec<_> = (0..4)
            .map(|i| ranked_match(&format!("EUW1_{i}"), "Ahri", "MIDDLE", true, 1800))
            .collect();
        let timelines = HashMap::new();

        let analysis = analyze_player(params(&matches, &timelines)).unwrap();

        assert_eq!(analysis.consistency, ConsistencyMetrics::default());
        assert_eq!(analysis.averages.kill_participation, 0.6);
    }

    #[test]
    fn single_match_has_zero_deviation() {
        let matches = vec![ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 1800)];
        let timelines = HashMap::new();

        let analysis = analyze_player(params(&matches, &timelines)).unwrap();

        assert_eq!(analysis.consistency.kda_std_dev, 0.0);
        assert!(analysis.strengths.iter().any(|i| i.category == InsightCategory::Consistency));
    }

    #[test]
    fn breakdowns_sort_by_games_played() {
        let matches = vec![
            ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 1800),
            ranked_match("EUW1_2", "Zed", "MIDDLE", false, 1800),
            ranked_match("EUW1_3", "Zed", "", true, 1800),
            ranked_match("EUW1_4", "Zed", "MIDDLE", true, 1800),
        ];
        let timelines = HashMap::new();

        let analysis = analyze_player(params(&matches, &timelines)).unwrap();

        let pool: Vec<_> = analysis
            .champion_pool
            .iter()
            .map(|c| (c.champion_name.as_str(), c.games_played))
            .collect();
        assert_eq!(pool, [("Zed", 3), ("Ahri", 1)]);

        let roles: Vec<_> = analysis
            .role_breakdown
            .iter()
            .map(|r| (r.role.as_str(), r.games_played))
            .collect();
        assert_eq!(roles, [("MIDDLE", 3), (UNKNOWN_ROLE, 1)]);
        assert_eq!(analysis.role_breakdown[1].win_rate, 1.0);
    }

    #[test]
    fn analysis_is_idempotent() {
        let matches = vec![
            ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 1800),
            ranked_match("EUW1_2", "Zed", "TOP", false, 1500),
            ranked_match("EUW1_3", "Lux", "UTILITY", true, 2100),
            ranked_match("EUW1_4", "Zed", "JUNGLE", false, 1300),
        ];
        let timelines = HashMap::new();

        let first = analyze_player(params(&matches, &timelines)).unwrap();
        let second = analyze_player(params(&matches, &timelines)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rank_and_lane_phase_are_attached() {
        let matches = vec![ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 1800)];
        let mut timelines = HashMap::new();
        timelines.insert(
            "EUW1_1".to_string(),
            TimelineDto {
                info: TimelineInfoDto {
                    participants: vec![crate::riot::TimelineParticipantDto {
                        participant_id: 1,
                        puuid: PUUID.into(),
                    }],
                    ..TimelineInfoDto::default()
                },
            },
        );
        let league = LeagueEntryDto {
            tier: "GOLD".into(),
            rank: "II".into(),
            league_points: 42,
            ..LeagueEntryDto::default()
        };

        let analysis = analyze_player(PlayerAnalysisParams {
            league: Some(&league),
            ..params(&matches, &timelines)
        })
        .unwrap();

        assert_eq!(analysis.rank.unwrap().to_string(), "GOLD II (42 LP)");
        assert!(analysis.matches[0].lane_phase.is_some());
    }

    #[test]
    fn unreadable_timeline_keeps_the_match() {
        let matches = vec![ranked_match("EUW1_1", "Ahri", "MIDDLE", true, 1800)];
        let mut timelines = HashMap::new();
        timelines.insert("EUW1_1".to_string(), TimelineDto::default());

        let analysis = analyze_player(params(&matches, &timelines)).unwrap();

        assert_eq!(analysis.total_matches, 1);
        assert!(analysis.matches[0].lane_phase.is_none());
    }
}
