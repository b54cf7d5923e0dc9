use game_types::{Player, PlayerId};
use std::cmp::Reverse;

/// Points for the player who guessed the word.
pub const GUESSER_POINTS: u32 = 10;
/// Points for the drawer whose word was guessed.
pub const DRAWER_POINTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessAward {
    pub guesser_id: PlayerId,
    pub guesser_name: String,
    pub guesser_points: u32,
    pub drawer_id: Option<PlayerId>,
    pub drawer_points: u32,
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Credit a correct guess. Returns `None` when the guesser is unknown or is the drawer.
    pub fn award_correct_guess(
        players: &mut [Player],
        guesser_id: &str,
        drawer_id: Option<&str>,
    ) -> Option<GuessAward> {
        if drawer_id == Some(guesser_id) {
            return None;
        }

        let guesser = players.iter_mut().find(|p| p.id == guesser_id)?;
        guesser.score += GUESSER_POINTS;
        let guesser_name = guesser.name.clone();

        let mut award = GuessAward {
            guesser_id: guesser_id.to_string(),
            guesser_name,
            guesser_points: GUESSER_POINTS,
            drawer_id: None,
            drawer_points: 0,
        };

        if let Some(drawer) = drawer_id.and_then(|id| players.iter_mut().find(|p| p.id == id)) {
            drawer.score += DRAWER_POINTS;
            award.drawer_id = Some(drawer.id.clone());
            award.drawer_points = DRAWER_POINTS;
        }

        Some(award)
    }

    pub fn reset_scores(players: &mut [Player]) {
        for player in players {
            player.score = 0;
        }
    }

    /// Highest score wins; ties go to whoever comes first in roster order.
    pub fn leader(players: &[Player]) -> Option<&Player> {
        players.iter().min_by_key(|p| Reverse(p.score))
    }

    /// Players ordered by score, descending. Stable, so ties keep roster order.
    pub fn standings(players: &[Player]) -> Vec<Player> {
        let mut sorted = players.to_vec();
        sorted.sort_by_key(|p| Reverse(p.score));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::default_roster;

    fn with_scores(scores: &[u32]) -> Vec<Player> {
        let mut players = default_roster();
        for (player, score) in players.iter_mut().zip(scores) {
            player.score = *score;
        }
        players
    }

    #[test]
    fn test_award_correct_guess() {
        let mut players = default_roster();
        let award = ScoringEngine::award_correct_guess(&mut players, "2", Some("1")).unwrap();

        assert_eq!(award.guesser_name, "Player 2");
        assert_eq!(award.guesser_points, 10);
        assert_eq!(award.drawer_points, 5);
        assert_eq!(players[1].score, 10);
        assert_eq!(players[0].score, 5);
        assert_eq!(players[2].score, 0);
    }

    #[test]
    fn test_drawer_cannot_score_own_word() {
        let mut players = default_roster();
        assert!(ScoringEngine::award_correct_guess(&mut players, "1", Some("1")).is_none());
        assert!(players.iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_unknown_guesser() {
        let mut players = default_roster();
        assert!(ScoringEngine::award_correct_guess(&mut players, "99", Some("1")).is_none());
        assert!(players.iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_missing_drawer_still_credits_guesser() {
        let mut players = default_roster();
        let award = ScoringEngine::award_correct_guess(&mut players, "3", None).unwrap();
        assert_eq!(award.drawer_id, None);
        assert_eq!(award.drawer_points, 0);
        assert_eq!(players[2].score, 10);
    }

    #[test]
    fn test_leader_tie_break() {
        let players = with_scores(&[5, 15, 15, 0]);
        assert_eq!(ScoringEngine::leader(&players).unwrap().id, "2");

        let all_zero = with_scores(&[0, 0, 0, 0]);
        assert_eq!(ScoringEngine::leader(&all_zero).unwrap().id, "1");

        assert!(ScoringEngine::leader(&[]).is_none());
    }

    #[test]
    fn test_standings_are_stable() {
        let players = with_scores(&[5, 15, 15, 20]);
        let ids: Vec<String> = ScoringEngine::standings(&players)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn test_reset_scores() {
        let mut players = with_scores(&[5, 15, 15, 20]);
        ScoringEngine::reset_scores(&mut players);
        assert!(players.iter().all(|p| p.score == 0));
    }
}
