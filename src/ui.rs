//! Screen flow and text content
//!
//! The front end shows a title screen, then a how-to-play screen, then the
//! game. Text here is plain strings; the web shell puts them into the DOM.

use crate::sim::{FoodKind, GameState};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Title,
    HowToPlay,
    InGame,
}

impl Screen {
    /// Next screen after pressing SPACE
    pub fn confirm(self) -> Self {
        match self {
            Screen::Title => Screen::HowToPlay,
            Screen::HowToPlay | Screen::InGame => Screen::InGame,
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == Screen::InGame
    }

    /// Heading and body lines for the menu screens
    pub fn lines(&self) -> Vec<String> {
        match self {
            Screen::Title => vec![
                "SnackLotl".to_string(),
                "An underwater axolotl food journey".to_string(),
                "Press SPACE to learn how to play SnackLotl!".to_string(),
            ],
            Screen::HowToPlay => {
                let mut lines = vec![
                    "HOW TO PLAY".to_string(),
                    "Use A / D or Left / Right arrow keys to move".to_string(),
                ];
                lines.extend(FoodKind::ALL.iter().map(|kind| {
                    format!("{}: {}", kind_label(*kind), effect_label(*kind))
                }));
                lines.push("Collect snacks. Avoid toxins.".to_string());
                lines.push("Press SPACE to START".to_string());
                lines
            }
            Screen::InGame => Vec::new(),
        }
    }
}

fn kind_label(kind: FoodKind) -> &'static str {
    match kind {
        FoodKind::Shrimp => "Shrimp",
        FoodKind::Fish => "Fish",
        FoodKind::Toxin => "Toxin",
    }
}

fn effect_label(kind: FoodKind) -> &'static str {
    if kind.is_harmful() {
        "-1 life!"
    } else {
        "+1 point"
    }
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub lives: String,
    pub high_score: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("Score: {}", state.score),
            lives: format!("Lives: {}", state.lives),
            high_score: format!("High Score: {}", state.high_score),
        }
    }
}

/// Overlay shown after the run ends, or `None` while playing
pub fn game_over_lines(state: &GameState) -> Option<Vec<String>> {
    if !state.is_game_over() {
        return None;
    }
    Some(vec![
        "GAME OVER".to_string(),
        format!("Final Score: {}", state.score),
        format!("High Score: {}", state.high_score),
        "Press R to Restart or Q to Quit".to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    #[test]
    fn test_screen_flow() {
        let screen = Screen::default();
        assert_eq!(screen, Screen::Title);
        let screen = screen.confirm();
        assert_eq!(screen, Screen::HowToPlay);
        assert!(!screen.is_playing());
        let screen = screen.confirm();
        assert!(screen.is_playing());
        assert_eq!(screen.confirm(), Screen::InGame);
    }

    #[test]
    fn test_how_to_play_describes_every_kind() {
        let lines = Screen::HowToPlay.lines();
        assert!(lines.contains(&"Toxin: -1 life!".to_string()));
        assert!(lines.contains(&"Shrimp: +1 point".to_string()));
        assert!(lines.contains(&"Fish: +1 point".to_string()));
        assert!(Screen::InGame.lines().is_empty());
    }

    #[test]
    fn test_hud_and_game_over_text() {
        let mut state = GameState::new(Tuning::default(), 8);
        state.score = 5;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score, "Score: 5");
        assert_eq!(hud.lives, "Lives: 3");
        assert_eq!(hud.high_score, "High Score: 8");
        assert_eq!(game_over_lines(&state), None);

        state.phase = GamePhase::GameOver;
        let lines = game_over_lines(&state).unwrap();
        assert_eq!(lines[0], "GAME OVER");
        assert_eq!(lines[1], "Final Score: 5");
    }
}
