mod common;

use common::*;
use game_core::{DrawingSurface, RasterCanvas};
use game_types::{Color, GameState};

#[test]
fn test_game_creation() {
    let game = create_test_game();
    assert_eq!(game.players().len(), 4);
    assert_state(&game, GameState::Waiting, 0);
}

#[test]
fn test_word_bank() {
    let bank = create_test_word_bank();
    assert!(bank.contains("apple"));
    assert!(bank.contains("TRAIN"));
    assert!(!bank.contains("invalid"));
}

#[test]
fn test_start_assigns_first_drawer() {
    let game = create_started_game();
    assert_state(&game, GameState::Playing, 1);
    assert_eq!(game.current_player_id(), Some("1"));
    assert!(create_test_word_bank().contains(game.current_word()));
    assert!(game.players().iter().all(|p| p.score == 0));
}

#[test]
fn test_surface_on_raster_canvas() {
    let mut surface = DrawingSurface::new(RasterCanvas::new(64, 64).unwrap());
    surface.set_line_width(4.0);
    surface.pointer_down(4.0, 32.0);
    surface.pointer_move(60.0, 32.0);
    let stroke = surface.pointer_up().unwrap();

    assert_eq!(stroke.color, Color::BLACK);
    assert_eq!(surface.context().pixel(32, 32), Some(Color::BLACK));
}
