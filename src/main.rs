mod game;
mod media;
mod snake;

pub type Px = i32;
pub type Coords = (Px, Px);

pub const TILE_SIZE: Px = 50;
pub const SCREEN_WIDTH: Px = TILE_SIZE * 20; // 1000px
pub const SCREEN_HEIGHT: Px = TILE_SIZE * 15; // 750px

const PROJECT_URL: &str = "https://github.com/emredesu/snek";

use game::{GameEvent, GameState, SnakeGame};
use media::{Assets, MusicTrack};

use macroquad::input::{get_last_key_pressed, is_mouse_button_pressed, mouse_position, MouseButton};
use macroquad::math::vec2;
use macroquad::prelude::{clear_background, next_frame, Conf, WHITE};
use macroquad::time::get_time;

fn window_conf() -> Conf {
    Conf {
        window_title: "snek".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut assets = Assets::load().await;
    let mut game = SnakeGame::new();

    assets.swap_food_sprite(game.food().variant);
    if game.sound_on() {
        assets.audio.play_music(MusicTrack::Menu);
    }

    while game.state() != GameState::Quit {
        let now = now_ms();

        let mut events = game.tick(now);
        if let Some(key) = get_last_key_pressed() {
            events.extend(game.handle_key(key, now));
        }
        if game.state() == GameState::Menu && is_mouse_button_pressed(MouseButton::Left) {
            events.extend(handle_menu_click(&mut game, &assets));
        }

        for event in events {
            apply_event(event, &game, &mut assets);
        }

        draw_frame(&game, &mut assets);
        next_frame().await;
    }
}

fn now_ms() -> u64 {
    (get_time() * 1000.) as u64
}

/// Mouse handling on the menu screen: the sound icon toggles sound, the
/// project logo opens the repository in a browser. Neither changes state.
fn handle_menu_click(game: &mut SnakeGame, assets: &Assets) -> Vec<GameEvent> {
    let (mx, my) = mouse_position();
    let point = vec2(mx, my);

    if assets.sound_on_icon.contains(point) || assets.sound_off_icon.contains(point) {
        return vec![game.toggle_sound()];
    }

    if assets.project_logo.contains(point) {
        media::open_url(PROJECT_URL);
    }

    vec![]
}

/// Carries out the side effects the game asked for: music switches, sound
/// effects and label refreshes.
fn apply_event(event: GameEvent, game: &SnakeGame, assets: &mut Assets) {
    match event {
        GameEvent::Started => {
            assets.score_text.set_text("Score: 0".to_owned());
            assets.swap_food_sprite(game.food().variant);

            if game.sound_on() {
                assets.audio.play_music(MusicTrack::InGame);
            }
        },
        GameEvent::FoodEaten => {
            if game.sound_on() {
                assets.audio.play_collect_sfx();
            }

            assets.score_text.set_text(format!("Score: {}", game.score()));
            assets.swap_food_sprite(game.food().variant);
        },
        GameEvent::GameOver => {
            assets.audio.halt_music();
            if game.sound_on() {
                assets.audio.play_end_sfx();
            }

            assets.end_score_text.set_text(format!("Your score: {}", game.score()));
        },
        GameEvent::SoundToggled(sound_on) => {
            if sound_on {
                let track = match game.state() {
                    GameState::Active => MusicTrack::InGame,
                    _ => MusicTrack::Menu,
                };
                assets.audio.play_music(track);
            } else {
                assets.audio.halt_music();
            }
        },
    }
}

fn draw_frame(game: &SnakeGame, assets: &mut Assets) {
    clear_background(WHITE);

    if game.state() == GameState::End {
        assets.set_end_headline_colour(game.end_text_alt_colour());
    }

    let font = assets.font.as_ref();

    match game.state() {
        GameState::Menu => {
            assets.menu_image.draw();
            assets.project_logo.draw();

            if game.menu_text_visible() {
                assets.start_text.draw(font);
            }

            if game.sound_on() {
                assets.sound_on_icon.draw();
            } else {
                assets.sound_off_icon.draw();
            }
        },
        GameState::Instructions => {
            assets.instructions_image.draw();
        },
        GameState::Active => {
            assets.grid.draw();
            assets.score_text.draw(font);
            assets.draw_food_at(game.food().pos);

            for (i, &(x, y)) in game.snake().segments().iter().enumerate() {
                let sprite = if i == 0 { &assets.snek_head } else { &assets.snek_tail };
                sprite.draw_at(x as f32, y as f32);
            }
        },
        GameState::End => {
            assets.end_image.draw();
            assets.you_won_text.draw(font);
            assets.end_score_text.draw(font);
            assets.restart_hint.draw(font);
            assets.exit_hint.draw(font);
        },
        GameState::Quit => {}
    }
}
