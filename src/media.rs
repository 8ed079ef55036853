use crate::{Coords, SCREEN_HEIGHT};

use std::process::Command;

use log::{error, warn};
use macroquad::audio::{self, PlaySoundParams, Sound};
use macroquad::color::{Color, BLACK, WHITE};
use macroquad::math::{vec2, Rect, Vec2};
use macroquad::text::{draw_text_ex, load_ttf_font, Font, TextParams};
use macroquad::texture::{draw_texture_ex, load_texture, DrawTextureParams, Texture2D};

const FONT_PATH: &str = "fonts/dogicapixelbold.ttf";
const FOOD_SPRITE_PATHS: [&str; 4] = [
    "sprites/food1.png",
    "sprites/food2.png",
    "sprites/food3.png",
    "sprites/food4.png",
];

const PURPLE_TEXT: Color = Color::new(0.5, 0.0, 0.5, 1.0);

/// A drawable image with an on-screen rectangle. Loading is best-effort: on
/// failure the sprite keeps no handle and drawing it produces blank space.
pub struct Sprite {
    texture: Option<Texture2D>,
    pub rect: Rect,
}

impl Sprite {
    pub async fn load(path: &str, x: f32, y: f32) -> Sprite {
        match load_texture(path).await {
            Ok(texture) => {
                let rect = Rect::new(x, y, texture.width(), texture.height());
                Sprite { texture: Some(texture), rect }
            },
            Err(err) => {
                error!("failed to load texture {:?}: {:?}", path, err);
                Sprite { texture: None, rect: Rect::new(x, y, 0., 0.) }
            },
        }
    }

    /// Replaces the drawable; the previous handle is released by the
    /// assignment. The rectangle is re-measured from the new texture.
    pub fn swap_texture(&mut self, texture: &Texture2D) {
        self.rect.w = texture.width();
        self.rect.h = texture.height();
        self.texture = Some(texture.clone());
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn draw(&self) {
        self.draw_at(self.rect.x, self.rect.y);
    }

    pub fn draw_at(&self, x: f32, y: f32) {
        if let Some(texture) = &self.texture {
            let params = DrawTextureParams {
                dest_size: Some(vec2(self.rect.w, self.rect.h)),
                ..Default::default()
            };
            draw_texture_ex(texture, x, y, WHITE, params);
        }
    }
}

/// On-screen text. macroquad draws text immediate-mode through the loaded
/// font, so unlike sprites there is no per-label texture to manage.
pub struct Label {
    pub text: String,
    pub color: Color,
    x: f32,
    y: f32,
    size: u16,
}

impl Label {
    pub fn new(text: &str, x: f32, y: f32, size: u16) -> Label {
        Label { text: text.to_owned(), color: BLACK, x, y, size }
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn draw(&self, font: Option<&Font>) {
        let params = TextParams {
            font,
            font_size: self.size,
            color: self.color,
            ..Default::default()
        };

        // The stored position is the label's top-left corner; draw_text_ex
        // wants the baseline.
        draw_text_ex(&self.text, self.x, self.y + self.size as f32, params);
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    InGame,
}

/// Owns the music tracks and sound effects, and remembers which track is
/// playing so it can be halted on a switch.
pub struct Audio {
    menu_music: Option<Sound>,
    ingame_music: Option<Sound>,
    collect_sfx: Option<Sound>,
    end_sfx: Option<Sound>,
    playing: Option<MusicTrack>,
}

impl Audio {
    pub async fn load() -> Audio {
        Audio {
            menu_music: load_sound_logged("music/menu_music.wav").await,
            ingame_music: load_sound_logged("music/ingame_music.wav").await,
            collect_sfx: load_sound_logged("sfx/collect.wav").await,
            end_sfx: load_sound_logged("sfx/end.wav").await,
            playing: None,
        }
    }

    pub fn play_music(&mut self, track: MusicTrack) {
        self.halt_music();

        if let Some(sound) = self.track_sound(track) {
            audio::play_sound(sound, PlaySoundParams { looped: true, volume: 1. });
            self.playing = Some(track);
        }
    }

    pub fn halt_music(&mut self) {
        if let Some(track) = self.playing.take() {
            if let Some(sound) = self.track_sound(track) {
                audio::stop_sound(sound);
            }
        }
    }

    pub fn play_collect_sfx(&self) {
        play_once(&self.collect_sfx);
    }

    pub fn play_end_sfx(&self) {
        play_once(&self.end_sfx);
    }

    fn track_sound(&self, track: MusicTrack) -> Option<&Sound> {
        match track {
            MusicTrack::Menu => self.menu_music.as_ref(),
            MusicTrack::InGame => self.ingame_music.as_ref(),
        }
    }
}

fn play_once(sound: &Option<Sound>) {
    if let Some(sound) = sound {
        audio::play_sound(sound, PlaySoundParams { looped: false, volume: 1. });
    }
}

async fn load_sound_logged(path: &str) -> Option<Sound> {
    match audio::load_sound(path).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            error!("failed to load sound {:?}: {:?}", path, err);
            None
        },
    }
}

/// Everything loaded from disk plus the labels composed at runtime.
pub struct Assets {
    pub menu_image: Sprite,
    pub instructions_image: Sprite,
    pub grid: Sprite,
    pub end_image: Sprite,
    pub sound_on_icon: Sprite,
    pub sound_off_icon: Sprite,
    pub project_logo: Sprite,
    pub snek_head: Sprite,
    pub snek_tail: Sprite,
    pub food: Sprite,
    food_textures: Vec<Option<Texture2D>>,

    pub font: Option<Font>,
    pub start_text: Label,
    pub score_text: Label,
    pub you_won_text: Label,
    pub end_score_text: Label,
    pub restart_hint: Label,
    pub exit_hint: Label,

    pub audio: Audio,
}

impl Assets {
    pub async fn load() -> Assets {
        let icon_y = (SCREEN_HEIGHT - 50) as f32;

        let mut food_textures = vec![];
        for path in &FOOD_SPRITE_PATHS {
            match load_texture(path).await {
                Ok(texture) => food_textures.push(Some(texture)),
                Err(err) => {
                    error!("failed to load texture {:?}: {:?}", path, err);
                    food_textures.push(None);
                },
            }
        }

        let font = match load_ttf_font(FONT_PATH).await {
            Ok(font) => Some(font),
            Err(err) => {
                error!("failed to load font {:?}: {:?}", FONT_PATH, err);
                None
            },
        };

        Assets {
            menu_image: Sprite::load("sprites/menu.png", 0., 0.).await,
            instructions_image: Sprite::load("sprites/instructions.png", 0., 0.).await,
            grid: Sprite::load("sprites/grid.png", 0., 0.).await,
            end_image: Sprite::load("sprites/end.png", 0., 0.).await,
            sound_on_icon: Sprite::load("sprites/sound_on.png", 0., icon_y).await,
            sound_off_icon: Sprite::load("sprites/sound_off.png", 0., icon_y).await,
            project_logo: Sprite::load("sprites/github_logo.png", 60., icon_y).await,
            snek_head: Sprite::load("sprites/snek_head.png", 0., 0.).await,
            snek_tail: Sprite::load("sprites/snek_tail.png", 0., 0.).await,
            food: Sprite::load(FOOD_SPRITE_PATHS[0], 0., 0.).await,
            food_textures,

            font,
            start_text: Label::new("press a snek", 400., 400., 24),
            score_text: Label::new("Score: 0", 10., (SCREEN_HEIGHT - 30) as f32, 24),
            you_won_text: Label::new("YOU HECKIN WON!!!", 250., 300., 40),
            end_score_text: Label::new("", 200., 400., 24),
            restart_hint: Label::new("Press ENTER to restart the game!", 200., 490., 20),
            exit_hint: Label::new("Press ESC to exit snek (makes snek sad) :c", 190., 600., 18),

            audio: Audio::load().await,
        }
    }

    pub fn swap_food_sprite(&mut self, variant: usize) {
        if let Some(texture) = self.food_textures.get(variant).and_then(|t| t.as_ref()) {
            self.food.swap_texture(texture);
        }
    }

    pub fn draw_food_at(&self, pos: Coords) {
        self.food.draw_at(pos.0 as f32, pos.1 as f32);
    }

    pub fn set_end_headline_colour(&mut self, alt: bool) {
        self.you_won_text.color = if alt { PURPLE_TEXT } else { BLACK };
    }
}

/// Fire-and-forget hand-off to the platform's URL opener.
pub fn open_url(url: &str) {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", url])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else {
        ("xdg-open", vec![url])
    };

    if let Err(err) = Command::new(program).args(&args).spawn() {
        warn!("couldn't open {}: {}", url, err);
    }
}
