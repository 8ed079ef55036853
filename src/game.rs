use crate::{Coords, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use crate::snake::{Snake, Direction::{*, self}};

use macroquad::input::KeyCode;
use rand::Rng;
use rand::seq::SliceRandom;

pub const START_MOVE_INTERVAL: u64 = 1000;
const MIN_MOVE_INTERVAL: u64 = 50;
const SPEEDUP_PER_FOOD: u64 = 50;
const MENU_FLASH_INTERVAL: u64 = 500;
const END_BLINK_INTERVAL: u64 = 400;
const FOOD_VARIANTS: usize = 4;
const RESPAWN_SAMPLE_CAP: u32 = 1000;

pub const SNAKE_START: Coords = (400, 350);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameState {
    Menu,
    Instructions,
    Active,
    End,
    Quit,
}

/// Side effects the boundary layer has to carry out after feeding an input
/// or a timer tick into the game: switch music, play sfx, refresh labels.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Started,
    FoodEaten,
    GameOver,
    SoundToggled(bool),
}

pub struct Food {
    pub pos: Coords,
    pub variant: usize,
}

pub struct SnakeGame {
    state: GameState,
    snake: Snake,
    food: Food,
    score: u32,
    foods_eaten: u32,
    move_interval: u64,
    move_timer: u64,
    sound_on: bool,
    menu_text_visible: bool,
    menu_flash_timer: u64,
    end_text_alt_colour: bool,
    end_blink_timer: u64,
}

impl SnakeGame {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let snake = Snake::new(SNAKE_START, Up);
        let food = Food {
            pos: random_free_tile(snake.segments(), &mut rng),
            variant: rng.gen_range(0..FOOD_VARIANTS),
        };

        SnakeGame {
            state: GameState::Menu,
            snake,
            food,
            score: 0,
            foods_eaten: 0,
            move_interval: START_MOVE_INTERVAL,
            move_timer: 0,
            sound_on: true,
            menu_text_visible: true,
            menu_flash_timer: 0,
            end_text_alt_colour: false,
            end_blink_timer: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_interval(&self) -> u64 {
        self.move_interval
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn menu_text_visible(&self) -> bool {
        self.menu_text_visible
    }

    pub fn end_text_alt_colour(&self) -> bool {
        self.end_text_alt_colour
    }

    /// Wall-clock driven work: the automatic move while a game is running,
    /// plus the purely cosmetic blinking-text timers on the outer screens.
    pub fn tick(&mut self, now: u64) -> Vec<GameEvent> {
        let mut events = vec![];

        match self.state {
            GameState::Menu => {
                if now >= self.menu_flash_timer + MENU_FLASH_INTERVAL {
                    self.menu_flash_timer = now;
                    self.menu_text_visible = !self.menu_text_visible;
                }
            },
            GameState::Active => {
                if now >= self.move_timer + self.move_interval {
                    self.move_timer = now;
                    self.move_snake(&mut events);
                }
            },
            GameState::End => {
                if now >= self.end_blink_timer + END_BLINK_INTERVAL {
                    self.end_blink_timer = now;
                    self.end_text_alt_colour = !self.end_text_alt_colour;
                }
            },
            _ => {}
        }

        events
    }

    pub fn handle_key(&mut self, key: KeyCode, now: u64) -> Vec<GameEvent> {
        let mut events = vec![];

        if key == KeyCode::Escape {
            self.state = GameState::Quit;
            return events;
        }

        match self.state {
            GameState::Menu if key != KeyCode::Enter => {
                self.state = GameState::Instructions;
            },
            GameState::Instructions if key == KeyCode::Enter => {
                self.start_game(now, &mut events);
            },
            GameState::Active => {
                self.handle_game_key(key, now, &mut events);
            },
            GameState::End if key == KeyCode::Enter => {
                self.start_game(now, &mut events);
            },
            _ => {}
        }

        events
    }

    pub fn toggle_sound(&mut self) -> GameEvent {
        self.sound_on = !self.sound_on;
        GameEvent::SoundToggled(self.sound_on)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start_game(&mut self, now: u64, events: &mut Vec<GameEvent>) {
        self.snake.reset(SNAKE_START);
        self.score = 0;
        self.foods_eaten = 0;
        self.move_interval = START_MOVE_INTERVAL;
        self.move_timer = now;
        self.respawn_food(&mut rand::thread_rng());

        self.state = GameState::Active;
        events.push(GameEvent::Started);
    }

    fn handle_game_key(&mut self, key: KeyCode, now: u64, events: &mut Vec<GameEvent>) {
        let direction = match key {
            KeyCode::W | KeyCode::Up => Some(Up),
            KeyCode::S | KeyCode::Down => Some(Down),
            KeyCode::A | KeyCode::Left => Some(Left),
            KeyCode::D | KeyCode::Right => Some(Right),
            _ => None,
        };

        match (direction, key) {
            (Some(direction), _) => {
                // An accepted steer moves the snake right away instead of
                // waiting out the timer, and restarts the timer from here.
                if self.snake.set_direction(direction) {
                    self.move_timer = now;
                    self.move_snake(events);
                }
            },
            (None, KeyCode::M) => events.push(self.toggle_sound()),
            _ => {}
        }
    }

    fn move_snake(&mut self, events: &mut Vec<GameEvent>) {
        self.snake.advance();
        self.check_food_eat(events);

        if self.snake.self_collision() {
            self.state = GameState::End;
            events.push(GameEvent::GameOver);
        }
    }

    fn check_food_eat(&mut self, events: &mut Vec<GameEvent>) {
        if self.snake.head() != self.food.pos {
            return;
        }

        self.foods_eaten += 1;
        self.score += self.foods_eaten * 10;

        if self.move_interval > MIN_MOVE_INTERVAL {
            self.move_interval -= SPEEDUP_PER_FOOD;
        }

        // Grow first so the respawn also avoids the fresh tail segment
        self.snake.grow();
        self.respawn_food(&mut rand::thread_rng());

        events.push(GameEvent::FoodEaten);
    }

    fn respawn_food(&mut self, rng: &mut impl Rng) {
        self.food.pos = random_free_tile(self.snake.segments(), rng);
        self.food.variant = rng.gen_range(0..FOOD_VARIANTS);
    }
}

/// Picks a uniformly random tile not occupied by the snake. Rejection
/// sampling with a cap; a crowded board falls back to choosing among the
/// enumerated free tiles, so this can't spin forever.
pub fn random_free_tile(occupied: &[Coords], rng: &mut impl Rng) -> Coords {
    let cols = SCREEN_WIDTH / TILE_SIZE;
    let rows = SCREEN_HEIGHT / TILE_SIZE;

    for _ in 0..RESPAWN_SAMPLE_CAP {
        let pos = (rng.gen_range(0..cols) * TILE_SIZE, rng.gen_range(0..rows) * TILE_SIZE);
        if !occupied.contains(&pos) {
            return pos;
        }
    }

    let free_tiles: Vec<Coords> = (0..cols)
        .flat_map(|x| (0..rows).map(move |y| (x * TILE_SIZE, y * TILE_SIZE)))
        .filter(|pos| !occupied.contains(pos))
        .collect();

    free_tiles.choose(rng).copied().unwrap_or(SNAKE_START)
}
