use crate::{Coords, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn delta(self) -> Coords {
        match self {
            Up => (0, -TILE_SIZE),
            Down => (0, TILE_SIZE),
            Left => (-TILE_SIZE, 0),
            Right => (TILE_SIZE, 0),
        }
    }
}

pub struct Snake {
    segments: Vec<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Coords, direction: Direction) -> Self {
        Snake { segments: vec![head], direction }
    }

    pub fn head(&self) -> Coords {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Coords] {
        &self.segments
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Clears the body back to a single head segment. The steering direction
    /// is deliberately left alone, it carries over into the next game.
    pub fn reset(&mut self, head: Coords) {
        self.segments.clear();
        self.segments.push(head);
    }

    /// A change is accepted unless it reverses the current direction, which
    /// would drive the head straight into the first trailing segment.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.reverse() {
            false
        } else {
            self.direction = new_direction;
            true
        }
    }

    /// Moves the head one tile in the current direction (wrapping at the
    /// screen edges) and shifts every trailing segment to the position its
    /// predecessor held before this step.
    pub fn advance(&mut self) {
        let mut carried = self.segments[0];

        let (dx, dy) = self.direction.delta();
        self.segments[0].0 += dx;
        self.segments[0].1 += dy;
        self.wrap_head();

        for segment in self.segments.iter_mut().skip(1) {
            std::mem::swap(segment, &mut carried);
        }
    }

    fn wrap_head(&mut self) {
        let head = &mut self.segments[0];

        if head.0 >= SCREEN_WIDTH {
            head.0 = 0;
        } else if head.0 < 0 {
            head.0 = SCREEN_WIDTH - TILE_SIZE;
        }

        if head.1 >= SCREEN_HEIGHT {
            head.1 = 0;
        } else if head.1 < 0 {
            head.1 = SCREEN_HEIGHT - TILE_SIZE;
        }
    }

    pub fn self_collision(&self) -> bool {
        self.segments[1..].contains(&self.segments[0])
    }

    /// Appends one tail segment. With two or more segments the new one
    /// extends the line through the last two; a lone head gets its tail one
    /// tile behind it, opposite the direction of travel.
    pub fn grow(&mut self) {
        let last = *self.segments.last().unwrap();

        let new_segment = match self.segments.len() {
            1 => {
                let (dx, dy) = self.direction.delta();
                (last.0 - dx, last.1 - dy)
            },
            len => {
                let before_last = self.segments[len - 2];
                (last.0 + (last.0 - before_last.0), last.1 + (last.1 - before_last.1))
            },
        };

        self.segments.push(new_segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_DIRECTIONS: [Direction; 4] = [Up, Down, Left, Right];

    fn snake_at(head: Coords, direction: Direction) -> Snake {
        Snake::new(head, direction)
    }

    #[test]
    fn direction_change_accepted_unless_reversing() {
        for &current in &ALL_DIRECTIONS {
            for &requested in &ALL_DIRECTIONS {
                let mut snake = snake_at((400, 350), current);
                let accepted = snake.set_direction(requested);

                assert_eq!(accepted, requested != current.reverse());
                let expected = if accepted { requested } else { current };
                assert_eq!(snake.get_direction(), expected);
            }
        }
    }

    #[test]
    fn head_moves_one_tile_per_step() {
        let mut snake = snake_at((400, 350), Right);

        for n in 1..=3 {
            snake.advance();
            assert_eq!(snake.head(), (400 + n * TILE_SIZE, 350));
        }
    }

    #[test]
    fn trailing_segments_follow_their_predecessors() {
        let mut snake = snake_at((400, 350), Up);
        for _ in 0..4 {
            snake.grow();
        }

        for _ in 0..6 {
            let before: Vec<Coords> = snake.segments().to_vec();
            snake.advance();

            for i in 1..snake.segments().len() {
                assert_eq!(snake.segments()[i], before[i - 1]);
            }
        }
    }

    #[test]
    fn growing_a_lone_head_places_the_tail_behind_it() {
        let cases = [
            (Up, (400, 400)),
            (Down, (400, 300)),
            (Left, (450, 350)),
            (Right, (350, 350)),
        ];

        for &(direction, expected) in &cases {
            let mut snake = snake_at((400, 350), direction);
            snake.grow();
            assert_eq!(snake.segments(), &[(400, 350), expected]);
        }
    }

    #[test]
    fn growing_extends_the_line_through_the_last_two_segments() {
        // Head at (400, 350) moving right, tail trailing off to the left
        let mut snake = snake_at((400, 350), Right);
        snake.grow();
        snake.advance();

        // Segments: (450, 350), (400, 350) -> new tail continues leftwards
        snake.grow();
        assert_eq!(snake.segments(), &[(450, 350), (400, 350), (350, 350)]);
    }

    #[test]
    fn growing_leaves_existing_segments_untouched() {
        let mut snake = snake_at((400, 350), Up);
        snake.grow();
        snake.advance();

        let before: Vec<Coords> = snake.segments().to_vec();
        snake.grow();

        assert_eq!(&snake.segments()[..before.len()], &before[..]);
        assert_eq!(snake.segments().len(), before.len() + 1);
    }

    #[test]
    fn head_wraps_at_every_screen_edge() {
        let mut snake = snake_at((SCREEN_WIDTH - TILE_SIZE, 350), Right);
        snake.advance();
        assert_eq!(snake.head(), (0, 350));

        snake = snake_at((0, 350), Left);
        snake.advance();
        assert_eq!(snake.head(), (SCREEN_WIDTH - TILE_SIZE, 350));

        snake = snake_at((400, 0), Up);
        snake.advance();
        assert_eq!(snake.head(), (400, SCREEN_HEIGHT - TILE_SIZE));

        snake = snake_at((400, SCREEN_HEIGHT - TILE_SIZE), Down);
        snake.advance();
        assert_eq!(snake.head(), (400, 0));
    }

    #[test]
    fn self_collision_detected_after_a_full_turn() {
        // Snake of length 5 doubling back on itself: up, left, down, right
        let mut snake = snake_at((400, 350), Up);
        for _ in 0..4 {
            snake.advance();
            snake.grow();
        }
        assert!(!snake.self_collision());

        snake.set_direction(Left);
        snake.advance();
        snake.set_direction(Down);
        snake.advance();
        snake.set_direction(Right);
        snake.advance();

        assert!(snake.self_collision());
    }
}
