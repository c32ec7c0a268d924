use serde::Serialize;
use tracing::trace;

use crate::config::BotConfig;
use crate::game::{EntityHandle, EntityLocator, ObjectsArray};
use crate::process::ReadMemory;

/// Game speed assumed when the real multiplier cannot be read
pub const DEFAULT_GAME_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A level object ahead of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Object category id as stored by the game
    #[serde(rename = "type")]
    pub kind: i32,
}

/// Game state captured in one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub player: Position,
    pub is_dead: bool,
    pub game_speed: f32,
    /// Ascending by x, all strictly ahead of the player and within range
    pub obstacles: Vec<Obstacle>,
}

impl GameSnapshot {
    /// Snapshot for a cycle with no live player: nothing to act on
    pub fn absent() -> Self {
        Self {
            player: Position::default(),
            is_dead: true,
            game_speed: DEFAULT_GAME_SPEED,
            obstacles: Vec::new(),
        }
    }

    pub fn nearest(&self) -> Option<&Obstacle> {
        self.obstacles.first()
    }
}

/// Builds a [`GameSnapshot`] from the entities a locator resolves
#[derive(Debug, Clone, Copy)]
pub struct SnapshotBuilder {
    max_distance: f32,
    obstacle_cap: usize,
}

impl SnapshotBuilder {
    pub fn new(max_distance: f32, obstacle_cap: usize) -> Self {
        Self {
            max_distance,
            obstacle_cap,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.max_distance, config.obstacle_cap)
    }

    pub fn build<R: ReadMemory + ?Sized>(&self, locator: &EntityLocator<'_, R>) -> GameSnapshot {
        let entities = locator.resolve();

        let (Some(play_layer), Some(player)) = (entities.play_layer, entities.player) else {
            return GameSnapshot::absent();
        };

        let memory = locator.memory();
        let offsets = locator.offsets();

        let position = Position {
            x: memory.read_f32(player.field(offsets.player_x)),
            y: memory.read_f32(player.field(offsets.player_y)),
        };
        let is_dead = memory.read_i32(player.field(offsets.player_dead)) != 0;
        let game_speed = read_game_speed(locator, play_layer);

        let obstacles = match entities.objects {
            Some(array) => self.collect_obstacles(locator, array, position.x),
            None => Vec::new(),
        };

        GameSnapshot {
            player: position,
            is_dead,
            game_speed,
            obstacles,
        }
    }

    fn collect_obstacles<R: ReadMemory + ?Sized>(
        &self,
        locator: &EntityLocator<'_, R>,
        array: ObjectsArray,
        player_x: f32,
    ) -> Vec<Obstacle> {
        let memory = locator.memory();
        let offsets = locator.offsets();
        let stride = memory.pointer_width().bytes();

        let mut obstacles: Vec<Obstacle> = (0..u64::from(array.count))
            .filter_map(|i| EntityHandle::new(memory.read_pointer(array.handle.field(i * stride))))
            .map(|object| Obstacle {
                x: memory.read_f32(object.field(offsets.obj_x)),
                y: memory.read_f32(object.field(offsets.obj_y)),
                width: memory.read_f32(object.field(offsets.obj_width)),
                kind: memory.read_i32(object.field(offsets.obj_type)),
            })
            .filter(|o| self.in_range(o.x - player_x))
            .collect();

        obstacles.sort_by(|a, b| a.x.total_cmp(&b.x));
        obstacles.truncate(self.obstacle_cap);
        obstacles
    }

    /// Open interval (0, max_distance)
    fn in_range(&self, distance: f32) -> bool {
        0.0 < distance && distance < self.max_distance
    }
}

fn read_game_speed<R: ReadMemory + ?Sized>(
    locator: &EntityLocator<'_, R>,
    play_layer: EntityHandle,
) -> f32 {
    let address = play_layer.field(locator.offsets().game_speed);
    match locator.memory().inner().read_f32(address) {
        Ok(speed) if speed.is_finite() && speed > 0.0 => speed,
        Ok(speed) => {
            trace!("Implausible game speed {}, using default", speed);
            DEFAULT_GAME_SPEED
        }
        Err(e) => {
            trace!("Game speed unavailable: {}", e);
            DEFAULT_GAME_SPEED
        }
    }
}
