use crate::model::food;
use crate::model::systems::ai::AiLogic;
use crate::model::systems::{combat, locomotion};
use crate::model::world::{GameState, PlayerInput, World};
use rand::{Rng, SeedableRng};
use serpentine_data::LiveEvent;
use std::sync::Arc;
use std::time::Instant;

impl World {
    /// Advances the simulation by one tick.
    ///
    /// Order within a tick:
    /// - player locomotion
    /// - bot steering and locomotion
    /// - food ageing, ambient spawning and magnet pull
    /// - collision resolution against the final positions
    /// - death conversion, respawn timers and roster cleanup
    /// - the level switch, if the player reached the threshold
    ///
    /// Does nothing once the game is over. `dt` is clamped to
    /// `world.max_dt` so a stalled driver cannot tunnel snakes.
    pub fn update(&mut self, dt: f64, input: PlayerInput) -> Vec<LiveEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Playing {
            return events;
        }

        let started = Instant::now();
        let dt = dt.clamp(0.0, self.config.world.max_dt);
        self.tick += 1;
        if self.config.world.deterministic {
            let seed = self.world_seed.wrapping_add(self.tick).wrapping_add(0x5EED);
            self.rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        }
        self.time_alive += dt;

        let level_up_due = self.step_player(dt, input);
        self.step_bots(dt);
        self.step_food(dt);

        let rules = Arc::clone(&self.rules);
        let report =
            combat::resolve_collisions(&mut self.snakes, &mut self.food, &rules, &mut self.rng, self.tick);
        self.finalize_tick(report, dt, &mut events);

        if level_up_due && self.state == GameState::Playing {
            self.advance_level(&mut events);
        }

        self.metrics
            .record_tick(started.elapsed(), self.snakes.len(), self.food.len());
        events
    }

    /// Moves the player. Returns whether it has reached the next level's
    /// threshold; the switch itself waits until the tick is finished.
    fn step_player(&mut self, dt: f64, input: PlayerInput) -> bool {
        let rules = Arc::clone(&self.rules);
        let Some(player) = self.player_mut().filter(|p| p.alive) else {
            return false;
        };
        locomotion::advance(player, dt, input.heading, input.boost, &rules);
        player.length >= rules.level_up_length()
    }

    fn advance_level(&mut self, events: &mut Vec<LiveEvent>) {
        let next = self.rules.level + 1;
        match self.level_up(next) {
            Ok(spawned) => {
                events.push(LiveEvent::LevelUp {
                    level: next,
                    tick: self.tick,
                });
                events.extend(spawned.into_iter().map(|id| LiveEvent::BotSpawned {
                    id,
                    tick: self.tick,
                }));
            }
            Err(e) => tracing::warn!(level = next, error = %e, "Level transition failed"),
        }
    }

    fn step_bots(&mut self, dt: f64) {
        let rules = Arc::clone(&self.rules);
        for b in 0..self.bots.len() {
            let Some(steering) =
                self.bots[b].update(dt, &self.snakes, &self.food, &rules, &mut self.rng)
            else {
                continue;
            };
            let id = self.bots[b].snake;
            if let Some(snake) = self.snakes.iter_mut().find(|s| s.id == id && s.alive) {
                locomotion::advance(snake, dt, steering.heading, steering.boost, &rules);
            }
        }
    }

    fn step_food(&mut self, dt: f64) {
        let rules = Arc::clone(&self.rules);
        food::age_food(&mut self.food, dt);
        if self.rng.gen::<f64>() < rules.arena.ambient_spawn_chance {
            food::spawn_ambient(&mut self.food, &rules, &mut self.rng);
        }
        food::apply_magnets(&self.snakes, &mut self.food, &rules, dt);
    }

    /// Installs the rules for `level`, tops the bot population up to the
    /// level's target and replenishes food for the larger arena.
    pub fn level_up(&mut self, level: u32) -> serpentine_core::Result<Vec<serpentine_data::SnakeId>> {
        let rules = Arc::new(self.config.rules_for_level(level)?);
        self.rules = Arc::clone(&rules);

        let missing = rules.target_bots.saturating_sub(self.bots.len());
        let spawned = self.spawn_bots(missing);

        for _ in 0..rules.arena.max_food_orbs * level as usize {
            food::spawn_ambient(&mut self.food, &rules, &mut self.rng);
        }

        tracing::info!(
            level,
            arena = rules.arena_size,
            bots = self.bots.len(),
            food = self.food.len(),
            "Level up"
        );
        Ok(spawned)
    }
}
