use crate::model::lifecycle;
use crate::model::systems::combat::CombatReport;
use crate::model::world::{GameState, World};
use serpentine_core::metrics::{
    COUNTER_DEATHS, COUNTER_FOOD_EATEN, COUNTER_HALVINGS, COUNTER_KILLS, COUNTER_RESPAWNS,
    COUNTER_SEVERS,
};
use serpentine_data::LiveEvent;
use std::sync::Arc;

impl World {
    /// Applies the resolver's outcome: casualties become food, the player's
    /// death ends the run, dead bots are queued for replacement and removed.
    pub fn finalize_tick(&mut self, report: CombatReport, dt: f64, events: &mut Vec<LiveEvent>) {
        let rules = Arc::clone(&self.rules);
        let tick = self.tick;

        self.metrics
            .add_to_counter(COUNTER_FOOD_EATEN, report.food_eaten as u64);
        self.metrics
            .add_to_counter(COUNTER_SEVERS, report.segments_severed as u64);
        self.metrics
            .add_to_counter(COUNTER_HALVINGS, report.halvings as u64);
        self.metrics
            .add_to_counter(COUNTER_DEATHS, report.casualties.len() as u64);
        events.extend(report.events);

        let mut new_timers = Vec::new();
        for casualty in &report.casualties {
            let drops = lifecycle::death_drops(
                &casualty.segments,
                casualty.id,
                &mut self.food,
                &rules,
                &mut self.rng,
            );
            if casualty.killer.is_some() {
                self.metrics.increment_counter(COUNTER_KILLS);
            }
            tracing::debug!(
                id = %casualty.id.0,
                cause = ?casualty.cause,
                length = casualty.length,
                drops,
                "Snake died"
            );

            let was_player = self
                .snakes
                .get(casualty.index)
                .is_some_and(|s| s.is_player);
            if was_player {
                self.state = GameState::GameOver;
                let kills = self.player().map_or(0, |p| p.kills);
                tracing::info!(
                    length = casualty.length,
                    kills,
                    time_alive = self.time_alive,
                    "Game over"
                );
                events.push(LiveEvent::GameOver {
                    length: casualty.length,
                    kills,
                    time_alive: self.time_alive,
                    tick,
                });
            } else {
                new_timers.push(rules.arena.bot_respawn_delay);
            }
        }
        self.food.sweep();

        self.tick_respawns(dt, events);
        self.respawn_timers.extend(new_timers);

        self.snakes.retain(|s| s.alive || s.is_player);
        let snakes = &self.snakes;
        self.bots
            .retain(|b| snakes.iter().any(|s| s.id == b.snake && s.alive));
    }

    /// Counts queued respawns down and spawns the ones that are due, as long
    /// as the run is still going.
    fn tick_respawns(&mut self, dt: f64, events: &mut Vec<LiveEvent>) {
        for timer in &mut self.respawn_timers {
            *timer -= dt;
        }
        let due = self.respawn_timers.iter().filter(|t| **t <= 0.0).count();
        self.respawn_timers.retain(|t| *t > 0.0);

        if due == 0 || self.state != GameState::Playing {
            return;
        }
        let tick = self.tick;
        for id in self.spawn_bots(due) {
            tracing::debug!(id = %id.0, "Bot respawned");
            events.push(LiveEvent::BotSpawned { id, tick });
        }
        self.metrics.add_to_counter(COUNTER_RESPAWNS, due as u64);
    }
}
