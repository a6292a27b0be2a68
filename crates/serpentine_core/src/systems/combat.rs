//! Collision and combat resolution.
//!
//! Runs once per tick after every snake has moved. Food pickup comes first,
//! then every ordered pair of live snakes is checked for a head-on clash or
//! a head-to-body strike. Severing and bounces take effect immediately;
//! deaths are collected in a pending set and only applied once every pair
//! has been judged, so a snake doomed early in the pass still fights later
//! pairs with its full body.

use crate::config::LevelRules;
use crate::food::{self, FoodStore};
use crate::geometry::{angle_between, normalize_angle};
use crate::lifecycle::{length_for, SnakeLogic};
use rand::Rng;
use serpentine_data::{DeathCause, LiveEvent, Position, Snake, SnakeId};
use std::f64::consts::PI;

/// Widest angle between heading and target for a body strike to count.
pub const STRIKE_CONE: f64 = PI / 2.5;

/// Segments this close to the head are never hit. Keeps a snake from
/// biting its own neck and makes head-on the only head-to-head outcome.
pub const NECK_SEGMENTS: usize = 2;

/// A snake removed at the end of the pass.
#[derive(Debug, Clone)]
pub struct Casualty {
    pub index: usize,
    pub id: SnakeId,
    pub killer: Option<SnakeId>,
    pub cause: DeathCause,
    pub length: usize,
    pub position: Position,
    pub segments: Vec<Position>,
}

#[derive(Debug, Default)]
pub struct CombatReport {
    pub events: Vec<LiveEvent>,
    pub casualties: Vec<Casualty>,
    pub food_eaten: usize,
    pub segments_severed: usize,
    pub halvings: usize,
}

#[derive(Debug, Clone, Copy)]
struct Doom {
    killer: Option<usize>,
    cause: DeathCause,
}

struct Resolver<'a, R: Rng> {
    rules: &'a LevelRules,
    food: &'a mut FoodStore,
    rng: &'a mut R,
    tick: u64,
    pending: Vec<Option<Doom>>,
    report: CombatReport,
}

/// Resolves every interaction for one tick.
pub fn resolve_collisions<R: Rng>(
    snakes: &mut [Snake],
    food: &mut FoodStore,
    rules: &LevelRules,
    rng: &mut R,
    tick: u64,
) -> CombatReport {
    let mut resolver = Resolver {
        rules,
        food,
        rng,
        tick,
        pending: vec![None; snakes.len()],
        report: CombatReport::default(),
    };

    resolver.eat_food(snakes);

    for i in 0..snakes.len() {
        for j in 0..snakes.len() {
            if i == j || !snakes[i].alive || !snakes[j].alive {
                continue;
            }
            if !resolver.head_on(snakes, i, j) {
                resolver.head_to_body(snakes, i, j);
            }
        }
    }

    resolver.apply_deaths(snakes);
    resolver.report
}

/// Two distinct mutable borrows out of one slice.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Index of the first defender segment the attacker's mouth strikes, if any.
#[must_use]
pub fn find_body_hit(attacker: &Snake, defender: &Snake, rules: &LevelRules) -> Option<usize> {
    let mouth = attacker.mouth(&rules.snake);
    let reach = attacker.radius + rules.snake.body_radius;

    defender
        .segments
        .iter()
        .enumerate()
        .skip(NECK_SEGMENTS)
        .find(|(_, seg)| {
            mouth.distance_to(seg) < reach
                && angle_between(attacker.heading, mouth.bearing_to(seg)) < STRIKE_CONE
        })
        .map(|(k, _)| k)
}

impl<R: Rng> Resolver<'_, R> {
    fn eat_food(&mut self, snakes: &mut [Snake]) {
        for snake in snakes.iter_mut().filter(|s| s.alive) {
            let mouth = snake.mouth(&self.rules.snake);
            for item in self.food.items_mut().iter_mut().filter(|f| f.is_active()) {
                if mouth.distance_to(&item.position) < snake.radius + item.radius {
                    snake.eat(item, self.rules);
                    item.consumed = true;
                    self.report.food_eaten += 1;
                    self.report.events.push(LiveEvent::FoodEaten {
                        snake: snake.id,
                        value: item.value,
                        was_drop: item.is_drop,
                        tick: self.tick,
                    });
                }
            }
        }
    }

    /// Marks `victim` for death. Returns true if it was not already pending;
    /// only then does a player killer get credit.
    fn doom(&mut self, snakes: &mut [Snake], victim: usize, killer: Option<usize>, cause: DeathCause) -> bool {
        if self.pending[victim].is_some() {
            return false;
        }
        self.pending[victim] = Some(Doom { killer, cause });

        if let Some(k) = killer {
            if snakes[k].is_player {
                snakes[k].kills += 1;
                self.report.events.push(LiveEvent::PlayerKill {
                    victim: snakes[victim].id,
                    tick: self.tick,
                });
            }
        }
        true
    }

    /// Returns true when the two mouths overlap, whatever the outcome.
    fn head_on(&mut self, snakes: &mut [Snake], i: usize, j: usize) -> bool {
        let cfg = &self.rules.snake;
        let (a, b) = (&snakes[i], &snakes[j]);
        let reach = a.radius + b.radius;
        if a.mouth(cfg).distance_to(&b.mouth(cfg)) >= reach {
            return false;
        }

        let (a_super, b_super) = (a.has_super(), b.has_super());
        let (a_shield, b_shield) = (a.has_shield(), b.has_shield());
        let (a_len, b_len) = (a.length, b.length);

        if a_super != b_super {
            let (winner, loser, loser_shield) = if a_super { (i, j, b_shield) } else { (j, i, a_shield) };
            if !loser_shield {
                self.doom(snakes, loser, Some(winner), DeathCause::SuperContact);
            }
        } else if a_shield || b_shield {
            // shields pass through each other
        } else if a_len == b_len {
            self.doom(snakes, i, None, DeathCause::HeadOn);
            self.doom(snakes, j, None, DeathCause::HeadOn);
        } else {
            let (winner, loser) = if a_len > b_len { (i, j) } else { (j, i) };
            self.doom(snakes, loser, Some(winner), DeathCause::HeadOn);
        }
        true
    }

    fn head_to_body(&mut self, snakes: &mut [Snake], i: usize, j: usize) {
        let Some(hit) = find_body_hit(&snakes[i], &snakes[j], self.rules) else {
            return;
        };

        let (attacker, defender) = pair_mut(snakes, i, j);
        let a_super = attacker.has_super();

        if defender.has_super() && !a_super {
            if !attacker.has_shield() {
                halve(attacker, self.rules);
                self.report.halvings += 1;
                self.report.events.push(LiveEvent::Halved {
                    id: attacker.id,
                    by: defender.id,
                    tick: self.tick,
                });
            }
        } else if !a_super && attacker.length <= defender.length {
            if !attacker.has_shield() {
                self.doom(snakes, i, Some(j), DeathCause::BodyHit);
            }
        } else if defender.has_shield() {
            attacker.heading = normalize_angle(attacker.heading + PI);
        } else {
            self.sever(attacker, defender, hit);
        }
    }

    /// Cuts the defender at `hit`, scatters the tail as drops and pays the
    /// attacker per segment taken.
    fn sever(&mut self, attacker: &mut Snake, defender: &mut Snake, hit: usize) {
        let severed = defender.segments.split_off(hit);
        defender.length = defender.segments.len();
        defender.target_length = defender.length as f64;

        let rules = self.rules;
        let f = &rules.food;
        let owner = Some(defender.id);
        for seg in &severed {
            let at = food::scatter(*seg, rules, self.rng);
            let rng = &mut *self.rng;
            self.food
                .push_with(|id| food::new_drop(id, at, f.sever_drop_value, owner, rules, rng));
        }

        let reward = severed.len() as f64 * f.sever_reward_per_segment;
        attacker.score += reward;
        attacker.target_length += reward;
        attacker.length = length_for(attacker.target_length);

        tracing::debug!(
            attacker = %attacker.id.0,
            defender = %defender.id.0,
            segments = severed.len(),
            "Body severed"
        );
        self.report.segments_severed += severed.len();
        self.report.events.push(LiveEvent::Severed {
            attacker: attacker.id,
            defender: defender.id,
            segments: severed.len(),
            tick: self.tick,
        });
    }

    fn apply_deaths(&mut self, snakes: &mut [Snake]) {
        for (index, doom) in self.pending.iter().enumerate() {
            let Some(doom) = doom else { continue };
            let snake = &mut snakes[index];
            let length = snake.length;
            let position = snake.position;
            let segments = snake.die();
            let killer = doom.killer.map(|k| snakes[k].id);
            let id = snakes[index].id;

            self.report.events.push(LiveEvent::Death {
                id,
                killer,
                cause: doom.cause,
                length,
                position,
                tick: self.tick,
            });
            self.report.casualties.push(Casualty {
                index,
                id,
                killer,
                cause: doom.cause,
                length,
                position,
                segments,
            });
        }
    }
}

/// Super-body bounce: lose half the body (never below the starting length)
/// and turn around.
fn halve(snake: &mut Snake, rules: &LevelRules) {
    let halved = (snake.length / 2).max(rules.snake.initial_length);
    snake.target_length = halved as f64;
    snake.length = halved;
    snake.heading = normalize_angle(snake.heading + PI);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::lifecycle::create_snake_with_rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rules() -> LevelRules {
        AppConfig::default().rules_for_level(1).expect("level 1")
    }

    /// Straight snake whose head sits at `(x, y)` and whose body trails
    /// away opposite to `heading`.
    fn straight(x: f64, y: f64, heading: f64, length: usize, rules: &LevelRules, rng: &mut ChaCha8Rng) -> Snake {
        let mut s = create_snake_with_rng(x, y, false, "T", rules, rng);
        s.heading = heading;
        s.length = length;
        s.target_length = length as f64;
        s.segments = (0..length)
            .map(|k| s.position.offset(heading, -(rules.snake.segment_spacing * k as f64)))
            .collect();
        s
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut v = vec![1, 2, 3];
        let (a, b) = pair_mut(&mut v, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(v, vec![3, 2, 1]);
    }

    #[test]
    fn test_head_on_shorter_dies() {
        let rules = rules();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut snakes = vec![
            straight(1000.0, 1000.0, 0.0, 50, &rules, &mut rng),
            straight(1030.0, 1000.0, PI, 30, &rules, &mut rng),
        ];
        snakes[0].is_player = true;
        let mut store = FoodStore::new();

        let report = resolve_collisions(&mut snakes, &mut store, &rules, &mut rng, 1);
        assert!(snakes[0].alive);
        assert!(!snakes[1].alive);
        assert_eq!(snakes[0].kills, 1);
        assert_eq!(report.casualties.len(), 1);
        assert_eq!(report.casualties[0].segments.len(), 30);
    }

    #[test]
    fn test_neck_segments_are_skipped() {
        let rules = rules();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let attacker = straight(1000.0, 1000.0, 0.0, 40, &rules, &mut rng);
        // Defender's first two points sit right in front of the mouth.
        let mut defender = straight(1020.0, 1000.0, PI / 2.0, 3, &rules, &mut rng);
        defender.segments = vec![
            Position::new(1018.0, 1000.0),
            Position::new(1020.0, 1000.0),
            Position::new(1500.0, 1500.0),
        ];
        assert_eq!(find_body_hit(&attacker, &defender, &rules), None);
    }

    #[test]
    fn test_strike_needs_forward_cone() {
        let rules = rules();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let attacker = straight(1000.0, 1000.0, 0.0, 40, &rules, &mut rng);
        let mouth = attacker.mouth(&rules.snake);
        let mut defender = straight(2000.0, 2000.0, 0.0, 5, &rules, &mut rng);

        defender.segments[3] = Position::new(mouth.x - 5.0, mouth.y);
        assert_eq!(find_body_hit(&attacker, &defender, &rules), None);

        defender.segments[4] = Position::new(mouth.x + 5.0, mouth.y);
        assert_eq!(find_body_hit(&attacker, &defender, &rules), Some(4));
    }
}
