use crate::config::LevelRules;
use crate::lifecycle::SnakeLogic;
use rand::Rng;
use serpentine_data::{Food, FoodId, FoodKind, Position, Snake, SnakeId};

/// The arena's live food. Ids are handed out in increasing order and never
/// reused, so the backing vector stays sorted by id.
#[derive(Debug, Clone, Default)]
pub struct FoodStore {
    items: Vec<Food>,
    next_id: u64,
}

impl FoodStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Food] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Food] {
        &mut self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: FoodId) -> Option<&Food> {
        self.items
            .binary_search_by_key(&id, |f| f.id)
            .ok()
            .map(|i| &self.items[i])
    }

    /// Allocates the next id and stores the item built from it.
    pub fn push_with<F>(&mut self, build: F) -> FoodId
    where
        F: FnOnce(FoodId) -> Food,
    {
        let id = FoodId(self.next_id);
        self.next_id += 1;
        let mut food = build(id);
        food.id = id;
        self.items.push(food);
        id
    }

    /// Number of active items of one kind.
    #[must_use]
    pub fn count_kind(&self, kind: FoodKind) -> usize {
        self.items
            .iter()
            .filter(|f| f.kind == kind && f.is_active())
            .count()
    }

    /// Drops consumed and expired items. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(Food::is_active);
        before - self.items.len()
    }
}

pub fn new_standard<R: Rng>(id: FoodId, position: Position, rules: &LevelRules, rng: &mut R) -> Food {
    let f = &rules.food;
    Food {
        id,
        position,
        value: f.food_value,
        radius: f.standard_radius_min + rng.gen::<f64>() * f.standard_radius_spread,
        kind: FoodKind::Standard,
        is_drop: false,
        life: f.standard_life,
        owner: None,
        consumed: false,
    }
}

pub fn new_power_up(id: FoodId, position: Position, kind: FoodKind, rules: &LevelRules) -> Food {
    let f = &rules.food;
    Food {
        id,
        position,
        value: f.power_up_value,
        radius: f.power_up_radius,
        kind,
        is_drop: false,
        life: f.power_up_life,
        owner: None,
        consumed: false,
    }
}

/// A drop left behind by severing or death. Drops are always standard food.
pub fn new_drop<R: Rng>(
    id: FoodId,
    position: Position,
    value: f64,
    owner: Option<SnakeId>,
    rules: &LevelRules,
    rng: &mut R,
) -> Food {
    let f = &rules.food;
    Food {
        id,
        position,
        value,
        radius: f.drop_radius_min + rng.gen::<f64>() * f.drop_radius_spread,
        kind: FoodKind::Standard,
        is_drop: true,
        life: f.drop_life,
        owner,
        consumed: false,
    }
}

/// Jitters a drop position by up to half the scatter width on each axis.
pub fn scatter<R: Rng>(at: Position, rules: &LevelRules, rng: &mut R) -> Position {
    let w = rules.food.drop_scatter;
    Position::new(
        at.x + (rng.gen::<f64>() - 0.5) * w,
        at.y + (rng.gen::<f64>() - 0.5) * w,
    )
}

fn random_point<R: Rng>(rules: &LevelRules, rng: &mut R) -> Position {
    Position::new(
        rng.gen::<f64>() * rules.arena_size,
        rng.gen::<f64>() * rules.arena_size,
    )
}

/// One ambient spawn roll: maybe a power-up (respecting per-kind caps), then
/// a standard item if the arena is below its food target.
pub fn spawn_ambient<R: Rng>(store: &mut FoodStore, rules: &LevelRules, rng: &mut R) -> usize {
    let p = &rules.power_ups;
    let mut spawned = 0;

    let roll = rng.gen::<f64>();
    let power_up = if roll < p.star_chance {
        Some((FoodKind::Star, p.max_stars))
    } else if roll < p.star_chance + p.shield_chance {
        Some((FoodKind::Shield, p.max_shields))
    } else if roll < p.star_chance + p.shield_chance + p.magnet_chance {
        Some((FoodKind::Magnet, p.max_magnets))
    } else {
        None
    };

    if let Some((kind, cap)) = power_up {
        if store.count_kind(kind) < cap {
            let at = random_point(rules, rng);
            store.push_with(|id| new_power_up(id, at, kind, rules));
            spawned += 1;
        }
    }

    if store.len() < rules.arena.max_food_orbs {
        let at = random_point(rules, rng);
        store.push_with(|id| new_standard(id, at, rules, rng));
        spawned += 1;
    }

    spawned
}

/// Counts every item's lifetime down and removes the dead ones.
pub fn age_food(store: &mut FoodStore, dt: f64) -> usize {
    for food in store.items_mut() {
        food.life -= dt;
    }
    store.sweep()
}

/// Pulls food toward every live snake holding a magnet. Items closer than
/// the minimum distance stay put so they do not jitter around the head.
pub fn apply_magnets(snakes: &[Snake], store: &mut FoodStore, rules: &LevelRules, dt: f64) {
    let p = &rules.power_ups;
    let step = p.magnet_pull_speed * dt;

    for snake in snakes.iter().filter(|s| s.alive && s.has_magnet()) {
        let head = snake.position;
        for food in store.items_mut().iter_mut().filter(|f| f.is_active()) {
            let dist = food.position.distance_to(&head);
            if dist < p.magnet_range && dist > p.magnet_min_distance {
                let angle = food.position.bearing_to(&head);
                food.position = food.position.offset(angle, step.min(dist));
            }
        }
    }
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

    #[test]
    fn test_ids_are_monotonic_and_lookup_survives_sweep() {
        let rules = rules();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut store = FoodStore::new();
        let ids: Vec<FoodId> = (0..5)
            .map(|i| {
                let at = Position::new(10.0 * i as f64, 0.0);
                store.push_with(|id| new_standard(id, at, &rules, &mut rng))
            })
            .collect();

        store.items_mut()[1].consumed = true;
        store.items_mut()[3].consumed = true;
        assert_eq!(store.sweep(), 2);

        assert!(store.get(ids[1]).is_none());
        assert_eq!(store.get(ids[4]).map(|f| f.id), Some(ids[4]));
        let next = store.push_with(|id| new_power_up(id, Position::default(), FoodKind::Star, &rules));
        assert!(next > ids[4]);
    }

    #[test]
    fn test_age_food_expires_items() {
        let rules = rules();
        let mut store = FoodStore::new();
        store.push_with(|id| new_power_up(id, Position::default(), FoodKind::Shield, &rules));
        assert_eq!(age_food(&mut store, 199.0), 0);
        assert_eq!(age_food(&mut store, 1.5), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_spawn_respects_food_target() {
        let mut config = AppConfig::default();
        config.arena.max_food_orbs = 10;
        config.power_ups.star_chance = 0.0;
        config.power_ups.shield_chance = 0.0;
        config.power_ups.magnet_chance = 0.0;
        let rules = config.rules_for_level(1).expect("level 1");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut store = FoodStore::new();

        for _ in 0..50 {
            spawn_ambient(&mut store, &rules, &mut rng);
        }
        assert_eq!(store.len(), 10);
        assert!(store
            .items()
            .iter()
            .all(|f| f.position.x >= 0.0 && f.position.x <= rules.arena_size));
    }

    #[test]
    fn test_power_up_caps() {
        let mut config = AppConfig::default();
        config.arena.max_food_orbs = 0;
        config.power_ups.star_chance = 1.0;
        config.power_ups.shield_chance = 0.0;
        config.power_ups.magnet_chance = 0.0;
        let rules = config.rules_for_level(1).expect("level 1");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut store = FoodStore::new();

        for _ in 0..20 {
            spawn_ambient(&mut store, &rules, &mut rng);
        }
        assert_eq!(store.count_kind(FoodKind::Star), rules.power_ups.max_stars);
    }

    #[test]
    fn test_magnet_pulls_food_in_range() {
        let rules = rules();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut snake = create_snake_with_rng(1000.0, 1000.0, true, "P", &rules, &mut rng);
        snake.effects.magnet_time = 5.0;

        let mut store = FoodStore::new();
        let near = store.push_with(|id| new_standard(id, Position::new(1100.0, 1000.0), &rules, &mut rng));
        let far = store.push_with(|id| new_standard(id, Position::new(1400.0, 1000.0), &rules, &mut rng));

        apply_magnets(std::slice::from_ref(&snake), &mut store, &rules, 0.1);

        let pulled = store.get(near).expect("near item");
        assert!((pulled.position.x - 1050.0).abs() < 1e-9);
        let untouched = store.get(far).expect("far item");
        assert_eq!(untouched.position.x, 1400.0);
    }
}
