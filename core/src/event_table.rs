//! Weighted event-type selection.
//!
//! The table is an ordered array, not a map: normalization sums and the
//! selection walk both run in declaration order, so a borderline draw always
//! lands on the same category.

use crate::{event::EventType, rng::MatchRng, team::Side};

pub type WeightTable = [(EventType, f64); 9];

/// Base probabilities before strength adjustment.
pub const BASE_WEIGHTS: WeightTable = [
    (EventType::Possession, 0.50),
    (EventType::Shot,       0.20),
    (EventType::Pass,       0.20),
    (EventType::Tackle,     0.05),
    (EventType::Foul,       0.03),
    (EventType::Corner,     0.02),
    (EventType::YellowCard, 0.01),
    (EventType::RedCard,    0.005),
    (EventType::Goal,       0.002),
];

pub const SHOT_BOOST: f64 = 1.2;
pub const GOAL_BOOST: f64 = 1.5;
pub const CORNER_BOOST: f64 = 1.3;

/// Returned when rounding leaves the cumulative sum short of the draw.
pub const FALLBACK_EVENT: EventType = EventType::Pass;

/// Draw one event type. Consumes exactly two values from `rng`:
/// the strength roll, then the selection roll.
pub fn draw_event_type(rng: &mut MatchRng, home_share: f64) -> EventType {
    let favoured = if rng.chance(home_share) { Side::Home } else { Side::Away };

    let mut weights = BASE_WEIGHTS;
    apply_attacking_boost(&mut weights, favoured);
    normalize(&mut weights);

    let roll = rng.next_f64();
    select(&weights, roll)
}

/// Both sides currently receive the same boost, so the strength roll does not
/// bias the outcome. Recorded matches depend on this.
pub fn apply_attacking_boost(weights: &mut WeightTable, favoured: Side) {
    match favoured {
        Side::Home | Side::Away => {
            for (event_type, weight) in weights.iter_mut() {
                match event_type {
                    EventType::Shot   => *weight *= SHOT_BOOST,
                    EventType::Goal   => *weight *= GOAL_BOOST,
                    EventType::Corner => *weight *= CORNER_BOOST,
                    _ => {}
                }
            }
        }
    }
}

/// Scale weights to sum to 1, summing in table order.
pub fn normalize(weights: &mut WeightTable) {
    let mut total: f64 = 0.0;
    for (_, weight) in weights.iter() {
        total += weight;
    }
    for (_, weight) in weights.iter_mut() {
        *weight /= total;
    }
}

/// First category whose cumulative weight exceeds `roll`, else the fallback.
pub fn select(weights: &WeightTable, roll: f64) -> EventType {
    let mut cumulative: f64 = 0.0;
    for (event_type, weight) in weights {
        cumulative += weight;
        if roll < cumulative {
            return *event_type;
        }
    }
    FALLBACK_EVENT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized() -> WeightTable {
        let mut weights = BASE_WEIGHTS;
        apply_attacking_boost(&mut weights, Side::Home);
        normalize(&mut weights);
        weights
    }

    #[test]
    fn normalized_weights_sum_to_one() {
        let total: f64 = normalized().iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12, "weights sum to {total}");
    }

    #[test]
    fn boost_is_identical_for_both_sides() {
        let mut home = BASE_WEIGHTS;
        let mut away = BASE_WEIGHTS;
        apply_attacking_boost(&mut home, Side::Home);
        apply_attacking_boost(&mut away, Side::Away);
        assert_eq!(home, away);
    }

    #[test]
    fn boost_touches_only_shot_goal_and_corner() {
        let mut weights = BASE_WEIGHTS;
        apply_attacking_boost(&mut weights, Side::Away);
        for ((event_type, boosted), (_, base)) in weights.iter().zip(BASE_WEIGHTS.iter()) {
            let expected = match event_type {
                EventType::Shot   => base * SHOT_BOOST,
                EventType::Goal   => base * GOAL_BOOST,
                EventType::Corner => base * CORNER_BOOST,
                _ => *base,
            };
            assert_eq!(*boosted, expected, "{event_type:?}");
        }
    }

    #[test]
    fn selection_walks_in_table_order() {
        let weights = normalized();
        assert_eq!(select(&weights, 0.0), EventType::Possession);
        // possession is 0.5 / 1.064 after boosting; the shot band follows it
        assert_eq!(select(&weights, 0.47), EventType::Shot);
        assert_eq!(select(&weights, 0.999_999), EventType::Goal);
    }

    #[test]
    fn roll_past_the_cumulative_sum_falls_back_to_pass() {
        let weights = normalized();
        assert_eq!(select(&weights, 1.5), EventType::Pass);

        let empty: WeightTable = BASE_WEIGHTS.map(|(event_type, _)| (event_type, 0.0));
        assert_eq!(select(&empty, 0.0), FALLBACK_EVENT);
    }

    #[test]
    fn draw_consumes_exactly_two_values() {
        let mut drawn = MatchRng::new(7);
        draw_event_type(&mut drawn, 0.5);

        let mut manual = MatchRng::new(7);
        manual.next_f64();
        manual.next_f64();

        assert_eq!(drawn, manual);
    }
}
