use rand::Rng;

use crate::models::{CatalogueEntry, Status};
use crate::tracker::TrackerStore;

/// Selection weight for a question given what the tracker knows about it.
/// Never-asked and shaky questions come up more often than answered ones.
pub fn weight_for(question: &str, tracker: &TrackerStore) -> f64 {
    let Some(item) = tracker.find_by_original(question) else {
        return 3.0;
    };
    match item.status {
        Status::NotAnswered | Status::Confusing => 2.0,
        Status::Unset => 1.5,
        Status::PartiallyCorrect => 1.0,
        Status::Answered => 0.25,
    }
}

/// Stochastic pick of the next question to practise. Returns its index in
/// `questions`, or `None` when there is nothing to pick from.
pub fn pick_next<R: Rng>(
    questions: &[CatalogueEntry],
    tracker: &TrackerStore,
    rng: &mut R,
) -> Option<usize> {
    if questions.is_empty() {
        return None;
    }

    let weights: Vec<f64> = questions
        .iter()
        .map(|q| weight_for(&q.question, tracker))
        .collect();

    let total_weight: f64 = weights.iter().sum();
    let mut random_point = rng.gen::<f64>() * total_weight;

    for (i, weight) in weights.iter().enumerate() {
        random_point -= weight;
        if random_point <= 0.0 {
            return Some(i);
        }
    }

    // Float rounding can leave a sliver past the last weight
    Some(questions.len() - 1)
}
