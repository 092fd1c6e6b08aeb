// src/sampling.rs

use crate::model::Question;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Pregunta tal como se muestra: orden de presentación de los índices originales.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PresentedQuestion {
    pub question: Question,
    pub display_order: Vec<usize>,
}

impl PresentedQuestion {
    /// Baraja las opciones sin perder el índice original de cada una.
    pub fn shuffled<R: Rng + ?Sized>(question: Question, rng: &mut R) -> Self {
        let mut display_order: Vec<usize> = (0..question.options.len()).collect();
        display_order.shuffle(rng);
        Self {
            question,
            display_order,
        }
    }

    /// Índice original de la opción en la posición `slot` de pantalla.
    pub fn original_index(&self, slot: usize) -> Option<usize> {
        self.display_order.get(slot).copied()
    }
}

/// Muestra sin reemplazo `min(count, pool.len())` preguntas y baraja sus opciones.
pub fn sample_questions<R: Rng + ?Sized>(
    pool: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<PresentedQuestion> {
    let take = count.min(pool.len());
    let mut picked: Vec<Question> = pool.choose_multiple(rng, take).cloned().collect();
    // choose_multiple no garantiza un orden aleatorio
    picked.shuffle(rng);
    picked
        .into_iter()
        .map(|q| PresentedQuestion::shuffled(q, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionOption;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                question: format!("Q{i}"),
                options: ["a", "b", "c", "d"]
                    .iter()
                    .map(|o| QuestionOption::Text(format!("{o}{i}")))
                    .collect(),
                answer: i % 4,
                image: None,
            })
            .collect()
    }

    #[test]
    fn never_exceeds_pool_nor_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        for (pool_size, requested) in [(0, 20), (3, 20), (10, 4), (10, 10)] {
            let items = sample_questions(&pool(pool_size), requested, &mut rng);
            assert_eq!(items.len(), requested.min(pool_size));
            let distinct: HashSet<&str> = items.iter().map(|p| p.question.question.as_str()).collect();
            assert_eq!(distinct.len(), items.len());
        }
    }

    #[test]
    fn shuffle_keeps_original_indices_recoverable() {
        let mut rng = StdRng::seed_from_u64(42);
        for item in sample_questions(&pool(8), 8, &mut rng) {
            let mut order = item.display_order.clone();
            order.sort_unstable();
            assert_eq!(order, vec![0, 1, 2, 3]);
            // la opción mostrada en cada posición es la original con ese índice
            for slot in 0..item.display_order.len() {
                let original = item.original_index(slot).expect("slot in range");
                assert!(item.question.options.get(original).is_some());
            }
            let correct_slot = item
                .display_order
                .iter()
                .position(|&o| o == item.question.answer)
                .expect("answer shown");
            assert_eq!(item.original_index(correct_slot), Some(item.question.answer));
        }
    }
}
