use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use lotto645_data::{Draw, PICK_COUNT, POOL_SIZE};

pub fn draw(draw_no: u32, numbers: [u8; PICK_COUNT]) -> Draw {
    Draw::new(draw_no, numbers).unwrap()
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `n` uniformly random draws numbered 1..=n.
pub fn random_history(rng: &mut StdRng, n: usize) -> Vec<Draw> {
    let mut pool: Vec<u8> = (1..=POOL_SIZE).collect();
    (0..n)
        .map(|i| {
            pool.shuffle(rng);
            let mut numbers = [0u8; PICK_COUNT];
            numbers.copy_from_slice(&pool[..PICK_COUNT]);
            draw(i as u32 + 1, numbers)
        })
        .collect()
}

/// Random draws numbered `first..first + n`.
pub fn random_history_from(rng: &mut StdRng, first: u32, n: usize) -> Vec<Draw> {
    let mut draws = random_history(rng, n);
    for d in &mut draws {
        d.draw_no += first - 1;
    }
    draws
}
