use crate::error::{IngestError, Result};
use crate::types::Post;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{thread_rng, Rng, SeedableRng};
use tracing::debug;

/// Draw `k` distinct posts uniformly at random without replacement.
///
/// With no seed the draw is deliberately non-deterministic; each run of the
/// pipeline may produce a different sample. Passing a seed makes runs
/// reproducible. `k > n` is an error, `k = 0` is an empty sample.
///
/// The returned posts keep their input order; a uniformly drawn subset is
/// uniform regardless of how its members are ordered.
pub fn sample_posts(posts: Vec<Post>, k: usize, seed: Option<u64>) -> Result<Vec<Post>> {
    let n = posts.len();
    if k > n {
        return Err(IngestError::InvalidSampleSize {
            requested: k,
            available: n,
        });
    }

    debug!(available = n, requested = k, seeded = seed.is_some(), "sampling posts");

    let mut indices = match seed {
        Some(s) => draw_indices(&mut StdRng::seed_from_u64(s), n, k),
        None => draw_indices(&mut thread_rng(), n, k),
    };
    indices.sort_unstable();

    let mut picked = indices.into_iter().peekable();
    let mut sample = Vec::with_capacity(k);
    for (i, post) in posts.into_iter().enumerate() {
        if picked.peek() == Some(&i) {
            picked.next();
            sample.push(post);
        }
    }
    Ok(sample)
}

fn draw_indices<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    index::sample(rng, n, k).into_vec()
}
