use num::Num;

/// dot積
/// d(a, b) = Σ(a_i * b_i)
#[inline]
pub fn dot<N>(vec: impl Iterator<Item = N>, other: impl Iterator<Item = N>) -> f64
where
    N: Num + Copy + Into<f64>,
{
    vec.zip(other).map(|(a, b)| a.into() * b.into()).sum()
}

/// コサイン類似度
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// A zero vector has no direction; its similarity to anything is 0.0.
#[inline]
pub fn cosine_similarity<N>(vec: impl Iterator<Item = N>, other: impl Iterator<Item = N>) -> f64
where
    N: Num + Copy + Into<f64>,
{
    let mut norm_a = 0_f64;
    let mut norm_b = 0_f64;
    let mut dot = 0_f64;
    for (a, b) in vec.zip(other) {
        let (a, b): (f64, f64) = (a.into(), b.into());
        norm_a += a * a;
        norm_b += b * b;
        dot += a * b;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}
