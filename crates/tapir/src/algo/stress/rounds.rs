/// Splits every unordered pair of `0..n` into rounds in which no index appears twice.
///
/// Pairs are taken diagonal by diagonal: for a gap `g`, the pairs `(i, i + g)` go to
/// the first round of that diagonal when `i mod 2g < g` and to the second otherwise.
/// Within one round the left indices are pairwise distinct and never collide with a
/// right index, so all corrections of a round can be applied independently.
///
/// This yields about `2(n - 1)` rounds, and rounds for large gaps hold very few pairs
/// (the last one a single pair). A round-robin circle schedule would give `n - 1`
/// near-perfect matchings instead, but it changes the pair visiting order and hence
/// the layouts produced for a given seed.
pub fn pair_rounds(n: usize) -> Vec<Vec<(usize, usize)>> {
    let mut rounds: Vec<Vec<(usize, usize)>> = Vec::new();
    for gap in 1..n {
        let mut first: Vec<(usize, usize)> = Vec::new();
        let mut second: Vec<(usize, usize)> = Vec::new();
        for i in 0..(n - gap) {
            if i % (2 * gap) < gap {
                first.push((i, i + gap));
            } else {
                second.push((i, i + gap));
            }
        }
        if !first.is_empty() {
            rounds.push(first);
        }
        if !second.is_empty() {
            rounds.push(second);
        }
    }
    rounds
}
