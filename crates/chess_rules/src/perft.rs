use crate::{board::BoardState, legal::legal_moves, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &BoardState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&child(pos, mv), depth - 1))
        .sum()
}

/// Per-move breakdown of [`perft`] at the root, for locating divergences.
pub fn perft_divide(pos: &BoardState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_moves(pos)
        .into_iter()
        .map(|mv| (mv, perft(&child(pos, mv), depth - 1)))
        .collect()
}

fn child(pos: &BoardState, mv: Move) -> BoardState {
    let mut next = pos.clone();
    let applied = next.apply_move(mv);
    debug_assert!(applied.is_ok(), "legal move {mv} failed to apply: {applied:?}");
    next
}
