use rayon::prelude::*;

use chess_rules::{BoardState, Move, perft, perft_divide};

/// Run every depth, not only the cheap ones.
const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 100_000;

struct EpdCase {
    line: usize,
    fen: String,
    /// (depth, expected node count), shallowest first
    counts: Vec<(u8, u64)>,
}

/// `<fen> ;D1 20 ;D2 400 ...`
fn parse_epd(data: &str) -> Vec<EpdCase> {
    let mut cases = Vec::new();
    for (idx, line) in data.lines().enumerate() {
        let mut fields = line.split(';').map(str::trim);
        let fen = match fields.next() {
            Some(fen) if !fen.is_empty() => fen,
            _ => continue,
        };
        let mut counts: Vec<(u8, u64)> = fields
            .filter_map(|field| {
                let (key, nodes) = field.split_once(' ')?;
                let depth = key.strip_prefix('D')?.parse().ok()?;
                Some((depth, nodes.trim().parse().ok()?))
            })
            .collect();
        counts.sort_unstable();
        cases.push(EpdCase {
            line: idx + 1,
            fen: fen.to_string(),
            counts,
        });
    }
    cases
}

#[test]
fn perft_from_standard_epd() {
    let full = std::env::var_os(FULL_PERFT_ENV).is_some();
    let cases = parse_epd(include_str!("standard.epd"));
    assert_eq!(cases.len(), 7);
    assert!(cases.iter().all(|case| !case.counts.is_empty()));

    cases.par_iter().for_each(|case| {
        let pos = BoardState::from_fen(&case.fen)
            .unwrap_or_else(|e| panic!("line {}: {e}", case.line));
        for &(depth, expected) in &case.counts {
            if !full && expected > NODE_LIMIT {
                continue;
            }
            assert_eq!(
                perft(&pos, depth),
                expected,
                "line {} ({}) at depth {depth}",
                case.line,
                case.fen
            );
        }
    });
}

#[test]
fn perft_divide_sums_to_perft() {
    let pos = BoardState::startpos();
    let divide = perft_divide(&pos, 3);
    assert_eq!(divide.len(), 20);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    assert_eq!(perft(&pos, 0), 1);
    assert!(perft_divide(&pos, 0).is_empty());
}

#[test]
fn perft_divide_counts_replies_per_move() {
    let pos = BoardState::startpos();
    let e2e4: Move = "e2e4".parse().unwrap();
    let divide = perft_divide(&pos, 2);
    // Every first move leaves Black its twenty replies
    assert!(divide.iter().all(|(_, n)| *n == 20));
    assert!(divide.iter().any(|(mv, _)| *mv == e2e4));
}
