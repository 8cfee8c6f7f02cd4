use crate::log;
use super::board::Board;
use super::types::{Mark, Move};

/// Stage of the engine that decided a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Win,
    Block,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMove {
    pub index: Move,
    pub source: MoveSource,
    /// Game value for the moving side (+1 win, 0 draw, -1 loss); only set by the full search.
    pub score: Option<i32>,
    pub nodes_searched: u64,
}

#[derive(Debug, Default)]
struct SearchStats {
    nodes: u64,
    max_depth: usize,
}

/// Picks the move for `mark` on `board`.
///
/// Panics if the board is already won or full: the caller must not ask for a
/// move once the game is over.
pub fn choose_move(board: &Board, mark: Mark) -> Move {
    analyze_move(board, mark).index
}

pub fn analyze_move(board: &Board, mark: Mark) -> EngineMove {
    assert!(
        !board.is_terminal(),
        "NoLegalMove: engine asked to move on a finished board\n{}",
        board
    );

    if let Some(index) = find_winning_move(board, mark) {
        log!("{} wins at {}", mark, index);
        return EngineMove { index, source: MoveSource::Win, score: Some(1), nodes_searched: 0 };
    }

    if let Some(index) = find_winning_move(board, mark.opponent()) {
        log!("{} blocks {} at {}", mark, mark.opponent(), index);
        return EngineMove { index, source: MoveSource::Block, score: None, nodes_searched: 0 };
    }

    let mut stats = SearchStats::default();
    let (score, best_move) = minimax(board, 0, true, mark, i32::MIN, i32::MAX, &mut stats);
    let index = best_move.expect("a non-terminal board has at least one legal move");

    log!(
        "{} searched {} nodes (depth {}), plays {} with score {}",
        mark,
        stats.nodes,
        stats.max_depth,
        index,
        score
    );

    EngineMove {
        index,
        source: MoveSource::Search,
        score: Some(score),
        nodes_searched: stats.nodes,
    }
}

fn find_winning_move(board: &Board, mark: Mark) -> Option<Move> {
    board
        .legal_moves()
        .find(|&index| board.with_mark(index, mark).winner() == Some(mark))
}

fn minimax(
    board: &Board,
    depth: usize,
    is_maximizing: bool,
    bot_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> (i32, Option<Move>) {
    stats.nodes += 1;
    stats.max_depth = stats.max_depth.max(depth);

    // Any winner here is the side that made the previous move.
    if board.winner().is_some() {
        return (if is_maximizing { -1 } else { 1 }, None);
    }
    if board.is_full() {
        return (0, None);
    }

    let mut best_move = None;

    if is_maximizing {
        let mut best_score = i32::MIN;
        for index in board.legal_moves() {
            let child = board.with_mark(index, bot_mark);
            let (score, _) = minimax(&child, depth + 1, false, bot_mark, alpha, beta, stats);

            if score > best_score {
                best_score = score;
                best_move = Some(index);
            }
            alpha = alpha.max(best_score);
            if beta <= alpha {
                break;
            }
        }
        (best_score, best_move)
    } else {
        let opponent_mark = bot_mark.opponent();
        let mut best_score = i32::MAX;
        for index in board.legal_moves() {
            let child = board.with_mark(index, opponent_mark);
            let (score, _) = minimax(&child, depth + 1, true, bot_mark, alpha, beta, stats);

            if score < best_score {
                best_score = score;
                best_move = Some(index);
            }
            beta = beta.min(best_score);
            if beta <= alpha {
                break;
            }
        }
        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn play_self(mut board: Board, mut mark: Mark) -> Board {
        while !board.is_terminal() {
            let index = choose_move(&board, mark);
            board = board.place(index, mark).unwrap();
            mark = mark.opponent();
        }
        board
    }

    /// Plays every opponent reply against the engine and returns the number of finished games.
    fn assert_engine_never_loses(board: Board, to_move: Mark, engine_mark: Mark) -> usize {
        if board.is_terminal() {
            assert_ne!(board.winner(), Some(engine_mark.opponent()), "engine lost:\n{}", board);
            return 1;
        }

        if to_move == engine_mark {
            let index = choose_move(&board, engine_mark);
            let next = board.place(index, engine_mark).unwrap();
            assert_engine_never_loses(next, to_move.opponent(), engine_mark)
        } else {
            board
                .legal_moves()
                .map(|index| {
                    let next = board.place(index, to_move).unwrap();
                    assert_engine_never_loses(next, to_move.opponent(), engine_mark)
                })
                .sum()
        }
    }

    fn plain_minimax(board: &Board, is_maximizing: bool, bot_mark: Mark) -> (i32, Option<Move>) {
        if board.winner().is_some() {
            return (if is_maximizing { -1 } else { 1 }, None);
        }
        if board.is_full() {
            return (0, None);
        }

        let mut best: (i32, Option<Move>) = (if is_maximizing { i32::MIN } else { i32::MAX }, None);
        for index in board.legal_moves() {
            let mark = if is_maximizing { bot_mark } else { bot_mark.opponent() };
            let (score, _) = plain_minimax(&board.with_mark(index, mark), !is_maximizing, bot_mark);
            let better = if is_maximizing { score > best.0 } else { score < best.0 };
            if better {
                best = (score, Some(index));
            }
        }
        best
    }

    fn collect_positions(board: Board, out: &mut HashSet<Board>) {
        if board.is_terminal() || !out.insert(board) {
            return;
        }
        let mark = board.next_mark();
        for index in board.legal_moves() {
            collect_positions(board.with_mark(index, mark), out);
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let result = analyze_move(&board("XX. OO. ..."), Mark::X);
        assert_eq!(result.index, 2);
        assert_eq!(result.source, MoveSource::Win);
        assert_eq!(result.nodes_searched, 0);
    }

    #[test]
    fn test_blocks_opponent_win() {
        let result = analyze_move(&board("... OO. ..."), Mark::X);
        assert_eq!(result.index, 5);
        assert_eq!(result.source, MoveSource::Block);
    }

    #[test]
    fn test_win_takes_priority_over_block() {
        let result = analyze_move(&board("OO. XX. X.."), Mark::O);
        assert_eq!(result.index, 2);
        assert_eq!(result.source, MoveSource::Win);
    }

    #[test]
    fn test_lowest_winning_index_is_chosen() {
        assert_eq!(choose_move(&board("XX. XOO .O."), Mark::X), 2);
    }

    #[test]
    fn test_lowest_blocking_index_is_chosen() {
        let result = analyze_move(&board("OO. .X. OO."), Mark::X);
        assert_eq!(result.index, 2);
        assert_eq!(result.source, MoveSource::Block);
    }

    #[test]
    fn test_only_center_holds_against_corner_opening() {
        let result = analyze_move(&board("X.. ... ..."), Mark::O);
        assert_eq!(result.index, 4);
        assert_eq!(result.source, MoveSource::Search);
        assert_eq!(result.score, Some(0));
        assert!(result.nodes_searched > 0);
    }

    #[test]
    fn test_search_finds_forced_win_and_converts_it() {
        let start = board("XO. ... ...");
        let result = analyze_move(&start, Mark::X);
        assert_eq!(result.source, MoveSource::Search);
        assert_eq!(result.score, Some(1));

        let end = play_self(start, Mark::X);
        assert_eq!(end.winner(), Some(Mark::X));
    }

    #[test]
    fn test_does_not_mutate_callers_board() {
        let original = board("X.. .O. ...");
        let copy = original;
        let _ = choose_move(&original, Mark::X);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_empty_board_is_searched_in_full() {
        let result = analyze_move(&Board::empty(), Mark::X);
        assert_eq!(result.source, MoveSource::Search);
        assert_eq!(result.score, Some(0));
        assert!(result.nodes_searched > 1000);
    }

    #[test]
    fn test_self_play_from_empty_is_a_draw() {
        let end = play_self(Board::empty(), Mark::X);
        assert!(end.is_full());
        assert_eq!(end.winner(), None);
    }

    #[test]
    fn test_self_play_with_o_first_is_a_draw() {
        let end = play_self(Board::empty(), Mark::O);
        assert_eq!(end.winner(), None);
    }

    #[test]
    fn test_engine_never_loses_as_x() {
        let games = assert_engine_never_loses(Board::empty(), Mark::X, Mark::X);
        assert!(games > 0);
    }

    #[test]
    fn test_engine_never_loses_as_o() {
        let games = assert_engine_never_loses(Board::empty(), Mark::X, Mark::O);
        assert!(games > 0);
    }

    #[test]
    fn test_engine_never_loses_to_random_player() {
        let mut rng = StdRng::seed_from_u64(0x7ac7);
        for game in 0..200 {
            let engine_mark = if game % 2 == 0 { Mark::X } else { Mark::O };
            let mut b = Board::empty();
            while !b.is_terminal() {
                let mark = b.next_mark();
                let index = if mark == engine_mark {
                    choose_move(&b, mark)
                } else {
                    let moves: Vec<Move> = b.legal_moves().collect();
                    moves[rng.random_range(0..moves.len())]
                };
                b = b.place(index, mark).unwrap();
            }
            assert_ne!(b.winner(), Some(engine_mark.opponent()), "game {}:\n{}", game, b);
        }
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        let mut positions = HashSet::new();
        collect_positions(Board::empty(), &mut positions);

        for position in positions.iter().filter(|b| b.legal_moves().count() <= 6) {
            let mark = position.next_mark();
            let mut stats = SearchStats::default();
            let pruned = minimax(position, 0, true, mark, i32::MIN, i32::MAX, &mut stats);
            let plain = plain_minimax(position, true, mark);
            assert_eq!(pruned, plain, "position:\n{}", position);
        }
    }

    #[test]
    #[should_panic(expected = "NoLegalMove")]
    fn test_full_board_panics() {
        choose_move(&board("XOX XOO OXX"), Mark::X);
    }

    #[test]
    #[should_panic(expected = "NoLegalMove")]
    fn test_won_board_panics() {
        choose_move(&board("XOX OXO .OX"), Mark::O);
    }
}
