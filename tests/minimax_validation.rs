//! Cross-checks the memoized evaluator against a plain search over every
//! reachable classic position.

mod common;

use common::{brute_force, classic};
use tactician::{
    Board, Geometry, MinimaxEvaluator, Player,
    tictactoe::reachable_states,
};

#[test]
fn memoized_scores_match_plain_search_for_every_position() {
    let mut for_x = MinimaxEvaluator::new(Player::X);
    let mut for_o = MinimaxEvaluator::new(Player::O);

    for state in reachable_states(Geometry::classic(), Player::X) {
        let expected = brute_force(&state.board, state.to_move, Player::X);
        assert_eq!(
            for_x.evaluate(&state.board, state.to_move),
            expected,
            "X score mismatch on\n{}",
            state.board
        );
        // zero-sum: the O score is the negated X score
        assert_eq!(
            for_o.evaluate(&state.board, state.to_move),
            -expected,
            "O score mismatch on\n{}",
            state.board
        );
    }

    assert!(!for_x.is_empty());
}

#[test]
fn empty_board_is_a_draw_for_either_side() {
    let mut evaluator = MinimaxEvaluator::new(Player::X);
    assert_eq!(evaluator.evaluate(&Board::default(), Player::X), 0);

    let mut evaluator = MinimaxEvaluator::new(Player::O);
    assert_eq!(evaluator.evaluate(&Board::default(), Player::O), 0);
}

#[test]
fn completing_a_row_is_the_only_winning_move() {
    let board = classic("XX OO    ");
    let mut evaluator = MinimaxEvaluator::new(Player::X);

    let best = evaluator.best_moves(&board).expect("board has empty cells");
    assert_eq!(best.score, 1);
    assert!(best.moves.contains(&2));
}

#[test]
fn best_moves_all_reach_the_best_score() {
    let mut evaluator = MinimaxEvaluator::new(Player::O);
    let mut reference = MinimaxEvaluator::new(Player::O);
    for state in reachable_states(Geometry::classic(), Player::X) {
        if state.to_move != Player::O || state.board.is_terminal() {
            continue;
        }
        let best = evaluator
            .best_moves(&state.board)
            .expect("non-terminal board has moves");

        for pos in state.board.available_moves() {
            let next = state.board.apply_move(pos, Player::O).unwrap();
            let score = reference.evaluate(&next, Player::X);
            if best.moves.contains(&pos) {
                assert_eq!(score, best.score);
            } else {
                assert!(score < best.score, "move {pos} should be in the best set");
            }
        }
    }
}

#[test]
fn geometry_change_drops_the_cache() {
    let mut evaluator = MinimaxEvaluator::new(Player::X);
    evaluator.evaluate(&Board::default(), Player::X);
    let classic_entries = evaluator.len();
    assert!(classic_entries > 0);

    let small = Board::empty(Geometry::new(2, 2).unwrap());
    // X opens and wins on its second move on a 2x2 board
    assert_eq!(evaluator.evaluate(&small, Player::X), 1);
    assert!(evaluator.len() < classic_entries);
}

#[test]
fn same_board_scores_depend_on_side_to_move() {
    let board = classic("XX OO    ");
    let mut evaluator = MinimaxEvaluator::new(Player::X);

    assert_eq!(evaluator.evaluate(&board, Player::X), 1);
    assert_eq!(evaluator.evaluate(&board, Player::O), -1);

    let mut fresh = MinimaxEvaluator::new(Player::X);
    assert_eq!(fresh.evaluate(&board, Player::O), -1);
}

#[test]
fn switching_the_opener_does_not_reuse_scores() {
    let mut shared = MinimaxEvaluator::new(Player::X);
    for state in reachable_states(Geometry::classic(), Player::X) {
        shared.evaluate(&state.board, state.to_move);
    }

    let mut reference = MinimaxEvaluator::new(Player::X);
    for state in reachable_states(Geometry::classic(), Player::O) {
        if state.to_move != Player::X || state.board.is_terminal() {
            continue;
        }
        assert_eq!(
            shared.best_moves(&state.board),
            reference.best_moves(&state.board),
            "best moves differ on\n{}",
            state.board
        );
    }

    let opening = classic("O        ");
    let best = shared.best_moves(&opening).unwrap();
    assert_eq!(best.score, 0);
    assert_eq!(best.moves, vec![4]);
}
