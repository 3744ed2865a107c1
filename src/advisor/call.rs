use log::{debug, warn};
use serde::Serialize;

use super::params::Params;
use crate::hand::{calc_shanten, decompose, HandValue, Shanten};
use crate::model::*;
use crate::util::common::{remove_tiles, tiles_to_tile_table};

// 鳴きの評価結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEvaluation {
    pub recommended: bool,
    pub best_combination: Option<Vec<HandTile>>,
    pub shanten: Option<Shanten>, // 鳴いた後のシャンテン数
    pub dora_value: Option<usize>, // 差し出す牌のドラ枚数
    pub reason: Option<String>,
}

impl CallEvaluation {
    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            recommended: false,
            best_combination: None,
            shanten: None,
            dora_value: None,
            reason: Some(reason.into()),
        }
    }
}

// 鳴きの組み合わせ(手牌から差し出す牌)の中から鳴いた後のシャンテン数が最も小さいものを選択
// シャンテン数が同じ場合は差し出す牌のドラが多い方を優先
pub fn evaluate_call(
    state: &TurnState,
    combinations: &[Vec<HandTile>],
    hand_value: &HandValue,
    allows_calls: bool,
    params: &Params,
) -> CallEvaluation {
    if !allows_calls
        && (state.wall_count() > params.call_tiles_left || hand_value.shanten > params.call_max_shanten)
    {
        return CallEvaluation::rejected(format!(
            "strategy does not allow calls (tiles left: {}, shanten: {})",
            state.wall_count(),
            hand_value.shanten
        ));
    }
    if combinations.is_empty() {
        return CallEvaluation::rejected("no combination");
    }

    let melds = state.own_melds();
    let mut best: Option<(usize, Shanten, usize)> = None; // (index, shanten, dora)
    for (i, comb) in combinations.iter().enumerate() {
        let (rest, removed) = match remove_tiles(state.hand(), comb) {
            Some(r) => r,
            None => {
                warn!("combination not in hand: {:?}", comb);
                continue;
            }
        };

        // 鳴いた面子は完成面子として数える
        let (g, p, t) = decompose(&tiles_to_tile_table(&rest), melds).counts();
        let shanten = calc_shanten(g + 1, p, t);
        let dora: usize = removed.iter().map(|t| t.dora).sum();
        debug!("call {:?}: shanten={} dora={}", comb, shanten, dora);

        let better = match best {
            Some((_, s, d)) => shanten < s || (shanten == s && dora > d),
            None => true,
        };
        if better {
            best = Some((i, shanten, dora));
        }
    }

    match best {
        Some((i, shanten, dora)) => CallEvaluation {
            recommended: true,
            best_combination: Some(combinations[i].clone()),
            shanten: Some(shanten),
            dora_value: Some(dora),
            reason: None,
        },
        None => CallEvaluation::rejected("no valid combination"),
    }
}

#[cfg(test)]
fn setup(exp: &str) -> (TurnState, HandValue) {
    use crate::hand::evaluate_hand;
    use crate::util::common::tiles_from_string;
    let st = TurnState::from_hand(tiles_from_string(exp).unwrap()).unwrap();
    let hv = evaluate_hand(&st, st.hand(), Strategy::General);
    (st, hv)
}

#[cfg(test)]
fn combs(exps: &[&str]) -> Vec<Vec<HandTile>> {
    use crate::util::common::combination_from_string;
    exps.iter().map(|e| combination_from_string(e).unwrap()).collect()
}

#[test]
fn test_evaluate_call() {
    // 5mをチー
    let (st, hv) = setup("34m67m9m123p456p11z");
    let ev = evaluate_call(&st, &combs(&["3m|4m", "4m|6m", "6m|7m"]), &hv, true, &Params::default());
    assert!(ev.recommended);
    assert_eq!(ev.shanten, Some(0));
    // 同じシャンテン数なら最初の組み合わせ
    assert_eq!(ev.best_combination, Some(combs(&["3m|4m"])[0].clone()));
}

#[test]
fn test_evaluate_call_dora() {
    let (st, hv) = setup("4560m123p456p11z9s");
    let ev = evaluate_call(&st, &combs(&["4m|6m", "4m|0m"]), &hv, true, &Params::default());
    assert_eq!(ev.best_combination, Some(combs(&["4m|0m"])[0].clone()));
    assert_eq!(ev.dora_value, Some(1));
}

#[test]
fn test_evaluate_call_rejected() {
    let (st, hv) = setup("34m67m9m123p456p11z");
    let params = Params::default();

    // 方針が鳴きを許可しない
    let ev = evaluate_call(&st, &combs(&["3m|4m"]), &hv, false, &params);
    assert!(!ev.recommended);
    assert!(ev.reason.is_some());

    let ev = evaluate_call(&st, &[], &hv, true, &params);
    assert!(!ev.recommended);
    assert_eq!(ev.best_combination, None);

    let ev = evaluate_call(&st, &combs(&["8m|9m"]), &hv, true, &params);
    assert!(!ev.recommended);
}
