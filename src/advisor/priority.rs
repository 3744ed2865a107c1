use log::{debug, warn};
use serde::Serialize;

use super::availability::{calc_unseen_table, count_unseen};
use super::defense::{Defense, OrderingPolicy};
use super::efficiency::{calc_efficiency, calc_progress};
use super::params::Params;
use crate::hand::{evaluate_hand, HandValue};
use crate::model::*;
use crate::util::common::{remove_tile_strict, tiles_to_tile_table};

// 七対子, 国士無双の想定打点 (リーチ時)
pub const CHIITOITSU_SCORE: Score = 4000;
pub const THIRTEEN_ORPHANS_SCORE: Score = 32000;

// 七対子の評価を行う最小の手牌枚数
const CHIITOITSU_MIN_TILES: usize = 8;

// 打牌候補の評価
// valueは手牌に残す価値 (小さいほど切るべき牌)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilePriority {
    pub tile: HandTile,
    pub efficiency: f64,      // 打牌後の有効牌の評価 (七対子, 国士無双では牌を残す重み)
    pub danger: f64,          // 打牌の危険度
    pub hand_value: HandValue, // 打牌後の手牌の評価
    pub value: f64,
    pub explanation: String,
}

struct Candidate {
    tile: HandTile,
    efficiency: f64,
    progress: f64,
    danger: f64,
    hand_value: HandValue,
}

// 手牌の各牌を切った場合の評価を並び替えて返却
// 通常形:
//   評価値 = 牌効率の損失 * w_eff + リーチ時打点の損失 * w_score - 危険度 * w_safety
//   損失は最も良い候補との差 (ベタオリ時は危険度のみ)
// 七対子(手牌8枚以上), 国士無双:
//   評価値 = 牌を残す重み * w_eff + 想定打点 * w_score - 危険度 * w_safety
pub fn rank_discard_candidates(
    state: &TurnState,
    strategy: Strategy,
    params: &Params,
    defense: &dyn Defense,
    policy: &dyn OrderingPolicy,
) -> Vec<TilePriority> {
    let hand = state.hand();
    let melds = state.own_melds();
    let n_tiles = hand.len() + 3 * melds.len();
    if n_tiles % 3 != 2 {
        warn!("unexpected number of tiles: {}", n_tiles);
    }

    // 同じ牌(ドラ枚数を含む)は1度だけ評価
    let mut tiles: Vec<HandTile> = vec![];
    for t in hand {
        if !tiles.iter().any(|t2| t2.is_same_strict(t)) {
            tiles.push(*t);
        }
    }
    tiles.sort_by_key(|t| (t.tile, t.dora));

    let unseen = calc_unseen_table(state);
    let tps = match strategy {
        Strategy::Chiitoitsu if melds.is_empty() && hand.len() >= CHIITOITSU_MIN_TILES => {
            rank_by_pattern(state, &tiles, strategy, params, defense, |t, tt| {
                chiitoitsu_keep(t, tt, &unseen)
            })
        }
        Strategy::ThirteenOrphans if melds.is_empty() => {
            rank_by_pattern(state, &tiles, strategy, params, defense, kokushimusou_keep)
        }
        _ => rank_by_progress(state, &tiles, strategy, params, defense, &unseen),
    };

    policy.order(tps, defense)
}

fn rank_by_progress(
    state: &TurnState,
    tiles: &[HandTile],
    strategy: Strategy,
    params: &Params,
    defense: &dyn Defense,
    unseen: &TileTable,
) -> Vec<TilePriority> {
    let hand = state.hand();
    let melds = state.own_melds();
    let offense = strategy != Strategy::Fold;
    let eval_strategy = if offense { strategy } else { Strategy::General };

    let mut cands = vec![];
    for &t in tiles {
        let rest = match remove_tile_strict(hand, &t) {
            Some(rest) => rest,
            None => continue,
        };
        let hand_value = evaluate_hand(state, &rest, eval_strategy);
        let efficiency = calc_efficiency(&tiles_to_tile_table(&rest), melds, eval_strategy, unseen);
        let progress = calc_progress(hand_value.shanten, efficiency);
        let danger = defense.danger(&t);
        debug!(
            "discard {}: shanten={} eff={:.3} riichi={} danger={:.0}",
            t, hand_value.shanten, efficiency, hand_value.riichi_score, danger
        );
        cands.push(Candidate {
            tile: t,
            efficiency,
            progress,
            danger,
            hand_value,
        });
    }

    let best_progress = cands.iter().map(|c| c.progress).fold(f64::MIN, f64::max);
    let max_riichi = cands.iter().map(|c| c.hand_value.riichi_score).max().unwrap_or(0);

    cands
        .into_iter()
        .map(|c| {
            let keep = if offense {
                params.w_eff * (best_progress - c.progress)
                    + params.w_score * (max_riichi - c.hand_value.riichi_score) as f64
            } else {
                0.0
            };
            let value = keep - params.w_safety * c.danger;
            let explanation = explain(c.efficiency, c.danger, &c.hand_value, params);
            TilePriority {
                tile: c.tile,
                efficiency: c.efficiency,
                danger: c.danger,
                hand_value: c.hand_value,
                value,
                explanation,
            }
        })
        .collect()
}

// 牌の種類ごとの残す重みで評価 (七対子, 国士無双)
fn rank_by_pattern<F>(
    state: &TurnState,
    tiles: &[HandTile],
    strategy: Strategy,
    params: &Params,
    defense: &dyn Defense,
    keep: F,
) -> Vec<TilePriority>
where
    F: Fn(Tile, &TileTable) -> (f64, String),
{
    let hand = state.hand();
    let tt = tiles_to_tile_table(hand);
    let score = match strategy {
        Strategy::ThirteenOrphans => THIRTEEN_ORPHANS_SCORE,
        _ => CHIITOITSU_SCORE,
    };

    let mut tps = vec![];
    for &t in tiles {
        let rest = match remove_tile_strict(hand, &t) {
            Some(rest) => rest,
            None => continue,
        };
        let (efficiency, explanation) = keep(t.tile, &tt);
        let danger = defense.danger(&t);
        let value = params.w_eff * efficiency + params.w_score * score as f64 - params.w_safety * danger;
        debug!("discard {}: keep={:.2} danger={:.0} ({})", t, efficiency, danger, explanation);
        tps.push(TilePriority {
            tile: t,
            efficiency,
            danger,
            hand_value: evaluate_hand(state, &rest, strategy),
            value,
            explanation,
        });
    }
    tps
}

// 対子は残し, 孤立牌は残り枚数が多いほど残す
// 3枚目以降は不要
fn chiitoitsu_keep(t: Tile, tt: &TileTable, unseen: &TileTable) -> (f64, String) {
    match tt[t.0][t.1] {
        2 => (1.0, "pair tile, breaking it reduces seven pairs potential".to_string()),
        1 => {
            let n = count_unseen(unseen, t);
            (
                n as f64 * 0.2,
                format!("single tile, {} tiles available to form a pair", n),
            )
        }
        _ => (0.0, "extra copy, the pair stays".to_string()),
    }
}

// 么九牌の1枚目は残し, 么九牌以外を最初に切る
fn kokushimusou_keep(t: Tile, tt: &TileTable) -> (f64, String) {
    if !t.is_end() {
        (0.05, "not needed for thirteen orphans".to_string())
    } else if tt[t.0][t.1] == 1 {
        (0.95, "unique terminal/honor, keep for thirteen orphans".to_string())
    } else {
        (0.1, "extra terminal/honor, safe to discard".to_string())
    }
}

fn explain(efficiency: f64, danger: f64, hv: &HandValue, params: &Params) -> String {
    let mut ex = vec![];
    if efficiency > 0.8 {
        ex.push("high efficiency");
    } else if efficiency < 0.3 {
        ex.push("low efficiency");
    }
    if danger > params.high_danger {
        ex.push("dangerous");
    } else if danger < params.safe_danger {
        ex.push("relatively safe");
    }
    match hv.shanten {
        -1 => ex.push("complete hand"),
        0 => ex.push("tenpai"),
        1 => ex.push("close to tenpai"),
        _ => {}
    }
    ex.join(", ")
}

#[cfg(test)]
use super::defense::{DangerTable, NoDefense, SafeFirst, ValueOrder};

#[cfg(test)]
fn state(exp: &str) -> TurnState {
    use crate::util::common::tiles_from_string;
    TurnState::from_hand(tiles_from_string(exp).unwrap()).unwrap()
}

#[test]
fn test_rank_discard() {
    let st = state("1239p22456m44468s");
    let tps = rank_discard_candidates(&st, Strategy::General, &Params::default(), &NoDefense, &SafeFirst);
    // 重複する牌は1度のみ
    assert_eq!(tps.len(), 11);
    assert_eq!(tps[0].tile.tile, Tile(TP, 9));
    assert_eq!(tps[0].hand_value.shanten, 0);
    assert_eq!(tps[0].value, 0.0);
    assert!(tps.windows(2).all(|w| w[0].value <= w[1].value));
    assert!(tps[1..].iter().all(|tp| tp.hand_value.shanten == 1));
}

#[test]
fn test_rank_discard_fold() {
    let st = state("1239p22456m44468s");
    let mut dt = DangerTable::default();
    dt.set(Tile(TP, 9), 5000.0);
    dt.set(Tile(TM, 2), 100.0);

    // ベタオリ時は危険度のみ
    let tps = rank_discard_candidates(&st, Strategy::Fold, &Params::default(), &dt, &ValueOrder);
    assert_eq!(tps[0].tile.tile, Tile(TP, 9));
    assert!((tps[0].value + 10.0).abs() < 1e-9);
    assert!(tps[1..].iter().all(|tp| tp.value <= 0.0));

    // ベタオリ対象の牌は評価値に関わらず後ろ
    dt.fold_danger = Some(2000.0);
    let tps = rank_discard_candidates(&st, Strategy::Fold, &Params::default(), &dt, &SafeFirst);
    assert_eq!(tps.last().map(|tp| tp.tile.tile), Some(Tile(TP, 9)));
    assert!(tps[..tps.len() - 1].windows(2).all(|w| w[0].value <= w[1].value));
}

#[test]
fn test_rank_discard_red() {
    // 赤牌と通常の牌は別の候補
    let st = state("1239p22405m44468s");
    let tps = rank_discard_candidates(&st, Strategy::General, &Params::default(), &NoDefense, &SafeFirst);
    let fives: Vec<usize> = tps
        .iter()
        .filter(|tp| tp.tile.tile == Tile(TM, 5))
        .map(|tp| tp.tile.dora)
        .collect();
    assert_eq!(fives, vec![0, 1]);
}

#[test]
fn test_rank_discard_chiitoitsu() {
    let st = state("1133m5577p2299s14z");
    let tps = rank_discard_candidates(&st, Strategy::Chiitoitsu, &Params::default(), &NoDefense, &SafeFirst);
    assert_eq!(tps.len(), 8);
    // 孤立牌が先, 対子は後ろ
    assert_eq!(tps[0].tile.tile, Tile(TZ, WE));
    assert_eq!(tps[1].tile.tile, Tile(TZ, WN));
    assert!(tps[2..].iter().all(|tp| tp.efficiency == 1.0));
    assert_eq!(tps[0].explanation, "single tile, 3 tiles available to form a pair");
    assert!((tps[0].value - (40.0 * 0.6 + 0.00015 * 4000.0)).abs() < 1e-9);

    // 残り枚数の少ない孤立牌から切る
    use crate::util::common::tiles_from_string;
    let mut data = TurnStateData {
        hand: tiles_from_string("1133m5577p2299s14z").unwrap(),
        ..Default::default()
    };
    data.discards[1] = tiles_from_string("44z").unwrap();
    let st = TurnState::new(data).unwrap();
    let tps = rank_discard_candidates(&st, Strategy::Chiitoitsu, &Params::default(), &NoDefense, &SafeFirst);
    assert_eq!(tps[0].tile.tile, Tile(TZ, WN));
    assert_eq!(tps[1].tile.tile, Tile(TZ, WE));

    // 8枚未満は通常の評価
    let st = state("1133m5z");
    let tps = rank_discard_candidates(&st, Strategy::Chiitoitsu, &Params::default(), &NoDefense, &SafeFirst);
    assert!(tps.iter().all(|tp| !tp.explanation.contains("tiles available")));
}

#[test]
fn test_rank_discard_thirteen_orphans() {
    let st = state("19m19p19s1234566z5m");
    let tps = rank_discard_candidates(
        &st,
        Strategy::ThirteenOrphans,
        &Params::default(),
        &NoDefense,
        &SafeFirst,
    );
    assert_eq!(tps.len(), 13);
    assert_eq!(tps[0].tile.tile, Tile(TM, 5));
    assert_eq!(tps[1].tile.tile, Tile(TZ, DG));
    assert_eq!(tps[1].explanation, "extra terminal/honor, safe to discard");
    assert!(tps[2..].iter().all(|tp| tp.efficiency == 0.95));
    assert!((tps[0].value - (40.0 * 0.05 + 0.00015 * 32000.0)).abs() < 1e-9);
}
