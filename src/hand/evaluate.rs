use log::debug;
use serde::Serialize;

use super::parse::*;
use super::point::*;
use super::shanten::*;
use super::win::*;
use super::yaku::*;
use crate::advisor::availability::{calc_unseen_table, count_unseen};
use crate::model::*;
use crate::util::common::{inc_tile, tiles_to_tile_table};

// 手牌の評価結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandValue {
    pub shanten: Shanten,
    pub waits: Vec<Tile>,     // 待ち牌 (聴牌時のみ)
    pub wait_count: usize,    // 待ち牌の見えていない枚数
    pub dora: usize,          // 手牌と副露のドラ枚数
    pub yaku: Han,            // 役の翻数 (ドラを含まない)
    pub yaku_names: Vec<&'static str>,
    pub fu: usize,            // 符数
    pub yakuman: bool,        // 役満
    pub score: Score,         // ロン和了の得点 (無役の場合は0)
    pub riichi_score: Score,  // リーチ時の得点 (鳴きありの場合はscoreと同じ)
}

// 和了形の点数
#[derive(Debug, Clone, PartialEq, Eq)]
struct WinScore {
    yaku: Han,
    yaku_names: Vec<&'static str>,
    fu: usize,
    yakuman: bool,
    score: Score,
    riichi_score: Score,
}

impl WinScore {
    fn key(&self) -> (Score, Score) {
        (self.score, self.riichi_score)
    }
}

// 手牌(13枚または14枚相当)を評価
// 聴牌の場合は待ち牌それぞれでロン和了した場合の最も高い点数を採用
// 和了形の場合は手牌中の各牌を和了牌とした場合の最も高い点数を採用
// 1シャンテン以上の場合は役と点数は0
pub fn evaluate_hand(state: &TurnState, hand: &[HandTile], strategy: Strategy) -> HandValue {
    let melds = state.own_melds();
    let tt = tiles_to_tile_table(hand);
    let shanten = calc_shanten_by_strategy(&tt, melds, strategy);
    let dora = hand.iter().map(|t| t.dora).sum::<usize>()
        + melds.iter().map(|m| m.dora()).sum::<usize>();
    let n_tiles = hand.len() + 3 * melds.len();

    let mut waits = vec![];
    let mut best: Option<WinScore> = None;
    if shanten == 0 && n_tiles % 3 == 1 {
        waits = calc_winning_tiles(&tt, strategy, melds.is_empty());
        for &w in &waits {
            let mut tt2 = tt;
            inc_tile(&mut tt2, w);
            // 待ち牌自身がドラの場合はその分を加算
            let dora_w = dora + state.indicated_dora(w);
            best = better(best, evaluate_win(state, &tt2, w, dora_w));
        }
    } else if shanten == -1 {
        for t in hand {
            best = better(best, evaluate_win(state, &tt, t.tile, dora));
        }
    }

    let unseen = calc_unseen_table(state);
    let wait_count = waits.iter().map(|&w| count_unseen(&unseen, w)).sum();

    let ws = best.unwrap_or(WinScore {
        yaku: Han::default(),
        yaku_names: vec![],
        fu: 0,
        yakuman: false,
        score: 0,
        riichi_score: 0,
    });
    HandValue {
        shanten,
        waits,
        wait_count,
        dora,
        yaku: ws.yaku,
        yaku_names: ws.yaku_names,
        fu: ws.fu,
        yakuman: ws.yakuman,
        score: ws.score,
        riichi_score: ws.riichi_score,
    }
}

fn better(a: Option<WinScore>, b: Option<WinScore>) -> Option<WinScore> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.key() > a.key() { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

// 和了形である場合,最も高得点となるような解釈の点数を返却
// 和了形でない場合,Noneを返却
fn evaluate_win(
    state: &TurnState,
    hand: &TileTable, // 和了牌を含む手牌 (鳴き以外)
    winning_tile: Tile,
    dora: usize,
) -> Option<WinScore> {
    let melds = state.own_melds();
    let mut phs = vec![];
    phs.append(&mut parse_into_normal_win(hand));
    if melds.is_empty() {
        phs.append(&mut parse_into_chiitoitsu_win(hand));
        phs.append(&mut parse_into_kokusimusou_win(hand));
    }

    let pm = parse_melds(melds);
    let mut best = None;
    for mut ph in phs.into_iter() {
        ph.append(&mut pm.clone());
        match ph.len() {
            0 | 5 | 7 => {} // 国士, 通常, 七対子
            _ => continue,  // 無効な和了形
        }

        let ctx = YakuContext::new(
            *hand,
            melds,
            ph,
            winning_tile,
            state.prevalent_wind(),
            state.seat_wind(),
            false,
        );
        let (yakus, yaku, yakuman) = ctx.calc_yaku();
        let fu = ctx.calc_fu();
        let fan = yaku.get(ctx.is_open());
        let fan_total = if yakuman { fan } else { fan + dora };

        let score = if fan > 0 {
            calc_ron_score(state.is_dealer(), fu, fan_total, yakuman)
        } else {
            0 // 無役
        };
        let riichi_score = if ctx.is_open() {
            score
        } else {
            calc_ron_score(state.is_dealer(), fu, fan_total + 1, yakuman)
        };
        debug!(
            "win {}: {:?} fu={} fan={} score={} riichi={}",
            winning_tile, yakus, fu, fan_total, score, riichi_score
        );

        best = better(
            best,
            Some(WinScore {
                yaku,
                yaku_names: yakus.iter().map(|y| y.name).collect(),
                fu,
                yakuman,
                score,
                riichi_score,
            }),
        );
    }

    best
}

#[cfg(test)]
fn state(exp: &str) -> TurnState {
    use crate::util::common::tiles_from_string;
    TurnState::from_hand(tiles_from_string(exp).unwrap()).unwrap()
}

#[test]
fn test_evaluate_tenpai() {
    let st = state("1239p22456m44468s");
    let hand = crate::util::common::remove_tile(st.hand(), Tile(TP, 9)).unwrap();
    let hv = evaluate_hand(&st, &hand, Strategy::General);
    assert_eq!(hv.shanten, 0);
    assert_eq!(hv.waits, vec![Tile(TS, 7)]);
    assert_eq!(hv.wait_count, 4);
    assert_eq!(hv.yaku, Han::default());
    assert_eq!(hv.score, 0); // 無役
    assert_eq!(hv.fu, 40);
    assert_eq!(hv.riichi_score, 2000); // 親 40符1翻
}

#[test]
fn test_evaluate_win() {
    let st = state("234m555m678p345s66s");
    let hv = evaluate_hand(&st, st.hand(), Strategy::General);
    assert_eq!(hv.shanten, -1);
    assert!(hv.waits.is_empty());
    assert!(hv.yaku.closed >= 1);
    assert!(hv.score > 0);
    assert!(hv.riichi_score > hv.score);
}

#[test]
fn test_evaluate_not_tenpai() {
    let st = state("1239p22456m44468s");
    let hand = crate::util::common::remove_tile(st.hand(), Tile(TS, 8)).unwrap();
    let hv = evaluate_hand(&st, &hand, Strategy::General);
    assert_eq!(hv.shanten, 1);
    assert!(hv.waits.is_empty());
    assert_eq!((hv.score, hv.riichi_score), (0, 0));
}

#[test]
fn test_evaluate_dora() {
    use crate::util::common::tiles_from_string;
    let data = TurnStateData {
        hand: tiles_from_string("1239p22406m44468s").unwrap(),
        doras: vec![Tile(TM, 1)],
        seat_wind: WS,
        ..Default::default()
    };
    let st = TurnState::new(data).unwrap();
    let hand = crate::util::common::remove_tile(st.hand(), Tile(TP, 9)).unwrap();
    let hv = evaluate_hand(&st, &hand, Strategy::General);
    // 赤5m + 2m x2
    assert_eq!(hv.dora, 3);
    assert_eq!(hv.waits, vec![Tile(TS, 7)]);
    assert_eq!(hv.score, 0);
    // 子 40符4翻
    assert_eq!(hv.riichi_score, 8000);
}

#[test]
fn test_evaluate_dora_wait() {
    use crate::util::common::tiles_from_string;
    let data = TurnStateData {
        hand: tiles_from_string("1239p22406m44468s").unwrap(),
        doras: vec![Tile(TS, 6)],
        seat_wind: WS,
        ..Default::default()
    };
    let st = TurnState::new(data).unwrap();
    let hand = crate::util::common::remove_tile(st.hand(), Tile(TP, 9)).unwrap();
    let hv = evaluate_hand(&st, &hand, Strategy::General);
    // 手牌のドラは赤5mのみ, 和了牌7sがドラ
    assert_eq!(hv.dora, 1);
    assert_eq!(hv.waits, vec![Tile(TS, 7)]);
    // 子 40符3翻 (リーチ + 赤5m + 7s)
    assert_eq!(hv.riichi_score, 5200);
}

#[test]
fn test_evaluate_shanpon_ron() {
    let st = state("111m222p345s66m77p");
    let hv = evaluate_hand(&st, st.hand(), Strategy::General);
    assert_eq!(hv.waits, vec![Tile(TM, 6), Tile(TP, 7)]);
    // ロンで完成した刻子は暗刻ではないため無役
    assert!(hv.yaku_names.is_empty());
    assert_eq!(hv.score, 0);
    // 親 50符1翻
    assert_eq!(hv.fu, 50);
    assert_eq!(hv.riichi_score, 2400);
}
