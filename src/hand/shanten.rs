use std::cmp::min;

use crate::model::*;
use crate::util::common::YAOCHUU;

use super::parse::decompose;

pub type Shanten = i32;

// 通常形のシャンテン数
// 面子は2, 塔子と雀頭は1ずつシャンテン数を下げる
// ブロックは面子+塔子で4つ, 雀頭1つまで (雀頭は塔子として重複して数えない)
pub fn calc_shanten(groups: usize, pair: bool, partials: usize) -> Shanten {
    let g = min(groups, 4);
    let p = min(partials, 4 - g);
    8 - 2 * g as Shanten - p as Shanten - pair as Shanten
}

// 七対子のシャンテン数
// 対子が増えるごとに1ずつ下がり, 牌の種類が7種に満たない場合はその分だけ上がる
pub fn calc_shanten_chiitoitsu(hand: &TileTable) -> Shanten {
    let (mut pairs, mut kinds) = (0, 0);
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] > 0 {
                kinds += 1;
            }
            if hand[ti][ni] >= 2 {
                pairs += 1;
            }
        }
    }
    let pairs = min(pairs, 7);
    6 - pairs + (7 - min(kinds, 7))
}

// 国士無双のシャンテン数
pub fn calc_shanten_kokushimusou(hand: &TileTable) -> Shanten {
    let mut kinds = 0;
    let mut has_pair = false;
    for t in &YAOCHUU {
        let n = hand[t.0][t.1];
        if n > 0 {
            kinds += 1;
        }
        if n >= 2 {
            has_pair = true;
        }
    }
    13 - kinds - has_pair as Shanten
}

// 評価方針に応じたシャンテン数
// 七対子, 国士無双は副露(暗槓を含む)がある場合は通常形で計算
pub fn calc_shanten_by_strategy(hand: &TileTable, melds: &[Meld], strategy: Strategy) -> Shanten {
    match strategy {
        Strategy::Chiitoitsu if melds.is_empty() => calc_shanten_chiitoitsu(hand),
        Strategy::ThirteenOrphans if melds.is_empty() => calc_shanten_kokushimusou(hand),
        _ => {
            let (g, p, t) = decompose(hand, melds).counts();
            calc_shanten(g, p, t)
        }
    }
}

// 和了形の判定 (面子数と対子数のみ)
// 国士無双は構成牌で判定するためis_kokushimusou_winを使用すること
pub fn is_winning_hand(strategy: Strategy, groups: usize, pairs: usize) -> bool {
    match strategy {
        Strategy::Chiitoitsu => pairs == 7,
        _ => groups >= 4 && pairs >= 1,
    }
}

#[cfg(test)]
fn table(exp: &str) -> TileTable {
    use crate::util::common::{tiles_from_string, tiles_to_tile_table};
    tiles_to_tile_table(&tiles_from_string(exp).unwrap())
}

#[test]
fn test_calc_shanten() {
    assert_eq!(calc_shanten(4, true, 0), -1);
    assert_eq!(calc_shanten(3, true, 1), 0);
    assert_eq!(calc_shanten(2, true, 2), 1);
    assert_eq!(calc_shanten(0, false, 0), 8);
    assert_eq!(calc_shanten(4, false, 1), 0);
    // 塔子過多
    assert_eq!(calc_shanten(2, false, 5), 2);
}

#[test]
fn test_is_winning_hand() {
    assert!(is_winning_hand(Strategy::General, 4, 1));
    assert!(!is_winning_hand(Strategy::General, 3, 1));
    assert!(is_winning_hand(Strategy::Chiitoitsu, 0, 7));
    assert!(!is_winning_hand(Strategy::Chiitoitsu, 0, 6));
}

#[test]
fn test_shanten_chiitoitsu() {
    assert_eq!(calc_shanten_chiitoitsu(&table("1133m5577p2299s11z")), -1);
    assert_eq!(calc_shanten_chiitoitsu(&table("1133m5577p2299s1z")), 0);
    // 4枚使いは1対子
    assert_eq!(calc_shanten_chiitoitsu(&table("1111m5577p2299s12z")), 1);
    assert_eq!(calc_shanten_chiitoitsu(&table("123456789m123p1z")), 6);
}

#[test]
fn test_shanten_kokushimusou() {
    assert_eq!(calc_shanten_kokushimusou(&table("19m19p19s12345677z")), -1);
    assert_eq!(calc_shanten_kokushimusou(&table("19m19p19s1234567z")), 0);
    assert_eq!(calc_shanten_kokushimusou(&table("19m19p19s1234566z")), 0);
    assert_eq!(calc_shanten_kokushimusou(&table("2345678m2345678p")), 13);
}

#[test]
fn test_shanten_by_strategy() {
    let tt = table("1239p22456m44468s");
    assert_eq!(calc_shanten_by_strategy(&tt, &[], Strategy::General), 0);

    let tt = table("123p22456m444678s");
    assert_eq!(calc_shanten_by_strategy(&tt, &[], Strategy::General), -1);

    let tt = table("1133m5577p2299s1z");
    assert_eq!(calc_shanten_by_strategy(&tt, &[], Strategy::Chiitoitsu), 0);
    assert_eq!(calc_shanten_by_strategy(&tt, &[], Strategy::General), 3);
}
