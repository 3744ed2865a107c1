use std::collections::BTreeMap;

use super::availability::count_unseen;
use crate::hand::{decompose, Partial, PartialType, Shanten};
use crate::model::*;
use crate::util::common::YAOCHUU;

// 待ちの形による有効牌の重み
pub const TWO_SIDED: f64 = 1.0; // 両面
pub const INTERIOR: f64 = 0.75; // 嵌張
pub const EDGE: f64 = 0.5; // 辺張
pub const SINGLE: f64 = 0.5; // 単騎, 対子

// 有効牌とその重み
pub type UsefulTiles = BTreeMap<Tile, f64>;

fn add_useful(useful: &mut UsefulTiles, t: Tile, quality: f64) {
    let q = useful.entry(t).or_insert(quality);
    if *q < quality {
        *q = quality;
    }
}

fn partial_quality(p: &Partial) -> f64 {
    match p.0 {
        PartialType::Ryanmen => TWO_SIDED,
        PartialType::Kanchan => INTERIOR,
        PartialType::Penchan => EDGE,
        PartialType::Toitsu => SINGLE,
    }
}

// 評価方針に応じた有効牌
// 同じ牌が複数の理由で有効な場合は重みの大きい方を採用
pub fn calc_useful_tiles(hand: &TileTable, melds: &[Meld], strategy: Strategy) -> UsefulTiles {
    let mut useful = UsefulTiles::new();
    match strategy {
        Strategy::Chiitoitsu if melds.is_empty() => {
            // 対子になっていない牌
            for ti in 0..TYPE {
                for ni in 1..TNUM {
                    if hand[ti][ni] == 1 {
                        add_useful(&mut useful, Tile(ti, ni), SINGLE);
                    }
                }
            }
        }
        Strategy::ThirteenOrphans if melds.is_empty() => {
            // 所持していない么九牌
            for t in YAOCHUU {
                if hand[t.0][t.1] == 0 {
                    add_useful(&mut useful, t, SINGLE);
                }
            }
        }
        _ => {
            let d = decompose(hand, melds);
            for p in &d.partials {
                let q = partial_quality(p);
                for t in p.completing_tiles() {
                    add_useful(&mut useful, t, q);
                }
            }
            // 孤立牌は対子または塔子になる牌
            for &t in &d.isolated {
                add_useful(&mut useful, t, SINGLE);
                if t.is_suit() {
                    for ni in t.1.saturating_sub(2).max(1)..=(t.1 + 2).min(9) {
                        if ni != t.1 {
                            add_useful(&mut useful, Tile(t.0, ni), SINGLE);
                        }
                    }
                }
            }
        }
    }
    useful
}

// 有効牌の残り枚数と重みの積の平均
// 有効牌が存在しない場合は0
pub fn calc_efficiency(hand: &TileTable, melds: &[Meld], strategy: Strategy, unseen: &TileTable) -> f64 {
    let useful = calc_useful_tiles(hand, melds, strategy);
    if useful.is_empty() {
        return 0.0;
    }
    let sum: f64 = useful
        .iter()
        .map(|(&t, q)| count_unseen(unseen, t) as f64 * q)
        .sum();
    sum / useful.len() as f64
}

// 手の進み具合 (シャンテン数が1つ小さいことは有効牌の多さより常に優先)
#[inline]
pub fn calc_progress(shanten: Shanten, efficiency: f64) -> f64 {
    (8 - shanten) as f64 * 5.0 + efficiency
}

#[cfg(test)]
fn table(exp: &str) -> TileTable {
    use crate::util::common::{tiles_from_string, tiles_to_tile_table};
    tiles_to_tile_table(&tiles_from_string(exp).unwrap())
}

#[cfg(test)]
const FULL: TileTable = [[4; TNUM]; TYPE];

#[test]
fn test_useful_tiles_general() {
    // 嵌張6-8sのみ
    let useful = calc_useful_tiles(&table("123p22456m44468s"), &[], Strategy::General);
    assert_eq!(useful.len(), 1);
    assert_eq!(useful.get(&Tile(TS, 7)), Some(&INTERIOR));
    assert_eq!(calc_efficiency(&table("123p22456m44468s"), &[], Strategy::General, &FULL), 3.0);

    // 両面と辺張
    let useful = calc_useful_tiles(&table("12p23456m777s1122z"), &[], Strategy::General);
    assert_eq!(useful.get(&Tile(TP, 3)), Some(&EDGE));
    assert_eq!(useful.get(&Tile(TM, 4)), Some(&TWO_SIDED));
}

#[test]
fn test_useful_tiles_isolated() {
    let useful = calc_useful_tiles(&table("1m"), &[], Strategy::General);
    let tiles: Vec<Tile> = useful.keys().copied().collect();
    assert_eq!(tiles, vec![Tile(TM, 1), Tile(TM, 2), Tile(TM, 3)]);

    let useful = calc_useful_tiles(&table("5z"), &[], Strategy::General);
    assert_eq!(useful.keys().copied().collect::<Vec<_>>(), vec![Tile(TZ, DW)]);
}

#[test]
fn test_useful_tiles_special() {
    let useful = calc_useful_tiles(&table("1133m5577p2299s1z"), &[], Strategy::Chiitoitsu);
    assert_eq!(useful.keys().copied().collect::<Vec<_>>(), vec![Tile(TZ, WE)]);

    let useful = calc_useful_tiles(&table("19m19p19s1234566z"), &[], Strategy::ThirteenOrphans);
    assert_eq!(useful.keys().copied().collect::<Vec<_>>(), vec![Tile(TZ, DR)]);
}

#[test]
fn test_efficiency_unseen() {
    let mut unseen = FULL;
    unseen[TS][7] = 1;
    assert_eq!(calc_efficiency(&table("123p22456m44468s"), &[], Strategy::General, &unseen), 0.75);

    // 有効牌なし (和了形)
    let tt = table("123p22456m444678s");
    assert_eq!(calc_efficiency(&tt, &[], Strategy::General, &FULL), 0.0);
}

#[test]
fn test_progress() {
    assert!(calc_progress(0, 0.0) > calc_progress(1, 4.0));
    assert!(calc_progress(1, 2.0) > calc_progress(1, 1.0));
}
