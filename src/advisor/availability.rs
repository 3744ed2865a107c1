use crate::model::*;
use crate::util::common::tile_kinds;

// 自分から見えていない牌の枚数
// 手牌, 全員の河, 全員の副露, ドラ表示牌を見えている牌として数える
pub fn calc_unseen_table(state: &TurnState) -> TileTable {
    let mut seen = TileTable::default();
    let mut see = |t: Tile| seen[t.0][t.1] += 1;
    for t in state.hand() {
        see(t.tile);
    }
    for d in state.discards() {
        for t in d {
            see(t.tile);
        }
    }
    for ms in state.melds() {
        for m in ms {
            for t in &m.tiles {
                see(t.tile);
            }
        }
    }
    for &t in state.doras() {
        see(t);
    }

    let mut unseen = TileTable::default();
    for t in tile_kinds() {
        unseen[t.0][t.1] = TILE.saturating_sub(seen[t.0][t.1]);
    }
    unseen
}

#[inline]
pub fn count_unseen(unseen: &TileTable, t: Tile) -> usize {
    unseen[t.0][t.1]
}

#[test]
fn test_unseen_table() {
    use crate::util::common::{meld_from_string, tiles_from_string};

    let mut data = TurnStateData {
        hand: tiles_from_string("123m456p789s1122z").unwrap(),
        doras: vec![Tile(TM, 1)],
        ..Default::default()
    };
    data.discards[1] = tiles_from_string("19m").unwrap();
    data.discards[2] = tiles_from_string("1m").unwrap();
    data.melds[3] = vec![meld_from_string("777z").unwrap()];
    let st = TurnState::new(data).unwrap();
    let unseen = calc_unseen_table(&st);

    assert_eq!(count_unseen(&unseen, Tile(TM, 1)), 0);
    assert_eq!(count_unseen(&unseen, Tile(TM, 2)), 3);
    assert_eq!(count_unseen(&unseen, Tile(TM, 9)), 3);
    assert_eq!(count_unseen(&unseen, Tile(TZ, WE)), 2);
    assert_eq!(count_unseen(&unseen, Tile(TZ, DR)), 1);
    assert_eq!(count_unseen(&unseen, Tile(TS, 5)), 4);
    // 未使用の番号
    assert_eq!(unseen[TM][0], 0);
    assert_eq!(unseen[TZ][8], 0);
}
