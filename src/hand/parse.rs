use std::collections::HashMap;

use crate::model::*;
use crate::util::common::count_tiles;
use crate::util::misc::cartesian_product;

use super::win::{calc_possibole_pairs, is_kokushimusou_win};

use PartialType::*;
use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPairType {
    Pair,    // 雀頭
    Shuntsu, // 順子
    Koutsu,  // 刻子
    Chii,    // チー
    Pon,     // ポン
    Minkan,  // 明槓 (大明槓 + 加槓)
    Ankan,   // 暗槓
}

// Tileは順子、チーの場合は先頭の牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPair(pub SetPairType, pub Tile);

pub type ParsedHand = Vec<SetPair>;

// 鳴きをSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    let mut res = vec![];

    for m in melds {
        let t = match m.first_tile() {
            Some(t) => t,
            None => continue,
        };
        res.push(match m.meld_type {
            MeldType::Chi => SetPair(Chii, t),
            MeldType::Pon => SetPair(Pon, t),
            MeldType::Minkan | MeldType::Kakan => SetPair(Minkan, t),
            MeldType::Ankan => SetPair(Ankan, t),
        });
    }

    res
}

// 牌種を順子と刻子に分解
// 三連刻の場合2通り(刻子3つ, 順子3つ)の分割が存在する　四連刻は役満(四暗刻)なので無視
// 予め分解可能であることを確認しておくこと(分解できない場合assertに失敗)
// TileRowが空(すべて0)の場合は分解可能とみなし[[]]を返却
fn parse_row_into_sets(tr: &TileRow, ti: usize) -> Vec<ParsedHand> {
    let mut ph = vec![];
    let (mut n0, mut n1, mut n2);

    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];

        // 刻子
        if n0 >= 3 {
            ph.push(SetPair(Koutsu, Tile(ti, i)));
        }

        // 順子 (字牌はn=0となる)
        let n = n0 % 3;
        for _ in 0..n {
            ph.push(SetPair(Shuntsu, Tile(ti, i)))
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    if n0 == 3 {
        ph.push(SetPair(Koutsu, Tile(ti, 8)));
    }
    if n1 == 3 {
        ph.push(SetPair(Koutsu, Tile(ti, 9)));
    }
    assert!(n0 % 3 == 0 && n1 % 3 == 0);

    if ti == TZ || ph.len() < 3 {
        return vec![ph];
    }

    // 三連刻チェック
    let (mut i, mut n) = (0, 0);
    for SetPair(tp, t) in &ph {
        if let Koutsu = tp {
            if i + n == t.1 {
                n += 1;
                if n == 3 {
                    break;
                }
            } else {
                i = t.1;
                n = 1;
            }
        }
    }

    // 三連刻なし
    if n != 3 {
        return vec![ph];
    }

    let mut ph2 = vec![];
    for &SetPair(tp, t) in &ph {
        if let Koutsu = tp {
            if i <= t.1 && t.1 < i + 3 {
                continue;
            }
        }
        ph2.push(SetPair(tp, t));
    }
    let sp = SetPair(Shuntsu, Tile(ti, i));
    ph2.push(sp);
    ph2.push(sp);
    ph2.push(sp);

    vec![ph, ph2]
}

// 手牌が完成形(七対子・国士無双は除く)なら面子+雀頭に分解して返却
pub fn parse_into_normal_win(hand: &TileTable) -> Vec<ParsedHand> {
    let pairs = calc_possibole_pairs(hand);
    if pairs.is_empty() {
        return vec![];
    }

    let mut phs_list = vec![];

    // 雀頭を含む列
    let pair_ti = pairs[0].0;
    let mut tr = hand[pair_ti];
    let mut phs = vec![];
    for pair in pairs {
        tr[pair.1] -= 2;
        let mut phs2 = parse_row_into_sets(&tr, pair_ti);
        tr[pair.1] += 2;
        for ph in &mut phs2 {
            ph.push(SetPair(Pair, pair));
        }
        phs.append(&mut phs2);
    }
    phs_list.push(phs);

    // 雀頭を含まない列
    for ti in 0..TYPE {
        if ti != pair_ti {
            phs_list.push(parse_row_into_sets(&hand[ti], ti));
        }
    }

    // それぞれの列の分割のすべての組み合わせ(直積)を求める
    let mut res = vec![];
    for v in cartesian_product(&phs_list) {
        let mut ph = vec![];
        for v2 in v {
            ph.extend(v2);
        }
        res.push(ph);
    }

    res
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
pub fn parse_into_chiitoitsu_win(hand: &TileTable) -> Vec<ParsedHand> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let t = hand[ti][ni];
            if t == 0 {
                continue;
            } else if t == 2 {
                res.push(SetPair(Pair, Tile(ti, ni)));
            } else {
                return vec![];
            }
        }
    }

    if res.len() == 7 {
        vec![res]
    } else {
        vec![] // 鳴き有り
    }
}

// 手牌が完成形(国士無双)なら空のParsedHandが入ったリストを返却
pub fn parse_into_kokusimusou_win(hand: &TileTable) -> Vec<ParsedHand> {
    if is_kokushimusou_win(hand) {
        vec![vec![]]
    } else {
        vec![]
    }
}

// [構造分解 (未完成の手牌)]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialType {
    Toitsu,  // 対子 (雀頭以外)
    Ryanmen, // 両面
    Penchan, // 辺張
    Kanchan, // 嵌張
}

// Tileは塔子の小さい方の牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partial(pub PartialType, pub Tile);

impl Partial {
    // 塔子を面子にする牌
    pub fn completing_tiles(&self) -> Vec<Tile> {
        let Partial(tp, t) = *self;
        match tp {
            Toitsu => vec![t],
            Ryanmen => vec![Tile(t.0, t.1 - 1), Tile(t.0, t.1 + 2)],
            Penchan => {
                if t.1 == 1 {
                    vec![Tile(t.0, 3)]
                } else {
                    vec![Tile(t.0, 7)]
                }
            }
            Kanchan => vec![Tile(t.0, t.1 + 1)],
        }
    }
}

// 面子, 雀頭, 塔子, 孤立牌への分解結果
// setsには副露を含む
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    pub sets: ParsedHand,
    pub pair: Option<Tile>,
    pub partials: Vec<Partial>,
    pub isolated: Vec<Tile>,
}

impl Decomposition {
    #[inline]
    pub fn groups(&self) -> usize {
        self.sets.len()
    }

    // (面子数, 雀頭の有無, 塔子数)
    #[inline]
    pub fn counts(&self) -> (usize, bool, usize) {
        (self.sets.len(), self.pair.is_some(), self.partials.len())
    }

    fn key(&self) -> (usize, usize, usize) {
        (self.sets.len(), self.pair.is_some() as usize, self.partials.len())
    }

    fn append(&mut self, mut other: Decomposition) {
        self.sets.append(&mut other.sets);
        if other.pair.is_some() {
            self.pair = other.pair;
        }
        self.partials.append(&mut other.partials);
        self.isolated.append(&mut other.isolated);
    }

    // 手牌(鳴き以外)から消費した牌の枚数
    fn consumed(&self) -> usize {
        let closed_sets = self
            .sets
            .iter()
            .filter(|SetPair(tp, _)| matches!(tp, Shuntsu | Koutsu))
            .count();
        3 * closed_sets + 2 * self.pair.iter().count() + 2 * self.partials.len() + self.isolated.len()
    }
}

type RowMemo = HashMap<(Type, TileRow, bool), Decomposition>;

// 手牌を面子の数, 雀頭の有無, 塔子の数の優先順位で最大となるように分解
// 同順位の場合は小さい牌から探索して最初に見つかったものを採用
pub fn decompose(hand: &TileTable, melds: &[Meld]) -> Decomposition {
    let mut memo = RowMemo::new();
    let mut rows_nopair = vec![];
    let mut rows_pair = vec![];
    for ti in 0..TYPE {
        rows_nopair.push(decompose_row(hand[ti], ti, false, &mut memo));
        rows_pair.push(decompose_row(hand[ti], ti, true, &mut memo));
    }

    // 雀頭なし, 雀頭を含む列が萬子, 筒子, 索子, 字牌の順に比較
    let combine = |pair_ti: Option<Type>| {
        let mut d = Decomposition::default();
        for ti in 0..TYPE {
            if Some(ti) == pair_ti {
                d.append(rows_pair[ti].clone());
            } else {
                d.append(rows_nopair[ti].clone());
            }
        }
        d
    };
    let mut best = combine(None);
    for ti in 0..TYPE {
        let d = combine(Some(ti));
        if d.key() > best.key() {
            best = d;
        }
    }

    assert!(
        best.consumed() == count_tiles(hand),
        "decomposition consumed {} tiles of {}",
        best.consumed(),
        count_tiles(hand)
    );

    let mut sets = parse_melds(melds);
    sets.append(&mut best.sets);
    best.sets = sets;
    best
}

// 打牌後の手牌を分解
pub fn decompose_after_discard(hand: &TileTable, melds: &[Meld], discard: Tile) -> Decomposition {
    let mut hand = *hand;
    assert!(hand[discard.0][discard.1] > 0, "no {} in hand", discard);
    hand[discard.0][discard.1] -= 1;
    decompose(&hand, melds)
}

fn decompose_row(tr: TileRow, ti: Type, pair_allowed: bool, memo: &mut RowMemo) -> Decomposition {
    if let Some(d) = memo.get(&(ti, tr, pair_allowed)) {
        return d.clone();
    }

    // 最も小さい牌から順に使い道を決める
    let ni = match (1..TNUM).find(|&ni| tr[ni] > 0) {
        Some(ni) => ni,
        None => return Decomposition::default(),
    };
    let t = Tile(ti, ni);
    let is_suit = ti != TZ;

    let mut best: Option<Decomposition> = None;
    let mut consider = |d: Decomposition| {
        if best.as_ref().map_or(true, |b| d.key() > b.key()) {
            best = Some(d);
        }
    };

    // 刻子
    if tr[ni] >= 3 {
        let mut tr2 = tr;
        tr2[ni] -= 3;
        let mut d = decompose_row(tr2, ti, pair_allowed, memo);
        d.sets.insert(0, SetPair(Koutsu, t));
        consider(d);
    }

    // 順子
    if is_suit && ni <= 7 && tr[ni + 1] > 0 && tr[ni + 2] > 0 {
        let mut tr2 = tr;
        tr2[ni] -= 1;
        tr2[ni + 1] -= 1;
        tr2[ni + 2] -= 1;
        let mut d = decompose_row(tr2, ti, pair_allowed, memo);
        d.sets.insert(0, SetPair(Shuntsu, t));
        consider(d);
    }

    // 雀頭
    if pair_allowed && tr[ni] >= 2 {
        let mut tr2 = tr;
        tr2[ni] -= 2;
        let mut d = decompose_row(tr2, ti, false, memo);
        d.pair = Some(t);
        consider(d);
    }

    // 対子
    if tr[ni] >= 2 {
        let mut tr2 = tr;
        tr2[ni] -= 2;
        let mut d = decompose_row(tr2, ti, pair_allowed, memo);
        d.partials.insert(0, Partial(Toitsu, t));
        consider(d);
    }

    // 両面, 辺張
    if is_suit && ni <= 8 && tr[ni + 1] > 0 {
        let mut tr2 = tr;
        tr2[ni] -= 1;
        tr2[ni + 1] -= 1;
        let mut d = decompose_row(tr2, ti, pair_allowed, memo);
        let tp = if ni == 1 || ni == 8 { Penchan } else { Ryanmen };
        d.partials.insert(0, Partial(tp, t));
        consider(d);
    }

    // 嵌張
    if is_suit && ni <= 7 && tr[ni + 2] > 0 {
        let mut tr2 = tr;
        tr2[ni] -= 1;
        tr2[ni + 2] -= 1;
        let mut d = decompose_row(tr2, ti, pair_allowed, memo);
        d.partials.insert(0, Partial(Kanchan, t));
        consider(d);
    }

    // 孤立牌
    {
        let mut tr2 = tr;
        tr2[ni] -= 1;
        let mut d = decompose_row(tr2, ti, pair_allowed, memo);
        d.isolated.insert(0, t);
        consider(d);
    }

    let best = best.unwrap_or_default();
    memo.insert((ti, tr, pair_allowed), best.clone());
    best
}

#[cfg(test)]
fn table(exp: &str) -> TileTable {
    use crate::util::common::{tiles_from_string, tiles_to_tile_table};
    tiles_to_tile_table(&tiles_from_string(exp).unwrap())
}

#[test]
fn test_parse_into_normal_win() {
    // 三連刻は2通りに分解できる
    let phs = parse_into_normal_win(&table("111222333m456p77s"));
    assert_eq!(phs.len(), 2);
    assert!(parse_into_normal_win(&table("1239p22456m44468s")).is_empty());
}

#[test]
fn test_decompose() {
    let d = decompose(&table("1239p22456m44468s"), &[]);
    assert_eq!(d.counts(), (3, true, 1));
    assert_eq!(d.pair, Some(Tile(TM, 2)));
    assert_eq!(d.partials, vec![Partial(Kanchan, Tile(TS, 6))]);
    assert_eq!(d.isolated, vec![Tile(TP, 9)]);

    let d = decompose_after_discard(&table("1239p22456m44468s"), &[], Tile(TP, 9));
    assert_eq!(d.counts(), (3, true, 1));
    assert!(d.isolated.is_empty());
}

#[test]
fn test_decompose_partials() {
    let d = decompose(&table("12m46m79p5s11z"), &[]);
    assert_eq!(d.groups(), 0);
    assert_eq!(d.pair, Some(Tile(TZ, 1)));
    assert_eq!(
        d.partials,
        vec![
            Partial(Penchan, Tile(TM, 1)),
            Partial(Kanchan, Tile(TM, 4)),
            Partial(Kanchan, Tile(TP, 7)),
        ]
    );
    assert_eq!(d.isolated, vec![Tile(TS, 5)]);
    assert_eq!(Partial(Ryanmen, Tile(TS, 3)).completing_tiles(), vec![Tile(TS, 2), Tile(TS, 5)]);
    assert_eq!(Partial(Penchan, Tile(TS, 8)).completing_tiles(), vec![Tile(TS, 7)]);
}

#[test]
fn test_decompose_with_melds() {
    let melds = vec![Meld {
        meld_type: MeldType::Pon,
        tiles: vec![HandTile::new(Tile(TZ, DR)); 3],
    }];
    let d = decompose(&table("234m567p88s45s"), &melds);
    assert_eq!(d.counts(), (3, true, 1));
    assert_eq!(d.sets[0], SetPair(Pon, Tile(TZ, DR)));
}
