use std::fmt;

use serde::Serialize;

use crate::model::*;

use super::parse::{ParsedHand, SetPair, SetPairType};
use super::win::is_kokushimusou_win;

use SetPairType::*;

// 翻数 (鳴きあり, 門前)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Han {
    pub open: usize,
    pub closed: usize,
}

impl Han {
    pub fn new(open: usize, closed: usize) -> Self {
        Self { open, closed }
    }

    #[inline]
    pub fn get(&self, is_open: bool) -> usize {
        if is_open {
            self.open
        } else {
            self.closed
        }
    }
}

impl std::ops::Add for Han {
    type Output = Han;

    fn add(self, other: Han) -> Han {
        Han::new(self.open + other.open, self.closed + other.closed)
    }
}

#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,         // 元々の手牌(鳴きは含まない) 国士の判定などに使用
    all_tiles: TileTable,    // 鳴きを含むすべての牌 断么九, 染め手の判定に使用
    parsed_hand: ParsedHand, // 鳴きを含むすべての面子
    pair_tile: Option<Tile>, // 雀頭の牌
    winning_tile: Tile,      // 上がり牌
    is_self_drawn: bool,     // ツモ和了
    is_open: bool,           // 鳴きの有無
    prevalent_wind: Tnum,    // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    seat_wind: Tnum,         // 自風 (同上)
    counts: Counts,          // 面子や牌種別のカウント
    ron_koutsu: Option<Tile>, // ロン和了で完成した刻子 (明刻扱い)
    iipeikou_count: usize,   // 一盃口, 二盃口用
    yakuhai_check: TileRow,  // 役牌面子のカウント(雀頭は含まない)
}

impl YakuContext {
    pub fn new(
        hand: TileTable,
        melds: &[Meld],
        parsed_hand: ParsedHand,
        winning_tile: Tile,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        is_self_drawn: bool,
    ) -> Self {
        let mut all_tiles = hand;
        for m in melds {
            for t in &m.tiles {
                all_tiles[t.tile.0][t.tile.1] += 1;
            }
        }
        let pair_tile = get_pair(&parsed_hand);
        let mut counts = count_type(&parsed_hand);
        let ron_koutsu = if is_self_drawn {
            None
        } else {
            find_ron_koutsu(&parsed_hand, winning_tile)
        };
        if ron_koutsu.is_some() {
            counts.ankou_total -= 1;
        }
        let iipeikou_count = count_iipeikou(&parsed_hand);
        let yakuhai_check = check_yakuhai(&parsed_hand);
        let is_open = counts.chii + counts.pon + counts.minkan != 0;

        Self {
            hand,
            all_tiles,
            parsed_hand,
            pair_tile,
            winning_tile,
            is_self_drawn,
            is_open,
            prevalent_wind,
            seat_wind,
            counts,
            ron_koutsu,
            iipeikou_count,
            yakuhai_check,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // (役一覧, 役の翻数の合計, 役満かどうか)を返却
    // 役満が含まれている場合は役満の役のみを返却
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, Han, bool) {
        let yaku: Vec<&'static Yaku> = YAKU_LIST.iter().filter(|y| (y.func)(self)).collect();

        let yakuman: Vec<&'static Yaku> = yaku.iter().copied().filter(|y| y.yakuman).collect();
        let (list, is_yakuman) = if yakuman.is_empty() {
            (yaku, false)
        } else {
            (yakuman, true)
        };

        let han = list
            .iter()
            .fold(Han::default(), |acc, y| acc + Han::new(y.fan_open, y.fan_close));
        (list, han, is_yakuman)
    }

    pub fn calc_fu(&self) -> usize {
        if is_chiitoitsu(self) {
            return 25;
        }
        if is_pinfu(self) {
            return if self.is_self_drawn { 20 } else { 30 };
        }

        // 副底
        let mut fu = 20;

        // 和了り方
        fu += if self.is_self_drawn {
            2 // ツモ
        } else if !self.is_open {
            10 // 門前ロン
        } else {
            0
        };

        // 面子, 雀頭
        for SetPair(tp, t) in &self.parsed_hand {
            match tp {
                Pair => {
                    fu += if t.is_doragon() {
                        2
                    } else if t.is_wind() {
                        if t.1 == self.prevalent_wind || t.1 == self.seat_wind {
                            2
                        } else {
                            0
                        }
                    } else {
                        0
                    }
                }
                Koutsu if self.ron_koutsu == Some(*t) => fu += if t.is_end() { 4 } else { 2 },
                Koutsu => fu += if t.is_end() { 8 } else { 4 },
                Pon => fu += if t.is_end() { 4 } else { 2 },
                Minkan => fu += if t.is_end() { 16 } else { 8 },
                Ankan => fu += if t.is_end() { 32 } else { 16 },
                _ => {}
            }
        }

        // 待ちの形 (両面, シャンポン以外は2符)
        let wt = &self.winning_tile;
        let mut is_fu2 = true;
        for &SetPair(tp, t) in &self.parsed_hand {
            match tp {
                Shuntsu => {
                    if is_ryanmen_wait(t, *wt) {
                        is_fu2 = false;
                        break;
                    }
                }
                Koutsu => {
                    if t == *wt {
                        is_fu2 = false;
                        break;
                    }
                }
                _ => {}
            }
        }
        if is_fu2 {
            fu += 2;
        }

        // 喰い平和形は30符
        let fu = (fu + 9) / 10 * 10; // １の位は切り上げ
        if fu == 20 {
            30
        } else {
            fu
        }
    }
}

// 順子tに対して上がり牌wtが両面待ちの完成牌であるか (辺張は除く)
fn is_ryanmen_wait(t: Tile, wt: Tile) -> bool {
    t.0 == wt.0 && ((t.1 == wt.1 && t.1 != 7) || (t.1 + 2 == wt.1 && t.1 != 1))
}

// ロン和了の上がり牌で完成した刻子
// 上がり牌が順子の一部とも解釈できる場合は順子側で完成したものとする
fn find_ron_koutsu(ph: &ParsedHand, wt: Tile) -> Option<Tile> {
    let in_shuntsu = ph
        .iter()
        .any(|&SetPair(tp, t)| tp == Shuntsu && t.0 == wt.0 && t.1 <= wt.1 && wt.1 <= t.1 + 2);
    if in_shuntsu {
        return None;
    }
    ph.iter()
        .find(|&&SetPair(tp, t)| tp == Koutsu && t == wt)
        .map(|&SetPair(_, t)| t)
}

#[derive(Debug, Default)]
struct Counts {
    shuntsu: usize,
    koutsu: usize,
    chii: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntu + chii
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan (ロンで完成した刻子を除く)
}

fn get_pair(ph: &ParsedHand) -> Option<Tile> {
    ph.iter()
        .find(|SetPair(tp, _)| *tp == Pair)
        .map(|&SetPair(_, t)| t)
}

fn count_type(ph: &ParsedHand) -> Counts {
    let mut cnt = Counts::default();
    for SetPair(tp, _) in ph {
        match tp {
            Pair => {}
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Chii => cnt.chii += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
        }
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chii;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;

    cnt
}

fn count_iipeikou(ph: &ParsedHand) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for SetPair(tp, t) in ph {
        if let Shuntsu = tp {
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] == 2 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(ph: &ParsedHand) -> TileRow {
    let mut tr = TileRow::default();
    for SetPair(tp, t) in ph {
        match tp {
            Koutsu | Pon | Minkan | Ankan => {
                if t.is_hornor() {
                    tr[t.1] += 1;
                }
            }
            _ => {}
        }
    }

    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_open: usize,  // 鳴きありの翻(食い下がり)
    pub fan_close: usize, // 鳴きなしの翻
    pub yakuman: bool,    // 役満 (符を無視して役満の点数)
}

impl Yaku {
    #[inline]
    pub fn han(&self) -> Han {
        Han::new(self.fan_open, self.fan_close)
    }
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.fan_open, self.fan_close)
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $o: expr, $c: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_open: $o,
            fan_close: $c,
            yakuman: false,
        }
    };
    ($n: expr, $f: expr, $o: expr, $c: expr, yakuman) => {
        Yaku {
            name: $n,
            func: $f,
            fan_open: $o,
            fan_close: $c,
            yakuman: true,
        }
    };
}

static YAKU_LIST: &[Yaku] = &[
    yaku!("場風", is_bakaze, 1, 1),
    yaku!("自風", is_jikaze, 1, 1),
    yaku!("白", is_haku, 1, 1),
    yaku!("發", is_hatsu, 1, 1),
    yaku!("中", is_chun, 1, 1),
    yaku!("断么九", is_tanyaochuu, 1, 1),
    yaku!("平和", is_pinfu, 0, 1),
    yaku!("一盃口", is_iipeikou, 0, 1),
    yaku!("二盃口", is_ryanpeikou, 0, 3),
    yaku!("一気通貫", is_ikkitsuukan, 1, 2),
    yaku!("三色同順", is_sanshokudoujun, 1, 2),
    yaku!("三色同刻", is_sanshokudoukou, 2, 2),
    yaku!("チャンタ", is_chanta, 1, 2),
    yaku!("純チャン", is_junchan, 2, 3),
    yaku!("混老頭", is_honroutou, 2, 2),
    yaku!("対々和", is_toitoihou, 2, 2),
    yaku!("三暗刻", is_sanankou, 2, 2),
    yaku!("混一色", is_honiisou, 2, 3),
    yaku!("清一色", is_chiniisou, 5, 6),
    yaku!("小三元", is_shousangen, 2, 2),
    yaku!("大三元", is_daisangen, 10, 10, yakuman),
    // 特殊な組み合わせ
    yaku!("国士無双", is_kokushimusou, 0, 13, yakuman),
    yaku!("七対子", is_chiitoitsu, 0, 2),
];

pub fn find_yaku(name: &str) -> Option<&'static Yaku> {
    YAKU_LIST.iter().find(|y| y.name == name)
}

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり右側を優先
//     一盃口, 二盃口
//     チャンタ, 純チャンタ
//     混一色, 清一色

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 断么九 (鳴きを含むすべての牌が中張牌)
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    let at = &ctx.all_tiles;
    let mut n = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if at[ti][ni] == 0 {
                continue;
            }
            if Tile(ti, ni).is_end() {
                return false;
            }
            n += at[ti][ni];
        }
    }
    n != 0
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 {
        return false;
    }

    let pt = match ctx.pair_tile {
        Some(t) => t,
        None => return false,
    };
    if pt.is_hornor() && (pt.is_doragon() || pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind)
    {
        return false;
    }

    // 上がり牌の両面待ち判定
    let wt = ctx.winning_tile;
    if wt.is_hornor() {
        return false;
    }
    ctx.parsed_hand
        .iter()
        .any(|&SetPair(tp, t)| tp == Shuntsu && is_ryanmen_wait(t, wt))
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut f147 = [[false; 3]; TZ];
    for SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Shuntsu | Chii => match t.1 {
                1 | 4 | 7 => f147[t.0][t.1 / 3] = true,
                _ => {}
            },
            _ => {}
        }
    }

    f147.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Shuntsu | Chii => mps[t.1][t.0] = true,
            _ => {}
        }
    }

    mps.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Koutsu | Pon | Minkan | Ankan => {
                if t.is_suit() {
                    mps[t.1][t.0] = true;
                }
            }
            _ => {}
        }
    }

    mps.iter().any(|f| f[0] && f[1] && f[2])
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let mut has_hornor = false;
    for SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if t.is_hornor() {
                    has_hornor = true;
                } else if !t.is_terminal() {
                    return false;
                }
            }
            Shuntsu | Chii => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
        }
    }

    has_hornor
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    for SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if !t.is_terminal() {
                    return false;
                }
            }
            Shuntsu | Chii => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
        }
    }

    true
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.parsed_hand.is_empty() {
        return false;
    }

    let mut has_hornor = false;
    let mut has_terminal = false;
    for SetPair(_, t) in &ctx.parsed_hand {
        if t.is_hornor() {
            has_hornor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_hornor && has_terminal
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 3
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    let (suit, hornor) = count_suit_kinds(&ctx.all_tiles);
    suit == 1 && hornor
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    let (suit, hornor) = count_suit_kinds(&ctx.all_tiles);
    suit == 1 && !hornor
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.map_or(false, |t| t.is_doragon())
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.is_empty() && is_kokushimusou_win(&ctx.hand)
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.len() == 7
}

// 共通処理 ====================================================================

// (使用している数牌の種別数, 字牌の有無)
fn count_suit_kinds(tt: &TileTable) -> (usize, bool) {
    let used = |ti: Type| tt[ti][1..].iter().any(|&n| n > 0);
    let suit = (0..TZ).filter(|&ti| used(ti)).count();
    (suit, used(TZ))
}

#[cfg(test)]
mod tests_helper {
    use super::*;
    use crate::hand::parse::{parse_into_chiitoitsu_win, parse_into_normal_win, parse_melds};
    use crate::util::common::{tiles_from_string, tiles_to_tile_table};

    // 和了形として解釈可能なすべての分解における役
    pub fn yaku_names(exp: &str, melds: &[Meld], wt: &str) -> Vec<Vec<&'static str>> {
        let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
        let wt = Tile::from_symbol(wt).unwrap();
        let mut phs = parse_into_normal_win(&tt);
        phs.append(&mut parse_into_chiitoitsu_win(&tt));
        phs.iter()
            .map(|ph| {
                let mut ph = ph.clone();
                ph.append(&mut parse_melds(melds));
                let ctx = YakuContext::new(tt, melds, ph, wt, WE, WE, false);
                ctx.calc_yaku().0.iter().map(|y| y.name).collect()
            })
            .collect()
    }

    pub fn context(exp: &str, melds: &[Meld], wt: &str) -> YakuContext {
        let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
        let wt = Tile::from_symbol(wt).unwrap();
        let mut ph = parse_into_normal_win(&tt).remove(0);
        ph.append(&mut parse_melds(melds));
        YakuContext::new(tt, melds, ph, wt, WE, WE, false)
    }

    pub fn pon(exp: &str) -> Meld {
        Meld {
            meld_type: MeldType::Pon,
            tiles: tiles_from_string(exp).unwrap(),
        }
    }
}

#[test]
fn test_yakuhai() {
    use tests_helper::*;
    // 東場の東家: 場風 + 自風 + 白
    let ctx = context("111z555z234m678p99s", &[], "9s");
    let (yaku, han, yakuman) = ctx.calc_yaku();
    let names: Vec<&str> = yaku.iter().map(|y| y.name).collect();
    assert_eq!(names, vec!["場風", "自風", "白"]);
    assert_eq!(han, Han::new(3, 3));
    assert!(!yakuman);
}

#[test]
fn test_tanyao() {
    use tests_helper::*;
    let ctx = context("234m555m678p345s66s", &[], "6s");
    let (_, han, _) = ctx.calc_yaku();
    assert!(find_yaku("断么九").unwrap().han() == Han::new(1, 1));
    assert!(han.open >= 1 && han.closed >= 1);
    assert!(yaku_names("234m555m678p345s66s", &[], "6s")[0].contains(&"断么九"));

    // 鳴きの牌も判定対象
    let names = yaku_names("234m678p345s66s", &[pon("999m")], "6s");
    assert!(!names[0].contains(&"断么九"));
}

#[test]
fn test_daisangen() {
    use tests_helper::*;
    let ctx = context("555z666z777z234m11p", &[], "1p");
    let (yaku, han, yakuman) = ctx.calc_yaku();
    assert_eq!(yaku.len(), 1);
    assert_eq!(han, Han::new(10, 10));
    assert!(yakuman);
}

#[test]
fn test_sanshoku_doukou() {
    use tests_helper::*;
    let names = yaku_names("555m555p555s234m99s", &[], "9s");
    assert!(names[0].contains(&"三色同刻"));
    assert_eq!(find_yaku("三色同刻").unwrap().han(), Han::new(2, 2));
}

#[test]
fn test_ittsu() {
    use tests_helper::*;
    let names = yaku_names("123456789m234p55s", &[], "5s");
    assert!(names[0].contains(&"一気通貫"));
    assert_eq!(find_yaku("一気通貫").unwrap().han(), Han::new(1, 2));
    assert_eq!(find_yaku("三色同順").unwrap().han(), Han::new(1, 2));
}

#[test]
fn test_chiitoitsu_and_iipeikou() {
    use tests_helper::*;
    // 七対子と二盃口の両方に解釈可能
    let names = yaku_names("223344m667788p55s", &[], "5s");
    assert!(names.iter().any(|n| n.contains(&"二盃口")));
    assert!(names.iter().any(|n| n.contains(&"七対子")));
}

#[test]
fn test_fu() {
    use tests_helper::*;
    // 門前ロン 暗刻(中張牌) 嵌張待ち: 20 + 10 + 4 + 2 = 36 -> 40
    let ctx = context("123p22456m444678s", &[], "7s");
    assert_eq!(ctx.calc_fu(), 40);

    // 平和ロン
    let ctx = context("123p22m456m567s678s", &[], "5s");
    assert!(is_pinfu(&ctx));
    assert_eq!(ctx.calc_fu(), 30);

    // 辺張は平和にならない
    let ctx = context("123p22m456m234s789s", &[], "7s");
    assert!(!is_pinfu(&ctx));
}

#[test]
fn test_sanshoku_doujun() {
    use tests_helper::*;
    let names = yaku_names("123m123p123s456m99s", &[], "9s");
    assert!(names[0].contains(&"三色同順"));

    let names = yaku_names("123456789m234p55s", &[], "5s");
    assert!(!names[0].contains(&"三色同順"));
}

#[test]
fn test_honiisou_chiniisou() {
    use tests_helper::*;
    // 門前
    let names = yaku_names("123456789m111z22z", &[], "2z");
    assert!(names[0].contains(&"混一色"));
    assert!(!names[0].contains(&"清一色"));

    let names = yaku_names("234m567m345m888m99m", &[], "9m");
    assert!(names.iter().all(|n| n.contains(&"清一色") && !n.contains(&"混一色")));

    // 鳴きありは食い下がり
    let ctx = context("234m567m345m55z", &[pon("888m")], "5z");
    let (yaku, han, _) = ctx.calc_yaku();
    assert!(ctx.is_open());
    assert_eq!(yaku.iter().map(|y| y.name).collect::<Vec<_>>(), vec!["混一色"]);
    assert_eq!(han.get(true), 2);

    let ctx = context("234m567m345m99m", &[pon("888m")], "9m");
    let (yaku, han, _) = ctx.calc_yaku();
    assert_eq!(yaku.iter().map(|y| y.name).collect::<Vec<_>>(), vec!["清一色"]);
    assert_eq!(han.get(true), 5);
    assert_eq!(find_yaku("清一色").unwrap().han(), Han::new(5, 6));

    let names = yaku_names("234m555m678p345s66s", &[], "6s");
    assert!(!names[0].contains(&"混一色") && !names[0].contains(&"清一色"));
}

#[test]
fn test_shousangen() {
    use tests_helper::*;
    let names = yaku_names("555z666z77z234m456m", &[], "7z");
    assert!(names[0].contains(&"小三元"));
    assert!(!names[0].contains(&"大三元"));

    let names = yaku_names("555z666z777z234m11p", &[], "1p");
    assert!(!names[0].contains(&"小三元"));
}

#[test]
fn test_toitoihou_sanankou() {
    use tests_helper::*;
    // 単騎待ち: 手牌の刻子はすべて暗刻
    let names = yaku_names("111m222p444s55z", &[pon("777s")], "5z");
    assert!(names[0].contains(&"対々和"));
    assert!(names[0].contains(&"三暗刻"));

    let names = yaku_names("234m555m678p345s66s", &[], "6s");
    assert!(!names[0].contains(&"対々和"));
    assert!(!names[0].contains(&"三暗刻"));
}

#[test]
fn test_ron_koutsu() {
    use tests_helper::*;
    // シャンポン待ちのロンで完成した刻子は暗刻に数えない
    for wt in ["6m", "7p"] {
        let hand = if wt == "6m" { "111m222p345s666m77p" } else { "111m222p345s66m777p" };
        let names = yaku_names(hand, &[], wt);
        assert!(names.iter().all(|n| !n.contains(&"三暗刻")), "{}", wt);
    }

    // 順子の上がり牌なら3つとも暗刻
    let names = yaku_names("111m222p345s666m77p", &[], "3s");
    assert!(names[0].contains(&"三暗刻"));

    // 刻子と順子のどちらでも解釈できる上がり牌は順子側
    let names = yaku_names("111123m222p333s55p", &[], "1m");
    assert!(names[0].contains(&"三暗刻"));

    // 符も明刻扱い: 20 + 10 + 4 + 4 + 2 = 40
    let ctx = context("222m333p456s777m88p", &[], "7m");
    assert_eq!(ctx.calc_fu(), 40);
    let ctx = context("222m333p456s777m88p", &[], "5s");
    assert_eq!(ctx.calc_fu(), 50);
}
