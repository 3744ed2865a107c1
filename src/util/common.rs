use crate::model::*;
use crate::util::misc::vec_count;

// 么九牌 (国士無双の構成牌)
pub const YAOCHUU: [Tile; 13] = [
    Tile(TM, 1),
    Tile(TM, 9),
    Tile(TP, 1),
    Tile(TP, 9),
    Tile(TS, 1),
    Tile(TS, 9),
    Tile(TZ, WE),
    Tile(TZ, WS),
    Tile(TZ, WW),
    Tile(TZ, WN),
    Tile(TZ, DW),
    Tile(TZ, DG),
    Tile(TZ, DR),
];

// 34種の牌を昇順に列挙
pub fn tile_kinds() -> impl Iterator<Item = Tile> {
    (0..TYPE).flat_map(|ti| {
        let n = if ti == TZ { DR } else { 9 };
        (1..=n).map(move |ni| Tile(ti, ni))
    })
}

#[inline]
pub fn inc_tile(tt: &mut TileTable, t: Tile) {
    tt[t.0][t.1] += 1;
}

pub fn count_tiles(tt: &TileTable) -> usize {
    tt.iter().map(|tr| tr[1..].iter().sum::<usize>()).sum()
}

pub fn tiles_to_tile_table(tiles: &[HandTile]) -> TileTable {
    let mut tt = TileTable::default();
    for t in tiles {
        inc_tile(&mut tt, t.tile);
    }
    tt
}

// 指定した牌を1枚取り除いた手牌 (同種が複数ある場合は最初の1枚)
pub fn remove_tile(hand: &[HandTile], t: Tile) -> Option<Vec<HandTile>> {
    let i = hand.iter().position(|h| h.tile == t)?;
    let mut res = hand.to_vec();
    res.remove(i);
    Some(res)
}

// ドラ枚数まで一致する牌を1枚取り除いた手牌
pub fn remove_tile_strict(hand: &[HandTile], t: &HandTile) -> Option<Vec<HandTile>> {
    let i = hand.iter().position(|h| h.is_same_strict(t))?;
    let mut res = hand.to_vec();
    res.remove(i);
    Some(res)
}

// 複数の牌を取り除く
// ドラ枚数まで一致する牌を優先し,なければ同種の牌を取り除く
// (残りの手牌, 実際に取り除いた牌)を返却
pub fn remove_tiles(hand: &[HandTile], tiles: &[HandTile]) -> Option<(Vec<HandTile>, Vec<HandTile>)> {
    let mut rest = hand.to_vec();
    let mut removed = vec![];
    for t in tiles {
        let i = rest
            .iter()
            .position(|h| h.is_same_strict(t))
            .or_else(|| rest.iter().position(|h| h == t))?;
        removed.push(rest.remove(i));
    }
    Some((rest, removed))
}

// "1239p22456m" のような<数字...><種別>の繰り返し表記
pub fn tiles_from_string(exp: &str) -> Result<Vec<HandTile>, ParseError> {
    let mut tiles = vec![];
    let mut nums: Vec<char> = vec![];
    for c in exp.chars() {
        match c {
            '0'..='9' => nums.push(c),
            'm' | 'p' | 's' | 'z' => {
                if nums.is_empty() {
                    return Err(ParseError::new(exp, format!("no number before '{}'", c)));
                }
                for n in nums.drain(..) {
                    let sym: String = [n, c].iter().collect();
                    tiles.push(HandTile::from_symbol(&sym).map_err(|e| {
                        ParseError::new(exp, format!("{}: {}", sym, e.message))
                    })?);
                }
            }
            ' ' => {}
            _ => {
                return Err(ParseError::new(exp, format!("invalid char: '{}'", c)));
            }
        }
    }
    if !nums.is_empty() {
        return Err(ParseError::new(exp, "number without tile type"));
    }
    Ok(tiles)
}

// 鳴きで差し出す牌の組み合わせ "4m|6m"
pub fn combination_from_string(exp: &str) -> Result<Vec<HandTile>, ParseError> {
    let mut tiles = vec![];
    for sym in exp.split('|') {
        tiles.push(
            HandTile::from_symbol(sym)
                .map_err(|e| ParseError::new(exp, format!("{}: {}", sym, e.message)))?,
        );
    }
    Ok(tiles)
}

// "234m", "777z", "5555p" (明槓), "5555p!" (暗槓)
pub fn meld_from_string(exp: &str) -> Result<Meld, ParseError> {
    let is_closed = exp.ends_with('!');
    let tiles = tiles_from_string(exp.trim_end_matches('!'))?;
    if tiles.is_empty() {
        return Err(ParseError::new(exp, "empty meld"));
    }
    if tiles.iter().any(|t| t.tile.0 != tiles[0].tile.0) {
        return Err(ParseError::new(exp, "meld tiles must be the same type"));
    }

    let mut nis: Vec<Tnum> = tiles.iter().map(|t| t.tile.1).collect();
    nis.sort_unstable();
    let mut diffs = vec![];
    let mut ni0 = nis[0];
    for &ni in &nis[1..] {
        diffs.push(ni - ni0);
        ni0 = ni;
    }

    let meld_type = if diffs.len() == 2 && vec_count(&diffs, &1) == 2 && tiles[0].tile.is_suit() {
        MeldType::Chi
    } else if diffs.len() == 2 && vec_count(&diffs, &0) == 2 {
        MeldType::Pon
    } else if diffs.len() == 3 && vec_count(&diffs, &0) == 3 {
        if is_closed {
            MeldType::Ankan
        } else {
            MeldType::Minkan
        }
    } else {
        return Err(ParseError::new(exp, "invalid meld"));
    };

    Ok(Meld { meld_type, tiles })
}

pub fn wind_from_char(c: char) -> Result<Tnum, ParseError> {
    Ok(match c {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => {
            return Err(ParseError::new(
                &c.to_string(),
                "invalid wind symbol (E, S, W, N)",
            ))
        }
    })
}

#[test]
fn test_tiletable() {
    let hand = tiles_from_string("1239p22456m44468s").unwrap();
    assert_eq!(hand.len(), 14);
    let tt = tiles_to_tile_table(&hand);
    assert_eq!(count_tiles(&tt), 14);
    assert_eq!(tt[TS][4], 3);
    assert_eq!(tt[TP][9], 1);
    assert_eq!(tt[TZ].iter().sum::<usize>(), 0);
}

#[test]
fn test_tiles_from_string_error() {
    assert!(tiles_from_string("123").is_err());
    assert!(tiles_from_string("m123").is_err());
    assert!(tiles_from_string("12x").is_err());
    assert!(tiles_from_string("89z").is_err());
    let red = tiles_from_string("055m").unwrap();
    assert_eq!(red.iter().map(|t| t.dora).sum::<usize>(), 1);
}

#[test]
fn test_combination_and_meld() {
    let comb = combination_from_string("4m|6m").unwrap();
    assert_eq!(comb.len(), 2);
    assert!(combination_from_string("4m|6").is_err());

    assert_eq!(meld_from_string("423s").unwrap().meld_type, MeldType::Chi);
    assert_eq!(meld_from_string("777z").unwrap().meld_type, MeldType::Pon);
    assert_eq!(meld_from_string("5555p").unwrap().meld_type, MeldType::Minkan);
    assert_eq!(meld_from_string("5555p!").unwrap().meld_type, MeldType::Ankan);
    assert!(meld_from_string("123z").is_err());
    assert!(meld_from_string("12m3p").is_err());
}

#[test]
fn test_tile_kinds() {
    assert_eq!(tile_kinds().count(), 34);
    assert!(YAOCHUU.iter().all(|t| t.is_end()));
}

#[test]
fn test_remove_tiles() {
    let hand = tiles_from_string("4505m").unwrap();
    let red = HandTile::from_symbol("0m").unwrap();

    let rest = remove_tile_strict(&hand, &red).unwrap();
    assert_eq!(rest.iter().map(|t| t.dora).sum::<usize>(), 0);
    assert!(remove_tile_strict(&rest, &red).is_none());

    // 赤牌の指定がない場合も同種の牌で代用
    let (rest, removed) = remove_tiles(&hand, &combination_from_string("4m|5m").unwrap()).unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(removed[1].dora, 0);
    assert!(remove_tiles(&hand, &combination_from_string("6m").unwrap()).is_none());
}
