use std::convert::TryFrom;

use serde::{de, ser};

use super::*;

// 牌の種類 (ドラ情報を含まない)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // "9p" のような<数字><種別>表記から変換
    // 0は赤5を表すが, 種類としては通常の5として扱う (ドラの扱いはHandTile側)
    pub fn from_symbol(s: &str) -> Result<Self, ParseError> {
        HandTile::from_symbol(s).map(|ht| ht.tile)
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // この牌をドラ表示牌とした場合のドラ
    pub fn dora_successor(&self) -> Self {
        let ni = if self.is_hornor() {
            match self.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match self.1 {
                9 => 1,
                i => i + 1,
            }
        };
        Tile(self.0, ni)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.1, ['m', 'p', 's', 'z'][self.0])
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(de::Error::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [HandTile]
// 実際に手牌・河・副露に存在する牌
// 比較(==)は種類のみ, ドラ枚数まで比較する場合はis_same_strictを使用
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "HandTileRepr")]
pub struct HandTile {
    pub tile: Tile,
    pub dora: usize, // 赤ドラ + 表示牌によるドラの枚数
}

impl HandTile {
    pub fn new(tile: Tile) -> Self {
        Self { tile, dora: 0 }
    }

    // 0は赤5 (ドラ1枚) として扱う
    pub fn from_symbol(s: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            return Err(ParseError::new(s, "tile symbol must be 2 chars"));
        }

        let ti = tile_type_from_char(chars[1]).ok_or_else(|| {
            ParseError::new(s, format!("invalid suit: '{}'", chars[1]))
        })?;
        let n = chars[0]
            .to_digit(10)
            .ok_or_else(|| ParseError::new(s, format!("invalid rank: '{}'", chars[0])))?
            as usize;
        match (ti, n) {
            (TZ, 1..=7) => Ok(Self::new(Tile(ti, n))),
            (TZ, _) => Err(ParseError::new(s, "honor rank must be 1~7")),
            (_, 0) => Ok(Self {
                tile: Tile(ti, 5),
                dora: 1,
            }),
            (_, _) => Ok(Self::new(Tile(ti, n))),
        }
    }

    #[inline]
    pub fn is_same_strict(&self, other: &Self) -> bool {
        self.tile == other.tile && self.dora == other.dora
    }
}

impl PartialEq for HandTile {
    fn eq(&self, other: &Self) -> bool {
        self.tile == other.tile
    }
}

impl Eq for HandTile {}

impl PartialOrd for HandTile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandTile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tile.cmp(&other.tile)
    }
}

impl From<Tile> for HandTile {
    fn from(tile: Tile) -> Self {
        Self::new(tile)
    }
}

impl fmt::Display for HandTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dora == 0 {
            write!(f, "{}", self.tile)
        } else {
            write!(f, "{}*{}", self.tile, self.dora)
        }
    }
}

impl fmt::Debug for HandTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// JSON上では "0p" のような文字列, {"tile": "5p", "dora": 1} のどちらも受け付ける
#[derive(Deserialize)]
#[serde(untagged)]
enum HandTileRepr {
    Symbol(String),
    Full { tile: Tile, dora: usize },
}

impl TryFrom<HandTileRepr> for HandTile {
    type Error = ParseError;

    fn try_from(r: HandTileRepr) -> Result<Self, Self::Error> {
        match r {
            HandTileRepr::Symbol(s) => HandTile::from_symbol(&s),
            HandTileRepr::Full { tile, dora } => Ok(HandTile { tile, dora }),
        }
    }
}

pub fn tile_type_from_char(c: char) -> Option<Type> {
    Some(match c {
        'm' => TM,
        'p' => TP,
        's' => TS,
        'z' => TZ,
        _ => return None,
    })
}

// [TileTable]
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[test]
fn test_tile_symbol() {
    assert_eq!(Tile::from_symbol("9p").unwrap(), Tile(TP, 9));
    assert_eq!(Tile(TS, 3).to_string(), "3s");

    let red = HandTile::from_symbol("0m").unwrap();
    assert_eq!(red.tile, Tile(TM, 5));
    assert_eq!(red.dora, 1);
    assert_eq!(red, HandTile::new(Tile(TM, 5)));
    assert!(!red.is_same_strict(&HandTile::new(Tile(TM, 5))));

    assert!(Tile::from_symbol("8z").is_err());
    assert!(Tile::from_symbol("0z").is_err());
    assert!(Tile::from_symbol("1x").is_err());
    assert!(Tile::from_symbol("p1").is_err());
}

#[test]
fn test_dora_successor() {
    assert_eq!(Tile(TM, 9).dora_successor(), Tile(TM, 1));
    assert_eq!(Tile(TZ, WN).dora_successor(), Tile(TZ, WE));
    assert_eq!(Tile(TZ, DR).dora_successor(), Tile(TZ, DW));
    assert_eq!(Tile(TZ, WS).dora_successor(), Tile(TZ, WW));
}

#[test]
fn test_hand_tile_json() {
    let v: Vec<HandTile> = serde_json::from_str(r#"["0p", {"tile": "3s", "dora": 2}]"#).unwrap();
    assert_eq!(v[0].tile, Tile(TP, 5));
    assert_eq!(v[0].dora, 1);
    assert_eq!(v[1].dora, 2);
    assert!(serde_json::from_str::<Tile>(r#""9q""#).is_err());
}
