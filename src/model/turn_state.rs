use std::convert::TryFrom;

use super::*;

// 外部から読み込む局面情報 (ドラ枚数は赤ドラのみ)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnStateData {
    pub hand: Vec<HandTile>,             // 自家の手牌 (鳴き以外)
    pub doras: Vec<Tile>,                // ドラ表示牌
    pub discards: [Vec<HandTile>; SEAT], // 各プレイヤーの捨て牌 (0: 自家)
    pub melds: [Vec<Meld>; SEAT],        // 各プレイヤーの副露 (0: 自家)
    pub prevalent_wind: Tnum,            // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub seat_wind: Tnum,                 // 自風 (同上)
    pub wall_count: usize,               // 牌山の残り枚数
    pub riichi: [bool; SEAT],            // 各プレイヤーのリーチ宣言
}

impl Default for TurnStateData {
    fn default() -> Self {
        Self {
            hand: vec![],
            doras: vec![],
            discards: Default::default(),
            melds: Default::default(),
            prevalent_wind: WE,
            seat_wind: WE,
            wall_count: 70,
            riichi: [false; SEAT],
        }
    }
}

// 1局面のスナップショット
// 構築時にドラ表示牌から各牌のドラ枚数を付与する (以降は変更しない)
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TurnStateData")]
pub struct TurnState {
    hand: Vec<HandTile>,
    doras: Vec<Tile>,
    discards: [Vec<HandTile>; SEAT],
    melds: [Vec<Meld>; SEAT],
    prevalent_wind: Tnum,
    seat_wind: Tnum,
    wall_count: usize,
    riichi: [bool; SEAT],
}

impl TurnState {
    pub fn new(data: TurnStateData) -> AdvisorResult<Self> {
        validate(&data)?;

        let dt = dora_table(&data.doras);
        let mark = |t: &HandTile| HandTile {
            tile: t.tile,
            dora: t.dora + dt[t.tile.0][t.tile.1],
        };
        let hand = data.hand.iter().map(mark).collect();
        let mut melds: [Vec<Meld>; SEAT] = Default::default();
        for s in 0..SEAT {
            melds[s] = data.melds[s]
                .iter()
                .map(|m| Meld {
                    meld_type: m.meld_type,
                    tiles: m.tiles.iter().map(mark).collect(),
                })
                .collect();
        }

        Ok(Self {
            hand,
            doras: data.doras,
            discards: data.discards,
            melds,
            prevalent_wind: data.prevalent_wind,
            seat_wind: data.seat_wind,
            wall_count: data.wall_count,
            riichi: data.riichi,
        })
    }

    // 手牌のみ (その他は初期値)
    pub fn from_hand(hand: Vec<HandTile>) -> AdvisorResult<Self> {
        Self::new(TurnStateData {
            hand,
            ..Default::default()
        })
    }

    pub fn from_json(s: &str) -> AdvisorResult<Self> {
        let data: TurnStateData = serde_json::from_str(s)?;
        Self::new(data)
    }

    #[inline]
    pub fn hand(&self) -> &[HandTile] {
        &self.hand
    }

    #[inline]
    pub fn doras(&self) -> &[Tile] {
        &self.doras
    }

    #[inline]
    pub fn discards(&self) -> &[Vec<HandTile>; SEAT] {
        &self.discards
    }

    #[inline]
    pub fn melds(&self) -> &[Vec<Meld>; SEAT] {
        &self.melds
    }

    #[inline]
    pub fn own_melds(&self) -> &[Meld] {
        &self.melds[0]
    }

    #[inline]
    pub fn prevalent_wind(&self) -> Tnum {
        self.prevalent_wind
    }

    #[inline]
    pub fn seat_wind(&self) -> Tnum {
        self.seat_wind
    }

    #[inline]
    pub fn wall_count(&self) -> usize {
        self.wall_count
    }

    #[inline]
    pub fn riichi(&self) -> &[bool; SEAT] {
        &self.riichi
    }

    // 門前 (暗槓のみは門前扱い)
    pub fn is_closed(&self) -> bool {
        self.melds[0].iter().all(|m| !m.is_open())
    }

    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }

    // ドラ表示牌による牌の種類ごとのドラ枚数 (赤ドラは含まない)
    pub fn indicated_dora(&self, t: Tile) -> usize {
        self.doras.iter().filter(|d| d.dora_successor() == t).count()
    }
}

impl TryFrom<TurnStateData> for TurnState {
    type Error = Error;

    fn try_from(data: TurnStateData) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

fn dora_table(doras: &[Tile]) -> TileTable {
    let mut dt = TileTable::default();
    for d in doras {
        let t = d.dora_successor();
        dt[t.0][t.1] += 1;
    }
    dt
}

fn validate(data: &TurnStateData) -> AdvisorResult<()> {
    if data.hand.len() > HAND_MAX {
        return Err(Error::state(format!(
            "hand has {} tiles (max {})",
            data.hand.len(),
            HAND_MAX
        )));
    }
    // 副露は槓子も3枚として数える
    let n_tiles = data.hand.len() + 3 * data.melds[0].len();
    if n_tiles > HAND_MAX {
        return Err(Error::state(format!(
            "hand and melds have {} tiles (max {})",
            n_tiles, HAND_MAX
        )));
    }
    for w in [data.prevalent_wind, data.seat_wind] {
        if !(WE..=WN).contains(&w) {
            return Err(Error::state(format!("invalid wind index: {}", w)));
        }
    }

    let mut tt = TileTable::default();
    let tiles = data
        .hand
        .iter()
        .chain(data.discards.iter().flatten())
        .chain(data.melds.iter().flatten().flat_map(|m| m.tiles.iter()))
        .map(|t| t.tile)
        .chain(data.doras.iter().copied());
    for t in tiles {
        tt[t.0][t.1] += 1;
        if tt[t.0][t.1] > TILE {
            return Err(Error::state(format!("more than {} copies of {}", TILE, t)));
        }
    }

    Ok(())
}

#[test]
fn test_turn_state_dora() {
    let data = TurnStateData {
        hand: vec![
            HandTile::from_symbol("2m").unwrap(),
            HandTile::from_symbol("0p").unwrap(),
            HandTile::from_symbol("1z").unwrap(),
        ],
        doras: vec![Tile(TM, 1), Tile(TP, 4), Tile(TZ, WN)],
        ..Default::default()
    };
    let state = TurnState::new(data).unwrap();
    let doras: Vec<usize> = state.hand().iter().map(|t| t.dora).collect();
    assert_eq!(doras, vec![1, 2, 1]);
    assert!(state.is_closed());
    assert!(state.is_dealer());
}

#[test]
fn test_turn_state_json() {
    let json = r#"{
        "hand": ["1m", "1m", "0s"],
        "doras": ["4s"],
        "melds": [[{"meld_type": "Pon", "tiles": ["7z", "7z", "7z"]}], [], [], []],
        "seat_wind": 2
    }"#;
    let state = TurnState::from_json(json).unwrap();
    assert_eq!(state.hand()[2].dora, 2);
    assert!(!state.is_closed());
    assert!(!state.is_dealer());
    assert_eq!(state.prevalent_wind(), WE);

    let json = r#"{"hand": ["1m", "1m", "1m", "1m"], "doras": ["1m"]}"#;
    assert!(matches!(TurnState::from_json(json), Err(Error::State { .. })));
}

#[test]
fn test_turn_state_tile_count() {
    use crate::util::common::{meld_from_string, tiles_from_string};
    let data = TurnStateData {
        hand: tiles_from_string("123m456p789s111z").unwrap(),
        melds: [vec![meld_from_string("777z").unwrap()], vec![], vec![], vec![]],
        ..Default::default()
    };
    assert!(TurnState::new(data).is_err());

    let data = TurnStateData {
        hand: tiles_from_string("123m456p78s11z").unwrap(),
        melds: [vec![meld_from_string("7777z!").unwrap()], vec![], vec![], vec![]],
        doras: vec![Tile(TZ, DG)],
        ..Default::default()
    };
    let state = TurnState::new(data).unwrap();
    assert_eq!(state.indicated_dora(Tile(TZ, DR)), 1);
    assert_eq!(state.indicated_dora(Tile(TZ, DG)), 0);
}
