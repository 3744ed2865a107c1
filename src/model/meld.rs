use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Kakan,
    Ankan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<HandTile>,
}

impl Meld {
    // 暗槓以外は手牌を開く
    #[inline]
    pub fn is_open(&self) -> bool {
        self.meld_type != MeldType::Ankan
    }

    // 面子の先頭の牌 (チーの場合は最小の牌)
    pub fn first_tile(&self) -> Option<Tile> {
        self.tiles.iter().map(|t| t.tile).min()
    }

    pub fn dora(&self) -> usize {
        self.tiles.iter().map(|t| t.dora).sum()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.tile.to_string()).collect();
        write!(f, "{:?}({})", self.meld_type, s.join("|"))
    }
}
