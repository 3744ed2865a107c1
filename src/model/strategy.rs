use super::*;

// 評価方針 (手牌の分解方法, シャンテン数の計算方法, 鳴きの可否を切り替える)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    #[default]
    General, // 通常形
    Chiitoitsu,      // 七対子
    ThirteenOrphans, // 国士無双
    Fold,            // ベタオリ
}

impl Strategy {
    // 門前限定の方針
    #[inline]
    pub fn is_closed_only(&self) -> bool {
        matches!(self, Strategy::Chiitoitsu | Strategy::ThirteenOrphans)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::General => "General",
            Strategy::Chiitoitsu => "Chiitoitsu",
            Strategy::ThirteenOrphans => "Thirteen_Orphans",
            Strategy::Fold => "Fold",
        };
        write!(f, "{}", s)
    }
}
