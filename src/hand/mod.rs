// 手牌の構造解析, シャンテン数, 役や点数計算を行うモジュール
mod evaluate;
mod parse;
mod point;
mod shanten;
mod win;
mod yaku;

pub use self::{
    evaluate::{evaluate_hand, HandValue},
    parse::{
        decompose, decompose_after_discard, parse_into_chiitoitsu_win,
        parse_into_kokusimusou_win, parse_into_normal_win, parse_melds, Decomposition, Partial,
        PartialType, ParsedHand, SetPair, SetPairType,
    },
    point::{calc_points, calc_ron_score, get_score_title, Points},
    shanten::{
        calc_shanten, calc_shanten_by_strategy, calc_shanten_chiitoitsu,
        calc_shanten_kokushimusou, is_winning_hand, Shanten,
    },
    win::{
        calc_tiles_to_chiitoitsu_win, calc_tiles_to_kokushimusou_win, calc_tiles_to_normal_win,
        calc_winning_tiles, is_chiitoitsu_win, is_kokushimusou_win, is_normal_win,
    },
    yaku::{find_yaku, Han, Yaku, YakuContext},
};
