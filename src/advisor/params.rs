use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::util::variant::*;

// 評価パラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub w_eff: f64,                    // 牌効率の重み
    pub w_score: f64,                  // リーチ時の打点の重み
    pub w_safety: f64,                 // 危険度の重み
    pub chiitoitsu_pairs: usize,       // 七対子に移行する対子数 (面子が2つ未満の場合)
    pub thirteen_orphans_kinds: usize, // 国士無双に移行する么九牌の種類
    pub call_tiles_left: usize,        // 方針が鳴きを許可しない場合でも鳴きを検討する牌山の残り枚数
    pub call_max_shanten: i32,         // 同上のシャンテン数
    pub safe_danger: f64,              // 安全牌とみなす危険度
    pub high_danger: f64,              // 危険牌とみなす危険度
}

impl Default for Params {
    fn default() -> Self {
        Self {
            w_eff: 40.0,
            w_score: 0.00015,
            w_safety: 0.002,
            chiitoitsu_pairs: 5,
            thirteen_orphans_kinds: 10,
            call_tiles_left: 4,
            call_max_shanten: 1,
            safe_danger: 500.0,
            high_danger: 2000.0,
        }
    }
}

impl Params {
    pub fn from_json(s: &str) -> AdvisorResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn to_args(&self) -> Vec<Arg> {
        vec![
            Arg::float("w_eff", self.w_eff),
            Arg::float("w_score", self.w_score),
            Arg::float("w_safety", self.w_safety),
            Arg::int("chiitoitsu_pairs", self.chiitoitsu_pairs as i64),
            Arg::int("thirteen_orphans_kinds", self.thirteen_orphans_kinds as i64),
            Arg::int("call_tiles_left", self.call_tiles_left as i64),
            Arg::int("call_max_shanten", self.call_max_shanten as i64),
            Arg::float("safe_danger", self.safe_danger),
            Arg::float("high_danger", self.high_danger),
        ]
    }

    // "w_eff=20,w_safety=0.01" 形式で上書き
    pub fn apply_expr(&mut self, exp: &str) -> AdvisorResult<()> {
        let mut args = self.to_args();
        apply_args(&mut args, exp).map_err(Error::config)?;

        let mut p = self.clone();
        for a in &args {
            let v = &a.value;
            let bad = || Error::config(format!("invalid value: {}", a));
            let as_count = || v.as_int().filter(|&n| n >= 0).map(|n| n as usize).ok_or_else(bad);
            match a.name.as_str() {
                "w_eff" => p.w_eff = v.as_float().ok_or_else(bad)?,
                "w_score" => p.w_score = v.as_float().ok_or_else(bad)?,
                "w_safety" => p.w_safety = v.as_float().ok_or_else(bad)?,
                "chiitoitsu_pairs" => p.chiitoitsu_pairs = as_count()?,
                "thirteen_orphans_kinds" => p.thirteen_orphans_kinds = as_count()?,
                "call_tiles_left" => p.call_tiles_left = as_count()?,
                "call_max_shanten" => p.call_max_shanten = v.as_int().ok_or_else(bad)? as i32,
                "safe_danger" => p.safe_danger = v.as_float().ok_or_else(bad)?,
                "high_danger" => p.high_danger = v.as_float().ok_or_else(bad)?,
                _ => return Err(bad()),
            }
        }
        *self = p;
        Ok(())
    }
}

#[test]
fn test_params_expr() {
    let mut p = Params::default();
    p.apply_expr("w_eff=20, chiitoitsu_pairs=4").unwrap();
    assert_eq!(p.w_eff, 20.0);
    assert_eq!(p.chiitoitsu_pairs, 4);
    assert_eq!(p.w_score, Params::default().w_score);

    assert!(matches!(p.apply_expr("w_eff=x"), Err(Error::Config { .. })));
    assert!(matches!(p.apply_expr("unknown=1"), Err(Error::Config { .. })));
    assert!(matches!(p.apply_expr("call_tiles_left=-1"), Err(Error::Config { .. })));
    // 失敗時は変更しない
    assert_eq!(p.w_eff, 20.0);
}

#[test]
fn test_params_json() {
    let p = Params::from_json(r#"{"w_safety": 0.01}"#).unwrap();
    assert_eq!(p.w_safety, 0.01);
    assert_eq!(p.w_eff, 40.0);
    assert!(Params::from_json("{").is_err());
}
