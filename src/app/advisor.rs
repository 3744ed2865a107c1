use std::fs;

use log::{error, info};

use super::parse_state_expression;
use crate::advisor::*;
use crate::hand::evaluate_hand;
use crate::model::*;
use crate::util::common::combination_from_string;
use crate::util::misc::*;

// 局面の読み込みと方針決定 (A, K共通)
#[derive(Debug, Default)]
struct Options {
    exp: String,        // 局面の表記
    state_path: String, // 局面のJSONファイル
    danger_path: String,
    params: Params,
    fold: bool,
}

impl Options {
    // 共通でないオプションはfalseを返却
    fn parse_common(&mut self, opt: &str, it: &mut std::slice::Iter<'_, String>) -> Res<bool> {
        match opt {
            "-f" => self.state_path = next_value(it, opt)?,
            "-d" => self.danger_path = next_value(it, opt)?,
            "-p" => {
                let exp: String = next_value(it, opt)?;
                self.params.apply_expr(&exp)?;
            }
            "-q" => {
                let path: String = next_value(it, opt)?;
                self.params = Params::from_json(&fs::read_to_string(path)?)?;
            }
            "--fold" => self.fold = true,
            _ => {
                if opt.starts_with('-') {
                    return Ok(false);
                }
                if !self.exp.is_empty() {
                    Err("multiple expression is not allowed")?;
                }
                self.exp = opt.to_string();
            }
        }
        Ok(true)
    }

    fn load_state(&self) -> Res<TurnState> {
        match (self.exp.is_empty(), self.state_path.is_empty()) {
            (false, true) => parse_state_expression(&self.exp),
            (true, false) => Ok(TurnState::from_json(&fs::read_to_string(&self.state_path)?)?),
            _ => Err("either EXPRESSION or -f FILE is required".into()),
        }
    }

    fn load_danger(&self) -> Res<DangerTable> {
        if self.danger_path.is_empty() {
            return Ok(DangerTable::default());
        }
        Ok(DangerTable::from_json(&fs::read_to_string(&self.danger_path)?)?)
    }

    fn strategy(&self, state: &TurnState) -> StrategyState {
        let st = StrategyState::default();
        let st = if self.fold { st.fold() } else { st };
        st.update(state.hand(), state.own_melds(), state.is_closed(), &self.params)
    }
}

// [App]
// 打牌推奨モード
#[derive(Debug)]
pub struct AdvisorApp {
    args: Vec<String>,
}

impl AdvisorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) -> bool {
        match self.run_inner() {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                print_usage();
                false
            }
        }
    }

    fn run_inner(&self) -> Res {
        let mut opts = Options::default();
        let mut review = None;
        let mut value_order = false;
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            if opts.parse_common(s, &mut it)? {
                continue;
            }
            match s.as_str() {
                "-r" => {
                    let sym: String = next_value(&mut it, s)?;
                    review = Some(HandTile::from_symbol(&sym)?);
                }
                "--value-order" => value_order = true,
                opt => Err(format!("unknown option: {}", opt))?,
            }
        }

        let state = opts.load_state()?;
        let danger = opts.load_danger()?;
        let st = opts.strategy(&state);
        let policy: Box<dyn OrderingPolicy> = if value_order {
            Box::new(ValueOrder)
        } else {
            Box::new(SafeFirst)
        };

        let rec = recommend_discard(&state, st.strategy, &opts.params, &danger, policy.as_ref());
        println!("{}", serde_json::to_string_pretty(&rec)?);

        if let Some(t) = review {
            let cmp = compare_discard(&rec.priorities, &t);
            info!("{} -> {:?}", t, cmp.quality);
            println!("{}", serde_json::to_string_pretty(&cmp)?);
        }
        Ok(())
    }
}

// [App]
// 鳴き判断モード
#[derive(Debug)]
pub struct CallApp {
    args: Vec<String>,
}

impl CallApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) -> bool {
        match self.run_inner() {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                print_usage();
                false
            }
        }
    }

    fn run_inner(&self) -> Res {
        let mut opts = Options::default();
        let mut combs = vec![];
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            if opts.parse_common(s, &mut it)? {
                continue;
            }
            match s.as_str() {
                "-c" => {
                    let exp: String = next_value(&mut it, s)?;
                    combs.push(combination_from_string(&exp)?);
                }
                opt => Err(format!("unknown option: {}", opt))?,
            }
        }

        let state = opts.load_state()?;
        let st = opts.strategy(&state);
        let hv = evaluate_hand(&state, state.hand(), st.strategy);
        let ev = evaluate_call(&state, &combs, &hv, st.allows_calls, &opts.params);
        println!("{}", serde_json::to_string_pretty(&ev)?);
        Ok(())
    }
}

fn print_usage() {
    eprintln!(
        r"Usage
    $ cargo run A EXPRESSION [OPTIONS] [-r TILE] [--value-order]
    $ cargo run A -f STATE_FILE [OPTIONS] [-r TILE] [--value-order]
    $ cargo run K EXPRESSION [OPTIONS] -c COMBINATION [-c COMBINATION...]
Options
    -f: read a turn state from a json file instead of an expression
    -d: danger table json ({{danger: {{TILE: DANGER}}, fold_danger: DANGER}})
    -p: override parameters (e.g. w_eff=20,w_safety=0.01)
    -q: read parameters from a json file
    -r: compare the recommendation with the given discard
    -c: tiles from the hand to call with (e.g. 4m|6m)
    --fold: evaluate as folding
    --value-order: order discards by value only (no fold partitioning)
Expression
    HAND[,MELD...][/WINDS[,DORA_INDICATORS]]
    e.g. 1239p22456m44468s/ES,1m
"
    );
}
