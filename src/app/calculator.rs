use std::fs::File;
use std::io::{self, BufRead};

use log::error;

use super::parse_state_expression;
use crate::hand::*;
use crate::model::*;
use crate::util::common::tiles_to_tile_table;
use crate::util::misc::*;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
        }
    }

    pub fn run(&mut self) -> bool {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-f" => match next_value(&mut it, s) {
                    Ok(v) => file_path = v,
                    Err(e) => {
                        error!("{}", e);
                        return false;
                    }
                },
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return false;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return false;
                    }
                    exp = s.clone();
                }
            }
        }

        if file_path.is_empty() == exp.is_empty() {
            print_usage();
            return false;
        }

        let res = if !exp.is_empty() {
            self.process_expression(&exp).map(|v| v != Verify::Error)
        } else {
            self.run_from_file(&file_path)
        };
        match res {
            Ok(ok) => ok,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    // 検証に失敗した式があればfalse
    fn run_from_file(&self, file_path: &str) -> Res<bool> {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        let mut ok = true;
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else {
                match self.process_expression(&exp) {
                    Ok(Verify::Error) => ok = false,
                    Ok(_) => {}
                    Err(e) => {
                        error!("{}", e);
                        ok = false;
                    }
                }
            }
            println!();
        }
        Ok(ok)
    }

    fn process_expression(&self, exp: &str) -> Res<Verify> {
        let mut calculator = Calculator::new(self.detail);
        calculator.parse(exp)?;
        Ok(calculator.run())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    state: Option<TurnState>,
    // verify
    verify: Option<(Shanten, usize)>, // (シャンテン数, 翻数)
}

impl Calculator {
    fn new(detail: bool) -> Self {
        Self {
            detail,
            state: None,
            verify: None,
        }
    }

    // "手牌[,副露...]/<場風><自風>[,ドラ表示牌]/<シャンテン数>,<翻数>"
    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').next().unwrap_or(""); // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 3 {
            Err(format!("too many blocks: {}", input))?;
        }
        self.state = Some(parse_state_expression(&exps[..len.min(2)].join("/"))?);
        if len > 2 {
            self.parse_verify(exps[2])?;
        }

        if self.detail {
            println!("{:?}", self);
        }

        Ok(())
    }

    fn parse_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 2 {
            Err(format!("invalid verify info: {}", input))?;
        }
        let shanten = exps[0].parse::<Shanten>()?;
        let han = exps[1].parse::<usize>()?;
        self.verify = Some((shanten, han));
        Ok(())
    }

    fn run(&self) -> Verify {
        let state = match &self.state {
            Some(s) => s,
            None => return Verify::Skip,
        };

        let strategy = best_strategy(state);
        let hv = evaluate_hand(state, state.hand(), strategy);
        if self.detail {
            println!("{:?}", hv);
        }

        let han = hv.yaku.get(!state.is_closed());
        println!("strategy: {}, shanten: {}", strategy, hv.shanten);
        if !hv.waits.is_empty() {
            let waits: Vec<String> = hv.waits.iter().map(|t| t.to_string()).collect();
            println!("waits: {} ({} left)", waits.join(" "), hv.wait_count);
        }
        if hv.shanten <= 0 {
            println!("yakus: {}", hv.yaku_names.join(", "));
            println!(
                "fu: {}, han: {}, dora: {}, score: {}, riichi: {} {}",
                hv.fu,
                han,
                hv.dora,
                hv.score,
                hv.riichi_score,
                get_score_title(hv.fu, han + hv.dora, hv.yakuman),
            );
        }

        match self.verify {
            Some((shanten, h)) => {
                if hv.shanten == shanten && han == h {
                    println!("verify: OK");
                    Verify::Ok
                } else {
                    error!(
                        "verify: expected (shanten: {}, han: {}), got (shanten: {}, han: {})",
                        shanten, h, hv.shanten, han
                    );
                    Verify::Error
                }
            }
            None => Verify::Skip,
        }
    }
}

// シャンテン数が最も小さくなる評価方針 (同じ場合は通常形を優先)
fn best_strategy(state: &TurnState) -> Strategy {
    let tt = tiles_to_tile_table(state.hand());
    let melds = state.own_melds();
    let mut best = (calc_shanten_by_strategy(&tt, melds, Strategy::General), Strategy::General);
    if melds.is_empty() {
        for s in [Strategy::Chiitoitsu, Strategy::ThirteenOrphans] {
            let sh = calc_shanten_by_strategy(&tt, melds, s);
            if sh < best.0 {
                best = (sh, s);
            }
        }
    }
    best.1
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d]
    $ cargo run C -f FILE [-d]
Options
    -d: print debug info
    -f: read expresisons from file instead of a commandline expression
Expression
    HAND[,MELD...][/WINDS[,DORA_INDICATORS]][/SHANTEN,HAN]
    e.g. 234m555m678p345s66s/ES,1m/-1,1
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/eval_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false);
            calculator.parse(&e).unwrap();
            assert_ne!(Verify::Error, calculator.run(), "{}", exp);
        }
    }
}

#[test]
fn test_best_strategy() {
    let st = parse_state_expression("1133m5577p2299s1z").unwrap();
    assert_eq!(best_strategy(&st), Strategy::Chiitoitsu);
    let st = parse_state_expression("19m19p19s1234566z").unwrap();
    assert_eq!(best_strategy(&st), Strategy::ThirteenOrphans);
    let st = parse_state_expression("1239p22456m4446s").unwrap();
    assert_eq!(best_strategy(&st), Strategy::General);
}
