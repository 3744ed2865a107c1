#![warn(rust_2018_idioms)]

use log::error;

use mahjong_advisor::app;
use mahjong_advisor::util::log::init_logger;

fn main() {
    let mut args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "-v");
    args.retain(|a| a != "-v");
    init_logger(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    if args.len() < 2 {
        error!("mode not specified");
        std::process::exit(1);
    }

    let args2 = args[2..].to_vec();
    let ok = match args[1].as_str() {
        "C" => {
            // Calculator (手牌評価モード)
            app::CalculatorApp::new(args2).run()
        }
        "A" => {
            // Advisor (打牌推奨モード)
            app::AdvisorApp::new(args2).run()
        }
        "K" => {
            // Kall (鳴き判断モード)
            app::CallApp::new(args2).run()
        }
        m => {
            error!("unknown mode: {}", m);
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}
