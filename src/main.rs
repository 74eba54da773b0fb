// Window and input handling follow the pixels conway example
//https://github.com/parasyte/pixels/tree/c2454b01abc11c007d4b9de8525195af942fef0d/examples/conway

#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::io;

mod automata;
mod auxiliary;
mod clock;
mod config;
mod render;
mod simulator;
mod viewer;

use config::{rule_number, Config, LifeRule, PRESETS};
use viewer::ViewerError;

fn read_line() -> Option<String> {
    let mut text = String::new();
    match io::stdin().read_line(&mut text) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(text.trim().to_string()),
    }
}

/// Turns a menu answer into a starting configuration.
fn select_config(input: &str) -> Option<Config> {
    match input {
        "b" => {
            println!("Birth/survival rules count live cells among the eight neighbors.");
            loop {
                println!("Please specify a rule such as B3/S23");
                let text = read_line()?;
                match text.parse::<LifeRule>() {
                    Ok(rule) => {
                        let preset = config::PartialConfig {
                            mode: config::Mode::TwoD,
                            rule: None,
                            life: Some(rule),
                        };
                        return Some(Config::default().merge(&preset));
                    }
                    Err(e) => println!("\nERROR: {}", e),
                }
            }
        }
        "w" => {
            println!(
                "Elementary automata look at a cell and its two neighbors to decide the next row."
            );
            loop {
                println!("Please specify rule code less than 256");
                let text = read_line()?;
                let parsed = text
                    .parse::<u32>()
                    .map_err(|e| e.to_string())
                    .and_then(|n| rule_number(n).map_err(|e| e.to_string()));
                match parsed {
                    Ok(rule) => {
                        let preset = config::PartialConfig::elementary(rule);
                        return Some(Config::default().merge(&preset));
                    }
                    Err(e) => println!("\nERROR: {}", e),
                }
            }
        }
        _ => {
            // Either a menu number or a preset key such as "rule90".
            let preset = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| PRESETS.get(i))
                .or_else(|| config::find_preset(input))?;
            println!("\n{}: {}", preset.name, preset.description);
            Some(Config::default().merge(&preset.config))
        }
    }
}

fn main() -> Result<(), ViewerError> {
    env_logger::init();
    println!("\nWelcome to pixel automata!\nPress 'q' to quit this screen.");
    loop {
        println!("\n\nWhat would you like to see?\n");
        for (i, preset) in PRESETS.iter().enumerate() {
            println!("{}) {}", i + 1, preset.name);
        }
        println!("b) Custom birth/survival rule\nw) Custom elementary rule");

        let v = match read_line() {
            Some(v) => v,
            None => break,
        };
        if v == "q" || v == "quit" {
            break;
        }

        let config = match select_config(&v) {
            Some(config) => config,
            None => {
                println!("\nERROR: Must pick a listed option or a valid command.");
                continue;
            }
        };
        if let Err(e) = config.validate() {
            println!("\nERROR: {}", e);
            continue;
        }
        println!(
            "\n\nControls for animation:\nP: pause\nSPACE: frame by frame\nR: randomize screen\nC: clear screen\n\
             M: color mode\nUP/DOWN: speed\nLEFT/RIGHT: hue\nT/G: longer/shorter trails\n[ ]: cell size\n\
             TAB: switch 1D/2D\n1-0: presets\nMOUSE: toggle and paint cells\nESC: close screen"
        );
        match viewer::run(config) {
            Ok(_) => continue,
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
