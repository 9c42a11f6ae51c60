use std::thread;
use std::time::Duration;

use woodpusher::{Board, Color, GameState};

use clap::arg;
use clap::command;
use clap::Command;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

fn main() {
    let matches = command!()
        .propagate_version(true)
        .subcommand(Command::new("show").about("Print the starting position"))
        .subcommand(
            Command::new("selfplay")
                .about("Let the random mover play against itself")
                .arg(
                    arg!(
                    -g --games <N> "Number of games to play"
                            )
                    .default_value("1")
                    .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(
                    -s --seed <SEED> "Seed for the move picker"
                            )
                    .required(false)
                    .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(
                    -p --plies <P> "Stop a game after this many plies"
                            )
                    .default_value("300")
                    .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(
                    -d --delay <MS> "Pause between plies in milliseconds"
                            )
                    .default_value("0")
                    .value_parser(clap::value_parser!(u64)),
                )
                .arg(arg!(
                    -q --quiet "Do not print the board after every ply"
                )),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("show", _)) => {
            print!("{}", Board::standard().render_to_string());
        }
        Some(("selfplay", arg_matches)) => {
            let games = *arg_matches.get_one::<u32>("games").unwrap();
            let seed = arg_matches.get_one::<u64>("seed").copied();
            let max_plies = *arg_matches.get_one::<u32>("plies").unwrap();
            let delay_ms = *arg_matches.get_one::<u64>("delay").unwrap();
            let quiet = arg_matches.get_flag("quiet");
            selfplay(games, seed, max_plies, delay_ms, quiet);
        }
        None => {
            selfplay(1, None, 300, 0, false);
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

#[derive(Tabled)]
struct GameRow {
    game: u32,
    plies: u32,
    result: &'static str,
    winner: &'static str,
}

fn selfplay(games: u32, seed: Option<u64>, max_plies: u32, delay_ms: u64, quiet: bool) {
    let mut rng = match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::seed_from_u64(rand::thread_rng().gen()),
    };

    let verbose = !quiet && games == 1;
    let mut table_rows = Vec::new();

    for game in 1..=games {
        let (plies, state, side_to_move) = play_one(&mut rng, max_plies, delay_ms, verbose);

        let (result, winner) = match state {
            GameState::Checkmate => (
                "checkmate",
                match side_to_move.opposite() {
                    Color::White => "White",
                    Color::Black => "Black",
                },
            ),
            GameState::Stalemate => ("stalemate", "-"),
            GameState::Ongoing => ("unfinished", "-"),
        };
        table_rows.push(GameRow {
            game,
            plies,
            result,
            winner,
        });

        if games == 1 {
            match state {
                GameState::Checkmate => println!("checkmate after {} plies, {} wins", plies, winner),
                GameState::Stalemate => println!("stalemate after {} plies", plies),
                GameState::Ongoing => println!("no verdict after {} plies", plies),
            }
        }
    }

    if games > 1 {
        println!("{}", Table::new(table_rows).with(Style::modern()));
    }
}

/// Plays one random-vs-random game. Returns the ply count, the final state
/// and the side that was to move when the game ended.
fn play_one(
    rng: &mut Pcg64,
    max_plies: u32,
    delay_ms: u64,
    verbose: bool,
) -> (u32, GameState, Color) {
    let mut board = Board::standard();
    let mut plies = 0;

    loop {
        let state = board.game_state();
        if state != GameState::Ongoing || plies >= max_plies {
            return (plies, state, board.active_color);
        }

        let mover = board.active_color;
        let Some(mv) = board.random_move_for_color(mover, rng) else {
            return (plies, state, mover);
        };
        board.execute_move(mv, true);
        plies += 1;

        if verbose {
            println!("ply {}: {:?} plays {}", plies, mover, mv);
            print!("{}", board.render_to_string());
            if board.is_king_in_check(board.active_color) {
                println!("{:?} is in check", board.active_color);
            }
            println!();
        }
        if delay_ms > 0 {
            thread::sleep(Duration::from_millis(delay_ms));
        }
    }
}
