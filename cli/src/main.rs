use clap::{ArgAction, Parser, Subcommand};
use cube_core::{Color, Face, FaceletCube, format_sequence};
use itertools::Itertools;
use log::LevelFilter;
use owo_colors::OwoColorize;
use session::Session;
use twophase::{Phase, Solution, TwoPhaseSolver};

/// Scrambles and solves 3x3 cubes
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The level of log detail to send to stderr. Can be set zero to three times.
    #[arg(short, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random scramble and print its notation and state
    Scramble {
        /// How many moves to scramble with
        #[arg(long, default_value_t = 25)]
        len: usize,
    },
    /// Validate a 54-character facelet string and solve it
    Solve {
        /// The cube state in URFDLB facelet order, e.g. "UUUUUUUUURRR..."
        facelets: String,
    },
    /// Scramble, solve, replay the solution and verify the cube ends solved
    Demo {
        /// How many moves to scramble with
        #[arg(long, default_value_t = 25)]
        len: usize,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Scramble { len } => {
            let mut sess = Session::new();
            let moves = sess.scramble(len).to_vec();
            println!("{}", format_sequence(&moves));
            println!("{}", sess.state());
            print_net(sess.state());
        }
        Commands::Solve { facelets } => {
            let cube: FaceletCube = facelets.parse()?;
            print_net(&cube);
            let solution = TwoPhaseSolver::new().solve(&cube)?;
            print_solution(&solution);
        }
        Commands::Demo { len } => {
            let mut sess = Session::new();
            let moves = sess.scramble(len).to_vec();
            println!("Scramble: {}", format_sequence(&moves));
            print_net(sess.state());

            let solution = sess.solve_in_background().wait()?;
            print_solution(&solution);

            for mv in solution.moves() {
                sess.apply_move(mv);
            }
            if sess.is_solved() {
                println!("{}", "Replay returned the cube to solved.".green());
            } else {
                return Err(color_eyre::eyre::eyre!(
                    "replaying the solution did not solve the cube"
                ));
            }
        }
    }

    Ok(())
}

fn print_solution(solution: &Solution) {
    if solution.is_empty() {
        println!("Already solved.");
        return;
    }

    for (phase, steps) in &solution.steps.iter().chunk_by(|step| step.phase) {
        let steps = steps.collect_vec();
        let notation = steps.iter().map(|step| step.mv).join(" ");
        let label = match phase {
            Phase::One => format!("{}", phase.label().cyan()),
            Phase::Two => format!("{}", phase.label().magenta()),
        };
        println!(
            "{label} ({} moves, {}): {notation}",
            steps.len(),
            phase.description(),
        );
    }

    let [phase1, phase2] = solution.phase_counts();
    println!(
        "{} moves total ({phase1} + {phase2}), difficulty {:?}",
        solution.move_count(),
        solution.difficulty(),
    );
}

fn colored_letter(color: Color) -> String {
    let letter = color.letter();
    match color {
        Color::White => format!("{}", letter.white()),
        Color::Red => format!("{}", letter.red()),
        Color::Green => format!("{}", letter.green()),
        Color::Yellow => format!("{}", letter.yellow()),
        Color::Orange => format!("{}", letter.truecolor(255, 140, 0)),
        Color::Blue => format!("{}", letter.blue()),
    }
}

/// Print the cube as an unfolded net, U on top, then L F R B, then D.
fn print_net(cube: &FaceletCube) {
    let row = |face: Face, r: usize| {
        (0..3)
            .map(|c| colored_letter(cube.sticker(face, r, c)))
            .join(" ")
    };

    for r in 0..3 {
        println!("        {}", row(Face::U, r));
    }
    for r in 0..3 {
        println!(
            "{}   {}   {}   {}",
            row(Face::L, r),
            row(Face::F, r),
            row(Face::R, r),
            row(Face::B, r),
        );
    }
    for r in 0..3 {
        println!("        {}", row(Face::D, r));
    }
}
