use clap::Parser;
use ring_election_poc::election::core::Identity;
use ring_election_poc::{Algorithm, Simulation, SimulationConfig};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Step-by-step simulator for leader election algorithms on a ring
#[derive(Debug, Parser)]
#[command(name = "ring-election", version, about)]
struct Args {
    /// Election algorithm: le-lann, chang-roberts or franklin
    #[arg(long, default_value = "chang-roberts")]
    algorithm: Algorithm,

    /// Number of nodes on the ring (3-8)
    #[arg(long, default_value_t = 6)]
    nodes: usize,

    /// Comma-separated node identities in ring order
    #[arg(long, value_delimiter = ',')]
    identities: Vec<Identity>,

    /// Generate random distinct identities instead of the defaults
    #[arg(long)]
    random: bool,

    /// Advance one step per Enter key press instead of running to completion
    #[arg(long)]
    interactive: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber with environment-based filtering
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ring_election_poc=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = SimulationConfig {
        algorithm: args.algorithm,
        ring_size: args.nodes,
        ..SimulationConfig::default()
    };
    if !args.identities.is_empty() {
        config.identities = args.identities.clone();
    }
    if args.random {
        config.randomize(&mut rand::thread_rng());
    }

    let mut simulation = Simulation::new(&config)?;
    info!(
        algorithm = %config.algorithm,
        nodes = config.ring_size,
        "🔔 starting election run"
    );

    println!("\n=== Ring Election Simulator ===");
    println!("Algorithm: {}", config.algorithm);
    println!(
        "Ring:      {}",
        config.identities[..config.ring_size]
            .iter()
            .enumerate()
            .map(|(i, id)| format!("S{i}={id}"))
            .collect::<Vec<_>>()
            .join("  ")
    );
    println!("===============================\n");

    let mut printed = 0;
    printed = print_new_entries(&simulation, printed);

    if args.interactive {
        run_interactive(&mut simulation, printed)?;
    } else {
        run_to_completion(&mut simulation, printed);
    }

    Ok(())
}

/// Prints journal entries appended since the last call, returning the new cursor
fn print_new_entries(simulation: &Simulation, printed: usize) -> usize {
    for entry in &simulation.log()[printed..] {
        println!("{entry}");
    }
    simulation.log().len()
}

/// Prints the winner summary once the run is over
fn print_summary(simulation: &Simulation) {
    if let Some(winner) = simulation.elected() {
        let view = &simulation.nodes()[winner];
        println!(
            "\n👑 Node {} (id={}) elected after {} steps and {} messages",
            winner,
            view.identity,
            simulation.step(),
            simulation.messages_sent()
        );
    }
}

/// Advances until a node is elected, printing the journal as it grows
fn run_to_completion(simulation: &mut Simulation, mut printed: usize) {
    // Every algorithm terminates well within this bound on a valid ring
    let step_limit = (simulation.ring_size() as u64 + 1) * 2;
    while !simulation.is_finished() && simulation.step() < step_limit {
        simulation.advance();
        printed = print_new_entries(simulation, printed);
    }
    if !simulation.is_finished() {
        warn!(
            steps = simulation.step(),
            "run did not converge within the step limit"
        );
        return;
    }
    print_summary(simulation);
}

/// Interactive console: Enter advances one step, like clicking the UI button
fn run_interactive(
    simulation: &mut Simulation,
    mut printed: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Commands:");
    println!("  <Enter> or step  - Advance one step");
    println!("  status           - Show simulation status");
    println!("  help             - Show this help message");
    println!("  quit             - Exit\n");

    let stdin = io::stdin();
    loop {
        print!("election> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: finish the run so piped input still produces a result
            run_to_completion(simulation, printed);
            return Ok(());
        }

        match line.trim() {
            "" | "step" => {
                if simulation.is_finished() {
                    println!("Election is over; nothing left to do.");
                    continue;
                }
                simulation.advance();
                printed = print_new_entries(simulation, printed);
                if simulation.is_finished() {
                    print_summary(simulation);
                }
            }
            "status" => {
                println!("{simulation}");
                for view in simulation.nodes() {
                    println!(
                        "  S{} id={} {:?} belief={:?}",
                        view.position, view.identity, view.state, view.leader_belief
                    );
                }
            }
            "help" => {
                println!("Commands: step (or Enter), status, help, quit");
            }
            "quit" | "exit" => {
                warn!("🔚 exiting");
                return Ok(());
            }
            other => {
                println!("Unknown command: '{other}'. Type 'help' for available commands.");
            }
        }
    }
}
