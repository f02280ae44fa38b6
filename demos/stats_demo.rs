use clap::Parser;
use probe_hash::HashMap;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "inserts", default_value_t = 1000)]
    inserts: u64,

    /// Remove/reinsert rounds run over the filled map.
    #[arg(short = 'r', long = "churn_rounds", default_value_t = 4)]
    churn_rounds: usize,

    /// Fraction of keys removed (and replaced by fresh keys) per round.
    #[arg(short = 'f', long = "churn_fraction", default_value_t = 0.25)]
    churn_fraction: f64,
}

fn main() {
    let args = Args::parse();

    let mut map: HashMap<u64, u64> = HashMap::new();
    println!("Starting capacity: {}", map.capacity());
    println!("Inserting {} keys...", args.inserts);

    let mut last_capacity = map.capacity();
    for key in 0..args.inserts {
        map.insert(key, key * 2);
        if map.capacity() != last_capacity {
            println!(
                "  rebuilt at {} entries: {} -> {} slots",
                map.len(),
                last_capacity,
                map.capacity()
            );
            last_capacity = map.capacity();
        }
    }

    map.probe_histogram().print();
    map.debug_stats().print();

    let per_round = ((args.inserts as f64) * args.churn_fraction) as u64;
    let mut next_key = args.inserts;
    let mut oldest = 0;
    for round in 0..args.churn_rounds {
        for key in oldest..oldest + per_round {
            map.remove(&key);
        }
        let tombstones = map.tombstones();

        for key in next_key..next_key + per_round {
            map.insert(key, key * 2);
        }
        oldest += per_round;
        next_key += per_round;

        println!(
            "Round {}: {} entries, {} slots, {} tombstones after removal, {} now",
            round + 1,
            map.len(),
            map.capacity(),
            tombstones,
            map.tombstones()
        );
    }

    map.probe_histogram().print();
    map.debug_stats().print();
}
