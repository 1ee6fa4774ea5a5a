use std::time::Instant;

use clap::Parser;

use rbd_rs::config::EvalConfig;
use rbd_rs::probability::ProbabilityMap;
use rbd_rs::types::{MinCutSets, NodePair, PathSets};
use rbd_rs::{mcs, pathset, sdp};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of nodes in the ring. Cut-set evaluation is exponential in
    /// `(n / 2)^2`, so keep this small.
    #[arg(value_name = "INT", default_value = "8")]
    n: i32,

    /// Availability of every link.
    #[clap(long, value_name = "FLOAT", default_value = "0.95")]
    avail: f64,

    /// Number of worker threads (default: number of CPUs).
    #[clap(long, value_name = "INT")]
    threads: Option<usize>,

    /// Enable debug logging.
    #[clap(long)]
    debug: bool,
}

/// Ring of `n` nodes where link `i` joins node `i` and node `i + 1`.
///
/// Node 0 reaches node `k` clockwise over links `0..k` and counter-clockwise
/// over links `k..n`. Every minimal cut takes one link from each side.
fn ring(n: i32) -> (Vec<NodePair>, Vec<PathSets>, Vec<MinCutSets>) {
    let mut pairs = Vec::new();
    let mut paths = Vec::new();
    let mut cuts = Vec::new();
    for k in 1..n {
        let cw: Vec<i32> = (0..k).collect();
        let ccw: Vec<i32> = (k..n).collect();
        let mut pair_cuts = Vec::new();
        for &a in &cw {
            for &b in &ccw {
                pair_cuts.push(vec![a, b]);
            }
        }
        pairs.push((0, k));
        paths.push(vec![cw, ccw]);
        cuts.push(pair_cuts);
    }
    (pairs, paths, cuts)
}

fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let time = Instant::now();
    let res = f();
    println!("{:<24} {:.3} ms", name, time.elapsed().as_secs_f64() * 1000.0);
    res
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.debug {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = Instant::now();
    println!("args = {:?}", args);

    let n = args.n.max(2);
    let probs = ProbabilityMap::new((0..n).map(|c| (c, args.avail)))?;
    let (pairs, paths, cuts) = ring(n);
    println!("Ring of {} nodes, {} node pairs", n, pairs.len());

    let first = sdp::to_sdp_set(pairs[0].0, pairs[0].1, &paths[0]);
    println!("SDP terms for {:?}: {}", pairs[0], first);

    let config = match args.threads {
        Some(t) => EvalConfig::default().with_num_threads(t),
        None => EvalConfig::default(),
    };
    println!("config = {:?}", config);

    let by_paths = timed("pathset (serial)", || pathset::eval_avail_topo(&pairs, &probs, &paths))?;
    let by_cuts = timed("mcs (serial)", || mcs::eval_avail_topo(&pairs, &probs, &cuts))?;
    let by_sdp = timed("sdp (serial)", || sdp::eval_avail_topo(&pairs, &probs, &paths))?;
    let by_sdp_par = config.install(|| {
        timed("sdp (parallel)", || sdp::eval_avail_topo_parallel(&pairs, &probs, &paths))
    })??;
    let by_cuts_par = config.install(|| {
        timed("mcs (parallel)", || mcs::eval_avail_topo_parallel(&pairs, &probs, &cuts))
    })??;

    println!();
    println!("{:>10} {:>12} {:>12} {:>12}", "pair", "pathset", "mcs", "sdp");
    for (i, pair) in pairs.iter().enumerate() {
        println!(
            "{:>10} {:>12.9} {:>12.9} {:>12.9}",
            format!("{:?}", pair),
            by_paths[i],
            by_cuts[i],
            by_sdp[i]
        );
    }

    let worst = (0..pairs.len())
        .map(|i| {
            [by_cuts[i], by_sdp[i], by_sdp_par[i], by_cuts_par[i]]
                .iter()
                .map(|x| (x - by_paths[i]).abs())
                .fold(0.0, f64::max)
        })
        .fold(0.0, f64::max);
    println!("Largest disagreement between methods: {:e}", worst);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
