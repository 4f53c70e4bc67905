// Draw (x, σ²) pairs from a Normal-Inverse-Gamma, compare the Monte Carlo 95%
// interval of each component to the exact marginal interval, then update the
// prior on a handful of observations.
//
// Run with an optional YAML config:
//
//   cargo run --example nig_exercise --features serde1 -- config.yaml
//
// where the config looks like
//
//   prior:
//     m: 0.0
//     v: 0.054
//     a: 1.12
//     b: 0.4
//   n_samples: 1000000
//   coverage: 0.95
//   seed: 1337
//   data: [1.0, 2.0, 3.0, 4.0]
use nig::dist::NormalInvGamma;
use rand::SeedableRng;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExerciseConfig {
    prior: NormalInvGamma,
    n_samples: usize,
    coverage: f64,
    seed: u64,
    data: Vec<f64>,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        ExerciseConfig {
            prior: NormalInvGamma::new_unchecked(0.0, 0.054, 1.12, 0.4),
            n_samples: 1_000_000,
            coverage: 0.95,
            seed: 1337,
            data: vec![1.0, 2.0, 3.0, 4.0],
        }
    }
}

fn load_config() -> Result<ExerciseConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            let text = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&text)?)
        }
        None => Ok(ExerciseConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    let prior = &config.prior;
    let mut rng = rand::rngs::SmallRng::seed_from_u64(config.seed);

    println!("prior: {prior}");

    let samples = prior.sample_batch(config.n_samples, &mut rng)?;
    let mc = samples.interval(config.coverage)?;
    let exact = prior.marginal_interval(config.coverage)?;

    let pct = 100.0 * config.coverage;
    println!("{pct}% intervals from {} draws", samples.len());
    println!("  x   (Monte Carlo): [{:.4}, {:.4}]", mc.mu.0, mc.mu.1);
    println!("  x   (exact):       [{:.4}, {:.4}]", exact.mu.0, exact.mu.1);
    println!("  σ²  (Monte Carlo): [{:.4}, {:.4}]", mc.sigma2.0, mc.sigma2.1);
    println!(
        "  σ²  (exact):       [{:.4}, {:.4}]",
        exact.sigma2.0, exact.sigma2.1
    );

    let post = prior.posterior_from_data(&config.data)?;
    println!("posterior after {:?}: {post}", config.data);

    Ok(())
}
