use anyhow::{bail, Context};
use geneseq::config::{AppConfig, ConfigManager};
use geneseq::data::{vectors, FileStore};
use geneseq::generation::nested_sample;
use std::env;
use std::path::Path;

const CONFIG_FILE: &str = "geneseq.toml";

fn usage() -> &'static str {
    "usage:\n  \
     geneseq generate <genome-file>\n  \
     geneseq record <genome-file> <vectors-file>\n  \
     geneseq verify <genome-file> <vectors-file>\n  \
     geneseq read <genome-file> [count] [min] [max]\n  \
     geneseq mutate <genome-file> [out-file]\n  \
     geneseq breed <parent-file> <donor-file> <out-file>\n  \
     geneseq config"
}

fn load_config() -> anyhow::Result<AppConfig> {
    let mut manager = ConfigManager::new();
    if Path::new(CONFIG_FILE).exists() {
        manager
            .load_from_file(CONFIG_FILE)
            .with_context(|| format!("reading {}", CONFIG_FILE))?;
    }
    Ok(manager.get())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = load_config()?;

    match args.get(1).map(|s| s.as_str()) {
        Some("generate") => {
            let path = args.get(2).context(usage())?;
            let mut rng = config.sequence.build_rng();
            let sequence = config.sequence.random_sequence(&mut rng)?;
            sequence.save_to(&mut FileStore::new(path))?;
            println!("Wrote {} genes to {}", sequence.len(), path);
        }
        Some("record") | Some("verify") => {
            let (Some(genome_path), Some(vectors_path)) = (args.get(2), args.get(3)) else {
                bail!(usage());
            };
            let mut sequence = config.sequence.load_sequence(&mut FileStore::new(genome_path))?;
            let values = nested_sample(
                &mut sequence,
                &config.harness.traversal_shape(),
                config.harness.min,
                config.harness.max,
            )?;

            if args[1] == "record" {
                vectors::write_vectors(vectors_path, &values)?;
                println!("Recorded {} values to {}", values.len(), vectors_path);
            } else {
                let recorded = vectors::read_vectors(vectors_path)?;
                let report = vectors::verify(&values, &recorded);
                for mismatch in &report.mismatches {
                    println!(
                        "#{}: expected {:?} recorded {:?}",
                        mismatch.index, mismatch.expected, mismatch.recorded
                    );
                }
                println!("{} values matched", report.matched);
                if !report.is_clean() {
                    bail!("{} values did not match", report.mismatches.len());
                }
            }
        }
        Some("read") => {
            let path = args.get(2).context(usage())?;
            let count = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);
            let min = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(config.harness.min);
            let max = args.get(5).and_then(|s| s.parse().ok()).unwrap_or(config.harness.max);

            let mut sequence = config.sequence.load_sequence(&mut FileStore::new(path))?;
            for _ in 0..count {
                let cursor = sequence.cursor();
                println!("{:>6}  {}", cursor, sequence.read_next(min, max));
            }
        }
        Some("mutate") => {
            let path = args.get(2).context(usage())?;
            let out = args.get(3).unwrap_or(path);
            let mut rng = config.sequence.build_rng();

            let mut sequence = config.sequence.load_sequence(&mut FileStore::new(path))?;
            let selected = config.sequence.mutate(&mut sequence, &mut rng);
            sequence.save_to(&mut FileStore::new(out))?;
            println!(
                "Mutated {} of {} genes ({:?}), wrote {}",
                selected,
                sequence.len(),
                config.sequence.mutation_modulus,
                out
            );
        }
        Some("breed") => {
            let (Some(parent_path), Some(donor_path), Some(out)) =
                (args.get(2), args.get(3), args.get(4))
            else {
                bail!(usage());
            };
            let mut rng = config.sequence.build_rng();

            let parent = config.sequence.load_sequence(&mut FileStore::new(parent_path))?;
            let donor = config.sequence.load_sequence(&mut FileStore::new(donor_path))?;
            let child = parent.breed(&donor, &mut rng);
            child.save_to(&mut FileStore::new(out))?;
            println!("Wrote child of {} genes to {}", child.len(), out);
        }
        Some("config") => {
            println!("{}", serde_json::to_string_pretty(&config.manifests())?);
        }
        _ => bail!(usage()),
    }

    Ok(())
}
