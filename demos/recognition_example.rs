use eigenface::{EngineConfig, SyntheticCorpus, evaluate, sweep_components};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Eigenface Recognition Example ===\n");

    let corpus = SyntheticCorpus::new(40, 10, 80)
        .variation_scale(0.2)
        .seed(42)
        .generate()?;

    let config = EngineConfig::from_json(r#"{ "n_components": 50, "test_fraction": 0.2, "seed": 42 }"#)?;
    let report = evaluate(&corpus, &config)?;

    println!("Components used: {}", report.n_components);
    println!("Correct: {}/{}", report.n_correct, report.n_test);
    println!("Accuracy: {:.2}%", report.accuracy * 100.0);

    println!("\nMisclassified test instances:");
    for p in report.predictions.iter().filter(|p| !p.is_correct()) {
        println!(
            "  row {:>3}: person {:>2} recognised as person {:>2} (neighbour row {}, distance {:.4})",
            p.index,
            p.true_label + 1,
            p.predicted_label + 1,
            p.neighbor,
            p.distance
        );
    }

    println!("\n=== Accuracy vs Number of Components ===");
    let ks = [5, 10, 20, 50, 100, 200];
    let reports = sweep_components(&corpus, &ks, config.test_fraction, config.seed)?;
    println!("{:<12} {:>10} {:>12}", "Requested", "Used", "Accuracy");
    println!("{}", "-".repeat(36));
    for (k, r) in ks.iter().zip(&reports) {
        println!("{:<12} {:>10} {:>11.2}%", k, r.n_components, r.accuracy * 100.0);
    }

    Ok(())
}
