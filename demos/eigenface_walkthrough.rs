use eigenface::analysis::{class_bases, distance_analysis};
use eigenface::metrics::reconstruction_curve;
use eigenface::preprocessing::{center, compute_mean};
use eigenface::{SyntheticCorpus, compute_basis, project_all};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Eigenface Walkthrough ===\n");

    // 40 people, 10 images each, 10x8 pixels flattened
    let corpus = SyntheticCorpus::new(40, 10, 80).seed(42).generate()?;
    println!(
        "Corpus: {} vectors of dimension {}, {} classes",
        corpus.n_samples(),
        corpus.n_features(),
        corpus.n_classes()
    );

    println!("\n=== Mean and Centering ===");
    let mean = compute_mean(&corpus.features)?;
    let centered = center(&corpus.features, &mean)?;
    println!("Mean vector (first 8): {:.3}", mean.slice(ndarray::s![..8]));

    println!("\n=== Eigenbasis ===");
    let basis = compute_basis(&centered, 50)?;
    let cumulative = basis.cumulative_variance();
    println!("{:<12} {:>14} {:>14}", "Component", "Eigenvalue", "Cumulative");
    println!("{}", "-".repeat(42));
    for i in [0, 1, 2, 4, 9, 19, 49] {
        if i < basis.n_components() {
            println!("{:<12} {:>14.6} {:>13.2}%", i + 1, basis.eigenvalues[i], cumulative[i] * 100.0);
        }
    }

    println!("\n=== Reconstruction Quality ===");
    let face = corpus.features.row(0).to_owned();
    let curve = reconstruction_curve(&face, &basis, &mean, &[1, 5, 10, 20, 50])?;
    println!("{:<12} {:>12} {:>12}", "Components", "MSE", "PSNR (dB)");
    for point in &curve {
        println!("{:<12} {:>12.6} {:>12.2}", point.n_components, point.mse, point.psnr);
    }

    println!("\n=== Per-Class Eigenfaces ===");
    for class_basis in class_bases(&corpus, 5)?.iter().take(5) {
        let ratio = class_basis.basis.explained_variance_ratio();
        println!(
            "Person {:>2}: leading component explains {:.1}% of within-person variance",
            class_basis.label + 1,
            ratio[0] * 100.0
        );
    }

    println!("\n=== Distance Analysis ===");
    let coordinates = project_all(&centered, &basis)?;
    let analysis = distance_analysis(&coordinates, &corpus.labels)?;
    if let (Some(within), Some(between)) = (analysis.within_class, analysis.between_class) {
        println!("Same person:      mean={:.4}, std={:.4}", within.mean, within.std);
        println!("Different person: mean={:.4}, std={:.4}", between.mean, between.std);
    }
    if let Some(ratio) = analysis.separation_ratio {
        println!("Distance ratio: {:.4}", ratio);
    }
    println!(
        "Best threshold: {:.4} (pair accuracy {:.2}%)",
        analysis.best_threshold,
        analysis.threshold_accuracy * 100.0
    );

    Ok(())
}
