//! Score a synthetic stream and print every flagged sample

use dema_anomaly::{AnomalyScorer, RecordingObserver, ScorerParameters};
use dema_signal::{Injection, RngSource, SignalGenerator, SignalParameters};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Streaming Anomaly Scoring ===\n");

    let signal = SignalParameters::new(500, 2.0, 50)?;
    let generator = SignalGenerator::new(signal, RngSource::seeded(2024))?;

    let params = ScorerParameters::new(20, 0.3, 30, 3.0)?;
    let mut scorer = AnomalyScorer::with_observer(params, RecordingObserver::new())?;

    let mut injected = 0;
    let mut caught = 0;
    for sample in generator {
        let verdict = scorer.evaluate(sample.value, sample.index as f64);
        if sample.injection.is_some() {
            injected += 1;
            if verdict.is_anomaly {
                caught += 1;
            }
        }
        if verdict.is_anomaly {
            let label = match sample.injection {
                Some(Injection::Spike) => "spike",
                Some(Injection::Drop) => "drop",
                None => "organic",
            };
            println!("  {verdict}  [{label}]");
        }
    }

    let flagged = scorer.observer().events().len();
    println!("\nInjected perturbations: {injected}");
    println!("Caught perturbations:   {caught}");
    println!("Total flagged samples:  {flagged}");

    Ok(())
}
