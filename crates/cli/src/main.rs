use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use symptom_core::{ClassifierService, CoreConfig, ModelInfo, DEFAULT_TOP_K};

/// Symptoms used to smoke-test a freshly trained model.
const SMOKE_TEST_SYMPTOMS: [&str; 3] = [
    "I have a headache and feel dizzy",
    "My skin is red and itchy with scaly patches",
    "I have chest pain and shortness of breath",
];

#[derive(Parser)]
#[command(name = "symptom")]
#[command(about = "AI symptom checker CLI")]
struct Cli {
    /// Directory holding the model artifacts
    #[arg(long, env = "SYMPTOM_MODEL_DIR", default_value = symptom_core::DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the classifier on a labelled dataset and save it
    Train {
        /// CSV/TSV file with `text` and `label` columns
        dataset: PathBuf,
    },
    /// Rank likely conditions for a symptom description
    Predict {
        /// Free-text symptoms
        symptoms: String,
        /// Number of ranked conditions to consider
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Show the saved model's status
    Info,
}

fn print_predictions(service: &ClassifierService, symptoms: &str, top_k: usize) {
    match service.predict(symptoms, top_k) {
        Ok(predictions) if predictions.is_empty() => println!("  - No predictions found"),
        Ok(predictions) => {
            for p in predictions {
                println!(
                    "  - {}: {:.1}% ({})",
                    p.condition,
                    p.probability * 100.0,
                    p.urgency
                );
            }
        }
        Err(e) => eprintln!("  - Error predicting: {}", e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symptom_core=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Arc::new(CoreConfig::new(cli.model_dir.clone(), DEFAULT_TOP_K)?);
    let service = ClassifierService::new(cfg);

    match cli.command {
        Some(Commands::Train { dataset }) => {
            if !dataset.is_file() {
                eprintln!("Error: Dataset file '{}' not found!", dataset.display());
                eprintln!("Please make sure the file exists and try again.");
                return Ok(());
            }

            println!("Starting training with dataset: {}", dataset.display());
            println!("This may take a few minutes...");

            match service.train(&dataset) {
                Ok(accuracy) => {
                    println!("Training completed successfully!");
                    println!("Model accuracy: {:.1}%", accuracy * 100.0);
                    println!("Model saved to: {}", service.config().pipeline_path().display());

                    println!("Testing the model...");
                    for symptoms in SMOKE_TEST_SYMPTOMS {
                        println!("Test: '{}'", symptoms);
                        print_predictions(&service, symptoms, 2);
                    }
                    println!("Model is ready to use! Start the API server with: symptom-run");
                }
                Err(e) => {
                    eprintln!("Training failed: {}", e);
                    eprintln!("Please check your dataset format and try again.");
                }
            }
        }
        Some(Commands::Predict { symptoms, top_k }) => {
            print_predictions(&service, &symptoms, top_k);
        }
        Some(Commands::Info) => {
            if let Err(e) = service.load() {
                eprintln!("Error loading model: {}", e);
            }
            match service.model_info() {
                ModelInfo::NotTrained => println!("Status: not trained"),
                ModelInfo::Trained {
                    total_conditions,
                    conditions,
                    model_type,
                } => {
                    println!("Status: trained ({})", model_type);
                    println!("Conditions ({}):", total_conditions);
                    for condition in conditions {
                        println!("  - {}", condition);
                    }
                }
            }
        }
        None => {
            println!("Use 'symptom --help' for commands");
        }
    }

    Ok(())
}
