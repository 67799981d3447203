// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use figment::Figment;
use tokio::task::JoinHandle;

use medpredict_diagnosis::{
    build_model, http::HttpService, ClassifierBackend, DiagnosisError, DiagnosisModel,
    ModelHandle, ServiceConfig,
};
use medpredict_runtime::{logging, raise, ErrorContext, Result, Runtime};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host for the HTTP service
    #[arg(long)]
    host: Option<String>,

    /// Port number for the HTTP service
    #[arg(short, long)]
    port: Option<u16>,

    /// Training dataset (CSV)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Holdout dataset scored after training (CSV, same layout as --dataset)
    #[arg(long)]
    evaluation_dataset: Option<PathBuf>,

    /// Classifier backend: random_forest or prior
    #[arg(long)]
    backend: Option<ClassifierBackend>,

    /// TOML config file; same as setting MEDPREDICT_CONFIG_PATH
    #[arg(long, env = "MEDPREDICT_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Exit instead of serving 503s when startup training fails
    #[arg(long, default_value = "false")]
    exit_on_training_failure: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let runtime = Runtime::from_current()?;
    runtime.shutdown_on_signal();
    app(runtime).await
}

async fn app(runtime: Runtime) -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    tracing::debug!(?config, "service configuration");

    let model = ModelHandle::new();
    let http_service = HttpService::new(model.clone(), &config.http);

    // serve while training; requests see 503 until the model is ready
    let training = runtime.handle().spawn_blocking({
        let model = model.clone();
        let dataset = config.dataset.clone();
        let classifier = config.classifier.clone();
        move || model.train_with(|| build_model(&dataset, &classifier))
    });

    let training_failed =
        watch_training(&runtime, training, config.model.exit_on_training_failure);

    http_service.run(runtime.child_token()).await?;

    if training_failed.load(Ordering::SeqCst) {
        raise!("model training failed");
    }
    Ok(())
}

/// Log the training outcome. With `exit_on_failure`, a failure is recorded in the returned
/// flag and then shuts the runtime down; the flag is set before the shutdown it triggers.
fn watch_training(
    runtime: &Runtime,
    training: JoinHandle<std::result::Result<Arc<DiagnosisModel>, DiagnosisError>>,
    exit_on_failure: bool,
) -> Arc<AtomicBool> {
    let training_failed = Arc::new(AtomicBool::new(false));
    runtime.spawn({
        let runtime = runtime.clone();
        let training_failed = training_failed.clone();
        async move {
            let failed = match training.await {
                Ok(Ok(model)) => {
                    tracing::info!(
                        symptoms = model.vocabulary().len(),
                        accuracy = model.report().reported_accuracy(),
                        "model ready"
                    );
                    false
                }
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "model training failed");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "model training task did not complete");
                    true
                }
            };
            if failed && exit_on_failure {
                training_failed.store(true, Ordering::SeqCst);
                runtime.shutdown();
            }
        }
    });
    training_failed
}

fn load_config(args: &Args) -> Result<ServiceConfig> {
    let mut figment: Figment = ServiceConfig::figment_for(args.config.as_deref());
    if let Some(host) = &args.host {
        figment = figment.merge(("http.host", host.clone()));
    }
    if let Some(port) = args.port {
        figment = figment.merge(("http.port", port));
    }
    if let Some(dataset) = &args.dataset {
        figment = figment.merge(("dataset.path", dataset.clone()));
    }
    if let Some(evaluation) = &args.evaluation_dataset {
        figment = figment.merge(("dataset.evaluation_path", evaluation.clone()));
    }
    if let Some(backend) = args.backend {
        figment = figment.merge(("classifier.backend", backend));
    }
    if args.exit_on_training_failure {
        figment = figment.merge(("model.exit_on_training_failure", true));
    }

    ServiceConfig::extract_from(figment).context("invalid service configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_flag_uses_config_names() {
        let args = Args::try_parse_from(["medpredict-http", "--backend", "prior"]).unwrap();
        assert_eq!(args.backend, Some(ClassifierBackend::Prior));
        let args =
            Args::try_parse_from(["medpredict-http", "--backend", "random_forest"]).unwrap();
        assert_eq!(args.backend, Some(ClassifierBackend::RandomForest));
        assert!(Args::try_parse_from(["medpredict-http", "--backend", "forest"]).is_err());
    }

    #[tokio::test]
    async fn test_training_failure_is_flagged_before_shutdown() {
        let runtime = Runtime::from_current().unwrap();
        let token = runtime.child_token();
        let training = tokio::task::spawn_blocking(|| {
            Err(DiagnosisError::Configuration("missing dataset".into()))
        });

        let failed = watch_training(&runtime, training, true);
        token.cancelled().await;
        assert!(failed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_training_failure_without_exit_keeps_running() {
        let runtime = Runtime::from_current().unwrap();
        let training = tokio::task::spawn_blocking(|| {
            Err(DiagnosisError::Configuration("missing dataset".into()))
        });

        let failed = watch_training(&runtime, training, false);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!failed.load(Ordering::SeqCst));
        assert!(!runtime.is_cancelled());
    }
}
