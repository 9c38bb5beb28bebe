//! Provisioning binary: setup, rules patch, verification.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use farmhub_firestore::FirestoreClient;
use farmhub_models::RulePatch;
use farmhub_provision::{
    ProvisionConfig, Provisioner, RulePatcher, SystemClock, Verifier, FIRMWARE_COLLECTIONS,
};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("farmhub=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting farmhub-provision");

    let config = ProvisionConfig::from_env();
    info!(
        user_id = %config.user_id,
        device_id = %config.device_id,
        "Provision config loaded"
    );

    let client = match FirestoreClient::from_env().await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create Firestore client: {}", e);
            std::process::exit(1);
        }
    };

    let user_id = config.user_id.clone();
    let device_id = config.device_id.clone();

    // Phase 1: provision the document tree. On failure the remaining writes
    // of this phase are skipped, but the patch and verify phases still run.
    let provisioner = Provisioner::new(client.clone(), Arc::new(SystemClock), config);
    match provisioner.run().await {
        Ok(report) => {
            info!("Provisioned paths:");
            for path in &report.written {
                info!("  {}", path);
            }
            info!("Firmware-created collections (not provisioned here):");
            for name in FIRMWARE_COLLECTIONS {
                info!("  users/{}/devices/{}/{}", user_id, device_id, name);
            }
        }
        Err(e) => error!("Setup failed: {}", e),
    }

    // Phase 2: tighten the motor and water rules for a quick end-to-end test.
    let patcher = RulePatcher::new(client.clone(), &user_id, &device_id);
    if let Err(e) = patcher.patch(&RulePatch::default()).await {
        error!("Rules patch failed: {}", e);
    }

    // Phase 3: read back and report.
    let verifier = Verifier::new(client, &user_id, &device_id);
    let report = verifier.verify().await;
    if report.all_present() {
        info!(rule_keys = ?report.rule_keys, "Device is ready to connect");
    } else {
        error!(
            user = ?report.user_exists,
            device = ?report.device_exists,
            rules = ?report.rules_exist,
            "Verification found missing documents"
        );
    }
}
