// Synthetic reading publisher - stands in for a real sensor gateway
use rand::Rng;
use rumqttc::{AsyncClient, QoS};
use std::time::Duration;
use tokio::sync::watch;

/// Publish a synthetic multi-pollutant reading every `interval_secs` until
/// shutdown. The pipeline cannot tell these apart from real gateway traffic.
pub async fn run_publisher(
    client: AsyncClient,
    topic: String,
    interval_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("shutdown requested, stopping simulator");
                break;
            }
            _ = ticker.tick() => {
                let reading = synthetic_reading(chrono::Utc::now().timestamp());
                let payload = match serde_json::to_vec(&reading) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::error!("failed to encode synthetic reading: {e}");
                        continue;
                    }
                };
                match client.publish(topic.clone(), QoS::AtLeastOnce, false, payload).await {
                    Ok(_) => tracing::debug!(topic = %topic, "published synthetic reading"),
                    Err(e) => tracing::error!(topic = %topic, "simulator publish failed: {e}"),
                }
            }
        }
    }
}

/// Random concentrations across the plausible band of each scale. The fine
/// particulate uses the dotted wire key real gateways send, so the
/// normalization path is exercised end to end.
fn synthetic_reading(timestamp: i64) -> serde_json::Value {
    let mut rng = rand::thread_rng();
    serde_json::json!({
        "timestamp": timestamp,
        "pm2.5": (rng.gen_range(0.0..300.0f64) * 10.0).round() / 10.0,
        "co2": rng.gen_range(300.0..5000.0f64).round(),
        "nh3": (rng.gen_range(0.0..5.0f64) * 100.0).round() / 100.0,
        "alcohol": (rng.gen_range(0.0..1.0f64) * 1000.0).round() / 1000.0,
        // ppb on the wire; the calculator converts to ppm
        "benzene": (rng.gen_range(0.0..50.0f64) * 10.0).round() / 10.0,
        "smoke": (rng.gen_range(0.0..0.5f64) * 1000.0).round() / 1000.0,
    })
}
