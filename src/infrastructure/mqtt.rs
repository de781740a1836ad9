// MQTT transport - client bootstrap and the subscriber loop
use crate::application::dispatcher::MessageDispatcher;
use crate::infrastructure::config::MqttSettings;
use rumqttc::{AsyncClient, Event, EventLoop, Incoming, MqttOptions, QoS};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub fn connect(settings: &MqttSettings) -> (AsyncClient, EventLoop) {
    let mut options = MqttOptions::new(
        settings.client_id.clone(),
        settings.host.clone(),
        settings.port,
    );
    options.set_keep_alive(Duration::from_secs(settings.keep_alive_secs));
    AsyncClient::new(options, 32)
}

/// Drive the MQTT event loop until shutdown. Inbound publishes are dispatched
/// inline and awaited, so messages are processed one at a time in arrival
/// order and a message's upload completes before the next poll. Transport
/// errors back off and re-poll; they never touch per-message handling.
pub async fn run_subscriber(
    client: AsyncClient,
    mut eventloop: EventLoop,
    topic: String,
    dispatcher: Arc<MessageDispatcher>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("shutdown requested, stopping subscriber");
                break;
            }
            event = eventloop.poll() => match event {
                Ok(Event::Incoming(Incoming::ConnAck(ack))) => {
                    tracing::info!(code = ?ack.code, "mqtt connected");
                    // Subscribe on every ConnAck so reconnects resubscribe.
                    match client.subscribe(topic.clone(), QoS::AtLeastOnce).await {
                        Ok(_) => tracing::info!(topic = %topic, "subscribed"),
                        Err(e) => tracing::error!(topic = %topic, "subscribe failed: {e}"),
                    }
                }
                Ok(Event::Incoming(Incoming::Publish(publish))) => {
                    dispatcher.handle_message(&publish.payload).await;
                }
                Ok(other) => tracing::trace!(?other, "mqtt event"),
                Err(e) => {
                    tracing::error!("mqtt event loop error: {e}; retrying in 2s");
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    }
}
