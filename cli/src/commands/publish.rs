use pubnub_cli::{output::parse_payload, Result};
use pubnub_link::PubNubClient;

pub async fn handle_publish(client: &PubNubClient, channel: &str, message: &str) -> Result<()> {
    let payload = parse_payload(message);
    tracing::debug!("Publishing {} to {}", payload, channel);

    let timestamp = client.publish(channel, &payload).await?;
    println!("{}", timestamp);
    Ok(())
}
