use pubnub_cli::Result;
use pubnub_link::PubNubClient;

pub async fn handle_time(client: &PubNubClient) -> Result<()> {
    let time = client.time().await?;
    println!("{}", time);
    Ok(())
}
