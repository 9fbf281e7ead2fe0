mod common;

use common::{client_from_env, init_tracing, required_env};
use notify_africa::MessageId;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let client = client_from_env()?;
    let message_id = MessageId::new(required_env("NOTIFY_AFRICA_MESSAGE_ID")?)?;

    let response = client.get_message_status(&message_id).await?;
    println!(
        "message_id: {}, status: {:?}",
        response.message_id.as_str(),
        response.status
    );

    Ok(())
}
