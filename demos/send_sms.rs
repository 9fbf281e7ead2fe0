mod common;

use common::{client_from_env, init_tracing, required_env};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let client = client_from_env()?;
    let phones = required_env("NOTIFY_AFRICA_PHONE")?;
    let message = std::env::var("NOTIFY_AFRICA_MESSAGE")
        .unwrap_or_else(|_| "Hello from the notify-africa demo.".to_owned());

    let response = client.send_sms(phones.split(','), message).await?;

    println!("message: {:?}", response.message);
    for recipient in &response.recipients {
        println!(
            "{}: accepted={}, status={:?}, message_id={:?}",
            recipient.phone, recipient.accepted, recipient.status, recipient.message_id
        );
    }

    Ok(())
}
