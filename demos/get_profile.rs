mod common;

use common::{client_from_env, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let client = client_from_env()?;
    match client.get_profile().await {
        Ok(profile) => {
            for (key, value) in &profile.data {
                println!("{key}: {value}");
            }
        }
        Err(err) => {
            eprintln!("profile request failed ({:?}): {err}", err.kind());
            if let Some(status) = err.status() {
                eprintln!("status: {status}");
            }
            if let Some(body) = err.body() {
                eprintln!("body: {body}");
            }
            return Err(err.into());
        }
    }

    Ok(())
}
