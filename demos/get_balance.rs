mod common;

use common::{client_from_env, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let client = client_from_env()?;
    let response = client.get_balance().await?;
    println!(
        "balance: {} ({})",
        response.balance.as_f64(),
        response.balance.as_str()
    );

    Ok(())
}
