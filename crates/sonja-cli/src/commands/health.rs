use sonja_client::SonjaClient;

pub async fn run(client: &SonjaClient) -> anyhow::Result<()> {
    match client.health().await {
        Ok(()) => {
            println!("Backend bereikbaar op {}", client.base_url());
            Ok(())
        }
        Err(e) if e.is_unreachable() => {
            println!("Backend niet bereikbaar op {}", client.base_url());
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
