use sonja_client::SonjaClient;

use super::{print_assist, run_streaming};

pub async fn run(
    client: &SonjaClient,
    url: &str,
    prompt: Option<&str>,
    no_stream: bool,
) -> anyhow::Result<()> {
    if no_stream {
        let resp = client.analyze_website(url, prompt).await?;
        print_assist(&resp);
    } else {
        let outcome = run_streaming(|tx| client.analyze_website_stream(url, prompt, tx)).await?;
        println!("\n{}", outcome.response);
    }
    Ok(())
}
