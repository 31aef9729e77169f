use anyhow::Result;
use clap::Parser;
use pubmed_lookup::cli::{PubmedUrl, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = PubmedUrl::parse();
    init_tracing(args.common.verbose);

    let mut stdout = std::io::stdout();
    args.execute(&mut stdout).await
}
