use anyhow::Result;
use clap::Parser;
use pubmed_lookup::cli::{PubmedCitation, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = PubmedCitation::parse();
    init_tracing(args.common.verbose);

    let mut stdout = std::io::stdout();
    args.execute(&mut stdout).await
}
