use blackjack::{Round, Shoe, DEFAULT_DECK_COUNT};
use blackjack_api::Server;
use clap::Parser;

#[derive(Parser)]
#[command(name = "blackjack-api", about = "Single-player blackjack table over HTTP")]
struct Cli {
    /// Address to serve on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5000")]
    bind: String,

    /// Number of decks in the shoe
    #[arg(long, env = "DECK_COUNT", default_value_t = DEFAULT_DECK_COUNT)]
    decks: u8,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let shoe = Shoe::new(cli.decks)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    log::info!("shoe ready with {} decks", cli.decks);

    Server::run(Round::new(shoe), &cli.bind).await
}
