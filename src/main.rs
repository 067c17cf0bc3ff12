use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use movie_browser::config::AppConfig;
use movie_browser::external::{MovieProvider, TmdbClient, TmdbError, TmdbPageResponse};
use movie_browser::models::{catalog, FilterState};
use movie_browser::services::{FetchTicket, QueryController};
use movie_browser::ui::{render, Effect, Session, HELP_TEXT};

type Completion = (FetchTicket, Result<TmdbPageResponse, TmdbError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // 日志输出到 stderr，避免和界面混在一起
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let provider: Arc<dyn MovieProvider> = Arc::new(TmdbClient::from_config(&config.tmdb)?);

    let filters = FilterState::with_language(config.language.clone());
    let controller = QueryController::try_new(filters, config.page_policy)?;
    let mut session = Session::new(
        controller,
        config.tmdb.image_base_url.clone(),
        catalog::current_year(),
    );

    tracing::info!(
        "Starting movie browser (language: {}, page policy: {:?})",
        config.language,
        config.page_policy
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    dispatch(&provider, &tx, session.start());
    println!("{}", render(&session));

    // 按字节读取，非 UTF-8 的行只产生提示
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut line = Vec::new();

    loop {
        tokio::select! {
            read = stdin.read_until(b'\n', &mut line) => {
                if read? == 0 {
                    break;
                }
                let effect = session.handle_input(&line);
                line.clear();

                match effect {
                    Some(Effect::Fetch(ticket)) => dispatch(&provider, &tx, ticket),
                    Some(Effect::ShowHelp) => println!("{}", HELP_TEXT),
                    Some(Effect::Quit) => break,
                    Some(Effect::None) => {}
                    None => continue,
                }
                println!("{}", render(&session));
            }
            Some((ticket, result)) = rx.recv() => {
                if session.complete_fetch(&ticket, result) {
                    println!("{}", render(&session));
                }
            }
        }
    }

    Ok(())
}

/// 在后台执行请求，结果通过 channel 交回主循环
fn dispatch(
    provider: &Arc<dyn MovieProvider>,
    tx: &mpsc::UnboundedSender<Completion>,
    ticket: FetchTicket,
) {
    let provider = Arc::clone(provider);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = provider.fetch_page(&ticket.request).await;
        if tx.send((ticket, result)).is_err() {
            tracing::debug!("Session closed before the response arrived");
        }
    });
}
