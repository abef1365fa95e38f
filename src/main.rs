use camino::Utf8PathBuf;
use clap::Parser;
use tokio::task::JoinSet;

use huepanel::config;
use huepanel::error::ApiResult;
use huepanel::poller;
use huepanel::server;
use huepanel::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file (yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: Utf8PathBuf,
}

fn init_logging() -> ApiResult<()> {
    let mut builder = pretty_env_logger::formatted_timed_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        let filters = [
            "debug",
            "tower_http::trace::on_request=info",
            "axum::rejection=trace",
            "reqwest=info",
            "hyper=info",
        ];
        builder.parse_filters(&filters.join(","));
    }

    Ok(builder.try_init()?)
}

fn build_tasks(appstate: &AppState) -> JoinSet<ApiResult<()>> {
    let mut tasks = JoinSet::new();

    let conf = appstate.config();
    let svc = server::build_service(appstate.clone());

    tasks.spawn(server::http_server(conf.panel.listen_addr(), svc));
    tasks.spawn(poller::run_forever(appstate.clone()));

    tasks
}

async fn run() -> ApiResult<()> {
    init_logging()?;

    let args = Args::parse();

    let config = config::parse(&args.config)?;
    log::debug!("Configuration loaded successfully");

    let appstate = AppState::from_config(config);

    let mut tasks = build_tasks(&appstate);

    loop {
        match tasks.join_next().await {
            None => break Ok(()),
            Some(Ok(Ok(res))) => log::info!("Worker returned: {res:?}"),
            Some(Ok(Err(res))) => log::error!("Worker task failed: {res:?}"),
            Some(Err(err)) => log::error!("Error spawning from worker: {err:?}"),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("Huepanel error: {err}");
        log::error!("Fatal error encountered, cannot continue.");
    }
}
