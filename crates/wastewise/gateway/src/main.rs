use anyhow::anyhow;
use tokio::{spawn, task::JoinHandle};
use tracing::{error, info};
use wastewise_api::component::NetworkComponentExt;
use wastewise_core::signal::FunctionSignal;
use wastewise_gateway::Gateway;

#[::tokio::main]
async fn main() {
    ::wastewise_core::tracer::init_once();
    info!("Welcome to wastewise gateway!");

    let signal = FunctionSignal::default();
    if let Err(error) = signal.trap_on_sigint() {
        error!("{error}");
        return;
    }

    info!("Booting...");
    let gateway = match <Gateway as NetworkComponentExt>::try_default(&signal).await {
        Ok(gateway) => gateway,
        Err(error) => signal.panic(anyhow!("failed to init wastewise gateway: {error}")),
    };

    info!("Registering gateway workers...");
    let handlers = spawn_workers(&gateway);

    info!("Ready");
    signal.wait_to_terminate().await;

    info!("Terminating...");
    for handler in handlers {
        handler.abort();
    }

    if let Err(error) = gateway.close().await {
        error!("{error}");
    };

    signal.exit()
}

fn spawn_workers(gateway: &Gateway) -> Vec<JoinHandle<()>> {
    vec![spawn(::wastewise_gateway::actix::loop_forever(gateway.clone()))]
}
