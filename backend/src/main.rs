use std::sync::Arc;

use backend::{server, state, types::Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    environment.init_tracing();

    let dispatcher = Arc::new(state::build_dispatcher(&environment).await);

    server::start(dispatcher).await
}
