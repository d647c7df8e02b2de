use backend::{lambda, state, types::Environment};
use lambda_http::{run, service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let environment = Environment::from_env();
    environment.init_tracing();

    let dispatcher = state::build_dispatcher(&environment).await;

    run(service_fn(|event| lambda::handle(&dispatcher, event))).await
}
