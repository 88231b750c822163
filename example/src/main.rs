use tracing::trace_span;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use pgplus::Result;

mod decode;
mod encode;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::Registry::default()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    pgplus::setup_type_overrides();

    trace_span!("decode").in_scope(decode::main)?;
    trace_span!("encode").in_scope(encode::main)?;

    Ok(())
}
