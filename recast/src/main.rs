use anyhow::Result;
use recast::greeter::{launch, Settings};
use recast::observability;

fn main() -> Result<()> {
    observability::init_tracing();
    launch(Settings::default())
}
